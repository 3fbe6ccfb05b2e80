use serde::{Deserialize, Serialize};

/// Model name sent with every chat request.
pub const MODEL: &str = "gpt-4o";

/// Sampling temperature sent with every chat request.
pub const TEMPERATURE: f64 = 0.7;

/// Completion length limit sent with every chat request.
pub const MAX_TOKENS: u32 = 1000;

/// The author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The system instructions.
    System,
    /// The person using the routine builder.
    User,
    /// The completion provider.
    Assistant,
}

/// A single message of a chat exchange.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[inline]
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The payload posted to the relay and forwarded to the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The input messages, oldest first.
    pub messages: Vec<ChatMessage>,
    /// The model to sample from.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Upper bound of generated tokens.
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Creates a request with the fixed model parameters.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: MODEL.to_owned(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wire_format() {
        let req = ChatRequest::new(vec![
            ChatMessage::system("You are a helpful advisor."),
            ChatMessage::user("hi"),
        ]);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "messages": [
                    {
                        "role": "system",
                        "content": "You are a helpful advisor."
                    },
                    { "role": "user", "content": "hi" }
                ],
                "model": "gpt-4o",
                "temperature": 0.7,
                "max_tokens": 1000
            })
        );
    }
}

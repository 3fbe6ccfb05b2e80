use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ReplyError;

/// A chat completion reply as returned through the relay.
///
/// Providers either answer with `choices` or with an `error` object, so
/// both are optional here and [`CompletionResponse::into_reply`] decides
/// which one wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated alternatives; only the first one is used.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// The provider's error object, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// One generated alternative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: Option<ChoiceMessage>,
}

/// The message of a [`Choice`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// The generated text.
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Extracts the text of the first choice.
    ///
    /// A present first choice always wins over an `error` field.
    pub fn into_reply(self) -> Result<String, ReplyError> {
        if let Some(message) =
            self.choices.into_iter().next().and_then(|c| c.message)
        {
            return Ok(message.content.unwrap_or_default());
        }
        match &self.error {
            Some(error) => Err(ReplyError::from_value(error)),
            None => Err(ReplyError::UnexpectedFormat),
        }
    }
}

use std::time::Duration;

use serde_json::Value;

/// The body of a preset response.
#[derive(Clone, Debug, PartialEq)]
pub enum PresetBody {
    /// Sent with `Content-Type: application/json`.
    Json(Value),
    /// Sent as `text/plain`, useful for simulating malformed replies.
    Text(String),
}

/// A canned reply the stub server sends for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: PresetBody,
    /// If set, the server waits this long before answering.
    pub delay: Option<Duration>,
}

impl PresetResponse {
    /// Creates a `200 OK` response with a JSON body.
    #[inline]
    pub fn with_json(body: Value) -> Self {
        Self {
            status: 200,
            body: PresetBody::Json(body),
            delay: None,
        }
    }

    /// Creates a `200 OK` response with a plain text body.
    #[inline]
    pub fn with_text<S: Into<String>>(body: S) -> Self {
        Self {
            status: 200,
            body: PresetBody::Text(body.into()),
            delay: None,
        }
    }

    /// Creates a chat completion reply whose first choice says `content`.
    pub fn with_reply<S: Into<String>>(content: S) -> Self {
        Self::with_json(serde_json::json!({
            "choices": [{ "message": { "content": content.into() } }]
        }))
    }

    /// Overrides the status code.
    #[inline]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Delays the response.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_reply_shape() {
        let preset = PresetResponse::with_reply("hello").with_status(201);
        assert_eq!(preset.status, 201);
        assert_eq!(
            preset.body,
            PresetBody::Json(json!({
                "choices": [{ "message": { "content": "hello" } }]
            }))
        );
    }
}

use serde_json::Value;
use thiserror::Error;

/// Returned when a catalog contains two products with the same `id`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("duplicate catalog item id {0}")]
pub struct DuplicateIdError(pub u64);

/// Why a [`CompletionResponse`](crate::CompletionResponse) carries no reply.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ReplyError {
    /// The provider answered with an `error` object instead of choices.
    #[error("{0}")]
    Provider(String),
    /// The reply has neither choices nor an error.
    #[error("Unexpected response format from relay")]
    UnexpectedFormat,
}

impl ReplyError {
    /// Builds a provider error from the raw `error` value.
    ///
    /// The `message` field is preferred; otherwise the whole value is
    /// rendered as JSON.
    pub(crate) fn from_value(error: &Value) -> Self {
        let message = match error.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => message.to_owned(),
            _ => error.to_string(),
        };
        Self::Provider(message)
    }
}

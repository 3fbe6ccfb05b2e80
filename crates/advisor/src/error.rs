use routine_model::ReplyError;
use thiserror::Error;

/// The relay endpoint is missing or unusable.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No relay URL was configured.
    #[error("Please set ROUTINE_RELAY_URL to the URL of your relay")]
    Unset,
    /// The configured relay URL could not be used.
    #[error("ROUTINE_RELAY_URL `{url}` is not a valid relay URL: {reason}")]
    Invalid {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors reported by the [`Advisor`](crate::Advisor).
#[derive(Debug, Error)]
pub enum Error {
    /// The relay endpoint is not configured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A routine was requested without any selected product.
    #[error("Please select at least one product to generate a routine.")]
    EmptySelection,
    /// A follow-up question was blank.
    #[error("message is empty")]
    EmptyMessage,
    /// The relay could not be reached or its reply could not be read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The relay answered with a non-success status.
    #[error("Relay request failed: {status} - {body}")]
    Relay {
        /// HTTP status code of the reply.
        status: u16,
        /// Raw reply body.
        body: String,
    },
    /// The provider answered with an error object.
    #[error("{0}")]
    Provider(String),
    /// The reply had neither choices nor an error.
    #[error("Unexpected response format from relay")]
    UnexpectedResponse,
}

impl From<ReplyError> for Error {
    fn from(err: ReplyError) -> Self {
        match err {
            ReplyError::Provider(message) => Self::Provider(message),
            ReplyError::UnexpectedFormat => Self::UnexpectedResponse,
        }
    }
}

use axum::Json;
use axum::http::StatusCode;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors the relay reports to its callers.
///
/// [`RelayError::MethodNotAllowed`] becomes a plain-text `405`; every
/// other variant becomes a `500` with a `{"error": <message>}` body.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request used a verb other than `POST` or `OPTIONS`.
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// The request body is not JSON.
    #[error("invalid request body: {0}")]
    InvalidRequest(#[source] serde_json::Error),
    /// The provider could not be reached or stopped mid-response.
    #[error("provider request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    /// The provider's body is not JSON.
    #[error("invalid provider response: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if let Self::MethodNotAllowed = self {
            return (StatusCode::METHOD_NOT_ALLOWED, self.to_string())
                .into_response();
        }

        error!("relay failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

//! A stateless relay that forwards chat completion requests to the
//! provider with a server-held API key.
//!
//! Clients post the complete request payload; the relay attaches the
//! credential, forwards the JSON verbatim and hands the provider's reply
//! back with its original status code. The relay never inspects the
//! payload, keeps no state between requests, and never retries.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod error;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use reqwest::Client;
use serde_json::Value;
use tower_http::trace::TraceLayer;

pub use config::{DEFAULT_BASE_URL, RelayConfig, RelayConfigBuilder};
pub use error::RelayError;

/// The relay service.
#[derive(Clone, Debug)]
pub struct Relay {
    client: Client,
    config: Arc<RelayConfig>,
}

impl Relay {
    /// Creates a relay with the given configuration.
    #[inline]
    pub fn new(config: RelayConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Builds the router serving the relay on every path.
    ///
    /// Request bodies are not size-limited; the provider decides what it
    /// accepts.
    pub fn into_router(self) -> Router {
        Router::new()
            .fallback(handle)
            .layer(DefaultBodyLimit::disable())
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    /// Forwards `body` to the provider and returns its status and JSON.
    async fn forward(
        &self,
        body: &[u8],
    ) -> Result<(StatusCode, Value), RelayError> {
        let payload: Value =
            serde_json::from_slice(body).map_err(RelayError::InvalidRequest)?;

        let resp = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = resp.status();
        let raw = resp.bytes().await?;
        let reply: Value =
            serde_json::from_slice(&raw).map_err(RelayError::InvalidResponse)?;

        debug!("provider answered {status}");
        Ok((status, reply))
    }
}

async fn handle(
    State(relay): State<Relay>,
    method: Method,
    body: Bytes,
) -> Response {
    match method {
        Method::OPTIONS => preflight(),
        Method::POST => match relay.forward(&body).await {
            Ok((status, reply)) => (
                status,
                [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                Json(reply),
            )
                .into_response(),
            Err(err) => err.into_response(),
        },
        _ => RelayError::MethodNotAllowed.into_response(),
    }
}

fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}

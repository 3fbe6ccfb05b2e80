use std::env;
use std::fmt::{self, Debug, Formatter};

use reqwest::{Client, Url};
use routine_model::{ChatRequest, CompletionResponse};

use crate::{ConfigurationError, Error};

/// The environment variable holding the relay URL.
pub const RELAY_URL_ENV: &str = "ROUTINE_RELAY_URL";

/// A way of getting a chat request answered.
///
/// Implementations resolve to the text of the assistant's reply.
pub trait ChatTransport: Send + Sync {
    /// Sends `req` and waits for the reply.
    fn send(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<String, Error>> + Send;
}

/// A validated relay URL.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RelayEndpoint(Url);

impl RelayEndpoint {
    /// Validates `url` as an HTTP(S) URL.
    pub fn parse(url: &str) -> Result<Self, ConfigurationError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::Unset);
        }
        let invalid = |reason: String| ConfigurationError::Invalid {
            url: trimmed.to_owned(),
            reason,
        };

        let parsed =
            Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "unsupported scheme `{}`",
                parsed.scheme()
            )));
        }
        Ok(Self(parsed))
    }

    /// Reads and validates [`RELAY_URL_ENV`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        match env::var(RELAY_URL_ENV) {
            Ok(url) => Self::parse(&url),
            Err(_) => Err(ConfigurationError::Unset),
        }
    }

    /// Returns the URL.
    #[inline]
    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl Debug for RelayEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RelayEndpoint").field(&self.0.as_str()).finish()
    }
}

/// A [`ChatTransport`] posting requests to the relay service.
#[derive(Clone, Debug)]
pub struct RelayClient {
    client: Client,
    endpoint: RelayEndpoint,
}

impl RelayClient {
    /// Creates a client for `endpoint`.
    #[inline]
    pub fn new(endpoint: RelayEndpoint) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

impl ChatTransport for RelayClient {
    fn send(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<String, Error>> + Send {
        let resp_fut = self
            .client
            .post(self.endpoint.url().clone())
            .json(req)
            .send();

        async move {
            let resp = resp_fut.await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                warn!("relay answered {status}: {body}");
                return Err(Error::Relay {
                    status: status.as_u16(),
                    body,
                });
            }

            let reply: CompletionResponse = resp.json().await?;
            Ok(reply.into_reply()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_validation() {
        assert_eq!(RelayEndpoint::parse("  "), Err(ConfigurationError::Unset));
        assert!(matches!(
            RelayEndpoint::parse("not a url"),
            Err(ConfigurationError::Invalid { .. })
        ));
        assert!(matches!(
            RelayEndpoint::parse("ftp://relay.example.com"),
            Err(ConfigurationError::Invalid { .. })
        ));

        let endpoint =
            RelayEndpoint::parse("https://relay.example.workers.dev/").unwrap();
        assert_eq!(
            endpoint.url().host_str(),
            Some("relay.example.workers.dev")
        );
    }
}

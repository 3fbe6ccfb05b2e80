use std::fmt::{self, Debug, Formatter};

/// The provider base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Builder for [`RelayConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RelayConfigBuilder {
    api_key: String,
    base_url: Option<String>,
}

impl RelayConfigBuilder {
    /// Creates a builder with the given API key.
    #[inline]
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Sets a custom provider base URL.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> RelayConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        RelayConfig {
            api_key: self.api_key,
            completions_url: format!(
                "{}/chat/completions",
                base_url.trim_end_matches('/')
            ),
        }
    }
}

impl Debug for RelayConfigBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfigBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration of the relay: where to forward and which key to attach.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RelayConfig {
    pub(crate) api_key: String,
    pub(crate) completions_url: String,
}

impl RelayConfig {
    /// Returns the provider's chat completions endpoint.
    #[inline]
    pub fn completions_url(&self) -> &str {
        &self.completions_url
    }
}

impl Debug for RelayConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("completions_url", &self.completions_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        let config = RelayConfigBuilder::with_api_key("sk-secret").build();
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let config = RelayConfigBuilder::with_api_key("sk-secret")
            .with_base_url("http://127.0.0.1:9000/v1/")
            .build();
        assert_eq!(
            config.completions_url(),
            "http://127.0.0.1:9000/v1/chat/completions"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let builder = RelayConfigBuilder::with_api_key("sk-secret");
        assert!(!format!("{builder:?}").contains("sk-secret"));
        assert!(!format!("{:?}", builder.build()).contains("sk-secret"));
    }
}

//! Client configuration options.

use std::time::Duration;

use crate::auth::Token;
use crate::Result;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api-audience.yandex.ru";

/// The only management API version currently served.
pub const API_VERSION: &str = "v1";

/// Configuration for the Yandex.Audience client.
///
/// # Example
///
/// ```
/// use yandex_audience::{ClientConfig, Token};
/// use std::time::Duration;
///
/// # fn example() -> yandex_audience::Result<()> {
/// let config = ClientConfig::new(Token::new("my-oauth-token")?)
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth token sent with every request
    pub token: Token,
    /// API host, overridable for testing
    pub base_url: String,
    /// API version path segment
    pub api_version: String,
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration with default values and the given token.
    pub fn new(token: Token) -> Self {
        Self {
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("yandex-audience-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a configuration whose token comes from the environment.
    ///
    /// See [`Token::from_env`] for the lookup order.
    pub fn from_env(fallback: Option<&str>) -> Result<Self> {
        Ok(Self::new(Token::from_env(fallback)?))
    }

    /// Point the client at another host (mock servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL of a management resource.
    pub(crate) fn management_url(&self, path: &str) -> String {
        format!(
            "{}/{}/management/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(Token::new("blah").unwrap())
    }

    #[test]
    fn test_default_config() {
        let config = config();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("yandex-audience-rs/"));
    }

    #[test]
    fn test_management_url() {
        let config = config();
        assert_eq!(
            config.management_url("accounts"),
            "https://api-audience.yandex.ru/v1/management/accounts"
        );

        let config = config.with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            config.management_url("/segment/42/grants"),
            "http://127.0.0.1:8080/v1/management/segment/42/grants"
        );
    }
}

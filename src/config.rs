//! Configuration options for the roster client

use std::time::Duration;

/// Environment variable overriding the base API address
pub const BASE_URL_ENV: &str = "ROSTER_API_BASE_URL";

/// Base API address used when no override is set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Storage key the bearer token is read from
pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// Configuration options for the roster client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// The base address every request path is appended to
    pub base_url: String,

    /// The token storage key
    pub token_key: String,

    /// The request timeout. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientOptions {
    /// Build options with the base address taken from `ROSTER_API_BASE_URL`,
    /// falling back to the local default.
    pub fn from_env() -> Self {
        Self::default().with_base_url(&resolve_base_url(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Set the base address
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.to_string();
        self
    }

    /// Set the token storage key
    pub fn with_token_key(mut self, value: &str) -> Self {
        self.token_key = value.to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}

fn resolve_base_url(value: Option<String>) -> String {
    match value {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_api() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "http://localhost:8080/api");
        assert_eq!(options.token_key, "authToken");
        assert!(options.request_timeout.is_none());
    }

    #[test]
    fn override_wins_when_present() {
        assert_eq!(
            resolve_base_url(Some("https://roster.example.com/api".to_string())),
            "https://roster.example.com/api"
        );
    }

    #[test]
    fn blank_override_falls_back() {
        assert_eq!(resolve_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(resolve_base_url(Some("  ".to_string())), DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_setters() {
        let options = ClientOptions::default()
            .with_token_key("jwt")
            .with_request_timeout(Some(Duration::from_secs(5)));
        assert_eq!(options.token_key, "jwt");
        assert_eq!(options.request_timeout, Some(Duration::from_secs(5)));
    }
}

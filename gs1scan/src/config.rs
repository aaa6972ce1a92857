//! Runtime configuration for backend access

use std::time::Duration;

/// Backend base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "GS1SCAN_API_URL";

/// Environment variable holding the backend API key
pub const API_KEY_ENV: &str = "GS1SCAN_API_KEY";

/// Configuration for the backend API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Value sent in the `X-API-Key` header
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create config for a base URL with no API key
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Read `GS1SCAN_API_URL` and `GS1SCAN_API_KEY`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build config from an arbitrary variable lookup; empty values count as unset
    pub(crate) fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            config = config.with_base_url(url);
        }
        if let Some(key) = lookup(API_KEY_ENV) {
            config.api_key = key;
        }

        config
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        self.base_url = base_url;
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an endpoint path such as `/api/products`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.api_key.is_empty());
        assert_eq!(config.endpoint_url("/api/partners"), "http://localhost:3000/api/partners");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (API_URL_ENV, "https://scan.example.com/"),
            (API_KEY_ENV, "secret"),
        ]
        .into_iter()
        .collect();

        let config = ApiConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://scan.example.com");
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn test_empty_variables_fall_back() {
        let config = ApiConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = ApiConfig::new("http://127.0.0.1:8080//")
            .with_api_key("k")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api_key, "k");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}

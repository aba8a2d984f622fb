//! Connection configuration

use std::collections::HashMap;
use std::env;

use crate::core::errors::{DriverError, Result};

/// Configuration of the underlying HTTP connection
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server endpoint URL
    pub url: String,
    /// Basic auth username (optional)
    pub username: Option<String>,
    /// Basic auth password (optional)
    pub password: Option<String>,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Connect timeout in seconds
    pub connect_timeout: u64,
    /// Proxy URL (optional)
    pub proxy_url: Option<String>,
    /// Extra headers sent with every physical request
    pub custom_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8529".to_string(),
            username: None,
            password: None,
            request_timeout: 60,
            connect_timeout: 10,
            proxy_url: None,
            custom_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given endpoint
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Read configuration from `ARANGO_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("ARANGO_URL") {
            config.url = url;
        }

        if let Ok(username) = env::var("ARANGO_USERNAME") {
            config.username = Some(username);
        }

        if let Ok(password) = env::var("ARANGO_PASSWORD") {
            config.password = Some(password);
        }

        if let Ok(timeout) = env::var("ARANGO_TIMEOUT") {
            config.request_timeout = timeout.parse().unwrap_or(60);
        }

        if let Ok(timeout) = env::var("ARANGO_CONNECT_TIMEOUT") {
            config.connect_timeout = timeout.parse().unwrap_or(10);
        }

        if let Ok(proxy) = env::var("ARANGO_PROXY") {
            config.proxy_url = Some(proxy);
        }

        config
    }

    /// Settings
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Settings
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Settings
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Settings
    pub fn with_connect_timeout(mut self, timeout: u64) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Settings
    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Add a header sent with every physical request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }

    /// Join a server-relative path onto the endpoint URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validation
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.url.is_empty() {
            return Err("Endpoint URL cannot be empty".to_string());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("Endpoint URL must start with http:// or https://".to_string());
        }

        if self.request_timeout == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.connect_timeout == 0 {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if self.connect_timeout > self.request_timeout {
            return Err("Connect timeout cannot be greater than request timeout".to_string());
        }

        Ok(())
    }
}

/// Validating builder for [`ClientConfig`]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config.username = Some(username.into());
        self.config.password = Some(password.into());
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: u64) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.custom_headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate().map_err(DriverError::configuration)?;
        Ok(self.config)
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.url, "http://localhost:8529");
        assert_eq!(config.request_timeout, 60);
        assert_eq!(config.connect_timeout, 10);
        assert!(config.username.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::new("");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("ftp://example.com");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("https://db.example.com:8529");
        assert!(config.validate().is_ok());

        let config = ClientConfig::default().with_timeout(0);
        assert!(config.validate().is_err());

        let config = ClientConfig::default()
            .with_timeout(5)
            .with_connect_timeout(30);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfigBuilder::new()
            .url("https://db.example.com")
            .credentials("root", "secret")
            .timeout(30)
            .build()
            .unwrap();
        assert_eq!(config.url, "https://db.example.com");
        assert_eq!(config.username, Some("root".to_string()));
        assert_eq!(config.request_timeout, 30);

        let err = ClientConfigBuilder::new().url("nope").build().unwrap_err();
        assert!(matches!(err, DriverError::Configuration { .. }));
    }

    #[test]
    fn test_endpoint_join() {
        let config = ClientConfig::new("http://localhost:8529/");
        assert_eq!(
            config.endpoint("/_db/shop/_api/batch"),
            "http://localhost:8529/_db/shop/_api/batch"
        );
        assert_eq!(
            config.endpoint("_api/batch"),
            "http://localhost:8529/_api/batch"
        );
    }
}

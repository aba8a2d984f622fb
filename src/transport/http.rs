//! Reqwest-backed transport

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use super::{Transport, TransportResponse};
use crate::config::ClientConfig;
use crate::core::errors::{DriverError, Result};

/// HTTP transport over a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    http_client: Client,
}

impl HttpTransport {
    /// Create a transport from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate().map_err(DriverError::configuration)?;

        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| DriverError::configuration(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder
            .build()
            .map_err(|e| DriverError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// The configuration this transport was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Merge configured and per-request headers
    fn build_headers(&self, extra: &BTreeMap<String, String>) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        for (key, value) in self.config.custom_headers.iter().chain(extra.iter()) {
            if let (Ok(header_name), Ok(header_value)) = (
                key.parse::<reqwest::header::HeaderName>(),
                value.parse::<reqwest::header::HeaderValue>(),
            ) {
                headers.insert(header_name, header_value);
            }
        }

        headers
    }

    fn map_http_error(status: u16, body: &str) -> DriverError {
        match status {
            401 => DriverError::api(401, "Invalid or missing credentials"),
            403 => DriverError::api(403, "Forbidden: insufficient permissions"),
            404 => DriverError::api(404, format!("Endpoint not found: {}", body)),
            500..=599 => DriverError::api(status, format!("Server error: {}", body)),
            _ => DriverError::api(status, body),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        body: String,
        headers: BTreeMap<String, String>,
    ) -> Result<TransportResponse> {
        let url = self.config.endpoint(path);
        debug!(%url, bytes = body.len(), "posting request");

        let mut request = self
            .http_client
            .post(&url)
            .headers(self.build_headers(&headers))
            .body(body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DriverError::network(format!("Request timeout: {}", e))
            } else {
                DriverError::network(format!("Network error: {}", e))
            }
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DriverError::network(format!("Failed to read response: {}", e)))?;

        if !(200..300).contains(&status) {
            return Err(Self::map_http_error(status, &text));
        }

        Ok(TransportResponse::new(status, text))
    }
}

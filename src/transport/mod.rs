//! Transport seam between the batch engine and the HTTP layer
//!
//! The coordinator performs exactly one physical call per execution; this
//! trait is that call. Retry, TLS, pooling, and authentication policy live
//! behind it, not in the batch engine.

pub mod http;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::errors::Result;

/// Raw response of one physical dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Outer HTTP status
    pub status: u16,
    /// Raw response body
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Capability to perform the single physical dispatch of a batch
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a body to a server-relative path, returning the raw response.
    ///
    /// Implementations resolve the path against their configured endpoint
    /// and must not retry; failures propagate to the batch caller
    /// unmodified.
    async fn post(
        &self,
        path: &str,
        body: String,
        headers: BTreeMap<String, String>,
    ) -> Result<TransportResponse>;
}

//! Driver error types

use serde_json::Value;

/// Top-level error type for the driver
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// Invalid driver or coordinator configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A batch was executed with zero queued operations
    #[error("Batch contains no operations")]
    EmptyBatch,

    /// Network-level failure of the physical dispatch
    #[error("Network error: {message}")]
    Network { message: String },

    /// The outer batch request itself was rejected by the server
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// One decoded batch part reported an error indicator
    #[error("Batch operation {id} failed (status {code}, errorNum {error_num}): {message}")]
    SubOperation {
        /// Correlation id of the failing operation
        id: String,
        /// Server-reported error message
        message: String,
        /// Inner HTTP status of the failing part
        code: u16,
        /// Server-reported numeric error code
        error_num: i64,
        /// The decoded payload of the failing part
        payload: Value,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DriverError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn sub_operation(
        id: impl Into<String>,
        message: impl Into<String>,
        code: u16,
        error_num: i64,
        payload: Value,
    ) -> Self {
        Self::SubOperation {
            id: id.into(),
            message: message.into(),
            code,
            error_num,
            payload,
        }
    }

    /// Check if the error originated before any network I/O
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::EmptyBatch | Self::Serialization(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DriverError>;

//! # Arango-RS
//!
//! An ArangoDB client driver for Rust, built around a multipart batch
//! execution engine: queue any number of independent HTTP operations,
//! dispatch them as one physical request, and route each decoded
//! sub-response back to its caller.
//!
//! ## Features
//!
//! - **Batched Execution**: Pack N operations into a single `_api/batch`
//!   round trip using the `application/x-arango-batchpart` framing
//! - **Request Correlation**: Every queued operation gets a monotonic id
//!   that survives the aggregation boundary
//! - **Per-Operation Post-Processing**: Attach a closure to any operation;
//!   it runs against that operation's decoded result
//! - **Deferred Continuations**: Route a post-processed result into a
//!   oneshot channel instead of the aggregate return value
//! - **Aggregate Failure Detection**: A sub-operation error fails the whole
//!   batch with the failing part's id, message, and error number
//! - **Casing-Tolerant Results**: Response fields resolve under exact,
//!   lowerCamel, UpperCamel, and snake_case spellings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use arango_rs::{BatchCoordinator, ClientConfig, HttpTransport, OperationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://localhost:8529")
//!         .with_credentials("root", "");
//!     let transport = Arc::new(HttpTransport::new(config)?);
//!
//!     let mut batch = BatchCoordinator::new_database(transport, "_system")?;
//!     batch.add_operation(OperationRequest::get("/_api/collection"));
//!     batch.add_operation(OperationRequest::delete("/_api/collection/old"));
//!
//!     let outcome = batch.execute().await?;
//!     println!("last routed result: {:?}", outcome);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod transport;

// Re-export main types
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::core::errors::{DriverError, Result};

// Export batch functionality
pub use crate::core::batch::{
    BatchCoordinator, BatchCoordinatorBuilder, BatchOutcome, BatchTarget, Continuation, Method,
    Operation, OperationRequest, PostProcess,
};

// Export result normalization
pub use crate::core::result::ResultView;
pub use crate::core::result::casing::{resolve_key, to_lower_camel, to_snake_case, to_upper_camel};

// Export transport seam
pub use crate::transport::{Transport, TransportResponse, http::HttpTransport};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

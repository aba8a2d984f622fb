//! Batched request execution
//!
//! Packs any number of independent HTTP operations into a single multipart
//! `_api/batch` request, dispatches it once, and demultiplexes the combined
//! response back into per-operation results.

mod codec;
mod coordinator;
mod types;

// Re-export all public types
pub use codec::{BATCH_BOUNDARY, BATCH_PART_CONTENT_TYPE, DecodedPart, decode_batch, encode_batch};
pub use coordinator::{BatchCoordinator, BatchCoordinatorBuilder};
pub use types::{
    BatchOutcome, BatchTarget, Continuation, Method, Operation, OperationRequest, PostProcess,
};

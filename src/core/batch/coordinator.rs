//! Batch coordination: queue, encode, dispatch once, decode, route

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::codec::{BATCH_BOUNDARY, decode_batch, encode_batch};
use super::types::{BatchOutcome, BatchTarget, Operation, OperationRequest};
use crate::core::errors::{DriverError, Result};
use crate::transport::Transport;

/// Accumulates operations addressed to one target, executes them as a
/// single multipart request, and routes the decoded sub-responses.
///
/// Operation ids are assigned from a monotonic counter starting at 1 and
/// are never reused within the coordinator's lifetime, even after
/// deletions. Mutation and execution require `&mut self`; callers needing
/// parallel batches use separate coordinators.
pub struct BatchCoordinator {
    transport: Arc<dyn Transport>,
    target: BatchTarget,
    operations: Vec<Operation>,
    next_id: u64,
}

impl BatchCoordinator {
    /// Start building a coordinator; exactly one target must be selected
    /// before `build()`.
    pub fn builder(transport: Arc<dyn Transport>) -> BatchCoordinatorBuilder {
        BatchCoordinatorBuilder {
            transport,
            server: false,
            database: None,
            initial: Vec::new(),
        }
    }

    /// Coordinator addressed to the server-level batch endpoint
    pub fn new_server(transport: Arc<dyn Transport>) -> Result<Self> {
        Self::builder(transport).server().build()
    }

    /// Coordinator addressed to one database's batch endpoint
    pub fn new_database(transport: Arc<dyn Transport>, database: impl Into<String>) -> Result<Self> {
        Self::builder(transport).database(database).build()
    }

    /// The target the single physical call is routed to
    pub fn target(&self) -> &BatchTarget {
        &self.target
    }

    /// Queue an operation under the next sequential id and return the
    /// stored record.
    pub fn add_operation(&mut self, request: OperationRequest) -> &Operation {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.operations.push(Operation::from_request(id, request));
        let last = self.operations.len() - 1;
        &self.operations[last]
    }

    /// Replace the operation stored under `id`, keeping the id. Unknown ids
    /// are a no-op.
    pub fn modify_operation(&mut self, id: &str, request: OperationRequest) -> Option<&Operation> {
        let index = self.operations.iter().position(|op| op.id == id)?;
        self.operations[index] = Operation::from_request(id.to_string(), request);
        Some(&self.operations[index])
    }

    /// Remove the operation stored under `id`. Absent ids are a no-op. The
    /// id is not reused.
    pub fn delete_operation(&mut self, id: &str) -> Option<Operation> {
        let index = self.operations.iter().position(|op| op.id == id)?;
        Some(self.operations.remove(index))
    }

    /// The queued operations, in insertion order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Execute the queued operations as one physical request.
    ///
    /// Fails before any I/O when the batch is empty. After the single
    /// dispatch, every decoded part is scanned for a server error indicator
    /// before any result is routed; the first failing part (in response
    /// order) fails the whole call and no post-processing runs. Otherwise
    /// results are routed sequentially in response order and the last
    /// routed candidate is returned.
    pub async fn execute(&mut self) -> Result<BatchOutcome> {
        if self.operations.is_empty() {
            return Err(DriverError::EmptyBatch);
        }

        let body = encode_batch(&self.operations)?;
        let mut headers = BTreeMap::new();
        headers.insert(
            "Content-Type".to_string(),
            format!("multipart/form-data; boundary={}", BATCH_BOUNDARY),
        );

        let path = self.target.batch_path();
        debug!(operations = self.operations.len(), %path, "dispatching batch");
        let response = self.transport.post(&path, body, headers).await?;

        let parts = decode_batch(&response.body)?;
        debug!(parts = parts.len(), "decoded batch response");

        // Every part is scanned before any result is routed; a failing
        // sub-operation means no post-processing runs at all.
        for part in &parts {
            if !part.view.is_array() && part.view.is_error() {
                return Err(DriverError::sub_operation(
                    part.id.clone(),
                    part.view.error_message().unwrap_or_default(),
                    part.view.status_code(),
                    part.view.error_num().unwrap_or(0),
                    part.view.payload().clone(),
                ));
            }
        }

        let mut outcome = None;
        for part in parts {
            let Some(operation) = self.operations.iter_mut().find(|op| op.id == part.id) else {
                warn!(id = %part.id, "batch response part does not match any queued operation");
                continue;
            };
            outcome = Some(match &operation.post_process {
                None => BatchOutcome::View(part.view),
                Some(post_process) => {
                    let value = post_process(&part.view);
                    match operation.continuation.take() {
                        Some(continuation) => BatchOutcome::Value(continuation.resolve(value)),
                        None => BatchOutcome::Value(value),
                    }
                }
            });
        }
        Ok(outcome.unwrap_or(BatchOutcome::Value(Value::Null)))
    }
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("target", &self.target)
            .field("operations", &self.operations)
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Builder validating the coordinator's construction contract: exactly one
/// of the server or database targets.
pub struct BatchCoordinatorBuilder {
    transport: Arc<dyn Transport>,
    server: bool,
    database: Option<String>,
    initial: Vec<OperationRequest>,
}

impl BatchCoordinatorBuilder {
    /// Address the server-level batch endpoint
    pub fn server(mut self) -> Self {
        self.server = true;
        self
    }

    /// Address the batch endpoint of one named database
    pub fn database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    /// Queue an initial operation; goes through the same id assignment as
    /// post-construction additions.
    pub fn operation(mut self, request: OperationRequest) -> Self {
        self.initial.push(request);
        self
    }

    pub fn build(self) -> Result<BatchCoordinator> {
        let target = match (self.server, self.database) {
            (true, Some(_)) => {
                return Err(DriverError::configuration(
                    "server and database targets are mutually exclusive",
                ));
            }
            (true, None) => BatchTarget::Server,
            (false, Some(name)) => BatchTarget::Database(name),
            (false, None) => {
                return Err(DriverError::configuration(
                    "a server or database target must be given",
                ));
            }
        };
        let mut coordinator = BatchCoordinator {
            transport: self.transport,
            target,
            operations: Vec::new(),
            next_id: 1,
        };
        for request in self.initial {
            coordinator.add_operation(request);
        }
        Ok(coordinator)
    }
}

//! Batch execution types and data structures

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use tokio::sync::oneshot;
use tracing::debug;

use crate::core::result::ResultView;

/// HTTP method of one batched sub-request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Patch,
    Post,
    Put,
    Delete,
}

impl Method {
    /// The uppercase wire form used in the synthetic request line
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-processing hook invoked with an operation's decoded result
pub type PostProcess = Box<dyn Fn(&ResultView) -> Value + Send + Sync>;

/// Deferred handle resolved with a post-processed sub-result.
///
/// The receiving half obtains the value during result routing; resolution is
/// synchronous and inline, in decoded-response order.
pub struct Continuation {
    tx: oneshot::Sender<Value>,
}

impl Continuation {
    /// Create a continuation and the receiver that will observe its value.
    pub fn channel() -> (Self, oneshot::Receiver<Value>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Deliver the post-processed value, returning it. A dropped receiver is
    /// not an error for the batch.
    pub(crate) fn resolve(self, value: Value) -> Value {
        if self.tx.send(value.clone()).is_err() {
            debug!("continuation receiver dropped before resolution");
        }
        value
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Continuation")
    }
}

/// Caller-facing description of one sub-request to queue.
///
/// Constructed from exactly one method/path pair, then refined with
/// chainable setters:
///
/// ```rust
/// use arango_rs::OperationRequest;
/// use serde_json::json;
///
/// let req = OperationRequest::post("/_api/collection")
///     .json_body(json!({"name": "users"}))
///     .query("waitForSyncReplication", "1");
/// ```
pub struct OperationRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<Map<String, Value>>,
    pub(crate) query: Option<BTreeMap<String, String>>,
    pub(crate) headers: Option<BTreeMap<String, String>>,
    pub(crate) post_process: Option<PostProcess>,
    pub(crate) continuation: Option<Continuation>,
}

impl OperationRequest {
    /// Create a request with an explicit method
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: None,
            headers: None,
            post_process: None,
            continuation: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::Head, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Set the JSON body. Entries with a `null` value are dropped on encode.
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the JSON body from a `Value`; non-object values are ignored.
    pub fn json_body(self, body: Value) -> Self {
        match body {
            Value::Object(map) => self.body(map),
            _ => self,
        }
    }

    /// Add one query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add one extra header emitted inside the sub-request framing
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Attach a post-processing hook run against the decoded result
    pub fn post_process(
        mut self,
        f: impl Fn(&ResultView) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.post_process = Some(Box::new(f));
        self
    }

    /// Attach a continuation; the post-process output is delivered through
    /// it during result routing.
    pub fn continuation(mut self, continuation: Continuation) -> Self {
        self.continuation = Some(continuation);
        self
    }
}

impl fmt::Debug for OperationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("post_process", &self.post_process.as_ref().map(|_| "<fn>"))
            .field("continuation", &self.continuation)
            .finish()
    }
}

/// One queued operation, stored by the coordinator under its assigned id
pub struct Operation {
    pub(crate) id: String,
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<Map<String, Value>>,
    pub(crate) query: Option<BTreeMap<String, String>>,
    pub(crate) headers: Option<BTreeMap<String, String>>,
    pub(crate) post_process: Option<PostProcess>,
    pub(crate) continuation: Option<Continuation>,
}

impl Operation {
    pub(crate) fn from_request(id: String, request: OperationRequest) -> Self {
        Self {
            id,
            method: request.method,
            path: request.path,
            body: request.body,
            query: request.query,
            headers: request.headers,
            post_process: request.post_process,
            continuation: request.continuation,
        }
    }

    /// Correlation id assigned by the coordinator
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    pub fn query(&self) -> Option<&BTreeMap<String, String>> {
        self.query.as_ref()
    }

    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        self.headers.as_ref()
    }

    pub fn has_post_process(&self) -> bool {
        self.post_process.is_some()
    }

    pub fn has_continuation(&self) -> bool {
        self.continuation.is_some()
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .field("query", &self.query)
            .field("headers", &self.headers)
            .field("post_process", &self.post_process.as_ref().map(|_| "<fn>"))
            .field("continuation", &self.continuation)
            .finish()
    }
}

/// Routing target of the single physical batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchTarget {
    /// Server-level batch endpoint
    Server,
    /// Batch endpoint of one named database
    Database(String),
}

impl BatchTarget {
    /// The batch endpoint path for this target
    pub fn batch_path(&self) -> String {
        match self {
            BatchTarget::Server => "/_api/batch".to_string(),
            BatchTarget::Database(name) => format!("/_db/{}/_api/batch", name),
        }
    }
}

/// The routed aggregate result of one batch execution.
///
/// Operations without a post-process hook contribute their raw
/// [`ResultView`]; post-processed operations contribute the hook's output.
/// The candidate routed last, in decoded-response order, is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The decoded view of an operation without post-processing
    View(ResultView),
    /// The output of a post-process hook or continuation resolution
    Value(Value),
}

impl BatchOutcome {
    pub fn as_view(&self) -> Option<&ResultView> {
        match self {
            BatchOutcome::View(view) => Some(view),
            BatchOutcome::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            BatchOutcome::Value(value) => Some(value),
            BatchOutcome::View(_) => None,
        }
    }

    /// Collapse to the underlying JSON value
    pub fn into_value(self) -> Value {
        match self {
            BatchOutcome::View(view) => view.into_inner(),
            BatchOutcome::Value(value) => value,
        }
    }
}

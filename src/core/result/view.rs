//! Normalized wrapper over one decoded response payload

use serde_json::{Map, Value};

use super::casing::{resolve_key, to_snake_case};

/// One decoded sub-response payload, object- or array-shaped.
///
/// Field access tolerates the inconsistent key casing conventions of the
/// origin server: a name requested under any spelling resolves against the
/// exact, `lowerCamelCase`, `UpperCamelCase`, and `snake_case` variants, in
/// that order. The shape is fixed at construction; named access applies to
/// object-shaped views and indexed access to array-shaped ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    payload: Value,
    status_code: u16,
}

impl ResultView {
    /// Wrap a decoded payload. A `Null` payload is coerced to an empty
    /// object.
    pub fn new(payload: Value) -> Self {
        let payload = match payload {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Self {
            payload,
            status_code: 0,
        }
    }

    /// Wrap a decoded payload together with its inner HTTP status.
    pub fn with_status(payload: Value, status_code: u16) -> Self {
        let mut view = Self::new(payload);
        view.status_code = status_code;
        view
    }

    /// Inner HTTP status of the sub-response, 0 if unset.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = status_code;
    }

    /// True iff the view was constructed from an array-shaped payload.
    pub fn is_array(&self) -> bool {
        self.payload.is_array()
    }

    // standard fields

    /// The server-reported `code` field.
    pub fn code(&self) -> Option<u64> {
        self.get("code").and_then(Value::as_u64)
    }

    /// Whether the server reported an error indicator. Mirrors the origin
    /// convention: absent, `null`, and `false` all read as no error; any
    /// other value is an error.
    pub fn is_error(&self) -> bool {
        match self.get("error") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => true,
        }
    }

    /// The server-reported `errorMessage` field.
    pub fn error_message(&self) -> Option<&str> {
        self.get("errorMessage").and_then(Value::as_str)
    }

    /// The server-reported `errorNum` field.
    pub fn error_num(&self) -> Option<i64> {
        self.get("errorNum").and_then(Value::as_i64)
    }

    // access to all other fields

    /// Read a field under any spelling. Returns `None` for array-shaped
    /// views; use [`get_index`](Self::get_index) for those.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let map = self.payload.as_object()?;
        let key = resolve_key(field, |k| map.contains_key(k))?;
        map.get(&key)
    }

    /// Overwrite a field that already exists under some spelling. Never
    /// inserts a new key; returns whether a spelling was found and written.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        let Some(map) = self.payload.as_object_mut() else {
            return false;
        };
        match resolve_key(field, |k| map.contains_key(k)) {
            Some(key) => {
                map.insert(key, value);
                true
            }
            None => false,
        }
    }

    /// Whether any spelling of the field exists. Always `false` for
    /// array-shaped views.
    pub fn has(&self, field: &str) -> bool {
        match self.payload.as_object() {
            Some(map) => resolve_key(field, |k| map.contains_key(k)).is_some(),
            None => false,
        }
    }

    /// Indexed read for array-shaped views.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.payload.as_array()?.get(index)
    }

    /// Indexed write for array-shaped views; out-of-bounds is a no-op.
    pub fn set_index(&mut self, index: usize, value: Value) -> bool {
        match self.payload.as_array_mut().and_then(|a| a.get_mut(index)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    // convenience

    pub fn is_empty(&self) -> bool {
        match &self.payload {
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        match &self.payload {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// The raw payload for object-shaped views.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.payload.as_object()
    }

    /// The raw payload for array-shaped views.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.payload.as_array()
    }

    /// The raw payload.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Consume the view, returning the raw payload.
    pub fn into_inner(self) -> Value {
        self.payload
    }

    /// The payload with every key rewritten to `snake_case`, for callers
    /// that want one canonical casing. `None` for array-shaped views.
    pub fn to_snake_case_map(&self) -> Option<Map<String, Value>> {
        let map = self.payload.as_object()?;
        Some(
            map.iter()
                .map(|(k, v)| (to_snake_case(k), v.clone()))
                .collect(),
        )
    }
}

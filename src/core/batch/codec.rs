//! Multipart wire framing for batch requests
//!
//! Encoding and decoding are pure string transforms with no I/O; the
//! coordinator owns dispatch. Both directions share one fixed boundary
//! token, which the server echoes back in its response.

use serde_json::{Value, json};
use tracing::warn;
use url::form_urlencoded;

use super::types::Operation;
use crate::core::errors::Result;
use crate::core::result::ResultView;

/// Fixed multipart boundary token shared by request and response
pub const BATCH_BOUNDARY: &str = "ArangoRsBatchPart";

/// Content type marking one part as a batched operation
pub const BATCH_PART_CONTENT_TYPE: &str = "application/x-arango-batchpart";

/// One decoded part of a batch response, keyed by its correlation id
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPart {
    pub id: String,
    pub view: ResultView,
}

/// Encode queued operations into one multipart body, in insertion order.
///
/// Each part carries the part content type, a `Content-Id` correlation
/// header, and a synthetic HTTP/1.1 request line; `null`-valued body entries
/// are stripped before serialization. The closing boundary marker is only
/// appended when at least one part was encoded.
pub fn encode_batch(operations: &[Operation]) -> Result<String> {
    let mut body = String::new();
    for operation in operations {
        body.push_str(&format!("--{}\r\n", BATCH_BOUNDARY));
        body.push_str(&format!("Content-Type: {}\r\n", BATCH_PART_CONTENT_TYPE));
        body.push_str(&format!("Content-Id: {}\r\n\r\n", operation.id));

        let mut url = format!("/{}", operation.path.trim_start_matches('/'));
        if let Some(query) = &operation.query {
            if !query.is_empty() {
                url.push('?');
                url.push_str(
                    &form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(query.iter())
                        .finish(),
                );
            }
        }
        body.push_str(&format!("{} {} HTTP/1.1\r\n", operation.method.as_str(), url));

        if let Some(headers) = &operation.headers {
            for (header, value) in headers {
                body.push_str(&format!("{}: {}\r\n", header, value));
            }
        }
        body.push_str("\r\n");

        if let Some(map) = &operation.body {
            let stripped: serde_json::Map<String, Value> = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            body.push_str(&serde_json::to_string(&Value::Object(stripped))?);
            body.push_str("\r\n");
        }
    }
    if !operations.is_empty() {
        body.push_str(&format!("--{}--\r\n\r\n", BATCH_BOUNDARY));
    }
    Ok(body)
}

/// Decode a multipart batch response into ordered parts.
///
/// Fragments that are empty or the terminal `--` marker are discarded. For
/// each remaining part the correlation id, inner status code, JSON flag, and
/// first payload line are scanned out; a part without a declared JSON
/// content type keeps its payload as an opaque string wrapped in a
/// single-field object. Parts without a correlation id cannot be routed and
/// are skipped.
pub fn decode_batch(raw: &str) -> Result<Vec<DecodedPart>> {
    let marker = format!("--{}", BATCH_BOUNDARY);
    let mut parts = Vec::new();

    for fragment in raw.split(&marker) {
        let trimmed = fragment.trim_matches(|c| c == '\r' || c == '\n' || c == ' ');
        if trimmed.is_empty() || trimmed == "--" {
            continue;
        }

        let mut id: Option<&str> = None;
        let mut code: u16 = 0;
        let mut is_json = false;
        let mut payload: Option<&str> = None;
        let mut opaque: Option<&str> = None;

        for line in fragment.split("\r\n") {
            if let Some(rest) = line.strip_prefix("Content-Id: ") {
                id = Some(rest.trim());
            } else if let Some(rest) = line.strip_prefix("HTTP/1.1 ") {
                code = rest
                    .split_whitespace()
                    .next()
                    .and_then(|status| status.parse().ok())
                    .unwrap_or(0);
            } else if line.starts_with("Content-Type: application/json") {
                is_json = true;
            } else if (line.starts_with('{') || line.starts_with('[')) && payload.is_none() {
                payload = Some(line);
            } else if !line.is_empty() && !line.contains(": ") && opaque.is_none() {
                // Candidate body line of a part that did not declare JSON
                opaque = Some(line);
            }
        }

        let Some(id) = id else {
            warn!("discarding batch response part without a correlation id");
            continue;
        };

        let value = if is_json {
            match payload {
                Some(line) => serde_json::from_str(line)?,
                None => json!({}),
            }
        } else {
            match payload.or(opaque) {
                Some(line) => json!({ "body": line }),
                None => json!({}),
            }
        };

        parts.push(DecodedPart {
            id: id.to_string(),
            view: ResultView::with_status(value, code),
        });
    }

    Ok(parts)
}

//! Shared fixtures for integration tests

use arango_rs::core::batch::{BATCH_BOUNDARY, BATCH_PART_CONTENT_TYPE};

/// One framed batch response part carrying a JSON payload
pub fn json_part(id: &str, status: u16, payload: &str) -> String {
    format!(
        "--{b}\r\nContent-Type: {ct}\r\nContent-Id: {id}\r\n\r\nHTTP/1.1 {status} X\r\nContent-Type: application/json; charset=utf-8\r\n\r\n{payload}\r\n",
        b = BATCH_BOUNDARY,
        ct = BATCH_PART_CONTENT_TYPE,
    )
}

/// One framed batch response part without a JSON content type
pub fn opaque_part(id: &str, status: u16, payload: &str) -> String {
    format!(
        "--{b}\r\nContent-Type: {ct}\r\nContent-Id: {id}\r\n\r\nHTTP/1.1 {status} X\r\nContent-Type: text/plain\r\n\r\n{payload}\r\n",
        b = BATCH_BOUNDARY,
        ct = BATCH_PART_CONTENT_TYPE,
    )
}

/// A complete multipart response body with the closing boundary marker
pub fn multipart_response(parts: &[String]) -> String {
    format!("{}--{}--\r\n\r\n", parts.concat(), BATCH_BOUNDARY)
}

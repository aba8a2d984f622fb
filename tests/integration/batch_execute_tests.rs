//! Batch execution integration tests
//!
//! Drive the full path — encode, HTTP dispatch, decode, error scan, result
//! routing — through `HttpTransport` against a mock server.

use std::sync::Arc;

use arango_rs::core::batch::BATCH_BOUNDARY;
use arango_rs::{
    BatchCoordinator, BatchOutcome, ClientConfig, Continuation, DriverError, HttpTransport,
    OperationRequest,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{json_part, multipart_response, opaque_part};

async fn transport_for(server: &MockServer) -> Arc<HttpTransport> {
    let config = ClientConfig::new(server.uri()).with_credentials("root", "");
    Arc::new(HttpTransport::new(config).unwrap())
}

#[tokio::test]
async fn test_batch_round_trip() {
    let server = MockServer::start().await;
    let body = multipart_response(&[
        json_part("1", 200, r#"{"result":[{"name":"users"}],"error":false,"code":200}"#),
        json_part("2", 202, r#"{"error":false,"code":202}"#),
    ]);

    Mock::given(method("POST"))
        .and(path("/_db/shop/_api/batch"))
        .and(header(
            "content-type",
            format!("multipart/form-data; boundary={}", BATCH_BOUNDARY).as_str(),
        ))
        .and(body_string_contains("Content-Id: 1"))
        .and(body_string_contains("GET /_api/collection?excludeSystem=true HTTP/1.1"))
        .and(body_string_contains("Content-Id: 2"))
        .and(body_string_contains("DELETE /_api/collection/old HTTP/1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_database(transport_for(&server).await, "shop").unwrap();
    batch.add_operation(OperationRequest::get("/_api/collection").query("excludeSystem", "true"));
    batch.add_operation(
        OperationRequest::delete("/_api/collection/old").post_process(|_| Value::Null),
    );

    let outcome = batch.execute().await.unwrap();
    assert_eq!(outcome, BatchOutcome::Value(Value::Null));
}

#[tokio::test]
async fn test_batch_preserves_sub_response_status_codes() {
    let server = MockServer::start().await;
    let body = multipart_response(&[json_part("1", 201, r#"{"name":"users","error":false}"#)]);

    Mock::given(method("POST"))
        .and(path("/_api/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_server(transport_for(&server).await).unwrap();
    batch.add_operation(OperationRequest::post("/_api/collection").json_body(json!({
        "name": "users",
        "keyOptions": null,
    })));

    let outcome = batch.execute().await.unwrap();
    let view = outcome.as_view().unwrap();
    assert_eq!(view.status_code(), 201);
    assert_eq!(view.get("name"), Some(&json!("users")));
}

#[tokio::test]
async fn test_sub_operation_failure_fails_the_batch() {
    let server = MockServer::start().await;
    let body = multipart_response(&[
        json_part("1", 200, r#"{"error":false,"result":[]}"#),
        json_part(
            "2",
            404,
            r#"{"error":true,"errorMessage":"collection not found","errorNum":1203,"code":404}"#,
        ),
    ]);

    Mock::given(method("POST"))
        .and(path("/_api/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_server(transport_for(&server).await).unwrap();
    batch.add_operation(OperationRequest::get("/_api/collection"));
    batch.add_operation(OperationRequest::get("/_api/collection/missing"));

    match batch.execute().await.unwrap_err() {
        DriverError::SubOperation {
            id,
            message,
            code,
            error_num,
            ..
        } => {
            assert_eq!(id, "2");
            assert_eq!(message, "collection not found");
            assert_eq!(code, 404);
            assert_eq!(error_num, 1203);
        }
        other => panic!("expected sub-operation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_part_is_wrapped() {
    let server = MockServer::start().await;
    let body = multipart_response(&[opaque_part("1", 200, "plain-text-result")]);

    Mock::given(method("POST"))
        .and(path("/_api/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_server(transport_for(&server).await).unwrap();
    batch.add_operation(OperationRequest::get("/_admin/status"));

    let outcome = batch.execute().await.unwrap();
    assert_eq!(
        outcome.as_view().unwrap().get("body"),
        Some(&json!("plain-text-result"))
    );
}

#[tokio::test]
async fn test_continuation_observes_routed_value() {
    let server = MockServer::start().await;
    let body = multipart_response(&[json_part("1", 200, r#"{"name":"users","error":false}"#)]);

    Mock::given(method("POST"))
        .and(path("/_api/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_server(transport_for(&server).await).unwrap();
    let (continuation, rx) = Continuation::channel();
    batch.add_operation(
        OperationRequest::get("/_api/collection/users")
            .post_process(|view| view.get("name").cloned().unwrap_or(Value::Null))
            .continuation(continuation),
    );

    let outcome = batch.execute().await.unwrap();
    assert_eq!(outcome, BatchOutcome::Value(json!("users")));
    assert_eq!(rx.await.unwrap(), json!("users"));
}

#[tokio::test]
async fn test_outer_rejection_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_api/batch"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_server(transport_for(&server).await).unwrap();
    batch.add_operation(OperationRequest::get("/_api/version"));

    match batch.execute().await.unwrap_err() {
        DriverError::Api { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("maintenance"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_maps_to_network_error() {
    // Nothing listens on this port
    let config = ClientConfig::new("http://127.0.0.1:1")
        .with_timeout(5)
        .with_connect_timeout(1);
    let transport = Arc::new(HttpTransport::new(config).unwrap());

    let mut batch = BatchCoordinator::new_server(transport).unwrap();
    batch.add_operation(OperationRequest::get("/_api/version"));

    match batch.execute().await.unwrap_err() {
        DriverError::Network { .. } => {}
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_batch_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut batch = BatchCoordinator::new_server(transport_for(&server).await).unwrap();
    match batch.execute().await.unwrap_err() {
        DriverError::EmptyBatch => {}
        other => panic!("expected empty batch error, got {other:?}"),
    }
}

//! End-to-end tests of the axum application, middleware stack included.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use itemstore_persistence::backends::memory::MemoryBackend;
use itemstore_rest::{ServerConfig, create_app_with_config};
use serde_json::{Value, json};

use common::fixtures::item_payload;

const IF_MATCH: HeaderName = HeaderName::from_static("if-match");
const UNAUTHORIZED: HeaderName = HeaderName::from_static("unauthorized");

fn memory_server() -> TestServer {
    let app = create_app_with_config(MemoryBackend::new(), ServerConfig::for_testing());
    TestServer::new(app).expect("Failed to create test server")
}

#[cfg(feature = "sqlite")]
fn sqlite_server() -> TestServer {
    use itemstore_persistence::backends::sqlite::SqliteBackend;

    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to init schema");
    let app = create_app_with_config(backend, ServerConfig::for_testing());
    TestServer::new(app).expect("Failed to create test server")
}

async fn crud_round_trip(server: TestServer) {
    // Create
    let response = server.post("/items").json(&item_payload()).await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["name"], "widget");
    assert_eq!(created["value"], 42);
    assert_eq!(created["isActive"], true);

    // Read
    let path = format!("/items/{}", id);
    let response = server.get(&path).await;
    response.assert_status_ok();
    let etag = response
        .headers()
        .get("etag")
        .expect("Etag header")
        .to_str()
        .expect("ascii")
        .to_string();
    let fetched: Value = response.json();
    assert_eq!(fetched["updatedOn"], etag.as_str());

    // Update with the current token
    let response = server
        .put(&path)
        .add_header(IF_MATCH, HeaderValue::from_str(&etag).expect("valid header"))
        .json(&json!({ "name": "gadget", "value": 43, "description": "", "isActive": false }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["name"], "gadget");
    assert_eq!(updated["isActive"], false);
    assert_eq!(updated["createdOn"], created["createdOn"]);
    assert_ne!(updated["updatedOn"], created["updatedOn"]);

    // Replay with the old token
    let response = server
        .put(&path)
        .add_header(IF_MATCH, HeaderValue::from_str(&etag).expect("valid header"))
        .json(&json!({ "name": "stale" }))
        .await;
    response.assert_status(StatusCode::PRECONDITION_FAILED);

    // List
    let listed: Vec<Value> = server.get("/items").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "gadget");

    // Delete
    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_crud_round_trip_memory() {
    crud_round_trip(memory_server()).await;
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_crud_round_trip_sqlite() {
    crud_round_trip(sqlite_server()).await;
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_duplicate_id_is_500() {
    let server = sqlite_server();
    let body = json!({ "id": "0b7c8f4e-3c1a-4d5e-9f60-7a8b9c0d1e2f", "name": "n1", "value": 1 });

    server.post("/items").json(&body).await.assert_status(StatusCode::CREATED);

    let response = server.post("/items").json(&body).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = response.json();
    assert_eq!(error["error"], "attempted to save item with same id");
    assert_eq!(error["path"], "/items");
}

#[tokio::test]
async fn test_unauthorized_through_full_stack() {
    let server = memory_server();
    let response = server
        .get("/items")
        .add_header(UNAUTHORIZED, HeaderValue::from_static("1"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let error: Value = response.json();
    assert_eq!(error["error"], "unauthorized, remove header 'unauthorized'");
}

#[tokio::test]
async fn test_error_responses_are_json() {
    let server = memory_server();
    let response = server.get("/items/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let error: Value = response.json();
    assert_eq!(error["path"], "/items/not-a-uuid");
}

#[tokio::test]
async fn test_body_limit() {
    let config = ServerConfig {
        max_body_size: 64,
        ..ServerConfig::for_testing()
    };
    let server = TestServer::new(create_app_with_config(MemoryBackend::new(), config))
        .expect("Failed to create test server");

    let response = server
        .post("/items")
        .json(&json!({ "name": "x".repeat(200), "value": 1 }))
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let error: Value = response.json();
    assert_eq!(error["error"], "request body exceeds 64 bytes");
    assert_eq!(error["path"], "/items");
}

#[tokio::test]
async fn test_cors_exposes_etag() {
    let config = ServerConfig {
        enable_cors: true,
        ..ServerConfig::for_testing()
    };
    let server = TestServer::new(create_app_with_config(MemoryBackend::new(), config))
        .expect("Failed to create test server");

    let response = server
        .get("/items")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://example.org"),
        )
        .await;
    response.assert_status_ok();
    let exposed = response
        .headers()
        .get("access-control-expose-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(exposed.contains("etag"), "exposed headers: {}", exposed);
}

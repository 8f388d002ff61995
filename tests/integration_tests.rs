//! Integration tests using a mock HTTP server
//!
//! Tests the full end-to-end flow: service builder → REST store →
//! windowed pagination with continuation round-trips and checkpoint reuse.

use serde_json::json;
use tablewise::{AuthConfig, Entity, Error, TableService};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn chunk_body(range: std::ops::Range<usize>) -> serde_json::Value {
    let value: Vec<serde_json::Value> = range
        .map(|i| json!({"partitionKey": "data", "rowKey": format!("{i:08}"), "seq": i}))
        .collect();
    json!({ "value": value })
}

fn service_for(server: &MockServer) -> TableService {
    TableService::builder()
        .endpoint(server.uri())
        .auth(AuthConfig::api_key_header("x-api-key", "secret"))
        .no_rate_limit()
        .build()
        .unwrap()
}

// ============================================================================
// Windowed Pagination End-To-End
// ============================================================================

#[tokio::test]
async fn test_paging_with_continuation_and_checkpoint_reuse() {
    init_tracing();
    let server = MockServer::start().await;

    // First chunk: records [0, 5) plus a continuation to the second chunk.
    // The resolver treats one fetch as one chunk regardless of batch size.
    Mock::given(method("GET"))
        .and(path("/events/entities"))
        .and(query_param("take", "1000"))
        .and(query_param_is_missing("nextRowKey"))
        .and(header("x-api-key", "secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chunk_body(0..5))
                .insert_header("x-continuation-next-partition-key", "data")
                .insert_header("x-continuation-next-row-key", "00000005"),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Second chunk: records [5, 8), scan exhausted.
    Mock::given(method("GET"))
        .and(path("/events/entities"))
        .and(query_param("nextPartitionKey", "data"))
        .and(query_param("nextRowKey", "00000005"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chunk_body(5..8)))
        .expect(2)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let events = service.table("events");

    // Window [1000, 1002) lives in the second chunk: cold resolution walks
    // both chunks and checkpoints the boundary at offset 1000
    let page = events.get_page(500, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].row_key, "00000005");
    assert_eq!(page[1].row_key, "00000006");
    assert!(events.checkpoints().get(1000).await.is_some());

    // Window [1002, 1004): resumes from the cached checkpoint, so the first
    // chunk is never fetched again (mock expectations verify the counts)
    let next = events.get_page(501, 2).await.unwrap();
    assert_eq!(next.len(), 1);
    assert_eq!(next[0].row_key, "00000007");
}

#[tokio::test]
async fn test_page_request_on_empty_table() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/empty/entities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let page = service.table("empty").get_page(0, 50).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_oversized_page_rejected_without_network() {
    init_tracing();
    // No mocks mounted: any request would fail loudly
    let server = MockServer::start().await;
    let service = service_for(&server);

    let err = service.table("events").get_page(0, 1001).await.unwrap_err();
    assert!(err.is_validation());
}

// ============================================================================
// CRUD End-To-End
// ============================================================================

#[tokio::test]
async fn test_entity_crud_round_trip() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items/entities"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items/entity"))
        .and(query_param("partitionKey", "p"))
        .and(query_param("rowKey", "r"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "partitionKey": "p",
            "rowKey": "r",
            "etag": "W/\"1\"",
            "amount": 42
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/items/entity"))
        .and(header("if-match", "W/\"1\""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/items/entity"))
        .and(query_param("partitionKey", "p"))
        .and(query_param("rowKey", "r"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let items = service.table("items");

    items
        .insert(&Entity::new("p", "r").with_property("amount", 42))
        .await
        .unwrap();

    let stored = items.get("p", "r").await.unwrap();
    assert_eq!(stored.property("amount"), Some(&json!(42)));
    assert_eq!(stored.etag.as_deref(), Some("W/\"1\""));

    items.update(&stored).await.unwrap();
    items.delete("p", "r").await.unwrap();
}

#[tokio::test]
async fn test_table_lifecycle() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tables"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tables/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "metrics"})))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/tables/metrics"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    service.create_table("metrics").await.unwrap();
    assert!(service.table_exists("metrics").await.unwrap());
    service.delete_table("metrics").await.unwrap();
}

#[tokio::test]
async fn test_missing_entity_maps_to_typed_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/entity"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service.table("items").get("p", "r").await.unwrap_err();
    assert!(matches!(err, Error::EntityNotFound { .. }));
}

// ============================================================================
// Full Scan End-To-End
// ============================================================================

#[tokio::test]
async fn test_get_all_follows_continuations() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events/entities"))
        .and(query_param_is_missing("nextRowKey"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chunk_body(0..4))
                .insert_header("x-continuation-next-partition-key", "data")
                .insert_header("x-continuation-next-row-key", "00000004"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/events/entities"))
        .and(query_param("nextRowKey", "00000004"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chunk_body(4..6)))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let events = service.table("events");

    let all = events.get_all().await.unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[5].row_key, "00000005");

    assert_eq!(events.count().await.unwrap(), 6);
}

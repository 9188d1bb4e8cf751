//! Integration tests for the what2craft HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

#![allow(clippy::unwrap_used)]

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use what2craft::api::{AppState, ErrorResponse, HealthResponse, create_router};
use what2craft::config::Config;
use what2craft_core::{
    CatalogError, CatalogLoader, ClosureCache, Item, MemorySource, Recipe, RecordDocument,
    RecordSource,
};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Wraps a source and counts how often it is read.
struct CountingSource {
    inner: MemorySource,
    reads: Arc<AtomicUsize>,
}

impl RecordSource for CountingSource {
    fn describe(&self) -> String {
        "counting".to_string()
    }

    fn records(&self) -> Result<Vec<RecordDocument>, CatalogError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.records()
    }
}

fn wood_and_axe() -> MemorySource {
    MemorySource::new()
        .with_json(
            "wood",
            &json!({"id": "A", "name": "Wood", "games": {"nh": {"sellPrice": {"value": 80}}}}),
        )
        .with_json(
            "axe",
            &json!({"id": "B", "name": "Axe", "games": {"nh": {
                "buyPrices": [{"value": 500}],
                "recipe": {"A": 5}
            }}}),
        )
        .with_json(
            "old-chair",
            &json!({"id": "Q", "name": "Old Chair", "games": {"pc": {"recipe": {"A": 2}}}}),
        )
}

/// Test server over `source`, plus the read counter.
fn create_test_server(source: MemorySource) -> (TestServer, Arc<AtomicUsize>) {
    let reads = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        inner: source,
        reads: Arc::clone(&reads),
    };
    let state = AppState::new(ClosureCache::new(source, CatalogLoader::default()));
    (TestServer::new(create_router(state)).unwrap(), reads)
}

fn write_record(dir: &Path, file: &str, record: &Value) {
    std::fs::write(dir.join(file), record.to_string()).unwrap();
}

// =============================================================================
// ITEMS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_items_returns_crafting_closure() {
    let (server, _reads) = create_test_server(wood_and_axe());

    let response = server.get("/items").await;

    response.assert_status_ok();
    let items: Vec<Item> = response.json();
    assert_eq!(
        items,
        vec![
            Item::new("A", "Wood").with_sell_price(80),
            Item::new("B", "Axe")
                .with_buy_price(500)
                .with_recipe(Recipe::from([("A".to_string(), 5)])),
        ]
    );
}

#[tokio::test]
async fn test_items_wire_format() {
    let (server, _reads) = create_test_server(wood_and_axe());

    let body: Value = server.get("/items").await.json();

    assert_eq!(
        body,
        json!([
            {"id": "A", "name": "Wood", "buyPrice": null, "sellPrice": 80, "recipe": null},
            {"id": "B", "name": "Axe", "buyPrice": 500, "sellPrice": null, "recipe": {"A": 5}}
        ])
    );
}

#[tokio::test]
async fn test_items_includes_placeholder_for_missing_ingredient() {
    let source = MemorySource::new().with_json(
        "shovel",
        &json!({"id": "S", "name": "Shovel", "games": {"nh": {"recipe": {"Z": 1}}}}),
    );
    let (server, _reads) = create_test_server(source);

    let items: Vec<Item> = server.get("/items").await.json();

    assert!(items.contains(&Item::placeholder("Z")));
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_items_computed_once() {
    let (server, reads) = create_test_server(wood_and_axe());

    let first: Vec<Item> = server.get("/items").await.json();
    let second: Vec<Item> = server.get("/items").await.json();

    assert_eq!(first, second);
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_items_empty_catalog() {
    let (server, _reads) = create_test_server(MemorySource::new());

    let body: Value = server.get("/items").await.json();

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_items_load_failure_is_500_and_terminal() {
    let source = MemorySource::new().with_record("/srv/items/broken.json", "{");
    let (server, reads) = create_test_server(source);

    for _ in 0..2 {
        let response = server.get("/items").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert_eq!(body, ErrorResponse::new("item catalog unavailable"));
        assert!(!response.text().contains("/srv/items"));
    }
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_does_not_load_catalog() {
    let (server, reads) = create_test_server(wood_and_axe());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(health.edition, "nh");
    assert!(!health.ready);
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_ready_after_items() {
    let (server, _reads) = create_test_server(wood_and_axe());

    server.get("/items").await.assert_status_ok();
    let health: HealthResponse = server.get("/health").await.json();

    assert!(health.ready);
}

// =============================================================================
// DIRECTORY + STATIC ASSET TESTS
// =============================================================================

#[tokio::test]
async fn test_server_from_config_reads_directory() {
    let items = tempfile::tempdir().unwrap();
    write_record(
        items.path(),
        "axe.json",
        &json!({"id": "B", "name": "Axe", "games": {"nh": {"recipe": {"A": 5}}}}),
    );
    let config = Config {
        items_dir: items.path().to_path_buf(),
        ..Config::default()
    };
    let server = TestServer::new(create_router(AppState::from_config(&config))).unwrap();

    let items: Vec<Item> = server.get("/items").await.json();

    let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[tokio::test]
async fn test_root_serves_index_html() {
    let web = tempfile::tempdir().unwrap();
    std::fs::write(web.path().join("index.html"), "<html>what2craft</html>").unwrap();
    let config = Config {
        static_dir: Some(web.path().to_path_buf()),
        ..Config::default()
    };
    let server = TestServer::new(create_router(AppState::from_config(&config))).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "<html>what2craft</html>");
}

#[tokio::test]
async fn test_root_without_static_dir_is_404() {
    let (server, _reads) = create_test_server(wood_and_axe());

    server.get("/").await.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// CORS TESTS
// =============================================================================

#[tokio::test]
async fn test_cors_allows_default_server_origin_only() {
    let (server, _reads) = create_test_server(wood_and_axe());

    let allowed = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:8080"))
        .await;
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("http://localhost:8080"))
    );

    let other = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .await;
    assert!(
        other
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

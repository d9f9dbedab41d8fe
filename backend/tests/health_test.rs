//! Integration tests for health check endpoints

mod common;

use axum::http::StatusCode;
use common::TestApp;
use std::sync::Arc;
use user_app_backend::repositories::InMemoryUserStore;

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = TestApp::new();

    let (status, body) = app.get("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let store = Arc::new(InMemoryUserStore::new());
    let app = TestApp::with_store(store.clone());

    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"]["status"], "healthy");

    store.set_offline(true);
    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/v1/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

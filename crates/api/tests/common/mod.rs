#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wiki_api::config::{LogFormat, ServerConfig};
use wiki_api::router::build_app_router;
use wiki_api::state::AppState;
use wiki_core::service::DocumentService;
use wiki_core::store::{DocumentStore, MemoryDocumentStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over the given store.
pub fn build_app_with_store(store: Arc<dyn DocumentStore>) -> Router {
    let state = AppState {
        documents: DocumentService::new(store),
    };
    build_app_router(state, &test_config())
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned so tests can check what was written.
pub fn build_test_app() -> (Router, Arc<MemoryDocumentStore>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let app = build_app_with_store(store.clone());
    (app, store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

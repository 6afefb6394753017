#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use promptbook_api::config::{LogFormat, ServerConfig, StoreBackend};
use promptbook_api::router::build_app_router;
use promptbook_api::state::AppState;
use promptbook_store::{MemoryStore, TemplateStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and no simulated playground latency.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        store_url: "http://localhost:8000/api".to_string(),
        seed_fixtures: true,
        playground_delay_ms: 0,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router, with the production middleware
/// stack, around the given store.
pub fn build_test_app(store: Arc<dyn TemplateStore>) -> Router {
    build_app_with_config(store, test_config())
}

pub fn build_app_with_config(store: Arc<dyn TemplateStore>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(store, config.clone()), &config)
}

/// Router over an empty memory store.
pub fn empty_app() -> Router {
    build_test_app(Arc::new(MemoryStore::new()))
}

/// Router over a memory store seeded with the demo fixtures.
pub fn fixture_app() -> Router {
    build_test_app(Arc::new(MemoryStore::with_fixtures()))
}

/// Serve `app` on an ephemeral local port and return its address.
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

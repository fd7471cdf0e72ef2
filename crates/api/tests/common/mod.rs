#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use railtrack_api::config::{CorsOrigins, ServerConfig};
use railtrack_api::router::build_app_router;
use railtrack_api::state::AppState;
use railtrack_core::store::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Allows `http://localhost:5173` as CORS origin (the dashboard dev server).
/// The database settings are unused because tests run on [`MemoryStore`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec!["http://localhost:5173".parse().unwrap()]),
        request_timeout_secs: 30,
        database_url: String::new(),
        database_max_connections: 1,
    }
}

/// Build the production router over a fresh in-memory store.
///
/// The store handle is returned so tests can inspect it or inject failures.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let config = test_config();
    let state = AppState::new(store.clone(), config.clone());
    (build_app_router(state, &config), store)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    with_json(app, Method::PATCH, uri, body).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a section through the API and return its id.
pub async fn create_section(app: &Router, name: &str) -> String {
    let response = post_json(app, "/api/sections", serde_json::json!({ "name": name })).await;
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}

/// Mark a section through the API and return the response body.
pub async fn mark(app: &Router, id: &str, status: &str) -> serde_json::Value {
    let response = post_json(
        app,
        &format!("/api/sections/{id}/mark"),
        serde_json::json!({ "status": status }),
    )
    .await;
    body_json(response).await
}

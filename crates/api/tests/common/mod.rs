//! Shared helpers for HTTP-level tests.
//!
//! Every test builds the production router over a fresh in-process store
//! and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use inventory_api::auth::jwt::{generate_session_token, SessionConfig};
use inventory_api::config::{ServerConfig, StoreBackend};
use inventory_api::router::build_app_router;
use inventory_api::state::AppState;
use inventory_core::access::AccessGate;
use inventory_db::MemoryEntryStore;
use tower::ServiceExt;

pub const EDITOR_EMAIL: &str = "owner@example.com";
pub const VISITOR_EMAIL: &str = "visitor@example.com";

/// Build a test `ServerConfig` with safe defaults and a single editor.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 15,
        },
        editors: AccessGate::new([EDITOR_EMAIL]),
    }
}

/// The full application router over an empty in-process store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(MemoryEntryStore::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn token_for(email: &str) -> String {
    generate_session_token("test-user", email, &test_config().session)
        .expect("token generation should succeed")
}

pub fn editor_token() -> String {
    token_for(EDITOR_EMAIL)
}

pub fn visitor_token() -> String {
    token_for(VISITOR_EMAIL)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    get_authed(app, uri, None).await
}

pub async fn get_authed(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, builder(Method::GET, uri, token).body(Body::empty()).unwrap()).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::POST, uri, token, body).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, token, body).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(
    app: Router,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
) -> Response<Body> {
    send_form(app, Method::POST, uri, token, fields).await
}

pub async fn put_form(
    app: Router,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
) -> Response<Body> {
    send_form(app, Method::PUT, uri, token, fields).await
}

async fn send_form(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, token).body(Body::empty()).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

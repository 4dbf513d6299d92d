#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use eyetask_core::bulk_import::store::ImportStore;
use eyetask_core::roles::{ROLE_ADMIN, ROLE_DATA_MANAGER, ROLE_DRIVER};
use eyetask_core::types::DbId;
use eyetask_pipeline::MemoryImportStore;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use eyetask_api::auth::jwt::{generate_access_token, JwtConfig};
use eyetask_api::config::ServerConfig;
use eyetask_api::router::build_app_router;
use eyetask_api::state::AppState;

pub const TEST_ORIGIN: &str = "http://localhost:3000";
pub const TEST_MAX_BODY_BYTES: usize = 64 * 1024;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_body_bytes: TEST_MAX_BODY_BYTES,
        jwt: JwtConfig::new("integration-test-secret-long-enough"),
    }
}

/// Build the full application router over an in-memory store.
///
/// Goes through [`build_app_router`] so the tests exercise the same
/// middleware stack as the binary.
pub fn build_test_app(store: Arc<MemoryImportStore>) -> Router {
    build_app_with(store, test_config())
}

/// Like [`build_test_app`] but over any store and configuration.
pub fn build_app_with(store: Arc<dyn ImportStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

pub fn admin_token() -> String {
    token_for(1, ROLE_ADMIN)
}

pub fn data_manager_token() -> String {
    token_for(2, ROLE_DATA_MANAGER)
}

pub fn driver_token() -> String {
    token_for(3, ROLE_DRIVER)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request, optionally authenticated.
pub async fn post_json(app: Router, uri: &str, body: &Value, token: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router over an in-memory backend and a
//! fixed site directory, so tests exercise the same middleware stack
//! (CORS, request ID, timeout, tracing, panic recovery) that production
//! uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use siteops_api::auth::jwt::{generate_session_token, JwtConfig};
use siteops_api::config::ServerConfig;
use siteops_api::router::build_app_router;
use siteops_api::state::AppState;
use siteops_store::backend::MemoryBackend;
use siteops_store::directory::{DirectoryInfo, StaticDirectory};

/// Signing secret shared by the harness and the session helpers below.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_page: "/admin".to_string(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            session_expiry_mins: 60,
        },
    }
}

/// Build the full application router plus the state behind it, so tests
/// can seed stores and the snapshot cache directly.
///
/// The fixed directory knows site 1 as "Example" / https://example.com;
/// every other site degrades to empty details.
pub fn build_test_app() -> (Router, AppState) {
    let config = test_config();

    let directory = StaticDirectory::new([(
        1,
        DirectoryInfo {
            name: "Example".to_string(),
            domain: "https://example.com".to_string(),
        },
    )]);

    let state = AppState::new(
        config.clone(),
        Arc::new(MemoryBackend::new()),
        Arc::new(directory),
    );

    let app = build_app_router(state.clone(), &config);
    (app, state)
}

/// A session token for an admin operator (user id 1).
pub fn admin_session() -> String {
    generate_session_token(1, "admin", &test_config().jwt)
        .expect("session generation should succeed")
}

/// A session token for a read-only viewer (user id 2).
pub fn viewer_session() -> String {
    generate_session_token(2, "viewer", &test_config().jwt)
        .expect("session generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with no credentials.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

/// Send a GET request with a Bearer session token.
pub async fn get_auth(app: Router, uri: &str, session: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {session}"))
        .body(Body::empty())
        .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

/// Send a GET request with a connector token header.
pub async fn get_with_token(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("x-connector-token", token)
        .body(Body::empty())
        .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

/// Send a POST with a JSON body and no credentials.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

/// Send a POST with a JSON body and a Bearer session token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    session: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {session}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");

    app.oneshot(request).await.expect("request should not fail")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert the silent write contract: a redirect back to the admin page,
/// with the `updated=1` flag only on accepted saves.
pub fn assert_redirect(response: &Response, expected_location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .expect("Location header should be a string");

    assert_eq!(location, expected_location);
}

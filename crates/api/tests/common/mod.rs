//! Shared helpers for the gateway integration tests.
//!
//! Each integration-test binary compiles its own copy of this module,
//! so not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::watch;
use tower::ServiceExt;

use citylens_api::config::GatewayConfig;
use citylens_api::router::build_app_router;
use citylens_api::state::AppState;
use citylens_client::poll::TrafficSnapshot;
use citylens_client::users::UserApiClient;

/// Build a test `GatewayConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. Cookies are non-Secure, as in
/// development.
pub fn test_config(user_api_url: &str) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        user_api_url: user_api_url.to_string(),
        // The traffic feed is injected through the watch channel in
        // tests; this URL is never dialed.
        traffic_api_url: "http://127.0.0.1:9".to_string(),
        traffic_poll_secs: 30,
        secure_cookies: false,
    }
}

/// Build the full application router with all middleware layers, wired
/// to the given mock user-API base URL.
///
/// This mirrors the construction in `main.rs` so integration tests
/// exercise the same middleware stack production uses. Returns the
/// sender side of the traffic snapshot channel so tests can publish
/// snapshots without running a poller.
pub fn build_test_app(user_api_url: &str) -> (Router, watch::Sender<TrafficSnapshot>) {
    let config = test_config(user_api_url);
    let users = UserApiClient::new(user_api_url, reqwest::Client::new());
    let (tx, rx) = watch::channel(TrafficSnapshot::default());

    let state = AppState::new(Arc::new(config.clone()), users, rx);
    (build_app_router(state, &config), tx)
}

/// Serve a mock upstream on an ephemeral port; returns its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock upstream");
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET `uri` with no cookies.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("router never errors")
}

/// GET `uri` with a `Cookie` header.
pub async fn get_with_cookies(app: Router, uri: &str, cookies: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookies)
        .body(Body::empty())
        .expect("build request");
    app.oneshot(request).await.expect("router never errors")
}

/// POST a JSON body to `uri`.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.oneshot(request).await.expect("router never errors")
}

/// POST a JSON body to `uri` with a `Cookie` header.
pub async fn post_json_with_cookies(
    app: Router,
    uri: &str,
    body: Value,
    cookies: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookies)
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.oneshot(request).await.expect("router never errors")
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// All `Set-Cookie` header values on a response.
pub fn set_cookie_headers(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("cookie header is ASCII").to_string())
        .collect()
}

/// Find the `Set-Cookie` header for `name`, if any.
pub fn find_cookie<'a>(headers: &'a [String], name: &str) -> Option<&'a String> {
    let prefix = format!("{name}=");
    headers.iter().find(|h| h.starts_with(&prefix))
}

/// Assert a response carries the standard JSON error envelope with the
/// given status and code; returns the error message.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) -> String {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code, "unexpected error code: {json}");
    json["error"]
        .as_str()
        .expect("error message is a string")
        .to_string()
}

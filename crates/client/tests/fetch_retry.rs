//! Integration tests for the authenticated-fetch coordinator: exact
//! request counts and the single refresh-and-retry bound.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use citylens_client::error::ClientError;
use citylens_client::fetch::send_with_refresh;
use common::{spawn_server, MemoryTokens};

/// Mock protected endpoint: 200 for `Bearer good`, 401 otherwise.
/// Counts every request it receives.
fn protected_route(hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/guarded",
        get(move |headers: HeaderMap| {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let bearer = headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                if bearer == "Bearer good" {
                    Json(json!({ "ok": true })).into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }
        }),
    )
}

#[tokio::test]
async fn valid_token_sends_exactly_one_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(protected_route(hits.clone())).await;

    let http = reqwest::Client::new();
    let tokens = MemoryTokens::new(Some("good"), None);

    let request = http.get(format!("{base}/guarded")).build().unwrap();
    let response = send_with_refresh(&http, request, &tokens).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(tokens.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn stale_token_with_successful_refresh_retries_once_and_returns_second_response() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(protected_route(hits.clone())).await;

    let http = reqwest::Client::new();
    let tokens = MemoryTokens::new(Some("stale"), Some("good"));

    let request = http.get(format!("{base}/guarded")).build().unwrap();
    let response = send_with_refresh(&http, request, &tokens).await.unwrap();

    // Exactly two outbound requests, and the second one's result wins.
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(tokens.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn stale_token_with_failed_refresh_returns_original_401() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(protected_route(hits.clone())).await;

    let http = reqwest::Client::new();
    let tokens = MemoryTokens::new(Some("stale"), None);

    let request = http.get(format!("{base}/guarded")).build().unwrap();
    let response = send_with_refresh(&http, request, &tokens).await.unwrap();

    // One outbound request only; the original 401 comes back as-is.
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(tokens.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(protected_route(hits.clone())).await;

    let http = reqwest::Client::new();
    let tokens = MemoryTokens::new(None, Some("good"));

    let request = http.get(format!("{base}/guarded")).build().unwrap();
    let result = send_with_refresh(&http, request, &tokens).await;

    assert_matches!(result, Err(ClientError::AuthenticationRequired));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(tokens.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn retry_that_still_fails_returns_the_second_401() {
    // Refresh "succeeds" but installs another bad token: the retry's
    // 401 must be returned without a further retry loop.
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(protected_route(hits.clone())).await;

    let http = reqwest::Client::new();
    let tokens = MemoryTokens::new(Some("stale"), Some("still-stale"));

    let request = http.get(format!("{base}/guarded")).build().unwrap();
    let response = send_with_refresh(&http, request, &tokens).await.unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(tokens.refresh_calls.load(Ordering::SeqCst), 1);
}

pub mod auth;
pub mod contributions;
pub mod health;
pub mod traffic;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login              login (public)
/// /auth/signup             signup (public)
/// /auth/logout             logout (public, idempotent)
/// /auth/session            local session check (public)
///
/// /contributions/mine      own contributions (requires session)
/// /contributions           community listing (requires session)
///
/// /traffic/overview        latest traffic snapshot + derived view (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/contributions", contributions::router())
        .nest("/traffic", traffic::router())
}

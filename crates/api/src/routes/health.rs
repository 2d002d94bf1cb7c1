use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether at least one traffic poll has succeeded since startup.
    pub traffic_feed_live: bool,
}

/// GET /health -- returns service and traffic-feed health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let traffic_feed_live = state.traffic.borrow().generation > 0;

    let status = if traffic_feed_live { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        traffic_feed_live,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

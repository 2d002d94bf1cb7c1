//! Handler for the traffic overview.
//!
//! Serves the latest polled snapshot; never fetches upstream on the
//! request path. The derived view (aggregates, map center, markers) is
//! computed fresh from the snapshot on every request.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use citylens_core::trafficview::DerivedTrafficView;

use crate::state::AppState;

/// Response for `GET /traffic/overview`.
#[derive(Debug, Serialize)]
pub struct TrafficOverviewResponse {
    /// Monotonic snapshot counter; 0 means no successful poll yet.
    pub generation: u64,
    /// When the snapshot was fetched, if ever.
    pub last_updated: Option<DateTime<Utc>>,
    pub sensor_count: usize,
    #[serde(flatten)]
    pub view: DerivedTrafficView,
}

/// GET /api/v1/traffic/overview
///
/// Public: the underlying feed requires no credentials.
pub async fn overview(State(state): State<AppState>) -> Json<TrafficOverviewResponse> {
    let snapshot = state.traffic.borrow().clone();
    let view = DerivedTrafficView::from_readings(&snapshot.readings);

    Json(TrafficOverviewResponse {
        generation: snapshot.generation,
        last_updated: snapshot.fetched_at,
        sensor_count: snapshot.readings.len(),
        view,
    })
}

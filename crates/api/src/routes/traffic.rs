//! Route definitions for the `/traffic` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::traffic;
use crate::state::AppState;

/// Routes mounted at `/traffic`.
///
/// ```text
/// GET /overview  -> latest snapshot with derived map view
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/overview", get(traffic::overview))
}

//! Route definitions for the `/contributions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::contributions;
use crate::state::AppState;

/// Routes mounted at `/contributions`. Both require a session.
///
/// ```text
/// GET /mine  -> own contributions
/// GET /      -> community listing (limit/offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(contributions::mine))
        .route("/", get(contributions::all))
}

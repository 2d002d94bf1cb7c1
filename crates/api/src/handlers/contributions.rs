//! Handlers for the `/contributions` resource.
//!
//! Both routes are session-guarded and fetch from the user API with the
//! refresh-and-retry coordinator, so an expired access token is healed
//! transparently when the refresh token is still good.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use citylens_client::ClientError;
use citylens_core::contribution::{Contribution, ContributionPage};

use crate::auth::AuthSession;
use crate::error::{AppError, AppResult};
use crate::middleware::session::SessionUser;
use crate::state::AppState;

/// Default page size for the community listing.
const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Query parameters for `GET /contributions`.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Response for `GET /contributions/mine`.
#[derive(Debug, Serialize)]
pub struct MineResponse {
    pub sensors: Vec<Contribution>,
}

/// A data fetch that still comes back unauthorized after the coordinator
/// already spent its one refresh attempt means the session is beyond
/// repair; surface that as a session-expired 401 rather than a generic
/// upstream error.
fn map_data_error(err: ClientError) -> AppError {
    if err.is_unauthorized() {
        AppError::SessionExpired
    } else {
        AppError::Client(err)
    }
}

/// GET /api/v1/contributions/mine
///
/// The calling user's own sensor contributions.
pub async fn mine(
    State(state): State<AppState>,
    cookies: Cookies,
    _user: SessionUser,
) -> AppResult<Json<MineResponse>> {
    let session = AuthSession::for_request(&state, cookies);
    let sensors = state
        .users
        .user_contributions(&session)
        .await
        .map_err(map_data_error)?;
    Ok(Json(MineResponse { sensors }))
}

/// GET /api/v1/contributions?limit=&offset=
///
/// The community-wide contribution listing, one offset window at a time.
/// Missing parameters default to the first page of 20.
pub async fn all(
    State(state): State<AppState>,
    cookies: Cookies,
    _user: SessionUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ContributionPage>> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let session = AuthSession::for_request(&state, cookies);
    let page = state
        .users
        .all_contributions(limit, offset, &session)
        .await
        .map_err(map_data_error)?;
    Ok(Json(page))
}

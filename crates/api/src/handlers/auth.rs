//! Handlers for the `/auth` resource (login, signup, logout, session).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tower_cookies::Cookies;

use citylens_core::validation::{LoginInput, SignupInput};

use crate::auth::{AuthSession, AuthStatus};
use crate::error::AppResult;
use crate::state::AppState;

/// Successful login response: the user record now held in the session.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Value,
}

/// POST /api/v1/auth/login
///
/// Validate the form, authenticate against the user API, and establish
/// a cookie session. Validation failures are 400 and never reach the
/// upstream; upstream rejections pass their status and message through.
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let session = AuthSession::for_request(&state, cookies);
    let user = session.login(&input).await?;
    tracing::info!("User logged in");
    Ok(Json(LoginResponse { user }))
}

/// POST /api/v1/auth/signup
///
/// Create an account. Returns 201 with the upstream's user record
/// verbatim and does NOT establish a session.
pub async fn signup(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(input): Json<SignupInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let session = AuthSession::for_request(&state, cookies);
    let created = session.signup(&input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/v1/auth/logout
///
/// Clear the session cookies. Idempotent; always 204.
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> StatusCode {
    let session = AuthSession::for_request(&state, cookies);
    session.logout();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/session
///
/// Report the local session state without touching the network. Always
/// 200; an absent or malformed session is `is_authenticated: false`,
/// not an error.
pub async fn session(State(state): State<AppState>, cookies: Cookies) -> Json<AuthStatus> {
    let session = AuthSession::for_request(&state, cookies);
    Json(session.check_auth())
}

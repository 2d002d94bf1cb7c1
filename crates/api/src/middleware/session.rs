//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use citylens_core::error::CoreError;
use serde_json::Value;
use tower_cookies::Cookies;

use crate::auth::AuthSession;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session cookies.
///
/// Use this as an extractor parameter in any handler that requires an
/// established session:
///
/// ```ignore
/// async fn my_handler(user: SessionUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.record, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// The check is purely local (cookie presence plus a parseable user
/// record); whether the access token is still accepted upstream is
/// decided per-request by the authenticated-fetch path.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The user record as stored at login.
    pub record: Value,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::InternalError(message.to_string()))?;

        let session = AuthSession::for_request(state, cookies);
        let status = session.check_auth();

        // Fail closed: anything short of a fully parseable session is a 401.
        match status.user {
            Some(record) if status.is_authenticated => Ok(SessionUser { record }),
            _ => Err(AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            ))),
        }
    }
}

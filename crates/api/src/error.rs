use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use citylens_client::ClientError;
use citylens_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`ClientError`] for
/// upstream failures, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `citylens_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An upstream-client error from `citylens_client`.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The upstream rejected the session's credentials on a guarded
    /// data route; the user must log in again.
    #[error("Session expired")]
    SessionExpired,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Upstream errors ---
            AppError::Client(client) => classify_client_error(client),

            // --- HTTP-specific errors ---
            AppError::SessionExpired => (
                StatusCode::UNAUTHORIZED,
                "SESSION_EXPIRED",
                "Your session has expired. Please log in again.".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an upstream-client error into an HTTP status, error code,
/// and user-displayable message.
///
/// - Missing credentials map to 401.
/// - An upstream 4xx passes its status and message through (this is
///   how a login rejection's reason reaches the user).
/// - Upstream 5xx and transport failures map to 502 with a generic
///   retry-later message.
fn classify_client_error(err: &ClientError) -> (StatusCode, &'static str, String) {
    match err {
        ClientError::AuthenticationRequired => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Authentication token is required".to_string(),
        ),
        ClientError::UpstreamStatus { status, message } if (400..500).contains(status) => {
            let status_code =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status_code, "UPSTREAM_REJECTED", message.clone())
        }
        ClientError::UpstreamStatus { status, .. } => {
            tracing::error!(status, "Upstream service error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Failed to fetch data. Please try again later.".to_string(),
            )
        }
        ClientError::Request(err) => {
            tracing::error!(error = %err, "Upstream request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "Failed to reach upstream service. Please try again later.".to_string(),
            )
        }
    }
}

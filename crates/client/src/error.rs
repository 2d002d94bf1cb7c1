use reqwest::StatusCode;

/// Errors produced by the upstream clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying HTTP request failed (network, DNS, timeout, or a
    /// malformed response body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status. The status is preserved
    /// so callers can pattern-match on 401 (session expiry).
    #[error("Upstream returned HTTP {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// No access token existed before the first authenticated attempt.
    #[error("Authentication token is required")]
    AuthenticationRequired,
}

impl ClientError {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::AuthenticationRequired => None,
        }
    }

    /// Whether this error is the upstream's 401 signal, which callers
    /// interpret as "session expired".
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

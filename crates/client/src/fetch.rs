//! Authenticated fetch with a single refresh-and-retry transition.
//!
//! Every authenticated upstream call goes through [`send_with_refresh`]:
//! attach the bearer token, send, and on exactly 401 perform one token
//! refresh followed by one retry. The retry bound is structural -- the
//! coordinator has no loop -- and the retry request is issued strictly
//! after the refresh completes, never concurrently with it.
//!
//! Concurrent in-flight requests that each hit 401 will each trigger
//! their own refresh. Refresh is idempotent and cheap upstream, so the
//! calls are not deduplicated.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request, Response, StatusCode};

use crate::error::ClientError;

/// Access to the current credentials, abstracted so the coordinator
/// stays independent of where tokens live (cookie jar in production, an
/// in-memory store in tests).
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// The current access token, if any.
    async fn access_token(&self) -> Option<String>;

    /// Attempt to mint a fresh access token from the refresh token.
    /// Returns `true` on success; failures are swallowed into `false`
    /// and must leave the existing credentials untouched.
    async fn refresh(&self) -> bool;
}

/// Outcome of a single authenticated attempt.
enum Attempt {
    /// Any response other than 401, success or failure alike.
    Completed(Response),
    /// The upstream rejected the access token.
    Unauthorized(Response),
}

/// Attach the bearer token and execute one request.
async fn attempt(http: &Client, mut request: Request, token: &str) -> Result<Attempt, ClientError> {
    // An access token that cannot form a header value can never
    // authenticate, so treat it the same as a missing one.
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ClientError::AuthenticationRequired)?;
    request.headers_mut().insert(AUTHORIZATION, value);

    let response = http.execute(request).await?;
    if response.status() == StatusCode::UNAUTHORIZED {
        Ok(Attempt::Unauthorized(response))
    } else {
        Ok(Attempt::Completed(response))
    }
}

/// Send an authenticated request, refreshing and retrying at most once
/// on 401.
///
/// Fails with [`ClientError::AuthenticationRequired`] when no access
/// token exists before the first attempt. If the first attempt returns
/// 401 and the refresh succeeds, the token is re-read, the header is
/// rebuilt, and the request is retried exactly once; whatever that
/// second attempt produces is returned as-is. If the refresh fails, the
/// original 401 response is returned unchanged.
pub async fn send_with_refresh(
    http: &Client,
    request: Request,
    tokens: &dyn TokenSource,
) -> Result<Response, ClientError> {
    let token = tokens
        .access_token()
        .await
        .ok_or(ClientError::AuthenticationRequired)?;

    // Clone before the body is consumed by the first send. All callers
    // issue bodyless GETs, so this always succeeds for them.
    let retry_request = request.try_clone();

    match attempt(http, request, &token).await? {
        Attempt::Completed(response) => Ok(response),
        Attempt::Unauthorized(first) => {
            if !tokens.refresh().await {
                return Ok(first);
            }

            let Some(retry_request) = retry_request else {
                // A streaming body cannot be replayed; surface the 401.
                return Ok(first);
            };

            let token = tokens
                .access_token()
                .await
                .ok_or(ClientError::AuthenticationRequired)?;

            match attempt(http, retry_request, &token).await? {
                Attempt::Completed(response) | Attempt::Unauthorized(response) => Ok(response),
            }
        }
    }
}

/// Read a non-2xx upstream response into [`ClientError::UpstreamStatus`],
/// preferring the `{"error": "..."}` body message over the fallback.
pub(crate) async fn upstream_error(response: Response, fallback: &str) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| fallback.to_string());

    ClientError::UpstreamStatus { status, message }
}

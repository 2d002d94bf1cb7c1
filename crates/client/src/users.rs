//! Client for the user-management API: auth endpoints and the
//! contribution listings built on authenticated fetch.

use serde::Deserialize;
use serde_json::Value;

use citylens_core::contribution::{Contribution, ContributionPage};
use citylens_core::validation::{LoginInput, SignupInput};

use crate::error::ClientError;
use crate::fetch::{self, upstream_error, TokenSource};

/// Successful login payload from `POST /users/login`. The user record
/// is kept opaque; the gateway only stores and echoes it.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSuccess {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Value,
}

#[derive(Debug, Deserialize)]
struct RefreshSuccess {
    access_token: String,
}

/// Wire envelope of `GET /sensors`.
#[derive(Debug, Deserialize)]
struct UserContributionsEnvelope {
    sensors: Vec<Contribution>,
}

/// Wire envelope of `GET /sensors/all`.
#[derive(Debug, Deserialize)]
struct AllContributionsEnvelope {
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<Contribution>,
}

/// Typed client for the user-management service.
#[derive(Debug, Clone)]
pub struct UserApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl UserApiClient {
    /// Create a client for the service at `base_url` (no trailing
    /// slash required).
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------
    // Auth endpoints (no bearer token)
    // -----------------------------------------------------------------

    /// `POST /users/login`. Returns the token pair plus user record, or
    /// the upstream's error message.
    pub async fn login(&self, input: &LoginInput) -> Result<LoginSuccess, ClientError> {
        let url = format!("{}/users/login", self.base_url);
        let response = self.http.post(url).json(input).send().await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Login failed").await);
        }
        Ok(response.json().await?)
    }

    /// `POST /users`. Returns the created-user payload verbatim;
    /// success does not establish a session.
    pub async fn signup(&self, input: &SignupInput) -> Result<Value, ClientError> {
        let url = format!("{}/users", self.base_url);
        let response = self.http.post(url).json(input).send().await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Signup failed").await);
        }
        Ok(response.json().await?)
    }

    /// `POST /users/refresh`. Exchanges the refresh token for a fresh
    /// access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, ClientError> {
        let url = format!("{}/users/refresh", self.base_url);
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let response = self.http.post(url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Token refresh failed").await);
        }
        let payload: RefreshSuccess = response.json().await?;
        Ok(payload.access_token)
    }

    // -----------------------------------------------------------------
    // Contribution listings (bearer token, refresh-and-retry)
    // -----------------------------------------------------------------

    /// `GET /sensors` -- the current user's contributions.
    pub async fn user_contributions(
        &self,
        tokens: &dyn TokenSource,
    ) -> Result<Vec<Contribution>, ClientError> {
        let url = format!("{}/sensors", self.base_url);
        let request = self.http.get(url).build()?;
        let response = fetch::send_with_refresh(&self.http, request, tokens).await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Failed to fetch user contributions").await);
        }
        let envelope: UserContributionsEnvelope = response.json().await?;
        Ok(envelope.sensors)
    }

    /// `GET /sensors/all?limit=&offset=` -- one window of the global
    /// contribution listing.
    pub async fn all_contributions(
        &self,
        limit: u32,
        offset: u32,
        tokens: &dyn TokenSource,
    ) -> Result<ContributionPage, ClientError> {
        let url = format!(
            "{}/sensors/all?limit={limit}&offset={offset}",
            self.base_url
        );
        let request = self.http.get(url).build()?;
        let response = fetch::send_with_refresh(&self.http, request, tokens).await?;

        if !response.status().is_success() {
            return Err(upstream_error(response, "Failed to fetch all contributions").await);
        }
        let envelope: AllContributionsEnvelope = response.json().await?;
        Ok(ContributionPage {
            items: envelope.results,
            total_count: envelope.count,
            next_cursor: envelope.next,
            prev_cursor: envelope.previous,
        })
    }
}

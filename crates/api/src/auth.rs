//! The auth session service: the only writer and reader of the
//! credential store.
//!
//! Wraps a [`SessionStore`] and the user-management client. Pages never
//! see raw tokens -- only the derived [`AuthStatus`] and user records
//! this service returns.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use citylens_client::users::UserApiClient;
use citylens_client::TokenSource;
use citylens_core::validation::{LoginInput, SignupInput};
use tower_cookies::Cookies;

use crate::error::AppResult;
use crate::session::{
    CookieSessionStore, SessionStore, ACCESS_TOKEN_KEY, ACCESS_TOKEN_TTL, REFRESH_TOKEN_KEY,
    REFRESH_TOKEN_TTL, USER_KEY, USER_TTL,
};
use crate::state::AppState;

/// Result of a local session check. Never derived from the network.
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub is_authenticated: bool,
    /// The stored user record; `None` when unauthenticated.
    pub user: Option<Value>,
}

impl AuthStatus {
    fn unauthenticated() -> Self {
        Self {
            is_authenticated: false,
            user: None,
        }
    }
}

/// Session operations bound to one request's credential store.
pub struct AuthSession<S: SessionStore> {
    store: S,
    users: UserApiClient,
}

impl AuthSession<CookieSessionStore> {
    /// Bind the service to the request's cookie jar.
    pub fn for_request(state: &AppState, cookies: Cookies) -> Self {
        Self {
            store: CookieSessionStore::new(cookies, state.config.secure_cookies),
            users: state.users.clone(),
        }
    }
}

impl<S: SessionStore> AuthSession<S> {
    pub fn new(store: S, users: UserApiClient) -> Self {
        Self { store, users }
    }

    /// Validate the login form, call the auth API, and establish a
    /// session by writing all three cookie values. Returns the user
    /// record on success.
    pub async fn login(&self, input: &LoginInput) -> AppResult<Value> {
        input.validated()?;

        let success = self.users.login(input).await?;

        let serialized_user = success.user.to_string();
        self.store
            .set(ACCESS_TOKEN_KEY, success.access_token, ACCESS_TOKEN_TTL);
        self.store
            .set(REFRESH_TOKEN_KEY, success.refresh_token, REFRESH_TOKEN_TTL);
        self.store.set(USER_KEY, serialized_user, USER_TTL);

        Ok(success.user)
    }

    /// Validate the signup form and create the account. Does NOT
    /// establish a session; the caller must log in separately.
    pub async fn signup(&self, input: &SignupInput) -> AppResult<Value> {
        input.validated()?;
        Ok(self.users.signup(input).await?)
    }

    /// Destroy the session by deleting all three cookie values.
    /// Idempotent: logging out with no active session is not an error.
    pub fn logout(&self) {
        self.store.delete(ACCESS_TOKEN_KEY);
        self.store.delete(REFRESH_TOKEN_KEY);
        self.store.delete(USER_KEY);
    }

    /// Local session check: access token present and user record
    /// parseable. A malformed user record is unauthenticated, not an
    /// error. Never calls the network.
    pub fn check_auth(&self) -> AuthStatus {
        let access_token = self.store.get(ACCESS_TOKEN_KEY);
        let stored_user = self.store.get(USER_KEY);

        let (Some(_), Some(stored_user)) = (access_token, stored_user) else {
            return AuthStatus::unauthenticated();
        };

        match serde_json::from_str::<Value>(&stored_user) {
            Ok(user) => AuthStatus {
                is_authenticated: true,
                user: Some(user),
            },
            Err(error) => {
                tracing::warn!(%error, "Stored user record is not valid JSON");
                AuthStatus::unauthenticated()
            }
        }
    }

    /// The current user record, or `None` when unauthenticated.
    pub fn current_user(&self) -> Option<Value> {
        self.check_auth().user
    }

    /// Mint a fresh access token from the stored refresh token.
    ///
    /// Returns `false` fast when no refresh token is stored. On any
    /// upstream failure the existing cookies are left untouched and
    /// `false` is returned -- transient failures must not destroy a
    /// session that a later attempt could still refresh.
    pub async fn refresh_access_token(&self) -> bool {
        let Some(refresh_token) = self.store.get(REFRESH_TOKEN_KEY) else {
            tracing::debug!("No refresh token available");
            return false;
        };

        match self.users.refresh(&refresh_token).await {
            Ok(access_token) => {
                self.store
                    .set(ACCESS_TOKEN_KEY, access_token, ACCESS_TOKEN_TTL);
                true
            }
            Err(error) => {
                tracing::warn!(%error, "Access-token refresh failed");
                false
            }
        }
    }
}

/// The authenticated-fetch coordinator reads and refreshes tokens
/// through the session service, so the cookie jar stays its single
/// owner.
#[async_trait]
impl<S: SessionStore> TokenSource for AuthSession<S> {
    async fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    async fn refresh(&self) -> bool {
        self.refresh_access_token().await
    }
}

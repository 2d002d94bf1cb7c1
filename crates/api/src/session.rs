//! The credential store: three cookie-held values with independent
//! expirations.
//!
//! No other module reads cookies directly; everything goes through the
//! [`SessionStore`] trait so the cookie-backed store can be swapped for
//! an in-memory one in tests. Every mutation is a wholesale set or
//! delete of one named value -- never a partial merge -- which keeps
//! partial-state corruption impossible.

use cookie::time::Duration;
use tower_cookies::{Cookie, Cookies};

/// Cookie holding the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Cookie holding the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Cookie holding the JSON-serialized user record.
pub const USER_KEY: &str = "user";

/// Access-token lifetime: 1 hour.
pub const ACCESS_TOKEN_TTL: Duration = Duration::seconds(3600);
/// Refresh-token lifetime: 24 hours.
pub const REFRESH_TOKEN_TTL: Duration = Duration::seconds(24 * 60 * 60);
/// User-record lifetime: 24 hours.
pub const USER_TTL: Duration = Duration::seconds(24 * 60 * 60);

/// Keyed credential storage with per-value expiry.
pub trait SessionStore: Send + Sync {
    /// Current value for `key`, if present and unexpired.
    fn get(&self, key: &str) -> Option<String>;

    /// Set `key` to `value` wholesale with the given lifetime,
    /// replacing any previous value.
    fn set(&self, key: &str, value: String, max_age: Duration);

    /// Delete `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &str);
}

/// Production store: HTTP-only, path-`/` cookies, `Secure` when the
/// gateway runs in production mode.
pub struct CookieSessionStore {
    cookies: Cookies,
    secure: bool,
}

impl CookieSessionStore {
    pub fn new(cookies: Cookies, secure: bool) -> Self {
        Self { cookies, secure }
    }
}

impl SessionStore for CookieSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies.get(key).map(|c| c.value().to_string())
    }

    fn set(&self, key: &str, value: String, max_age: Duration) {
        let cookie = Cookie::build((key.to_owned(), value))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .max_age(max_age)
            .build();
        self.cookies.add(cookie);
    }

    fn delete(&self, key: &str) {
        // Path must match the set path for the removal cookie to land.
        let cookie = Cookie::build((key.to_owned(), String::new()))
            .path("/")
            .build();
        self.cookies.remove(cookie);
    }
}

/// In-memory store for unit tests (no expiry tracking; tests control
/// contents directly).
#[derive(Default)]
pub struct MemorySessionStore {
    values: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without going through a login flow.
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String, _max_age: Duration) {
        self.values.lock().unwrap().insert(key.to_owned(), value);
    }

    fn delete(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

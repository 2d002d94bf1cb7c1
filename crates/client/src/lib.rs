//! Upstream REST clients for the citylens gateway.
//!
//! Two external services back every data-bearing page: the
//! user-management API (auth, contributions) and the traffic-flow API
//! (latest sensor snapshot). This crate holds the typed clients for
//! both, the authenticated-fetch coordinator with its single
//! refresh-and-retry transition, and the cancellable traffic poller.

pub mod error;
pub mod fetch;
pub mod poll;
pub mod traffic;
pub mod users;

pub use error::ClientError;
pub use fetch::TokenSource;

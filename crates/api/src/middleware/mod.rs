//! Request-guard extractors.
//!
//! - [`session::SessionUser`] -- Requires an established session; extracts
//!   the stored user record.

pub mod session;

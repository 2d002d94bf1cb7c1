//! HTTP handler functions, one module per resource.

pub mod auth;
pub mod contributions;
pub mod traffic;

//! Domain types and pure logic for the citylens dashboard gateway.
//!
//! This crate has no I/O: it defines the data model shared with the two
//! upstream services (user/auth and traffic-flow), the derived-view
//! computations behind the traffic map, and the client-side input
//! validation rules for the auth forms.

pub mod contribution;
pub mod error;
pub mod traffic;
pub mod trafficview;
pub mod types;
pub mod validation;

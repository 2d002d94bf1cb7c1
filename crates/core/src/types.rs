//! Shared scalar type aliases.

/// Server-assigned numeric identifier used by both upstream APIs
/// (user ids, contribution ids, sensor ids).
pub type DbId = i64;

//! Sensor-contribution records and offset pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// One sensor contribution, as returned by the user-management API.
/// Immutable once returned; this system only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub contribution_id: DbId,
    pub user_id: DbId,
    /// Service the sensor reports into, e.g. `traffic_flow` or
    /// `air_quality`.
    pub service: String,
    pub service_sensor_id: DbId,
    pub contributed_at: DateTime<Utc>,
}

/// One window of the global contribution listing.
///
/// Invariant: `items.len() <= limit` for the limit the window was
/// requested with. A cursor is `None` exactly at that end of the
/// collection, so `next_cursor: None` means the window touches the end
/// and `prev_cursor: None` means it starts at the beginning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionPage {
    pub items: Vec<Contribution>,
    pub total_count: u64,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

impl ContributionPage {
    /// Whether a further window exists after this one. Drives the
    /// "next page" control.
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Whether a window exists before this one. Drives the "previous
    /// page" control.
    pub fn has_prev(&self) -> bool {
        self.prev_cursor.is_some()
    }
}

//! Traffic-flow sensor data model.
//!
//! A [`TrafficSensorReading`] is one entry of the snapshot returned by
//! `GET /traffic-flow/traffic/latest`. The full snapshot is immutable and
//! replaced wholesale on every poll; no merging or diffing is performed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Three-tier classification of traffic density at a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Low,
    Moderate,
    High,
}

impl CongestionLevel {
    /// Wire-format name, matching the upstream JSON representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// One sensor's entry in the latest traffic snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSensorReading {
    pub sensor_id: DbId,
    pub timestamp: DateTime<Utc>,
    /// Number of vehicles detected. Non-negative by construction.
    pub traffic_volume: u64,
    /// Average vehicle speed in mph. Non-negative in practice.
    pub average_speed: f64,
    pub congestion_level: CongestionLevel,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn congestion_level_round_trips_snake_case() {
        let level: CongestionLevel = serde_json::from_str("\"moderate\"").unwrap();
        assert_eq!(level, CongestionLevel::Moderate);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"moderate\"");
    }

    #[test]
    fn reading_deserializes_from_upstream_shape() {
        let json = serde_json::json!({
            "sensor_id": 12,
            "timestamp": "2024-05-01T08:30:00Z",
            "traffic_volume": 420,
            "average_speed": 31.5,
            "congestion_level": "high",
            "latitude": 37.78,
            "longitude": -122.41
        });

        let reading: TrafficSensorReading = serde_json::from_value(json).unwrap();
        assert_eq!(reading.sensor_id, 12);
        assert_eq!(reading.traffic_volume, 420);
        assert_eq!(reading.congestion_level, CongestionLevel::High);
    }
}

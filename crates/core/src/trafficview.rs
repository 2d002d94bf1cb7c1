//! Derived-view computation for the traffic map.
//!
//! Pure, stateless functions over a slice of [`TrafficSensorReading`]:
//! aggregate metrics for the overview cards, the map center, and the
//! per-sensor visual encoding (color by congestion tier, radius by
//! volume). Everything here is recomputed from the current snapshot on
//! every request; nothing is cached.

use serde::Serialize;

use crate::traffic::{CongestionLevel, TrafficSensorReading};

// ---------------------------------------------------------------------------
// Visual-encoding constants
// ---------------------------------------------------------------------------

/// Map center used when the reading set is empty (San Francisco).
/// The map must always have a center, so an empty snapshot falls back
/// here instead of failing.
pub const FALLBACK_CENTER: GeoPoint = GeoPoint {
    latitude: 37.7749,
    longitude: -122.4194,
};

/// Minimum marker radius in meters. Chosen for visual legibility on the
/// default zoom level, not for physical meaning.
pub const MIN_MARKER_RADIUS_M: f64 = 400.0;

/// Additional meters of marker radius per detected vehicle.
pub const RADIUS_PER_VEHICLE_M: f64 = 0.6;

/// Marker fill colors by congestion tier, plus a neutral default.
const COLOR_LOW: &str = "#22c55e";
const COLOR_MODERATE: &str = "#eab308";
const COLOR_HIGH: &str = "#ef4444";
const COLOR_DEFAULT: &str = "#3b82f6";

// ---------------------------------------------------------------------------
// Derived types
// ---------------------------------------------------------------------------

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Sensor tallies per congestion tier. All three tiers are always
/// present; a tier absent from the data reports 0 rather than being
/// omitted from the serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CongestionCounts {
    pub low: u64,
    pub moderate: u64,
    pub high: u64,
}

/// Aggregate metrics across all sensors in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficAggregates {
    /// Mean of per-sensor average speeds, rounded to the nearest mph.
    /// 0 for an empty snapshot.
    pub average_speed: u64,
    /// Sum of per-sensor traffic volumes. 0 for an empty snapshot.
    pub total_volume: u64,
    pub counts_by_level: CongestionCounts,
}

/// Visual encoding for one sensor's map marker.
#[derive(Debug, Clone, Serialize)]
pub struct SensorMarker {
    pub sensor_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub congestion_level: CongestionLevel,
    pub traffic_volume: u64,
    pub average_speed: f64,
    /// Marker fill color (hex), from [`color_for_level`].
    pub color: &'static str,
    /// Marker radius in meters, from [`radius_for_volume`].
    pub radius_m: f64,
}

/// The complete derived view served to the traffic page: aggregates,
/// map center, and one marker per sensor. Computed, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedTrafficView {
    pub aggregates: TrafficAggregates,
    pub map_center: GeoPoint,
    pub markers: Vec<SensorMarker>,
}

// ---------------------------------------------------------------------------
// Computations
// ---------------------------------------------------------------------------

/// Compute aggregate metrics over a snapshot.
///
/// The empty case is handled by an explicit check (not by special float
/// handling): average speed and total volume are both 0, and every
/// congestion tier counts 0.
pub fn aggregate(readings: &[TrafficSensorReading]) -> TrafficAggregates {
    let mut counts = CongestionCounts::default();
    let mut total_volume: u64 = 0;
    let mut speed_sum: f64 = 0.0;

    for reading in readings {
        total_volume += reading.traffic_volume;
        speed_sum += reading.average_speed;
        match reading.congestion_level {
            CongestionLevel::Low => counts.low += 1,
            CongestionLevel::Moderate => counts.moderate += 1,
            CongestionLevel::High => counts.high += 1,
        }
    }

    let average_speed = if readings.is_empty() {
        0
    } else {
        (speed_sum / readings.len() as f64).round() as u64
    };

    TrafficAggregates {
        average_speed,
        total_volume,
        counts_by_level: counts,
    }
}

/// Arithmetic mean of all sensor coordinates, taken independently per
/// axis. Returns [`FALLBACK_CENTER`] for an empty snapshot.
pub fn map_center(readings: &[TrafficSensorReading]) -> GeoPoint {
    if readings.is_empty() {
        return FALLBACK_CENTER;
    }

    let count = readings.len() as f64;
    GeoPoint {
        latitude: readings.iter().map(|r| r.latitude).sum::<f64>() / count,
        longitude: readings.iter().map(|r| r.longitude).sum::<f64>() / count,
    }
}

/// Marker fill color for a congestion tier.
///
/// Total over arbitrary strings: the tier arrives in external JSON, so
/// an unrecognized value maps to a neutral blue instead of failing.
pub fn color_for_level(level: &str) -> &'static str {
    match level {
        "low" => COLOR_LOW,
        "moderate" => COLOR_MODERATE,
        "high" => COLOR_HIGH,
        _ => COLOR_DEFAULT,
    }
}

/// Marker radius in meters for a traffic volume.
///
/// Monotonic non-decreasing in volume and always at least
/// [`MIN_MARKER_RADIUS_M`].
pub fn radius_for_volume(volume: u64) -> f64 {
    MIN_MARKER_RADIUS_M + volume as f64 * RADIUS_PER_VEHICLE_M
}

impl SensorMarker {
    /// Build the visual encoding for one reading.
    pub fn from_reading(reading: &TrafficSensorReading) -> Self {
        Self {
            sensor_id: reading.sensor_id,
            latitude: reading.latitude,
            longitude: reading.longitude,
            congestion_level: reading.congestion_level,
            traffic_volume: reading.traffic_volume,
            average_speed: reading.average_speed,
            color: color_for_level(reading.congestion_level.as_str()),
            radius_m: radius_for_volume(reading.traffic_volume),
        }
    }
}

impl DerivedTrafficView {
    /// Derive the full traffic view from a snapshot.
    pub fn from_readings(readings: &[TrafficSensorReading]) -> Self {
        Self {
            aggregates: aggregate(readings),
            map_center: map_center(readings),
            markers: readings.iter().map(SensorMarker::from_reading).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use crate::error::MetricError;
use crate::types::{GeoPoint, GpsFix, MissionWaypoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A derived statistic, or the reason it could not be derived
pub type Metric = std::result::Result<f64, MetricError>;

/// Flight-level statistics, finalized once the record stream is exhausted
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightSummary {
    /// Seconds, taken from the last battery sample timestamp
    pub total_time_s: Metric,
    /// Meters, from barometric altitude
    pub max_altitude_m: Metric,
    /// mAh consumed according to the last battery sample
    pub battery_used_mah: Metric,
    pub total_distance_m: f64,
    pub max_range_m: f64,
    /// mAh per km flown
    pub average_efficiency: Metric,
    pub home: Option<GpsFix>,
    pub last_fix: Option<GpsFix>,
    /// Fix furthest from home; `None` when no fix ever moved away from home
    pub most_remote: Option<GpsFix>,
    pub fix_count: usize,
}

impl FlightSummary {
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m / 1000.0
    }

    pub fn max_range_km(&self) -> f64 {
        self.max_range_m / 1000.0
    }
}

/// Geometry of a stored mission after deduplication and ordering
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissionSummary {
    pub total_length_m: f64,
    /// Furthest distance of any waypoint from the first positioned waypoint
    pub max_range_m: f64,
    pub auto_land_configured: bool,
    /// Positioned waypoints in sequence order
    pub path: Vec<MissionWaypoint>,
}

impl MissionSummary {
    /// Waypoints that get an individual marker. The first one is the mission start
    /// and is already represented by the take-off marker.
    pub fn marker_waypoints(&self) -> &[MissionWaypoint] {
        self.path.get(1..).unwrap_or(&[])
    }

    pub fn path_points(&self) -> Vec<GeoPoint> {
        self.path.iter().map(|wp| wp.position()).collect()
    }
}

/// Outcome of mission normalization
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MissionReport {
    /// The log holds no positioned mission commands
    NoMissionData,
    Mission(MissionSummary),
}

impl MissionReport {
    pub fn summary(&self) -> Option<&MissionSummary> {
        match self {
            MissionReport::NoMissionData => None,
            MissionReport::Mission(summary) => Some(summary),
        }
    }
}

/// Message or mode change, placed at the last known GPS position
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventMarker {
    pub time_us: u64,
    pub text: String,
    pub position: Option<GeoPoint>,
}

/// Vehicle firmware announced in the boot messages
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FirmwareInfo {
    pub vehicle: String,
    pub version: semver::Version,
}

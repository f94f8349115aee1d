#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// MAVLink command id for NAV_LAND
pub const MAV_CMD_NAV_LAND: u16 = 21;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// GPS position sample from a GPS record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsFix {
    pub time_us: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GpsFix {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Battery monitor sample from a BAT record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatterySample {
    pub time_us: u64,
    pub voltage: f64,
    pub current: f64,
    /// Charge consumed since boot, mAh
    pub consumed_mah: f64,
}

/// Barometric altitude sample from a BARO record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaroSample {
    pub time_us: u64,
    pub altitude: f64,
}

/// Text message emitted by the autopilot (MSG record)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageEvent {
    pub time_us: u64,
    pub text: String,
}

/// Flight mode change (MODE record)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeChangeEvent {
    pub time_us: u64,
    pub mode: String,
    pub mode_number: Option<i64>,
}

/// Stored mission item (CMD record).
///
/// Two waypoints are equal only when every field matches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MissionWaypoint {
    pub latitude: f64,
    pub longitude: f64,
    pub sequence: u32,
    pub altitude: f64,
    pub command_id: u16,
}

impl MissionWaypoint {
    /// Commands such as DO_CHANGE_SPEED or a home-set carry no position and are
    /// logged with both coordinates at zero.
    pub fn has_position(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn is_land_command(&self) -> bool {
        self.command_id == MAV_CMD_NAV_LAND
    }

    /// Bit-exact identity used for deduplication
    pub(crate) fn identity(&self) -> (u64, u64, u32, u64, u16) {
        (
            self.latitude.to_bits(),
            self.longitude.to_bits(),
            self.sequence,
            self.altitude.to_bits(),
            self.command_id,
        )
    }
}

/// A decoded log record, one variant per record kind the analyzer consumes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TelemetryRecord {
    GpsFix(GpsFix),
    BatterySample(BatterySample),
    BaroSample(BaroSample),
    MessageEvent(MessageEvent),
    ModeChangeEvent(ModeChangeEvent),
    MissionCommand(MissionWaypoint),
}

impl TelemetryRecord {
    /// DataFlash message name the record was decoded from
    pub fn kind_name(&self) -> &'static str {
        match self {
            TelemetryRecord::GpsFix(_) => "GPS",
            TelemetryRecord::BatterySample(_) => "BAT",
            TelemetryRecord::BaroSample(_) => "BARO",
            TelemetryRecord::MessageEvent(_) => "MSG",
            TelemetryRecord::ModeChangeEvent(_) => "MODE",
            TelemetryRecord::MissionCommand(_) => "CMD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waypoint(latitude: f64, longitude: f64) -> MissionWaypoint {
        MissionWaypoint {
            latitude,
            longitude,
            sequence: 1,
            altitude: 50.0,
            command_id: 16,
        }
    }

    #[test]
    fn test_waypoint_position_requires_both_coordinates_zero_to_be_missing() {
        assert!(!waypoint(0.0, 0.0).has_position());
        assert!(waypoint(0.0, 12.5).has_position());
        assert!(waypoint(47.1, 0.0).has_position());
        assert!(waypoint(47.1, 8.3).has_position());
    }

    #[test]
    fn test_land_command_detection() {
        let mut wp = waypoint(47.1, 8.3);
        assert!(!wp.is_land_command());
        wp.command_id = MAV_CMD_NAV_LAND;
        assert!(wp.is_land_command());
    }

    #[test]
    fn test_identity_distinguishes_every_field() {
        let base = waypoint(47.1, 8.3);
        let mut other = base;
        assert_eq!(base.identity(), other.identity());
        other.altitude = 51.0;
        assert_ne!(base.identity(), other.identity());
    }
}

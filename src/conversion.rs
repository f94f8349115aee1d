//! Unit conversions and message text interpretation
//!
//! Helpers shared by the report and the map builder: time and distance units,
//! firmware banner parsing, and failsafe message classification.

use crate::types::FirmwareInfo;
use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

/// Convert a log timestamp in microseconds to seconds
pub fn micros_to_seconds(time_us: u64) -> f64 {
    time_us as f64 / 1_000_000.0
}

/// Convert meters to kilometers
pub fn meters_to_km(meters: f64) -> f64 {
    meters / 1000.0
}

/// Convert a GPS coordinate to decimal degrees.
///
/// Text logs normally carry degrees already; some exporters write the raw
/// integer (degrees * 10000000) instead, which is always outside +/-180.
pub fn convert_gps_coordinate(value: f64) -> f64 {
    if value.abs() > 180.0 {
        value / 10_000_000.0
    } else {
        value
    }
}

fn firmware_banner() -> &'static Regex {
    static BANNER: OnceLock<Regex> = OnceLock::new();
    BANNER.get_or_init(|| {
        // "ArduPlane V4.3.2 (c2f5e8ac)", "ArduCopter V4.5.0-dev", "APMrover2 V3.5.1"
        Regex::new(r"^(Ardu\w+|APM\w+|Blimp|AntennaTracker)\s+V(\d+\.\d+(?:\.\d+)?(?:-[0-9A-Za-z.]+)?)")
            .expect("firmware banner regex is valid")
    })
}

/// Parse the firmware banner the autopilot logs at boot
pub fn extract_firmware_version(message: &str) -> Option<FirmwareInfo> {
    let captures = firmware_banner().captures(message.trim())?;
    let vehicle = captures.get(1)?.as_str().to_string();
    let raw = captures.get(2)?.as_str();

    // Older builds log a two part version ("V3.9")
    let version = Version::parse(raw)
        .or_else(|_| Version::parse(&format!("{}.0", raw)))
        .ok()?;

    Some(FirmwareInfo { vehicle, version })
}

/// Severity of a failsafe message as shown on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailsafeKind {
    LongEvent,
    ShortEvent,
}

impl FailsafeKind {
    pub fn tooltip(&self) -> &'static str {
        match self {
            FailsafeKind::LongEvent => "Failsafe - long event",
            FailsafeKind::ShortEvent => "Failsafe - short event",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            FailsafeKind::LongEvent => "red",
            FailsafeKind::ShortEvent => "pink",
        }
    }
}

/// Classify a status text as a failsafe onset ("Failsafe. Long event on: type=1/reason=3")
pub fn classify_failsafe(message: &str) -> Option<FailsafeKind> {
    if !message.starts_with("Failsafe") {
        return None;
    }
    if message.contains("Long event on") {
        Some(FailsafeKind::LongEvent)
    } else if message.contains("Short event on") {
        Some(FailsafeKind::ShortEvent)
    } else {
        None
    }
}

/// Escape text for use inside HTML markup such as map popups
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Event text used for a flight mode change
pub fn format_mode_change(mode: &str) -> String {
    format!("Mode: {}", mode)
}

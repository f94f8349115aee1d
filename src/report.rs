//! Text report rendering
//!
//! Report lines use a 16 character label column followed by the value with two
//! decimals and its unit. Statistics that could not be derived print as
//! `n/a (<reason>)` so a partial log still yields a complete report.

use crate::conversion::{meters_to_km, micros_to_seconds};
use crate::params::{filter_by_pattern, format_parameter_line, ParameterRule, ParameterSet};
use crate::types::{FirmwareInfo, FlightSummary, GpsFix, Metric, MissionReport, ModeTransition};
use crate::Result;

const LABEL_WIDTH: usize = 16;

/// `label` padded to the label column, then the value with two decimals
pub fn format_stat_line(label: &str, value: f64, unit: &str) -> String {
    format!("{:<width$} {:.2} {}", label, value, unit, width = LABEL_WIDTH)
}

pub fn format_metric_line(label: &str, metric: Metric, unit: &str) -> String {
    match metric {
        Ok(value) => format_stat_line(label, value, unit),
        Err(reason) => format!("{:<width$} n/a ({})", label, reason, width = LABEL_WIDTH),
    }
}

fn format_location_line(label: &str, fix: Option<&GpsFix>) -> String {
    match fix {
        Some(fix) => format!(
            "{:<width$} {:.7}, {:.7}",
            label,
            fix.latitude,
            fix.longitude,
            width = LABEL_WIDTH
        ),
        None => format!("{:<width$} n/a (no GPS fixes)", label, width = LABEL_WIDTH),
    }
}

/// Flight statistics section
pub fn render_flight_report(summary: &FlightSummary, firmware: Option<&FirmwareInfo>) -> String {
    let mut lines = vec!["Flight statistics:".to_string()];

    if let Some(firmware) = firmware {
        lines.push(format!(
            "{:<width$} {} {}",
            "Firmware",
            firmware.vehicle,
            firmware.version,
            width = LABEL_WIDTH
        ));
    }

    lines.push(format_metric_line("Total time", summary.total_time_s, "sec"));
    lines.push(format_metric_line("Max altitude", summary.max_altitude_m, "m"));
    lines.push(format_metric_line("Battery used", summary.battery_used_mah, "mAh"));
    lines.push(format_location_line("Home location", summary.home.as_ref()));
    lines.push(format_location_line("Last location", summary.last_fix.as_ref()));
    lines.push(format_stat_line(
        "Total distance",
        summary.total_distance_km(),
        "km",
    ));
    lines.push(format_stat_line("Maximum range", summary.max_range_km(), "km"));
    lines.push(format_metric_line(
        "Efficiency",
        summary.average_efficiency,
        "mAh/km",
    ));

    lines.join("\n")
}

/// Mission section
pub fn render_mission_report(mission: &MissionReport) -> String {
    match mission {
        MissionReport::NoMissionData => "No mission data found in log file".to_string(),
        MissionReport::Mission(summary) => [
            "Mission data found in log file:".to_string(),
            format!(
                "{:<width$} {}",
                "Waypoints",
                summary.path.len(),
                width = LABEL_WIDTH
            ),
            format_stat_line("Total distance", meters_to_km(summary.total_length_m), "km"),
            format_stat_line("Maximum range", meters_to_km(summary.max_range_m), "km"),
            format!(
                "{:<width$} {}",
                "Auto landing",
                if summary.auto_land_configured {
                    "configured"
                } else {
                    "not configured"
                },
                width = LABEL_WIDTH
            ),
        ]
        .join("\n"),
    }
}

/// Flight mode timeline section
pub fn render_mode_timeline(transitions: &[ModeTransition]) -> String {
    if transitions.is_empty() {
        return "No flight mode changes in log file".to_string();
    }

    let mut lines = vec!["Flight modes:".to_string()];
    for transition in transitions {
        let duration = match transition.duration_seconds() {
            Some(seconds) => format!("{:.2} sec", seconds),
            None => "until end of log".to_string(),
        };
        lines.push(format!(
            "{:<width$} from {:.2} sec, {}",
            transition.mode,
            micros_to_seconds(transition.start_us),
            duration,
            width = LABEL_WIDTH
        ));
    }
    lines.join("\n")
}

/// Vehicle parameter checks section
pub fn render_rule_checks(rules: &[ParameterRule], parameters: &ParameterSet) -> String {
    let mut lines = vec!["Vehicle parameters:".to_string()];
    for rule in rules {
        lines.push(format!("{}: {}", rule.label, rule.check(parameters)));
    }
    lines.join("\n")
}

/// Parameter listing filtered by a glob pattern
pub fn render_parameter_dump(parameters: &ParameterSet, pattern: &str) -> Result<String> {
    let matched = filter_by_pattern(parameters, pattern)?;
    let mut lines = vec![format!("Parameters matching '{}':", pattern)];
    lines.extend(
        matched
            .into_iter()
            .map(|(name, value)| format_parameter_line(name, value)),
    );
    Ok(lines.join("\n"))
}

fn html_metric(metric: Metric, unit: &str) -> String {
    match metric {
        Ok(value) => format!("{:.2} {}", value, unit),
        Err(reason) => format!("n/a ({})", reason),
    }
}

/// Flight statistics as an HTML table, used in the landing marker popup
pub fn summary_table_html(summary: &FlightSummary) -> String {
    let rows = [
        ("Total time", html_metric(summary.total_time_s, "sec")),
        ("Max altitude", html_metric(summary.max_altitude_m, "m")),
        ("Battery used", html_metric(summary.battery_used_mah, "mAh")),
        (
            "Total distance",
            format!("{:.2} km", summary.total_distance_km()),
        ),
        ("Maximum range", format!("{:.2} km", summary.max_range_km())),
        (
            "Average efficiency",
            html_metric(summary.average_efficiency, "mAh/km"),
        ),
    ];

    let mut html = String::from("<table><tr><th colspan=\"2\">Flight information</th></tr>");
    for (label, value) in rows {
        html.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", label, value));
    }
    html.push_str("</table>");
    html
}

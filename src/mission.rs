//! Mission waypoint normalization
//!
//! CMD records are logged every time the mission is read back or uploaded, so the
//! same items usually appear several times and not necessarily in sequence order.

use crate::geodesy::distance;
use crate::types::{MissionReport, MissionSummary, MissionWaypoint};
use std::collections::HashSet;

/// Removes repeated waypoints, keeping the first occurrence of each
pub fn deduplicate(commands: &[MissionWaypoint]) -> Vec<MissionWaypoint> {
    let mut seen = HashSet::with_capacity(commands.len());
    commands
        .iter()
        .filter(|wp| seen.insert(wp.identity()))
        .copied()
        .collect()
}

/// Deduplicated waypoints sorted by sequence number.
///
/// The sort is stable, so items sharing a sequence number keep log order.
pub fn order_waypoints(commands: &[MissionWaypoint]) -> Vec<MissionWaypoint> {
    let mut waypoints = deduplicate(commands);
    waypoints.sort_by_key(|wp| wp.sequence);
    waypoints
}

/// Builds the mission summary from the raw CMD buffer
pub fn normalize_mission(commands: &[MissionWaypoint]) -> MissionReport {
    let mut path: Vec<MissionWaypoint> = Vec::new();
    let mut total_length_m = 0.0;
    let mut max_range_m: f64 = 0.0;
    let mut auto_land_configured = false;

    for wp in order_waypoints(commands)
        .into_iter()
        .filter(MissionWaypoint::has_position)
    {
        if let (Some(first), Some(previous)) = (path.first(), path.last()) {
            total_length_m += distance(previous.position(), wp.position());
            max_range_m = max_range_m.max(distance(first.position(), wp.position()));
        }
        if wp.is_land_command() {
            auto_land_configured = true;
        }
        path.push(wp);
    }

    if path.is_empty() {
        log::debug!(
            "No positioned mission items among {} CMD records",
            commands.len()
        );
        return MissionReport::NoMissionData;
    }

    log::debug!(
        "Mission: {} CMD records, {} positioned waypoints",
        commands.len(),
        path.len()
    );

    MissionReport::Mission(MissionSummary {
        total_length_m,
        max_range_m,
        auto_land_configured,
        path,
    })
}

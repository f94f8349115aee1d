//! Map layer assembly
//!
//! Turns the finalized summaries into four toggleable layers: the flown track with
//! take-off, landing and most remote point markers; failsafe onsets; the stored
//! mission; and every status message or mode change.

use crate::classifier::FlightAnalysis;
use crate::conversion::{classify_failsafe, escape_html};
use crate::report::summary_table_html;
use crate::types::{
    EventMarker, FlightSummary, GeoPoint, Icon, MapArtifact, MapLayer, Marker, MissionReport,
    Polyline,
};

pub const TRACK_LAYER: &str = "Track";
pub const FAILSAFE_LAYER: &str = "Failsafe";
pub const MISSION_LAYER: &str = "Mission";
pub const MESSAGES_LAYER: &str = "Messages";

const DEFAULT_ZOOM: u8 = 10;

fn coordinates(point: GeoPoint) -> String {
    format!("[{}, {}]", point.latitude, point.longitude)
}

fn track_layer(flight: &FlightSummary, track: &[GeoPoint]) -> MapLayer {
    let mut layer = MapLayer::new(TRACK_LAYER, true);

    if !track.is_empty() {
        layer.polylines.push(Polyline {
            points: track.to_vec(),
            color: "darkorange".to_string(),
        });
    }

    if let Some(home) = flight.home {
        layer.markers.push(Marker {
            position: home.position(),
            tooltip: "Take off".to_string(),
            popup: format!("Take off: {}", coordinates(home.position())),
            icon: Icon::new("circle-arrow-up", "green"),
        });
    }

    if let Some(last) = flight.last_fix {
        layer.markers.push(Marker {
            position: last.position(),
            tooltip: "Landing".to_string(),
            popup: summary_table_html(flight),
            icon: Icon::new("circle-arrow-down", "darkgreen"),
        });
    }

    if let Some(remote) = flight.most_remote {
        layer.markers.push(Marker {
            position: remote.position(),
            tooltip: "The most remote point".to_string(),
            popup: format!(
                "The most remote point: {}, {:.2} km",
                coordinates(remote.position()),
                flight.max_range_km()
            ),
            icon: Icon::new("asterisk", "blue"),
        });
    }

    layer
}

fn failsafe_layer(events: &[EventMarker]) -> MapLayer {
    let mut layer = MapLayer::new(FAILSAFE_LAYER, false);
    for event in events {
        let (Some(position), Some(kind)) = (event.position, classify_failsafe(&event.text)) else {
            continue;
        };
        layer.markers.push(Marker {
            position,
            tooltip: kind.tooltip().to_string(),
            popup: escape_html(&event.text),
            icon: Icon::new("exclamation-sign", kind.color()),
        });
    }
    layer
}

fn mission_layer(mission: &MissionReport) -> MapLayer {
    let mut layer = MapLayer::new(MISSION_LAYER, false);
    let Some(summary) = mission.summary() else {
        return layer;
    };

    layer.polylines.push(Polyline {
        points: summary.path_points(),
        color: "grey".to_string(),
    });

    for wp in summary.marker_waypoints() {
        layer.markers.push(Marker {
            position: wp.position(),
            tooltip: format!("Waypoint #{}", wp.sequence),
            popup: format!(
                "Waypoint #{}: {}, Alt={} m, Type={}",
                wp.sequence,
                coordinates(wp.position()),
                wp.altitude,
                wp.command_id
            ),
            icon: Icon::new("plus", "blue"),
        });
    }
    layer
}

fn messages_layer(events: &[EventMarker]) -> MapLayer {
    let mut layer = MapLayer::new(MESSAGES_LAYER, false);
    layer.markers = events
        .iter()
        .filter_map(|event| {
            event.position.map(|position| Marker {
                position,
                tooltip: "Message".to_string(),
                popup: format!("Message: {}", escape_html(&event.text)),
                icon: Icon::new("asterisk", "orange"),
            })
        })
        .collect();
    layer
}

/// Assemble the map layers from the finalized summaries
pub fn build_map(
    flight: &FlightSummary,
    track: &[GeoPoint],
    mission: &MissionReport,
    events: &[EventMarker],
) -> MapArtifact {
    let center = flight
        .home
        .map(|home| home.position())
        .or_else(|| mission.summary().and_then(|s| s.path_points().first().copied()));

    MapArtifact {
        center,
        zoom: DEFAULT_ZOOM,
        layers: vec![
            track_layer(flight, track),
            failsafe_layer(events),
            mission_layer(mission),
            messages_layer(events),
        ],
    }
}

impl FlightAnalysis {
    /// Map layers for this analysis
    pub fn to_map(&self) -> MapArtifact {
        build_map(&self.flight, &self.track, &self.mission, &self.events)
    }
}

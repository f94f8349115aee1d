//! Map export
//!
//! Writes a [`MapArtifact`] next to the analyzed log (or into an output directory)
//! as `<log file name>.<ext>`: raw JSON, or a self-contained Leaflet page that
//! draws the same layers with a layer toggle control.

#[cfg(feature = "json")]
use crate::conversion::escape_html;
use crate::error::{LogError, Result};
#[cfg(feature = "json")]
use crate::types::MapArtifact;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format of the saved map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFormat {
    Html,
    Json,
}

impl MapFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            MapFormat::Html => "html",
            MapFormat::Json => "json",
        }
    }
}

impl FromStr for MapFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(MapFormat::Html),
            "json" => Ok(MapFormat::Json),
            other => Err(LogError::Export(format!("unknown map format '{}'", other))),
        }
    }
}

/// Export options for controlling map output
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// `None` disables the map
    pub map: Option<MapFormat>,
    /// Directory for exported files (default: same as the log)
    pub output_dir: Option<PathBuf>,
}

/// Path of the exported map: the full log file name plus the format extension
pub fn compute_export_path(
    input_path: &Path,
    format: MapFormat,
    output_dir: Option<&Path>,
) -> PathBuf {
    let file_name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "flight".to_string());
    let export_name = format!("{}.{}", file_name, format.extension());

    match output_dir {
        Some(dir) => dir.join(export_name),
        None => input_path
            .parent()
            .map(|parent| parent.join(&export_name))
            .unwrap_or_else(|| PathBuf::from(&export_name)),
    }
}

#[cfg(feature = "json")]
const LEAFLET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const artifact = __ARTIFACT__;
const center = artifact.center ? [artifact.center.latitude, artifact.center.longitude] : [0, 0];
const map = L.map('map').setView(center, artifact.zoom);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
const overlays = {};
for (const layer of artifact.layers) {
  const group = L.featureGroup();
  for (const line of layer.polylines) {
    L.polyline(line.points.map(p => [p.latitude, p.longitude]), { color: line.color }).addTo(group);
  }
  for (const marker of layer.markers) {
    L.circleMarker([marker.position.latitude, marker.position.longitude], {
      radius: 7, color: marker.icon.color, fillOpacity: 0.8
    }).bindTooltip(marker.tooltip).bindPopup(marker.popup).addTo(group);
  }
  if (layer.visible) {
    group.addTo(map);
  }
  overlays[layer.name] = group;
}
L.control.layers(null, overlays, { collapsed: false }).addTo(map);
</script>
</body>
</html>
"#;

/// Render the map as a standalone Leaflet page
#[cfg(feature = "json")]
pub fn render_map_html(artifact: &MapArtifact, title: &str) -> Result<String> {
    let json = serde_json::to_string(artifact)
        .map_err(|e| LogError::Export(format!("failed to serialize map: {}", e)))?;
    // Keep popup markup from closing the script element
    let json = json.replace("</", "<\\/");
    Ok(LEAFLET_TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__ARTIFACT__", &json))
}

/// Write the map for `input_path` and return where it was saved
#[cfg(feature = "json")]
pub fn export_map(
    artifact: &MapArtifact,
    input_path: &Path,
    format: MapFormat,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let path = compute_export_path(input_path, format, output_dir);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let contents = match format {
        MapFormat::Json => serde_json::to_string_pretty(artifact)
            .map_err(|e| LogError::Export(format!("failed to serialize map: {}", e)))?,
        MapFormat::Html => {
            let title = input_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Flight log".to_string());
            render_map_html(artifact, &title)?
        }
    };

    std::fs::write(&path, contents)?;
    log::debug!("Saved {} map to {}", format.extension(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_path_next_to_log() {
        let path = compute_export_path(Path::new("/logs/00000042.log"), MapFormat::Html, None);
        assert_eq!(path, PathBuf::from("/logs/00000042.log.html"));
    }

    #[test]
    fn test_export_path_in_output_dir() {
        let path = compute_export_path(
            Path::new("/logs/flight.log"),
            MapFormat::Json,
            Some(Path::new("/tmp/maps")),
        );
        assert_eq!(path, PathBuf::from("/tmp/maps/flight.log.json"));
    }

    #[test]
    fn test_export_path_for_bare_file_name() {
        let path = compute_export_path(Path::new("flight.log"), MapFormat::Html, None);
        assert_eq!(path, PathBuf::from("flight.log.html"));
    }

    #[test]
    fn test_map_format_parse() {
        assert_eq!("HTML".parse::<MapFormat>().unwrap(), MapFormat::Html);
        assert_eq!("json".parse::<MapFormat>().unwrap(), MapFormat::Json);
        assert!("kml".parse::<MapFormat>().is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_html_escapes_closing_tags() {
        use crate::types::{GeoPoint, Icon, MapLayer, Marker};

        let mut layer = MapLayer::new("Track", true);
        layer.markers.push(Marker {
            position: GeoPoint::new(47.0, 8.0),
            tooltip: "Landing".to_string(),
            popup: "<table></table></script>".to_string(),
            icon: Icon::new("circle-arrow-down", "darkgreen"),
        });
        let artifact = MapArtifact {
            center: Some(GeoPoint::new(47.0, 8.0)),
            zoom: 10,
            layers: vec![layer],
        };

        let html = render_map_html(&artifact, "<flight>").unwrap();
        assert!(html.contains("<title>&lt;flight&gt;</title>"));
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}

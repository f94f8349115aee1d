use crate::types::GeoPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marker icon: a glyph name and a color, as understood by the map renderer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Icon {
    pub glyph: String,
    pub color: String,
}

impl Icon {
    pub fn new(glyph: &str, color: &str) -> Self {
        Self {
            glyph: glyph.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Marker {
    pub position: GeoPoint,
    pub tooltip: String,
    /// Popup body; may contain HTML markup
    pub popup: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polyline {
    pub points: Vec<GeoPoint>,
    pub color: String,
}

/// Independently toggleable group of map features
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapLayer {
    pub name: String,
    pub visible: bool,
    pub polylines: Vec<Polyline>,
    pub markers: Vec<Marker>,
}

impl MapLayer {
    pub fn new(name: &str, visible: bool) -> Self {
        Self {
            name: name.to_string(),
            visible,
            polylines: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty() && self.markers.is_empty()
    }
}

/// Everything the renderer needs to draw a flight
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapArtifact {
    pub center: Option<GeoPoint>,
    pub zoom: u8,
    pub layers: Vec<MapLayer>,
}

impl MapArtifact {
    pub fn layer(&self, name: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

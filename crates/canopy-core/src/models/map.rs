//! Map view, tile layer and draw-control settings.

use crate::models::shape::LatLng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 51.505,
    lng: -0.09,
};
pub const DEFAULT_ZOOM: u8 = 13;
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Initial map viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Base tile layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Which drawing tools are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawControl {
    pub polygon: bool,
    pub rectangle: bool,
    pub polyline: bool,
    pub circle: bool,
    pub marker: bool,
    pub circle_marker: bool,
    /// Editing shapes already in the overlay
    pub edit: bool,
    /// Deleting shapes already in the overlay
    pub remove: bool,
}

impl DrawControl {
    /// Polygon and rectangle tools only, with edit and delete
    pub fn polygons_and_rectangles() -> Self {
        Self {
            polygon: true,
            rectangle: true,
            polyline: false,
            circle: false,
            marker: false,
            circle_marker: false,
            edit: true,
            remove: true,
        }
    }
}

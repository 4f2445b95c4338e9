//! Shapes drawn on the map overlay.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS 84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Identifier assigned to a shape by the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Kinds of shape the draw control allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Polygon,
    Rectangle,
}

/// A drawn shape: its kind and outer ring of vertices.
///
/// The ring is stored open (the first vertex is not repeated at the end),
/// matching what drawing toolkits hand back for polygon layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub ring: Vec<LatLng>,
}

impl Shape {
    /// Create a polygon from its outer ring
    pub fn polygon(id: ShapeId, ring: Vec<LatLng>) -> Self {
        Self {
            id,
            kind: ShapeKind::Polygon,
            ring,
        }
    }

    /// Create a rectangle from two opposite corners
    pub fn rectangle(id: ShapeId, south_west: LatLng, north_east: LatLng) -> Self {
        let ring = vec![
            south_west,
            LatLng::new(north_east.lat, south_west.lng),
            north_east,
            LatLng::new(south_west.lat, north_east.lng),
        ];
        Self {
            id,
            kind: ShapeKind::Rectangle,
            ring,
        }
    }

    /// Same shape with its vertices replaced (used for edit events)
    pub fn with_ring(mut self, ring: Vec<LatLng>) -> Self {
        self.ring = ring;
        self
    }
}

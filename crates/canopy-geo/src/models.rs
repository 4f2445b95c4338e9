//! Conversions between drawn shapes and `geo` types.
//!
//! Shapes store `(lat, lng)` pairs; `geo` uses `x = longitude, y = latitude`.

use canopy_core::models::{BoundingBox, LatLng, Shape};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{Coord, LineString, Polygon};

/// Build a `geo` polygon from an open or closed ring
pub fn ring_to_polygon(ring: &[LatLng]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.lng, y: p.lat }).collect();
    // Polygon::new closes the exterior ring if needed
    Polygon::new(LineString::new(coords), vec![])
}

/// Bounding box of a ring, `None` for an empty or non-finite ring.
///
/// Longitudes are kept as drawn, so a box past the antimeridian may reach
/// beyond ±180.
pub fn bounding_box(ring: &[LatLng]) -> Option<BoundingBox> {
    let line: LineString<f64> = ring.iter().map(|p| Coord { x: p.lng, y: p.lat }).collect();
    let rect = line.bounding_rect()?;
    let bbox = BoundingBox {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    };
    [bbox.south, bbox.west, bbox.north, bbox.east]
        .iter()
        .all(|v| v.is_finite())
        .then_some(bbox)
}

/// Extension trait for Shape with geo-crate operations
pub trait ShapeExt {
    /// Convert to geo::Polygon
    fn to_geo(&self) -> Polygon<f64>;

    /// Bounding box of the outer ring
    fn bounds(&self) -> Option<BoundingBox>;
}

impl ShapeExt for Shape {
    fn to_geo(&self) -> Polygon<f64> {
        ring_to_polygon(&self.ring)
    }

    fn bounds(&self) -> Option<BoundingBox> {
        bounding_box(&self.ring)
    }
}

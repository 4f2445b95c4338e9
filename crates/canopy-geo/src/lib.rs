//! Canopy Geo - Geodesic measurement of drawn shapes
//!
//! This crate turns drawn shapes into the region the controller tracks:
//! ring validation, geodesic area, bounding boxes, and GeoJSON input.

pub mod geojson_input;
pub mod measure;
pub mod models;
pub mod validation;

pub use geojson_input::shapes_from_geojson;
pub use measure::{geodesic_area, measure_shape, SQUARE_METERS_PER_KM2};
pub use models::{bounding_box, ring_to_polygon, ShapeExt};
pub use validation::{ensure_valid_ring, validate_ring, ValidationError, ValidationResult};

use canopy_core::error::{CanopyError, Result};
use canopy_core::models::{DrawnRegion, LatLng, Shape};
use geo::ChamberlainDuquetteArea;

use crate::models::{bounding_box, ring_to_polygon};
use crate::validation::ensure_valid_ring;

pub const SQUARE_METERS_PER_KM2: f64 = 1_000_000.0;

/// Geodesic area of a ring in square metres.
///
/// Spherical-excess approximation on a sphere of the WGS 84 equatorial
/// radius, the same measure web map drawing tools report.
pub fn geodesic_area(ring: &[LatLng]) -> f64 {
    ring_to_polygon(ring).chamberlain_duquette_unsigned_area()
}

/// Measure a drawn shape into the region the controller tracks
pub fn measure_shape(shape: &Shape) -> Result<DrawnRegion> {
    ensure_valid_ring(&shape.ring)?;

    let bounds = bounding_box(&shape.ring).ok_or_else(|| CanopyError::InvalidGeometry {
        reason: "Shape has no bounding box".to_string(),
    })?;
    let area_km2 = geodesic_area(&shape.ring) / SQUARE_METERS_PER_KM2;

    tracing::debug!(shape_id = shape.id.0, area_km2, bounds = %bounds, "Measured shape");

    Ok(DrawnRegion {
        shape_id: shape.id,
        area_km2,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::models::ShapeId;

    #[test]
    fn test_one_degree_square_at_equator() {
        // R² · Δλ · (sin φ2 − sin φ1) with R = 6378137 m ≈ 12 391 km²
        let area = geodesic_area(&[
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(0.0, 1.0),
        ]) / SQUARE_METERS_PER_KM2;

        assert!(area > 12_300.0 && area < 12_450.0, "area {} should be ~12391 km²", area);
    }

    #[test]
    fn test_area_independent_of_winding() {
        let ring = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 0.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(0.0, 1.0),
        ];
        let mut reversed = ring.clone();
        reversed.reverse();

        assert!((geodesic_area(&ring) - geodesic_area(&reversed)).abs() < 1e-6);
    }

    #[test]
    fn test_measure_london_rectangle() {
        let rect = Shape::rectangle(ShapeId(3), LatLng::new(51.5, -0.1), LatLng::new(51.51, -0.09));
        let region = measure_shape(&rect).unwrap();

        assert_eq!(region.shape_id, ShapeId(3));
        assert!((region.area_km2 - 0.771).abs() < 0.01, "area {}", region.area_km2);
        assert_eq!(region.area_label(), "Selected Area: 0.77 km²");
        assert_eq!(region.coordinates(), "51.5,-0.1,51.51,-0.09");
    }

    #[test]
    fn test_measure_rejects_degenerate_shape() {
        let line = Shape::polygon(ShapeId(4), vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]);
        assert!(matches!(measure_shape(&line), Err(CanopyError::InvalidGeometry { .. })));
    }
}

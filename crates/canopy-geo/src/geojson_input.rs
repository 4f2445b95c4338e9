//! Polygons supplied as GeoJSON instead of drawn by hand.

use ::geojson::{GeoJson, Geometry, Value};
use canopy_core::error::{CanopyError, Result};
use canopy_core::models::{LatLng, Shape, ShapeId};

/// Read every polygon in a GeoJSON document as a drawn shape.
///
/// Accepts a bare geometry, a feature, or a feature collection. Polygons and
/// the members of multipolygons are returned in document order with ids
/// counting up from `first_id`; holes and non-polygon geometries are skipped.
pub fn shapes_from_geojson(text: &str, first_id: u64) -> Result<Vec<Shape>> {
    let geojson: GeoJson = text.parse().map_err(|e| CanopyError::InvalidGeometry {
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    let mut geometries = Vec::new();
    match &geojson {
        GeoJson::Geometry(geometry) => geometries.push(geometry),
        GeoJson::Feature(feature) => geometries.extend(feature.geometry.as_ref()),
        GeoJson::FeatureCollection(fc) => {
            geometries.extend(fc.features.iter().filter_map(|f| f.geometry.as_ref()))
        }
    }

    let mut rings = Vec::new();
    for geometry in geometries {
        collect_outer_rings(geometry, &mut rings)?;
    }

    if rings.is_empty() {
        return Err(CanopyError::InvalidGeometry {
            reason: "GeoJSON contains no Polygon or MultiPolygon geometry".to_string(),
        });
    }

    Ok(rings
        .into_iter()
        .enumerate()
        .map(|(i, ring)| Shape::polygon(ShapeId(first_id + i as u64), ring))
        .collect())
}

fn collect_outer_rings(geometry: &Geometry, rings: &mut Vec<Vec<LatLng>>) -> Result<()> {
    match &geometry.value {
        Value::Polygon(polygon) => {
            if let Some(exterior) = polygon.first() {
                rings.push(convert_ring(exterior)?);
            }
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                if let Some(exterior) = polygon.first() {
                    rings.push(convert_ring(exterior)?);
                }
            }
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_outer_rings(member, rings)?;
            }
        }
        _ => tracing::debug!("Skipping non-polygon geometry"),
    }
    Ok(())
}

fn convert_ring(positions: &[Vec<f64>]) -> Result<Vec<LatLng>> {
    let mut ring = Vec::with_capacity(positions.len());
    for position in positions {
        match (position.first(), position.get(1)) {
            (Some(&lng), Some(&lat)) => ring.push(LatLng::new(lat, lng)),
            _ => {
                return Err(CanopyError::InvalidGeometry {
                    reason: format!("Position {:?} needs longitude and latitude", position),
                })
            }
        }
    }

    // GeoJSON rings repeat the first position; drawn shapes are open
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    Ok(ring)
}

//! Turning region flags into drawn shapes.

use anyhow::{Context, Result};
use canopy_core::models::{BoundingBox, LatLng, Shape, ShapeId};
use canopy_core::CanopyError;
use canopy_geo::shapes_from_geojson;
use std::path::Path;

use crate::cli::RegionArgs;

/// Shapes described by the region flags, in drawing order
pub fn shapes_from_args(args: &RegionArgs) -> Result<Vec<Shape>> {
    if let Some(bbox) = &args.bbox {
        let shape = parse_bbox(bbox).context("Failed to read --bbox")?;
        return Ok(vec![shape]);
    }

    if let Some(polygon) = &args.polygon {
        let shape = parse_polygon(polygon).context("Failed to read --polygon")?;
        return Ok(vec![shape]);
    }

    if let Some(path) = &args.geojson {
        return load_geojson(path);
    }

    anyhow::bail!("One of --bbox, --polygon or --geojson is required")
}

/// Rectangle from "south,west,north,east"
pub fn parse_bbox(input: &str) -> canopy_core::Result<Shape> {
    let bbox: BoundingBox = input.parse()?;
    Ok(Shape::rectangle(
        ShapeId(1),
        LatLng::new(bbox.south, bbox.west),
        LatLng::new(bbox.north, bbox.east),
    ))
}

/// Polygon from "lat,lng;lat,lng;..."
pub fn parse_polygon(input: &str) -> canopy_core::Result<Shape> {
    let invalid = |reason: String| CanopyError::InvalidCoordinates {
        input: input.to_string(),
        reason,
    };

    let mut ring = Vec::new();
    for vertex in input.split(';').map(str::trim).filter(|v| !v.is_empty()) {
        let (lat, lng) = vertex
            .split_once(',')
            .ok_or_else(|| invalid(format!("vertex '{}' is not lat,lng", vertex)))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid(format!("latitude '{}' is not a number", lat.trim())))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| invalid(format!("longitude '{}' is not a number", lng.trim())))?;

        ring.push(LatLng::new(lat, lng));
    }

    if ring.is_empty() {
        return Err(invalid("no vertices".to_string()));
    }

    Ok(Shape::polygon(ShapeId(1), ring))
}

/// Every polygon in a GeoJSON file
pub fn load_geojson(path: &Path) -> Result<Vec<Shape>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON file {}", path.display()))?;

    let shapes = shapes_from_geojson(&text, 1)
        .with_context(|| format!("Failed to read polygons from {}", path.display()))?;

    tracing::debug!(path = %path.display(), shapes = shapes.len(), "Loaded GeoJSON shapes");
    Ok(shapes)
}

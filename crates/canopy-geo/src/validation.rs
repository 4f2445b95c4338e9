use canopy_core::error::{CanopyError, Result};
use canopy_core::models::LatLng;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// All reasons joined into one message
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate the outer ring of a drawn shape.
///
/// A usable ring has at least three distinct vertices, all finite with
/// latitudes within -90..90. Longitudes are not wrapped: a map panned past
/// the antimeridian reports values beyond ±180. A repeated closing vertex is
/// allowed.
pub fn validate_ring(ring: &[LatLng]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, point) in ring.iter().enumerate() {
        if !point.is_finite() {
            result.add_error(format!("ring[{}]", i), "Coordinates must be finite".to_string());
            continue;
        }
        if !(-90.0..=90.0).contains(&point.lat) {
            result.add_error(
                format!("ring[{}]", i),
                format!("Latitude {} is outside -90..90", point.lat),
            );
        }
    }

    let distinct = distinct_vertices(ring);
    if distinct < 3 {
        result.add_error(
            "ring".to_string(),
            format!("Shape needs at least 3 distinct vertices, found {}", distinct),
        );
    }

    result
}

/// Validate a ring, converting failures into `CanopyError::InvalidGeometry`
pub fn ensure_valid_ring(ring: &[LatLng]) -> Result<()> {
    let result = validate_ring(ring);
    if result.is_valid {
        Ok(())
    } else {
        Err(CanopyError::InvalidGeometry { reason: result.summary() })
    }
}

fn distinct_vertices(ring: &[LatLng]) -> usize {
    let mut seen: Vec<&LatLng> = Vec::with_capacity(ring.len());
    for point in ring {
        if !seen.contains(&point) {
            seen.push(point);
        }
    }
    seen.len()
}

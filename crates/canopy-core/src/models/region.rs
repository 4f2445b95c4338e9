//! The region of interest derived from the most recently drawn shape.

use crate::error::{CanopyError, Result};
use crate::models::shape::ShapeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bounding box in degrees, ordered the way the area endpoint expects it:
/// south latitude, west longitude, north latitude, east longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Create a validated bounding box
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        let bbox = Self {
            south,
            west,
            north,
            east,
        };
        bbox.validate().map_err(|reason| CanopyError::InvalidCoordinates {
            input: bbox.to_string(),
            reason,
        })?;
        Ok(bbox)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let values = [self.south, self.west, self.north, self.east];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("coordinates must be finite numbers".to_string());
        }
        for lat in [self.south, self.north] {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(format!("latitude {} is outside -90..90", lat));
            }
        }
        for lng in [self.west, self.east] {
            if !(-180.0..=180.0).contains(&lng) {
                return Err(format!("longitude {} is outside -180..180", lng));
            }
        }
        if self.south > self.north {
            return Err(format!("south {} is north of north {}", self.south, self.north));
        }
        if self.west > self.east {
            return Err(format!("west {} is east of east {}", self.west, self.east));
        }
        Ok(())
    }

    /// The comma-joined form sent as the `coordinates` form field
    pub fn to_coordinate_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

impl FromStr for BoundingBox {
    type Err = CanopyError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| CanopyError::InvalidCoordinates {
            input: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(invalid(format!("expected 4 comma-separated values, got {}", parts.len())));
        }

        let mut values = [0.0_f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| invalid(format!("'{}' is not a number", part)))?;
        }

        let [south, west, north, east] = values;
        BoundingBox::new(south, west, north, east).map_err(|e| match e {
            CanopyError::InvalidCoordinates { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

/// The single region the controller tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnRegion {
    pub shape_id: ShapeId,
    /// Geodesic area in square kilometres
    pub area_km2: f64,
    pub bounds: BoundingBox,
}

impl DrawnRegion {
    /// Text shown in the area readout
    pub fn area_label(&self) -> String {
        format!("Selected Area: {:.2} km²", self.area_km2)
    }

    /// Stored coordinate string for the area endpoint
    pub fn coordinates(&self) -> String {
        self.bounds.to_coordinate_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_string_order() {
        let bbox = BoundingBox::new(51.5, -0.1, 51.51, -0.09).unwrap();
        assert_eq!(bbox.to_coordinate_string(), "51.5,-0.1,51.51,-0.09");
    }

    #[test]
    fn test_parse_coordinate_string() {
        let bbox: BoundingBox = "51.5, -0.1, 51.51, -0.09".parse().unwrap();
        assert_eq!(bbox.south, 51.5);
        assert_eq!(bbox.west, -0.1);
        assert_eq!(bbox.north, 51.51);
        assert_eq!(bbox.east, -0.09);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("1,2,3".parse::<BoundingBox>().is_err());
        assert!("a,b,c,d".parse::<BoundingBox>().is_err());
        assert!("95,0,96,1".parse::<BoundingBox>().is_err());
        assert!("10,0,5,1".parse::<BoundingBox>().is_err());
        assert!("0,190,1,191".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_area_label_two_decimals() {
        let region = DrawnRegion {
            shape_id: ShapeId(7),
            area_km2: 0.771_308,
            bounds: BoundingBox::new(51.5, -0.1, 51.51, -0.09).unwrap(),
        };
        assert_eq!(region.area_label(), "Selected Area: 0.77 km²");
        assert_eq!(region.coordinates(), "51.5,-0.1,51.51,-0.09");
    }
}

//! Analysis requests sent to the backend and the results it returns.

use crate::error::{CanopyError, Result};
use crate::models::endpoints::Endpoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An image selected for upload
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep image bytes out of logs.
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// What an analysis request is about
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisTarget {
    /// An uploaded image
    Image(ImageFile),
    /// A map region as a "south,west,north,east" coordinate string
    Area(String),
}

/// A request for the detection backend
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub target: AnalysisTarget,
    /// Confidence threshold forwarded to the detector, not interpreted here
    pub confidence: f64,
}

impl AnalysisRequest {
    /// Image analysis request
    pub fn image(image: ImageFile, confidence: f64) -> Self {
        Self {
            target: AnalysisTarget::Image(image),
            confidence,
        }
    }

    /// Area analysis request
    pub fn area(coordinates: impl Into<String>, confidence: f64) -> Self {
        Self {
            target: AnalysisTarget::Area(coordinates.into()),
            confidence,
        }
    }

    /// Build a request from the optional inputs the page provides.
    ///
    /// The image wins when both are present. An empty coordinate string counts
    /// as no selection.
    pub fn from_parts(
        image: Option<ImageFile>,
        confidence: f64,
        area: Option<&str>,
    ) -> Result<Self> {
        match (image, area) {
            (Some(image), _) => Ok(Self::image(image, confidence)),
            (None, Some(area)) if !area.is_empty() => Ok(Self::area(area, confidence)),
            _ => Err(CanopyError::NothingSelected),
        }
    }

    /// Endpoint the request is routed to
    pub fn endpoint(&self) -> Endpoint {
        match self.target {
            AnalysisTarget::Image(_) => Endpoint::ProcessImage,
            AnalysisTarget::Area(_) => Endpoint::ProcessArea,
        }
    }

    /// Value of the `conf` form field
    pub fn confidence_field(&self) -> String {
        self.confidence.to_string()
    }
}

/// Metrics returned by the backend.
///
/// `area`, `density` and `resolution` are display strings with units embedded
/// and are rendered verbatim; a missing one renders blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tree_count: u64,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub density: String,
    #[serde(default)]
    pub resolution: String,
    pub image_path: String,
    /// Informational; a value that isn't a number reads as `None`
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<serde_json::Value>,
}

impl AnalysisResult {
    /// Parse a backend response body
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| CanopyError::ResponseDecode(e.to_string()))
    }
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

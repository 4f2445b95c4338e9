//! Backend routes.

use serde::{Deserialize, Serialize};

/// Analysis endpoints accepting multipart POSTs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    ProcessImage,
    ProcessArea,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ProcessImage => "/process_image",
            Endpoint::ProcessArea => "/process_area",
        }
    }
}

/// Route builder anchored at the backend base URL.
///
/// An empty base produces the relative paths a page served by the backend
/// itself would use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Relative routes, no scheme or host
    pub fn relative() -> Self {
        Self::default()
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base, endpoint.path())
    }

    /// Preview URL of a processed image
    pub fn image_url(&self, image_path: &str) -> String {
        format!("{}/images/{}", self.base, image_path.trim_start_matches('/'))
    }

    /// Download URL of a processed image
    pub fn download_url(&self, image_path: &str) -> String {
        format!("{}/download_image/{}", self.base, image_path.trim_start_matches('/'))
    }
}

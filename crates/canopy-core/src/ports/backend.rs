use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AnalysisRequest, AnalysisResult, Endpoints};

/// Port for the tree-detection service
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit one analysis request.
    ///
    /// Non-success HTTP statuses are errors even when a body is present.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;

    /// Download a processed image by the path the backend returned
    async fn fetch_image(&self, image_path: &str) -> Result<Vec<u8>>;

    /// Routes used for previews and downloads
    fn endpoints(&self) -> &Endpoints;
}

use async_trait::async_trait;
use canopy_core::error::{CanopyError, Result};
use canopy_core::models::{AnalysisRequest, AnalysisResult, AnalysisTarget, Endpoints};
use canopy_core::ports::AnalysisBackend;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Backend client speaking the detection service's HTTP API
pub struct HttpAnalysisBackend {
    /// Routes anchored at the backend base URL (e.g., "http://localhost:5000")
    endpoints: Endpoints,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpAnalysisBackend {
    /// Create a new backend client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create with a preconfigured HTTP client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoints: Endpoints::new(base_url),
            client,
        }
    }

    /// Create with the default local development URL
    pub fn localhost() -> Self {
        Self::new("http://127.0.0.1:5000")
    }

    fn build_form(request: &AnalysisRequest) -> Result<Form> {
        let form = Form::new().text("conf", request.confidence_field());

        let form = match &request.target {
            AnalysisTarget::Image(image) => {
                let mut part = Part::bytes(image.bytes.clone()).file_name(image.name.clone());
                if let Some(content_type) = &image.content_type {
                    part = part.mime_str(content_type).map_err(|e| CanopyError::Transport {
                        url: request.endpoint().path().to_string(),
                        reason: format!("Invalid content type '{}': {}", content_type, e),
                    })?;
                }
                form.part("image", part)
            }
            AnalysisTarget::Area(coordinates) => form.text("coordinates", coordinates.clone()),
        };

        Ok(form)
    }

    async fn send(&self, url: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| CanopyError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Some(message) = backend_error_message(&body) {
                tracing::warn!(url, status = status.as_u16(), error = %message, "Backend reported an error");
            }
            return Err(CanopyError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let url = self.endpoints.url(request.endpoint());
        let form = Self::build_form(request)?;

        tracing::info!(url = %url, confidence = request.confidence, "Submitting analysis request");

        let response = self.send(&url, self.client.post(&url).multipart(form)).await?;

        let body = response.text().await.map_err(|e| CanopyError::Transport {
            url: url.clone(),
            reason: format!("Failed to read response body: {}", e),
        })?;

        let result = AnalysisResult::from_json(&body)?;
        tracing::debug!(tree_count = result.tree_count, image_path = %result.image_path, "Analysis complete");
        Ok(result)
    }

    async fn fetch_image(&self, image_path: &str) -> Result<Vec<u8>> {
        let url = self.endpoints.download_url(image_path);

        tracing::info!(url = %url, "Downloading processed image");

        let response = self.send(&url, self.client.get(&url)).await?;
        let bytes = response.bytes().await.map_err(|e| CanopyError::Transport {
            url: url.clone(),
            reason: format!("Failed to read image body: {}", e),
        })?;

        Ok(bytes.to_vec())
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Error body the backend sends alongside non-success statuses
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    error: String,
}

/// The `error` message of a JSON error body, if the body is one
fn backend_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<BackendErrorBody>(body).ok().map(|b| b.error)
}

use canopy_core::error::CanopyError;
use canopy_core::models::{AnalysisRequest, AnalysisResult, ElementId, ImageFile};
use canopy_core::ports::{AnalysisBackend, ChartSurface, MapSurface, Page};

use crate::controller::AnalysisController;

pub const NOTHING_SELECTED_ALERT: &str = "Please select an image or an area on the map.";
pub const ANALYSIS_FAILED_ALERT: &str = "An error occurred during analysis. Please try again.";

/// How a submission ended
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Missing input; the user was alerted and nothing was sent
    Rejected,
    /// The backend answered and the result was rendered
    Completed(AnalysisResult),
    /// The request failed; the user saw the generic alert
    Failed(CanopyError),
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SubmitOutcome::Completed(result) => Some(result),
            _ => None,
        }
    }
}

impl<P, M, C, B> AnalysisController<P, M, C, B>
where
    P: Page,
    M: MapSurface,
    C: ChartSurface,
    B: AnalysisBackend,
{
    /// Send an image or a region to the backend and render the answer.
    ///
    /// The image wins when both are given. With neither, the user is alerted
    /// and no request is made. The processing indicator is shown only once a
    /// request is actually sent and is hidden exactly once afterwards.
    pub async fn submit(
        &mut self,
        image: Option<ImageFile>,
        confidence: f64,
        area: Option<&str>,
    ) -> SubmitOutcome {
        let request = match AnalysisRequest::from_parts(image, confidence, area) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Nothing to analyze");
                self.page.alert(NOTHING_SELECTED_ALERT);
                return SubmitOutcome::Rejected;
            }
        };

        self.write_visible(ElementId::ProcessingAnimation, true);

        let outcome = match self.backend.analyze(&request).await {
            Ok(result) => {
                self.render_result(&result);
                SubmitOutcome::Completed(result)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = request.endpoint().path(),
                    error = %e,
                    "Analysis request failed"
                );
                self.page.alert(ANALYSIS_FAILED_ALERT);
                SubmitOutcome::Failed(e)
            }
        };

        self.write_visible(ElementId::ProcessingAnimation, false);
        outcome
    }
}

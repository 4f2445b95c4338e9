//! Input listeners: the upload form, the update button and the threshold slider.

use canopy_core::config::parse_confidence;
use canopy_core::models::{Binding, ElementId};
use canopy_core::ports::{AnalysisBackend, ChartSurface, EventSource, MapSurface, Page};

use crate::controller::AnalysisController;
use crate::submit::SubmitOutcome;

pub const NO_IMAGE_ALERT: &str = "Please select an image to analyze.";
pub const NO_AREA_ALERT: &str = "Please select an area on the map before updating the analysis.";

impl<P, M, C, B> AnalysisController<P, M, C, B>
where
    P: Page,
    M: MapSurface,
    C: ChartSurface,
    B: AnalysisBackend,
{
    /// Bind each input whose element exists; a missing one doesn't affect the others
    pub fn wire_inputs<E: EventSource>(&mut self, events: &mut E) {
        let inputs = [
            (ElementId::UploadForm, Binding::UploadFormSubmit, "Upload form not found"),
            (ElementId::UpdateAnalysis, Binding::UpdateAnalysisClick, "Update analysis button not found"),
            (ElementId::ConfidenceThreshold, Binding::ThresholdInput, "Confidence threshold input not found"),
        ];

        for (element, binding, missing) in inputs {
            if self.page.has_element(element) {
                events.bind(binding);
            } else {
                tracing::error!(element = %element, "{}", missing);
            }
        }
    }

    /// Upload form submitted: analyze the selected image
    pub async fn on_form_submitted(&mut self) -> SubmitOutcome {
        let Some(image) = self.page.selected_file() else {
            tracing::warn!("Form submitted without an image");
            self.page.alert(NO_IMAGE_ALERT);
            return SubmitOutcome::Rejected;
        };

        let confidence = self.current_confidence();
        self.submit(Some(image), confidence, None).await
    }

    /// "Update analysis" clicked: analyze the drawn region
    pub async fn on_update_clicked(&mut self) -> SubmitOutcome {
        let Some(coordinates) = self.coordinates().filter(|c| !c.is_empty()) else {
            tracing::warn!("Update requested without a selected area");
            self.page.alert(NO_AREA_ALERT);
            return SubmitOutcome::Rejected;
        };

        let confidence = self.current_confidence();
        self.submit(None, confidence, Some(&coordinates)).await
    }

    /// Mirror the slider value into its readout and keep it for the next submission
    pub fn on_threshold_input(&mut self, value: &str) {
        self.threshold = Some(value.to_string());
        self.write_text(ElementId::ConfidenceValue, value);
    }

    /// Threshold from the last slider input or the slider itself, else the configured default
    pub fn current_confidence(&self) -> f64 {
        let fallback = self.settings.default_confidence;
        let value = self
            .threshold
            .clone()
            .or_else(|| self.page.input_value(ElementId::ConfidenceThreshold));

        match value {
            Some(raw) => parse_confidence(&raw).unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, fallback, "Using default confidence");
                fallback
            }),
            None => {
                tracing::warn!(fallback, "Confidence threshold unreadable, using default");
                fallback
            }
        }
    }
}

use canopy_core::models::{AnalysisResult, ElementId};
use canopy_core::ports::{AnalysisBackend, ChartSurface, MapSurface, Page};

use crate::chart::metrics_chart;
use crate::controller::AnalysisController;

impl<P, M, C, B> AnalysisController<P, M, C, B>
where
    P: Page,
    M: MapSurface,
    C: ChartSurface,
    B: AnalysisBackend,
{
    /// Write the metrics, rebuild the chart and reveal the processed image
    pub fn render_result(&mut self, result: &AnalysisResult) {
        self.write_text(ElementId::TreeCount, &result.tree_count.to_string());
        self.write_text(ElementId::AreaCovered, &result.area);
        self.write_text(ElementId::TreeDensity, &result.density);
        self.write_text(ElementId::ImageResolution, &result.resolution);

        self.rebuild_chart(result);

        let endpoints = self.backend.endpoints();
        let preview = endpoints.image_url(&result.image_path);
        let download = endpoints.download_url(&result.image_path);

        self.write_image_source(ElementId::UploadedImage, &preview);
        self.write_visible(ElementId::UploadedImage, true);

        self.write_link_target(ElementId::DownloadProcessedImage, &download);
        self.write_visible(ElementId::DownloadProcessedImage, true);

        tracing::info!(tree_count = result.tree_count, image = %preview, "Results rendered");
    }

    fn rebuild_chart(&mut self, result: &AnalysisResult) {
        if let Some(previous) = self.chart.take() {
            self.charts.destroy(previous);
        }

        if !self.page.has_element(ElementId::TreeChart) {
            tracing::error!(element = %ElementId::TreeChart, "Chart canvas not found");
            return;
        }

        match self.charts.render(ElementId::TreeChart, &metrics_chart(result)) {
            Ok(handle) => self.chart = Some(handle),
            Err(e) => tracing::error!(error = %e, "Failed to render chart"),
        }
    }
}

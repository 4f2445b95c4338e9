//! Terminal adapters for the controller's page, map and chart ports.

use std::collections::{BTreeMap, HashMap};

use canopy_core::error::{CanopyError, Result};
use canopy_core::models::{
    ChartHandle, ChartSpec, DrawControl, ElementId, ImageFile, MapView, Shape, TileLayer,
};
use canopy_core::ports::{ChartSurface, MapSurface, Page};
use indicatif::ProgressBar;

use crate::output::OutputWriter;
use crate::progress::{create_spinner, hidden_spinner};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Default, Clone)]
struct Element {
    text: String,
    visible: bool,
    src: Option<String>,
    href: Option<String>,
    value: Option<String>,
}

/// Page kept in memory; alerts are printed and the processing indicator is a spinner
pub struct TerminalPage {
    output: OutputWriter,
    elements: BTreeMap<ElementId, Element>,
    file: Option<ImageFile>,
    spinner: Option<ProgressBar>,
    alerts: Vec<String>,
}

impl TerminalPage {
    pub fn new(output: OutputWriter) -> Self {
        let elements = ElementId::ALL
            .iter()
            .map(|id| (*id, Element::default()))
            .collect();

        Self {
            output,
            elements,
            file: None,
            spinner: None,
            alerts: Vec::new(),
        }
    }

    /// Choose the file in the upload input
    pub fn select_file(&mut self, file: ImageFile) {
        self.file = Some(file);
    }

    /// Set the threshold slider and its readout
    pub fn with_threshold(mut self, confidence: f64) -> Self {
        let value = confidence.to_string();
        if let Some(input) = self.elements.get_mut(&ElementId::ConfidenceThreshold) {
            input.value = Some(value.clone());
        }
        if let Some(readout) = self.elements.get_mut(&ElementId::ConfidenceValue) {
            readout.text = value;
        }
        self
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.elements.get(&id).map(|e| e.text.as_str()).unwrap_or_default()
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.elements.get(&id).is_some_and(|e| e.visible)
    }

    pub fn image_source(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.src.as_deref())
    }

    pub fn link_target(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.href.as_deref())
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements
            .get_mut(&id)
            .ok_or(CanopyError::ElementMissing { id: id.as_str() })
    }

    fn toggle_spinner(&mut self, visible: bool) {
        if visible {
            let spinner = if self.output.is_json() {
                hidden_spinner()
            } else {
                create_spinner("Analyzing...")
            };
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Page for TerminalPage {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        self.element_mut(id)?.text = text.to_string();
        tracing::debug!(element = %id, text, "Text updated");
        Ok(())
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.element_mut(id)?.visible = visible;
        if id == ElementId::ProcessingAnimation {
            self.toggle_spinner(visible);
        }
        Ok(())
    }

    fn set_image_source(&mut self, id: ElementId, src: &str) -> Result<()> {
        self.element_mut(id)?.src = Some(src.to_string());
        Ok(())
    }

    fn set_link_target(&mut self, id: ElementId, href: &str) -> Result<()> {
        self.element_mut(id)?.href = Some(href.to_string());
        Ok(())
    }

    fn input_value(&self, id: ElementId) -> Option<String> {
        self.elements.get(&id).and_then(|e| e.value.clone())
    }

    fn selected_file(&self) -> Option<ImageFile> {
        self.file.clone()
    }

    fn alert(&mut self, message: &str) {
        self.output.warning(message);
        self.alerts.push(message.to_string());
    }
}

/// Map without tiles: logs its setup and keeps the overlay contents
#[derive(Debug, Default)]
pub struct TerminalMap {
    overlay: Vec<Shape>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> &[Shape] {
        &self.overlay
    }
}

impl MapSurface for TerminalMap {
    fn create_view(&mut self, container: ElementId, view: &MapView) -> Result<()> {
        tracing::debug!(container = %container, center = %view.center, zoom = view.zoom, "Map view created");
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) -> Result<()> {
        tracing::debug!(url = %layer.url_template, "Tile layer attached");
        Ok(())
    }

    fn add_overlay_layer(&mut self) -> Result<()> {
        Ok(())
    }

    fn add_draw_control(&mut self, control: &DrawControl) -> Result<()> {
        tracing::debug!(?control, "Draw control attached");
        Ok(())
    }

    fn show_overlay(&mut self, shapes: &[Shape]) {
        self.overlay = shapes.to_vec();
    }
}

/// Chart surface that keeps specs and renders them as text bars
#[derive(Debug, Default)]
pub struct TerminalChart {
    charts: HashMap<u64, ChartSpec>,
    current: Option<u64>,
    next_id: u64,
}

impl TerminalChart {
    /// The chart currently on the canvas
    pub fn current(&self) -> Option<&ChartSpec> {
        self.current.and_then(|id| self.charts.get(&id))
    }
}

impl ChartSurface for TerminalChart {
    fn render(&mut self, canvas: ElementId, spec: &ChartSpec) -> Result<ChartHandle> {
        self.next_id += 1;
        self.charts.insert(self.next_id, spec.clone());
        self.current = Some(self.next_id);
        tracing::debug!(canvas = %canvas, chart = self.next_id, "Chart rendered");
        Ok(ChartHandle(self.next_id))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.charts.remove(&handle.0);
        if self.current == Some(handle.0) {
            self.current = None;
        }
    }
}

/// Horizontal bar rendering of the first dataset, scaled to the largest value
pub fn text_chart(spec: &ChartSpec) -> String {
    let Some(dataset) = spec.datasets.first() else {
        return String::new();
    };

    let label_width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max = dataset
        .data
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut lines = vec![dataset.label.clone()];
    for (label, value) in spec.labels.iter().zip(&dataset.data) {
        let (bar, shown) = if value.is_finite() {
            let len = if max > 0.0 {
                ((value.max(0.0) / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            ("█".repeat(len), value.to_string())
        } else {
            (String::new(), "n/a".to_string())
        };
        lines.push(format!("{:<width$} │{} {}", label, bar, shown, width = label_width));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::models::AnalysisResult;

    fn result(area: &str) -> AnalysisResult {
        AnalysisResult {
            tree_count: 10,
            area: area.to_string(),
            density: "5 per km²".to_string(),
            resolution: "768x512".to_string(),
            image_path: "a.jpg".to_string(),
            progress: None,
            debug_info: None,
        }
    }

    #[test]
    fn test_text_chart_scales_bars() {
        let chart = text_chart(&canopy_controller::metrics_chart(&result("2 km²")));
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines[0], "Tree Analysis Metrics");
        assert!(lines[1].starts_with("Trees Detected"));
        assert!(lines[1].ends_with(&format!("{} 10", "█".repeat(BAR_WIDTH))));
        assert!(lines[2].ends_with(&format!("{} 2", "█".repeat(6))));
    }

    #[test]
    fn test_text_chart_marks_missing_values() {
        let chart = text_chart(&canopy_controller::metrics_chart(&result("N/A")));
        assert!(chart.lines().nth(2).unwrap().ends_with("│ n/a"));
    }

    #[test]
    fn test_page_threshold_and_missing_elements() {
        let page = TerminalPage::new(OutputWriter::new(true)).with_threshold(0.35);
        assert_eq!(page.input_value(ElementId::ConfidenceThreshold).as_deref(), Some("0.35"));
        assert_eq!(page.text(ElementId::ConfidenceValue), "0.35");
        assert!(page.has_element(ElementId::Map));
    }

    #[test]
    fn test_chart_destroy_clears_current() {
        let mut charts = TerminalChart::default();
        let spec = canopy_controller::metrics_chart(&result("1 km²"));

        let first = charts.render(ElementId::TreeChart, &spec).unwrap();
        assert!(charts.current().is_some());
        charts.destroy(first);
        assert!(charts.current().is_none());
    }
}

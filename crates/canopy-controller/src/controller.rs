use canopy_core::config::{LayeredConfig, DEFAULT_CONFIDENCE};
use canopy_core::error::{CanopyError, Result};
use canopy_core::models::{ChartHandle, DrawnRegion, ElementId, MapView, Shape, TileLayer, UiEvent};
use canopy_core::ports::{AnalysisBackend, ChartSurface, EventSource, MapSurface, Page};

use crate::submit::SubmitOutcome;

/// Settings the controller reads once at construction
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub map_view: MapView,
    pub tile_layer: TileLayer,
    /// Used when the threshold input is missing or unparsable
    pub default_confidence: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            map_view: MapView::default(),
            tile_layer: TileLayer::default(),
            default_confidence: DEFAULT_CONFIDENCE,
        }
    }
}

impl ControllerSettings {
    /// Take map and threshold settings from the resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            map_view: config.map_view(),
            tile_layer: config.tile_layer(),
            default_confidence: config.confidence.value,
        }
    }
}

/// Controller owning the map, the drawn region and the last chart.
///
/// One request at a time: `submit` takes `&mut self` across the network
/// await, so a second submission cannot start until the first resolves.
pub struct AnalysisController<P, M, C, B>
where
    P: Page,
    M: MapSurface,
    C: ChartSurface,
    B: AnalysisBackend,
{
    pub(crate) page: P,
    pub(crate) map: M,
    pub(crate) charts: C,
    pub(crate) backend: B,
    pub(crate) settings: ControllerSettings,

    /// Shapes currently in the overlay layer
    pub(crate) overlay: Vec<Shape>,

    /// Region measured from the most recent shape
    pub(crate) region: Option<DrawnRegion>,

    /// Chart instance from the last render
    pub(crate) chart: Option<ChartHandle>,

    /// Last value reported by the threshold slider
    pub(crate) threshold: Option<String>,
}

impl<P, M, C, B> AnalysisController<P, M, C, B>
where
    P: Page,
    M: MapSurface,
    C: ChartSurface,
    B: AnalysisBackend,
{
    /// Create a new controller
    pub fn new(page: P, map: M, charts: C, backend: B, settings: ControllerSettings) -> Self {
        Self {
            page,
            map,
            charts,
            backend,
            settings,
            overlay: Vec::new(),
            region: None,
            chart: None,
            threshold: None,
        }
    }

    /// Page-ready: set up the map and bind every input the page provides
    pub fn ready<E: EventSource>(&mut self, events: &mut E) {
        self.initialize_map(events);
        self.wire_inputs(events);
    }

    /// Dispatch one event to its handler
    pub async fn handle(&mut self, event: UiEvent) -> Option<SubmitOutcome> {
        tracing::debug!(binding = ?event.binding(), "Handling event");

        match event {
            UiEvent::ShapeCreated(shape) => {
                self.on_shape_created(shape);
                None
            }
            UiEvent::ShapesEdited(shapes) => {
                self.on_shapes_edited(shapes);
                None
            }
            UiEvent::ShapesDeleted(ids) => {
                self.on_shapes_deleted(&ids);
                None
            }
            UiEvent::FormSubmitted => Some(self.on_form_submitted().await),
            UiEvent::UpdateAnalysisClicked => Some(self.on_update_clicked().await),
            UiEvent::ThresholdInput(value) => {
                self.on_threshold_input(&value);
                None
            }
        }
    }

    /// Run page-ready, then handle events until the source is exhausted.
    ///
    /// Returns the outcome of every submission in order.
    pub async fn run<E: EventSource>(&mut self, events: &mut E) -> Vec<SubmitOutcome> {
        self.ready(events);

        let mut outcomes = Vec::new();
        while let Some(event) = events.next_event() {
            if let Some(outcome) = self.handle(event).await {
                outcomes.push(outcome);
            }
        }

        tracing::debug!(submissions = outcomes.len(), "Event source closed");
        outcomes
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn charts(&self) -> &C {
        &self.charts
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Shapes currently in the overlay layer
    pub fn overlay(&self) -> &[Shape] {
        &self.overlay
    }

    /// The tracked region, if a shape is drawn
    pub fn region(&self) -> Option<&DrawnRegion> {
        self.region.as_ref()
    }

    /// Stored "south,west,north,east" string of the tracked region
    pub fn coordinates(&self) -> Option<String> {
        self.region.as_ref().map(DrawnRegion::coordinates)
    }

    // Element writers: a missing element is logged and the write skipped.

    pub(crate) fn write_text(&mut self, id: ElementId, text: &str) {
        let result = self.page.set_text(id, text);
        log_write_failure(id, result);
    }

    pub(crate) fn write_visible(&mut self, id: ElementId, visible: bool) {
        let result = self.page.set_visible(id, visible);
        log_write_failure(id, result);
    }

    pub(crate) fn write_image_source(&mut self, id: ElementId, src: &str) {
        let result = self.page.set_image_source(id, src);
        log_write_failure(id, result);
    }

    pub(crate) fn write_link_target(&mut self, id: ElementId, href: &str) {
        let result = self.page.set_link_target(id, href);
        log_write_failure(id, result);
    }
}

fn log_write_failure(id: ElementId, result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(CanopyError::ElementMissing { .. }) => {
            tracing::error!(element = %id, "Element not found, skipping update")
        }
        Err(e) => tracing::error!(element = %id, error = %e, "Failed to update element"),
    }
}

//! In-memory adapters for driving the controller in tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use canopy_controller::{AnalysisController, ControllerSettings};
use canopy_core::error::{CanopyError, Result};
use canopy_core::models::{
    AnalysisRequest, AnalysisResult, ChartHandle, ChartSpec, DrawControl, ElementId, Endpoints,
    ImageFile, LatLng, MapView, Shape, ShapeId, TileLayer,
};
use canopy_core::ports::{AnalysisBackend, ChartSurface, MapSurface, Page};

#[derive(Debug, Default, Clone)]
pub struct ElementState {
    pub text: String,
    pub visible: bool,
    pub src: Option<String>,
    pub href: Option<String>,
    pub value: Option<String>,
}

/// Page with every element present unless removed
#[derive(Debug)]
pub struct FakePage {
    pub elements: HashMap<ElementId, ElementState>,
    pub alerts: Vec<String>,
    pub file: Option<ImageFile>,
    /// Every visibility change in order
    pub visibility_log: Vec<(ElementId, bool)>,
}

impl FakePage {
    pub fn new() -> Self {
        let elements = ElementId::ALL
            .iter()
            .map(|id| (*id, ElementState::default()))
            .collect();
        Self {
            elements,
            alerts: Vec::new(),
            file: None,
            visibility_log: Vec::new(),
        }
    }

    pub fn without(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn with_value(mut self, id: ElementId, value: &str) -> Self {
        if let Some(element) = self.elements.get_mut(&id) {
            element.value = Some(value.to_string());
        }
        self
    }

    pub fn with_file(mut self, file: ImageFile) -> Self {
        self.file = Some(file);
        self
    }

    pub fn element(&self, id: ElementId) -> &ElementState {
        &self.elements[&id]
    }

    pub fn text(&self, id: ElementId) -> &str {
        &self.element(id).text
    }

    pub fn toggles(&self, id: ElementId) -> Vec<bool> {
        self.visibility_log
            .iter()
            .filter(|(element, _)| *element == id)
            .map(|(_, visible)| *visible)
            .collect()
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut ElementState> {
        self.elements
            .get_mut(&id)
            .ok_or(CanopyError::ElementMissing { id: id.as_str() })
    }
}

impl Page for FakePage {
    fn has_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        self.get_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) -> Result<()> {
        self.get_mut(id)?.visible = visible;
        self.visibility_log.push((id, visible));
        Ok(())
    }

    fn set_image_source(&mut self, id: ElementId, src: &str) -> Result<()> {
        self.get_mut(id)?.src = Some(src.to_string());
        Ok(())
    }

    fn set_link_target(&mut self, id: ElementId, href: &str) -> Result<()> {
        self.get_mut(id)?.href = Some(href.to_string());
        Ok(())
    }

    fn input_value(&self, id: ElementId) -> Option<String> {
        self.elements.get(&id).and_then(|e| e.value.clone())
    }

    fn selected_file(&self) -> Option<ImageFile> {
        self.file.clone()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Map recording what was set up and what the overlay shows
#[derive(Debug, Default)]
pub struct FakeMap {
    pub view: Option<(ElementId, MapView)>,
    pub tiles: Option<TileLayer>,
    pub overlay_added: bool,
    pub draw_control: Option<DrawControl>,
    pub shown: Vec<Shape>,
    pub fail_tiles: bool,
}

impl FakeMap {
    pub fn failing() -> Self {
        Self {
            fail_tiles: true,
            ..Self::default()
        }
    }
}

impl MapSurface for FakeMap {
    fn create_view(&mut self, container: ElementId, view: &MapView) -> Result<()> {
        self.view = Some((container, *view));
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) -> Result<()> {
        if self.fail_tiles {
            return Err(CanopyError::MapInit {
                reason: "tile server unreachable".to_string(),
            });
        }
        self.tiles = Some(layer.clone());
        Ok(())
    }

    fn add_overlay_layer(&mut self) -> Result<()> {
        self.overlay_added = true;
        Ok(())
    }

    fn add_draw_control(&mut self, control: &DrawControl) -> Result<()> {
        self.draw_control = Some(*control);
        Ok(())
    }

    fn show_overlay(&mut self, shapes: &[Shape]) {
        self.shown = shapes.to_vec();
    }
}

/// Chart surface keeping live charts by handle
#[derive(Debug, Default)]
pub struct FakeChart {
    pub live: HashMap<u64, ChartSpec>,
    pub rendered: Vec<ChartSpec>,
    pub destroyed: Vec<ChartHandle>,
    next: u64,
}

impl ChartSurface for FakeChart {
    fn render(&mut self, _canvas: ElementId, spec: &ChartSpec) -> Result<ChartHandle> {
        self.next += 1;
        self.live.insert(self.next, spec.clone());
        self.rendered.push(spec.clone());
        Ok(ChartHandle(self.next))
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.live.remove(&handle.0);
        self.destroyed.push(handle);
    }
}

/// What the mock backend answers
#[derive(Debug, Clone)]
pub enum Reply {
    Success(AnalysisResult),
    Status(u16, &'static str, &'static str),
}

/// Backend recording every request
pub struct MockBackend {
    endpoints: Endpoints,
    reply: Reply,
    pub requests: Mutex<Vec<AnalysisRequest>>,
}

impl MockBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            endpoints: Endpoints::relative(),
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisBackend for MockBackend {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Success(result) => Ok(result.clone()),
            Reply::Status(status, status_text, body) => Err(CanopyError::Http {
                status: *status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
        }
    }

    async fn fetch_image(&self, _image_path: &str) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

pub type TestController = AnalysisController<FakePage, FakeMap, FakeChart, MockBackend>;

pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        tree_count: 5,
        area: "1.23 km²".to_string(),
        density: "4.07 per km²".to_string(),
        resolution: "1024x768".to_string(),
        image_path: "out.png".to_string(),
        progress: None,
        debug_info: None,
    }
}

pub fn controller(page: FakePage, reply: Reply) -> TestController {
    AnalysisController::new(
        page,
        FakeMap::default(),
        FakeChart::default(),
        MockBackend::new(reply),
        ControllerSettings::default(),
    )
}

pub fn rectangle(id: u64, south: f64, west: f64, north: f64, east: f64) -> Shape {
    Shape::rectangle(ShapeId(id), LatLng::new(south, west), LatLng::new(north, east))
}

/// Small rectangle near the default map center
pub fn london_rectangle(id: u64) -> Shape {
    rectangle(id, 51.5, -0.1, 51.51, -0.09)
}

pub fn png_file(name: &str) -> ImageFile {
    ImageFile::new(name, vec![0x89, 0x50, 0x4E, 0x47])
}

pub fn bound(events: &canopy_controller::ScriptedEvents) -> HashSet<canopy_core::models::Binding> {
    use canopy_core::models::Binding::*;
    [DrawCreated, DrawEdited, DrawDeleted, UploadFormSubmit, UpdateAnalysisClick, ThresholdInput]
        .into_iter()
        .filter(|b| events.is_bound(*b))
        .collect()
}

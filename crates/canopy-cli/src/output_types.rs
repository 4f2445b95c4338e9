use canopy_core::config::ConfigSource;
use canopy_core::models::{AnalysisResult, ChartSpec, DrawnRegion, Endpoints};
use serde::Serialize;

/// Output for measure command
#[derive(Debug, Serialize)]
pub struct MeasureOutput {
    pub regions: Vec<RegionOutput>,
    /// Coordinates of the region an update would send
    pub selected: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegionOutput {
    pub shape_id: u64,
    pub area_km2: f64,
    pub area_label: String,
    pub coordinates: String,
}

impl From<&DrawnRegion> for RegionOutput {
    fn from(region: &DrawnRegion) -> Self {
        Self {
            shape_id: region.shape_id.0,
            area_km2: region.area_km2,
            area_label: region.area_label(),
            coordinates: region.coordinates(),
        }
    }
}

/// Output for image and area commands
#[derive(Debug, Serialize)]
pub struct AnalysisOutput {
    pub tree_count: u64,
    pub area: String,
    pub density: String,
    pub resolution: String,
    pub image_path: String,
    pub preview_url: String,
    pub download_url: String,
    pub chart: Vec<ChartBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

impl AnalysisOutput {
    pub fn new(result: &AnalysisResult, endpoints: &Endpoints, chart: Option<&ChartSpec>) -> Self {
        Self {
            tree_count: result.tree_count,
            area: result.area.clone(),
            density: result.density.clone(),
            resolution: result.resolution.clone(),
            image_path: result.image_path.clone(),
            preview_url: endpoints.image_url(&result.image_path),
            download_url: endpoints.download_url(&result.image_path),
            chart: chart.map(ChartBar::from_spec).unwrap_or_default(),
            coordinates: None,
            saved_to: None,
        }
    }
}

/// One bar of the metrics chart; `None` when the value was not numeric
#[derive(Debug, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: Option<f64>,
}

impl ChartBar {
    fn from_spec(spec: &ChartSpec) -> Vec<Self> {
        let data = spec.datasets.first().map(|d| d.data.as_slice()).unwrap_or_default();
        spec.labels
            .iter()
            .zip(data)
            .map(|(label, value)| ChartBar {
                label: label.clone(),
                value: value.is_finite().then_some(*value),
            })
            .collect()
    }
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub server_url: ConfigEntry,
    pub confidence: ConfigEntry,
    pub map_center: ConfigEntry,
    pub map_zoom: ConfigEntry,
    pub tile_url: ConfigEntry,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: ConfigSource,
}

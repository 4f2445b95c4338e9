use crate::error::Result;
use crate::models::{DrawControl, ElementId, MapView, Shape, TileLayer};

/// Port for the map widget and its drawing toolkit
pub trait MapSurface {
    /// Create the map inside the container element
    fn create_view(&mut self, container: ElementId, view: &MapView) -> Result<()>;

    /// Attach the base tile layer
    fn add_tile_layer(&mut self, layer: &TileLayer) -> Result<()>;

    /// Attach the empty overlay layer that holds drawn shapes
    fn add_overlay_layer(&mut self) -> Result<()>;

    /// Attach the drawing toolbar
    fn add_draw_control(&mut self, control: &DrawControl) -> Result<()>;

    /// Replace the overlay contents with these shapes
    fn show_overlay(&mut self, shapes: &[Shape]);
}

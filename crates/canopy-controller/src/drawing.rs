//! Map bootstrap and draw-event handling.

use canopy_core::error::Result;
use canopy_core::models::{Binding, DrawControl, DrawnRegion, ElementId, Shape, ShapeId};
use canopy_core::ports::{AnalysisBackend, ChartSurface, EventSource, MapSurface, Page};
use canopy_geo::measure_shape;

use crate::controller::AnalysisController;

const DRAW_BINDINGS: [Binding; 3] = [Binding::DrawCreated, Binding::DrawEdited, Binding::DrawDeleted];

impl<P, M, C, B> AnalysisController<P, M, C, B>
where
    P: Page,
    M: MapSurface,
    C: ChartSurface,
    B: AnalysisBackend,
{
    /// Create the map, its layers and draw toolbar, then bind the draw events.
    ///
    /// Failures are logged and never propagate. Returns whether the map is up.
    pub fn initialize_map<E: EventSource>(&mut self, events: &mut E) -> bool {
        if !self.page.has_element(ElementId::Map) {
            tracing::error!(element = %ElementId::Map, "Map container not found");
            return false;
        }

        if let Err(e) = self.build_map() {
            tracing::error!(error = %e, "Error initializing map");
            return false;
        }

        for binding in DRAW_BINDINGS {
            events.bind(binding);
        }

        tracing::info!(
            center = %self.settings.map_view.center,
            zoom = self.settings.map_view.zoom,
            "Map initialized"
        );
        true
    }

    fn build_map(&mut self) -> Result<()> {
        self.map.create_view(ElementId::Map, &self.settings.map_view)?;
        self.map.add_tile_layer(&self.settings.tile_layer)?;
        self.map.add_overlay_layer()?;
        self.map.add_draw_control(&DrawControl::polygons_and_rectangles())?;
        Ok(())
    }

    /// A new shape replaces everything in the overlay
    pub fn on_shape_created(&mut self, shape: Shape) {
        let region = match measure_shape(&shape) {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!(shape_id = shape.id.0, error = %e, "Ignoring unusable shape");
                return;
            }
        };

        self.overlay.clear();
        self.overlay.push(shape);
        self.map.show_overlay(&self.overlay);
        self.show_region(region);
    }

    /// Re-measure edited shapes; the last usable one becomes the region
    pub fn on_shapes_edited(&mut self, shapes: Vec<Shape>) {
        for shape in shapes {
            let region = match measure_shape(&shape) {
                Ok(region) => region,
                Err(e) => {
                    tracing::warn!(shape_id = shape.id.0, error = %e, "Ignoring unusable edit");
                    continue;
                }
            };

            match self.overlay.iter_mut().find(|s| s.id == shape.id) {
                Some(existing) => *existing = shape,
                None => tracing::debug!(shape_id = shape.id.0, "Edited shape not in overlay"),
            }
            self.show_region(region);
        }

        self.map.show_overlay(&self.overlay);
    }

    /// Drop deleted shapes and forget the tracked region
    pub fn on_shapes_deleted(&mut self, ids: &[ShapeId]) {
        self.overlay.retain(|s| !ids.contains(&s.id));
        self.map.show_overlay(&self.overlay);

        self.write_text(ElementId::AreaInfo, "");
        self.region = None;

        tracing::debug!(deleted = ids.len(), remaining = self.overlay.len(), "Shapes deleted");
    }

    fn show_region(&mut self, region: DrawnRegion) {
        self.write_text(ElementId::AreaInfo, &region.area_label());
        tracing::info!(
            area_km2 = region.area_km2,
            coordinates = %region.coordinates(),
            "Selected area updated"
        );
        self.region = Some(region);
    }
}

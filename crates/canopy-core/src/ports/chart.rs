use crate::error::Result;
use crate::models::{ChartHandle, ChartSpec, ElementId};

/// Port for a charting engine
pub trait ChartSurface {
    /// Draw a chart on the given canvas element
    fn render(&mut self, canvas: ElementId, spec: &ChartSpec) -> Result<ChartHandle>;

    /// Tear down a chart previously returned by `render`
    fn destroy(&mut self, handle: ChartHandle);
}

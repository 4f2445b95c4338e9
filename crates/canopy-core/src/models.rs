pub mod analysis;
pub mod chart;
pub mod endpoints;
pub mod event;
pub mod map;
pub mod page;
pub mod region;
pub mod shape;

pub use analysis::{AnalysisRequest, AnalysisResult, AnalysisTarget, ImageFile};
pub use chart::{ChartDataset, ChartHandle, ChartKind, ChartSpec, Rgba};
pub use endpoints::{Endpoint, Endpoints};
pub use event::{Binding, UiEvent};
pub use map::{DrawControl, MapView, TileLayer};
pub use page::ElementId;
pub use region::{BoundingBox, DrawnRegion};
pub use shape::{LatLng, Shape, ShapeId, ShapeKind};

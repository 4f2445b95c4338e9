//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod backend;
pub mod chart;
pub mod events;
pub mod map;
pub mod page;

pub use backend::AnalysisBackend;
pub use chart::ChartSurface;
pub use events::EventSource;
pub use map::MapSurface;
pub use page::Page;

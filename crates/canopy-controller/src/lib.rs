//! Analysis UI controller
//!
//! Bootstraps the map and its draw controls, tracks the drawn region,
//! submits images or regions to the detection backend and renders the
//! returned metrics. All I/O goes through the ports in `canopy_core::ports`.

pub mod chart;
pub mod controller;
pub mod drawing;
pub mod events;
pub mod render;
pub mod submit;
pub mod wiring;

pub use chart::metrics_chart;
pub use controller::{AnalysisController, ControllerSettings};
pub use events::ScriptedEvents;
pub use submit::SubmitOutcome;

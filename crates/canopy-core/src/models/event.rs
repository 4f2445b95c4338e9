//! Events delivered to the controller by the page and the map.

use crate::models::shape::{Shape, ShapeId};

/// Listener registrations the controller can request from an event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    /// A shape was drawn on the map
    DrawCreated,
    /// Existing shapes were edited
    DrawEdited,
    /// Existing shapes were deleted
    DrawDeleted,
    /// The image upload form was submitted
    UploadFormSubmit,
    /// The "update analysis" button was clicked
    UpdateAnalysisClick,
    /// The confidence slider moved
    ThresholdInput,
}

/// A user action, already translated out of the UI toolkit
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ShapeCreated(Shape),
    ShapesEdited(Vec<Shape>),
    ShapesDeleted(Vec<ShapeId>),
    FormSubmitted,
    UpdateAnalysisClicked,
    /// New raw value of the threshold input
    ThresholdInput(String),
}

impl UiEvent {
    /// The binding an event is delivered through
    pub fn binding(&self) -> Binding {
        match self {
            UiEvent::ShapeCreated(_) => Binding::DrawCreated,
            UiEvent::ShapesEdited(_) => Binding::DrawEdited,
            UiEvent::ShapesDeleted(_) => Binding::DrawDeleted,
            UiEvent::FormSubmitted => Binding::UploadFormSubmit,
            UiEvent::UpdateAnalysisClicked => Binding::UpdateAnalysisClick,
            UiEvent::ThresholdInput(_) => Binding::ThresholdInput,
        }
    }
}

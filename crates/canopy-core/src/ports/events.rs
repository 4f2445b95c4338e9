use crate::models::{Binding, UiEvent};

/// Port for the source of user actions.
///
/// Events are only delivered through bindings that were registered.
pub trait EventSource {
    /// Register a listener
    fn bind(&mut self, binding: Binding);

    /// Next pending event, or `None` once the source is closed
    fn next_event(&mut self) -> Option<UiEvent>;
}

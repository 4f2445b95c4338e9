use std::collections::{HashSet, VecDeque};

use canopy_core::models::{Binding, UiEvent};
use canopy_core::ports::EventSource;

/// Event source replaying a fixed sequence of user actions.
///
/// Events whose binding was never registered are dropped, the way a page
/// drops clicks on a control nobody listens to.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<UiEvent>,
    bound: HashSet<Binding>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = UiEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
            bound: HashSet::new(),
        }
    }

    pub fn push(&mut self, event: UiEvent) {
        self.queue.push_back(event);
    }

    pub fn is_bound(&self, binding: Binding) -> bool {
        self.bound.contains(&binding)
    }
}

impl EventSource for ScriptedEvents {
    fn bind(&mut self, binding: Binding) {
        self.bound.insert(binding);
    }

    fn next_event(&mut self) -> Option<UiEvent> {
        while let Some(event) = self.queue.pop_front() {
            let binding = event.binding();
            if self.bound.contains(&binding) {
                return Some(event);
            }
            tracing::debug!(?binding, "Dropping event with no listener");
        }
        None
    }
}

//! Event propagation for the document model
//!
//! Events are delivered in two phases:
//! - Target: listeners on the element the event was dispatched to
//! - Bubbling: listeners on each ancestor, nearest first
//!
//! There is no capturing phase; nothing in the label wiring listens for it.

use log::trace;

use crate::dom::Element;
use crate::events::DomEvent;

/// Specifies the event propagation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationPhase {
    /// Event is at the target element
    Target,

    /// Event is traveling up from the target to the root
    Bubbling,
}

/// Controls how an event propagates through the element tree
#[derive(Debug, Clone)]
pub struct EventPropagation {
    /// Whether the event should continue propagating
    pub stopped: bool,

    /// Whether the default action should be prevented
    pub default_prevented: bool,

    /// The current propagation phase
    pub phase: PropagationPhase,
}

impl EventPropagation {
    /// Create a new event propagation
    pub fn new(phase: PropagationPhase) -> Self {
        Self {
            stopped: false,
            default_prevented: false,
            phase,
        }
    }

    /// Stop event propagation
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Prevent the default action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if propagation is stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Check if default is prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The elements an event visits, target first, then every ancestor up to the root
pub fn propagation_path(target: &Element) -> Vec<Element> {
    let mut path = vec![target.clone()];
    let mut current = target.parent();
    while let Some(node) = current {
        current = node.parent();
        path.push(node);
    }
    path
}

/// Deliver an event to `target` and bubble it to its ancestors
///
/// Returns `false` if any listener prevented the default action.
pub fn dispatch(target: &Element, mut event: DomEvent) -> bool {
    event.set_target(target.clone());
    let path = propagation_path(target);

    trace!(
        "dispatching {} (trusted: {}) through {} element(s)",
        event.kind(),
        event.is_trusted(),
        path.len()
    );

    for (depth, node) in path.into_iter().enumerate() {
        let phase = if depth == 0 {
            PropagationPhase::Target
        } else {
            PropagationPhase::Bubbling
        };
        event.enter(node.clone(), phase);
        node.invoke_listeners(&mut event);
        if event.is_propagation_stopped() {
            break;
        }
    }
    event.leave();

    !event.is_default_prevented()
}

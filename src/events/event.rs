//! DOM-style events dispatched through the document model

use std::fmt;

use crate::dom::Element;
use crate::events::delegation::{EventPropagation, PropagationPhase};

/// Kinds of events the document model dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A pointer button was pressed over an element
    MouseDown,
    /// A pointer button was pressed and released over an element
    Click,
    /// An element received focus
    Focus,
}

impl EventKind {
    /// Get the DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::MouseDown => "mousedown",
            EventKind::Click => "click",
            EventKind::Focus => "focus",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event travelling through the document tree
///
/// `is_trusted` is only ever set by [`DomEvent::trusted`], which stands in for the
/// host's input plumbing. Everything the crate dispatches on its own (for example
/// [`Element::click`]) is synthetic.
#[derive(Debug, Clone)]
pub struct DomEvent {
    kind: EventKind,
    detail: u32,
    is_trusted: bool,
    target: Option<Element>,
    current_target: Option<Element>,
    propagation: EventPropagation,
}

impl DomEvent {
    fn new(kind: EventKind, is_trusted: bool) -> Self {
        Self {
            kind,
            detail: 0,
            is_trusted,
            target: None,
            current_target: None,
            propagation: EventPropagation::new(PropagationPhase::Target),
        }
    }

    /// Create an event originating from genuine user input
    pub fn trusted(kind: EventKind) -> Self {
        let detail = match kind {
            EventKind::MouseDown | EventKind::Click => 1,
            EventKind::Focus => 0,
        };
        Self::new(kind, true).with_detail(detail)
    }

    /// Create a programmatically dispatched event
    pub fn synthetic(kind: EventKind) -> Self {
        Self::new(kind, false)
    }

    /// Set the click count carried by pointer events
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Click count for pointer events (2 for the second press of a double click)
    pub fn detail(&self) -> u32 {
        self.detail
    }

    pub fn is_trusted(&self) -> bool {
        self.is_trusted
    }

    /// The element the event was dispatched to
    pub fn target(&self) -> Option<&Element> {
        self.target.as_ref()
    }

    /// The element whose listeners are currently running
    pub fn current_target(&self) -> Option<&Element> {
        self.current_target.as_ref()
    }

    pub fn phase(&self) -> PropagationPhase {
        self.propagation.phase
    }

    /// Prevent the default action (text selection, for mousedown)
    pub fn prevent_default(&mut self) {
        self.propagation.prevent_default();
    }

    /// Stop the event from reaching further ancestors
    pub fn stop_propagation(&mut self) {
        self.propagation.stop_propagation();
    }

    pub fn is_default_prevented(&self) -> bool {
        self.propagation.is_default_prevented()
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation.is_propagation_stopped()
    }

    pub(crate) fn set_target(&mut self, target: Element) {
        self.target = Some(target);
    }

    pub(crate) fn enter(&mut self, current: Element, phase: PropagationPhase) {
        self.current_target = Some(current);
        self.propagation.phase = phase;
    }

    pub(crate) fn leave(&mut self) {
        self.current_target = None;
    }
}

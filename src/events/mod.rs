//! Event system for the label primitives
//!
//! The event system provides:
//! - DOM-style events with trust and click-count information
//! - Target and bubbling propagation through the element tree
//! - Stop propagation and prevent default functionality

pub mod delegation;
pub mod event;

pub use delegation::{EventPropagation, PropagationPhase};
pub use event::{DomEvent, EventKind};

// Core module of the Orbit label primitive
//
// A label element names a separate control element: the control's
// `aria-labelledby` lists the label's id, and user clicks on the label are
// forwarded to the control as a click followed by focus.

pub mod component;
pub mod dom;
pub mod events;

pub mod kit;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::component::{
        compose_refs, Component, ComponentError, Context, LifecyclePhase, NodeRef,
        PropValidationError, PropValidator,
    };
    pub use crate::dom::{Document, DomError, Element, ListenerHandle};
    pub use crate::events::{DomEvent, EventKind};
    pub use crate::kit::forwarding::{attach_click_forwarding, attach_selection_guard};
    pub use crate::kit::prelude::*;
    pub use crate::kit::token_set::{update_token_set, TokenOp};
}

/// Errors that can occur in the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Component error: {0}")]
    Component(#[from] component::ComponentError),

    #[error("Document error: {0}")]
    Dom(#[from] dom::DomError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

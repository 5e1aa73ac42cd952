//! Error types for component operations

use crate::component::props::PropValidationError;
use crate::component::LifecyclePhase;
use crate::dom::DomError;

/// Errors that can occur during component operations
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// Invalid lifecycle transition
    #[error("Invalid lifecycle transition: cannot {1} while in {0:?} phase")]
    InvalidLifecycleTransition(LifecyclePhase, String),

    /// Props failed validation
    #[error("Invalid props: {0}")]
    InvalidProps(#[from] PropValidationError),

    /// Error rendering component
    #[error("Error rendering component: {0}")]
    RenderError(String),

    /// Tree mutation rejected by the document
    #[error(transparent)]
    Dom(#[from] DomError),
}

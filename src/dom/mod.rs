//! In-memory document model the label primitives run against
//!
//! Single-threaded by construction: nodes are `Rc`/`RefCell` handles, parents and
//! the document are held weakly, and listeners run synchronously on dispatch.

mod document;
mod element;

pub use document::Document;
pub use element::{Element, ListenerHandle, ListenerId, WeakElement};

/// Errors raised by tree mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The mutation would make a node its own ancestor
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    /// The node to operate on is not where the caller said it is
    #[error("Node not found: {0}")]
    NotFound(String),
}

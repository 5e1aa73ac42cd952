//! Component model for the label primitives
//!
//! This module contains the types and traits shared by components: the lifecycle
//! state machine, dependency-scoped effects, ambient context, stable ids, element
//! refs and props validation.

mod context;
mod error;
pub mod id;
mod lifecycle;
pub mod node_ref;
pub mod props;


pub use context::ContextProvider;
pub use error::ComponentError;
pub use id::StableId;
pub use lifecycle::{on_release, Cleanup, EffectSlot, LifecycleManager, LifecycleOp};
pub use node_ref::{compose_refs, ComposedRef, NodeRef};
pub use props::{PropValidationError, PropValidator};

use std::rc::Rc;

use crate::dom::{Document, Element};
use crate::kit::config::KitConfig;

/// Lifecycle phase of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Component is created but not yet mounted
    Created,
    /// Component is being mounted
    Mounting,
    /// Component is fully mounted and operational
    Mounted,
    /// Component is re-rendering with new props
    Updating,
    /// Component is being unmounted
    Unmounting,
    /// Component is unmounted and inactive
    Unmounted,
}

/// Component trait - implemented by all UI components
///
/// `mount` and `update` render first and then commit effects; effects never run
/// mid-render. `unmount` tears effects down in reverse order before removing the
/// rendered element.
pub trait Component {
    /// The props type for this component
    type Props: Clone;

    /// Create a new component instance
    fn create(props: Self::Props, context: Context) -> Self
    where
        Self: Sized;

    /// Render and attach under `parent`, then commit effects
    fn mount(&mut self, parent: &Element) -> Result<(), ComponentError>;

    /// Re-render with new props, then commit effects
    fn update(&mut self, props: Self::Props) -> Result<(), ComponentError>;

    /// Tear down effects and detach the rendered element
    fn unmount(&mut self) -> Result<(), ComponentError>;

    /// Produce (or patch) the rendered element
    fn render(&mut self) -> Result<Element, ComponentError>;

    /// Current lifecycle phase
    fn phase(&self) -> LifecyclePhase;
}

/// Context passed to components: the host document, kit configuration and
/// the ambient values published by ancestors
#[derive(Clone)]
pub struct Context {
    document: Document,
    config: Rc<KitConfig>,
    context_provider: ContextProvider,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("document", &self.document)
            .field("config", &self.config)
            .field("context_provider", &self.context_provider)
            .finish()
    }
}

impl Context {
    /// Create a root context for `document` with the default configuration
    pub fn new(document: &Document) -> Self {
        Self::with_config(document, KitConfig::default())
    }

    pub fn with_config(document: &Document, config: KitConfig) -> Self {
        Self {
            document: document.clone(),
            config: Rc::new(config),
            context_provider: ContextProvider::new(),
        }
    }

    /// Create a child context; values provided on it stay within the subtree
    pub fn with_parent(parent: &Context) -> Self {
        Self {
            document: parent.document.clone(),
            config: parent.config.clone(),
            context_provider: ContextProvider::with_parent(parent.context_provider.clone()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &KitConfig {
        &self.config
    }

    /// Publish a value to descendants
    pub fn provide<T: Clone + 'static>(&self, value: T) {
        self.context_provider.provide(value);
    }

    /// Read the nearest published value of type `T`
    pub fn consume<T: Clone + 'static>(&self) -> Option<T> {
        self.context_provider.consume::<T>()
    }

    /// Withdraw a value this context published
    pub fn withdraw<T: 'static>(&self) -> bool {
        self.context_provider.remove::<T>()
    }
}

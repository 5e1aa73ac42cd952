//! Context passing from a component to its descendants

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

/// Provider for ambient values scoped to a subtree
///
/// Clones share storage, so a value provided after a child provider was created
/// is still visible to that child. Lookups fall back to the parent chain.
#[derive(Clone, Default)]
pub struct ContextProvider {
    /// Parent context provider
    parent: Option<Box<ContextProvider>>,
    values: Rc<RefCell<HashMap<TypeId, Rc<dyn Any>>>>,
}

impl Debug for ContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextProvider")
            .field("parent", &self.parent.is_some())
            .field(
                "values",
                &format!("[{} values]", self.values.borrow().len()),
            )
            .finish()
    }
}

impl ContextProvider {
    /// Create a new context provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context provider with a parent
    pub fn with_parent(parent: ContextProvider) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            values: Rc::default(),
        }
    }

    /// Set a value in the context, replacing any previous value of the same type
    pub fn provide<T: Clone + 'static>(&self, value: T) {
        self.values
            .borrow_mut()
            .insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Get a value from the nearest provider that has one
    pub fn consume<T: Clone + 'static>(&self) -> Option<T> {
        let local = self
            .values
            .borrow()
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>().cloned());

        match (local, &self.parent) {
            (Some(value), _) => Some(value),
            (None, Some(parent)) => parent.consume::<T>(),
            (None, None) => None,
        }
    }

    /// Check if a type exists in this provider or any ancestor
    pub fn has<T: 'static>(&self) -> bool {
        self.values.borrow().contains_key(&TypeId::of::<T>())
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.has::<T>())
    }

    /// Remove a value from this provider only
    pub fn remove<T: 'static>(&self) -> bool {
        self.values
            .borrow_mut()
            .remove(&TypeId::of::<T>())
            .is_some()
    }
}

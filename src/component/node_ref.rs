//! Non-owning references to rendered elements

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::dom::{Element, WeakElement};

/// A shared slot holding a weak reference to an element
///
/// Clones point at the same slot. The slot never keeps the element alive.
#[derive(Clone, Default)]
pub struct NodeRef(Rc<RefCell<WeakElement>>);

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.get()).finish()
    }
}

impl PartialEq for NodeRef {
    /// Slot identity, not element identity
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// The referenced element, if one is assigned and still alive
    pub fn get(&self) -> Option<Element> {
        self.0.borrow().upgrade()
    }

    pub fn set(&self, element: Option<&Element>) {
        *self.0.borrow_mut() = element.map(Element::downgrade).unwrap_or_default();
    }
}

/// Forwards one assignment to several [`NodeRef`] slots
#[derive(Debug, Clone, Default)]
pub struct ComposedRef {
    slots: Vec<NodeRef>,
}

impl ComposedRef {
    pub fn set(&self, element: Option<&Element>) {
        for slot in &self.slots {
            slot.set(element);
        }
    }
}

/// Compose refs so a single assignment reaches all of them
pub fn compose_refs<I>(refs: I) -> ComposedRef
where
    I: IntoIterator<Item = NodeRef>,
{
    ComposedRef {
        slots: refs.into_iter().collect(),
    }
}

//! Element nodes of the in-memory document

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dom::document::{Document, DocumentInner};
use crate::dom::DomError;
use crate::events::{delegation, DomEvent, EventKind};

/// Type alias for registered listener callbacks
type Listener = Rc<dyn Fn(&mut DomEvent)>;

/// Identifies one registered listener on one element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

struct ElementData {
    tag: String,
    attributes: BTreeMap<String, String>,
    parent: Option<Weak<RefCell<ElementData>>>,
    children: Vec<Element>,
    listeners: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    document: Weak<DocumentInner>,
}

/// A shared handle to an element node
///
/// Handles compare by node identity, not by content.
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

/// A non-owning handle to an element node
#[derive(Clone, Default)]
pub struct WeakElement(Weak<RefCell<ElementData>>);

impl WeakElement {
    /// Resolve the handle, if the element is still alive
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }
}

impl PartialEq for WeakElement {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for WeakElement {}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(element) => write!(f, "WeakElement({:?})", element),
            None => f.write_str("WeakElement(<dropped>)"),
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match data.attributes.get("id") {
            Some(id) => write!(f, "<{} id=\"{}\">", data.tag, id),
            None => write!(f, "<{}>", data.tag),
        }
    }
}

impl Element {
    pub(crate) fn with_document(tag: &str, document: Weak<DocumentInner>) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            listeners: HashMap::new(),
            document,
        })))
    }

    /// Get a non-owning handle to this element
    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    pub fn tag_name(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// The document that created this element, if it is still alive
    pub fn owner_document(&self) -> Option<Document> {
        self.0.borrow().document.upgrade().map(Document::from_inner)
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Remove an attribute, returning whether it was present
    pub fn remove_attribute(&self, name: &str) -> bool {
        self.0.borrow_mut().attributes.remove(name).is_some()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.borrow().attributes.contains_key(name)
    }

    /// Snapshot of all attributes, sorted by name
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.0.borrow().attributes.clone()
    }

    /// Shorthand for the `id` attribute
    pub fn id(&self) -> Option<String> {
        self.get_attribute("id")
    }

    // Tree structure

    pub fn parent(&self) -> Option<Element> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Element)
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    /// Whether `other` is this element or one of its descendants
    pub fn contains(&self, other: &Element) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node == *self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Whether this element is attached to its document's tree
    pub fn is_connected(&self) -> bool {
        let Some(document) = self.owner_document() else {
            return false;
        };
        let mut root = self.clone();
        while let Some(parent) = root.parent() {
            root = parent;
        }
        root == document.body()
    }

    /// Append `child` as the last child, moving it out of its current parent first
    pub fn append_child(&self, child: &Element) -> Result<(), DomError> {
        if child.contains(self) {
            return Err(DomError::HierarchyRequest(format!(
                "{:?} cannot be appended to {:?}",
                child, self
            )));
        }
        child.remove();
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    pub fn remove_child(&self, child: &Element) -> Result<(), DomError> {
        let position = self
            .0
            .borrow()
            .children
            .iter()
            .position(|candidate| candidate == child)
            .ok_or_else(|| DomError::NotFound(format!("{:?} is not a child of {:?}", child, self)))?;
        self.0.borrow_mut().children.remove(position);
        child.0.borrow_mut().parent = None;
        Ok(())
    }

    /// Detach this element from its parent, if it has one
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            // The parent link was just read, so the child is always present.
            let _ = parent.remove_child(self);
        }
    }

    /// Put `replacement` where this element sits in the tree
    ///
    /// An element without a parent has nowhere to be replaced; that is a no-op.
    pub fn replace_with(&self, replacement: &Element) -> Result<(), DomError> {
        if replacement == self {
            return Ok(());
        }
        let Some(parent) = self.parent() else {
            return Ok(());
        };
        if replacement.contains(&parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{:?} cannot replace a descendant of itself",
                replacement
            )));
        }
        replacement.remove();

        let mut parent_data = parent.0.borrow_mut();
        let position = parent_data
            .children
            .iter()
            .position(|candidate| candidate == self)
            .ok_or_else(|| DomError::NotFound(format!("{:?} is not a child of its parent", self)))?;
        parent_data.children[position] = replacement.clone();
        drop(parent_data);

        replacement.0.borrow_mut().parent = Some(Rc::downgrade(&parent.0));
        self.0.borrow_mut().parent = None;
        Ok(())
    }

    // Events

    /// Register a listener and return its id
    pub fn add_event_listener<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&mut DomEvent) + 'static,
    {
        let id = ListenerId::next();
        self.0
            .borrow_mut()
            .listeners
            .entry(kind)
            .or_default()
            .push((id, Rc::new(listener)));
        id
    }

    /// Register a listener and return a handle that removes exactly that listener
    pub fn listen<F>(&self, kind: EventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&mut DomEvent) + 'static,
    {
        let id = self.add_event_listener(kind, listener);
        ListenerHandle {
            element: self.downgrade(),
            kind,
            id,
        }
    }

    /// Remove one listener, returning whether it was registered
    pub fn remove_event_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut data = self.0.borrow_mut();
        let Some(listeners) = data.listeners.get_mut(&kind) else {
            return false;
        };
        let before = listeners.len();
        listeners.retain(|(candidate, _)| *candidate != id);
        before != listeners.len()
    }

    /// Number of listeners registered for `kind` directly on this element
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.0
            .borrow()
            .listeners
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn has_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        self.0
            .borrow()
            .listeners
            .get(&kind)
            .is_some_and(|listeners| listeners.iter().any(|(candidate, _)| *candidate == id))
    }

    /// Run this element's listeners for the event
    ///
    /// Listeners are snapshotted first so they may add or remove listeners
    /// (or dispatch further events) while running. A listener removed before
    /// its turn does not run.
    pub(crate) fn invoke_listeners(&self, event: &mut DomEvent) {
        let kind = event.kind();
        let snapshot = self
            .0
            .borrow()
            .listeners
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        for (id, listener) in snapshot {
            if self.has_listener(kind, id) {
                listener(event);
            }
        }
    }

    /// Dispatch an event at this element, returning `false` if its default was prevented
    pub fn dispatch_event(&self, event: DomEvent) -> bool {
        delegation::dispatch(self, event)
    }

    /// Simulate a programmatic click
    pub fn click(&self) {
        self.dispatch_event(DomEvent::synthetic(EventKind::Click));
    }

    /// Move focus to this element
    ///
    /// Disconnected elements cannot take focus; the call does nothing for them.
    pub fn focus(&self) {
        if !self.is_connected() {
            return;
        }
        if let Some(document) = self.owner_document() {
            document.set_active_element(Some(self));
        }
        self.dispatch_event(DomEvent::synthetic(EventKind::Focus));
    }
}

/// Removes one listener registered through [`Element::listen`]
///
/// Dropping the handle leaves the listener registered.
#[must_use = "dropping a ListenerHandle keeps the listener attached; call detach() to remove it"]
#[derive(Debug)]
pub struct ListenerHandle {
    element: WeakElement,
    kind: EventKind,
    id: ListenerId,
}

impl ListenerHandle {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Remove the listener, returning whether it was still registered
    pub fn detach(self) -> bool {
        match self.element.upgrade() {
            Some(element) => element.remove_event_listener(self.kind, self.id),
            None => false,
        }
    }
}

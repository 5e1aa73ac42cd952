//! The document: element factory, id lookup and focus tracking

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::dom::{Element, WeakElement};

pub(crate) struct DocumentInner {
    body: Element,
    active: RefCell<WeakElement>,
}

/// A single-threaded document tree rooted at `body`
#[derive(Clone)]
pub struct Document(Rc<DocumentInner>);

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("body", &self.0.body)
            .field("active", &self.active_element())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Document {
    /// Create an empty document with a `body` element
    pub fn new() -> Self {
        Self(Rc::new_cyclic(|document| DocumentInner {
            body: Element::with_document("body", document.clone()),
            active: RefCell::new(WeakElement::default()),
        }))
    }

    pub(crate) fn from_inner(inner: Rc<DocumentInner>) -> Self {
        Self(inner)
    }

    pub fn body(&self) -> Element {
        self.0.body.clone()
    }

    /// Create a detached element owned by this document
    pub fn create_element(&self, tag: &str) -> Element {
        Element::with_document(tag, Rc::downgrade(&self.0))
    }

    /// Find the first connected element, in tree order, whose `id` is `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        let mut stack = vec![self.body()];
        while let Some(element) = stack.pop() {
            if element.get_attribute("id").as_deref() == Some(id) {
                return Some(element);
            }
            stack.extend(element.children().into_iter().rev());
        }
        None
    }

    /// The focused element, if it is still connected
    pub fn active_element(&self) -> Option<Element> {
        self.0
            .active
            .borrow()
            .upgrade()
            .filter(Element::is_connected)
    }

    pub(crate) fn set_active_element(&self, element: Option<&Element>) {
        *self.0.active.borrow_mut() = element.map(Element::downgrade).unwrap_or_default();
    }
}

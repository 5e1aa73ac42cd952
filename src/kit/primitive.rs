//! Polymorphic rendering: one element of a caller-chosen type

use std::collections::BTreeMap;

use crate::dom::{Document, DomError, Element};

/// Renders an element of an arbitrary tag, patching the previous one when possible
pub struct Primitive;

impl Primitive {
    /// Render `as_tag` with the component-owned attributes in `own` followed by the
    /// caller's `passthrough` attributes, verbatim
    ///
    /// A passthrough attribute with the same name as an owned one wins. When
    /// `existing` has the same tag it is patched in place and attributes that are no
    /// longer wanted are removed. Otherwise a fresh element takes its place in the
    /// tree and adopts its children.
    pub fn render(
        document: &Document,
        existing: Option<&Element>,
        as_tag: &str,
        own: &[(&str, &str)],
        passthrough: &BTreeMap<String, String>,
    ) -> Result<Element, DomError> {
        let as_tag = as_tag.to_ascii_lowercase();
        let element = match existing {
            Some(element) if element.tag_name() == as_tag => element.clone(),
            Some(previous) => {
                let element = document.create_element(&as_tag);
                for child in previous.children() {
                    element.append_child(&child)?;
                }
                previous.replace_with(&element)?;
                element
            }
            None => document.create_element(&as_tag),
        };

        let mut wanted: BTreeMap<&str, &str> = own.iter().copied().collect();
        wanted.extend(
            passthrough
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );

        for stale in element
            .attributes()
            .keys()
            .filter(|name| !wanted.contains_key(name.as_str()))
        {
            element.remove_attribute(stale);
        }
        for (name, value) in wanted {
            element.set_attribute(name, value);
        }

        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_renders_requested_tag_with_attributes() {
        let document = Document::new();
        let element = Primitive::render(
            &document,
            None,
            "label",
            &[("role", "label"), ("id", "l1")],
            &attrs(&[("class", "field-label"), ("data-state", "on")]),
        )
        .unwrap();

        assert_eq!(element.tag_name(), "label");
        assert_eq!(
            element.attributes(),
            attrs(&[
                ("class", "field-label"),
                ("data-state", "on"),
                ("id", "l1"),
                ("role", "label")
            ])
        );
    }

    #[test]
    fn test_passthrough_overrides_owned_attribute() {
        let document = Document::new();
        let element = Primitive::render(
            &document,
            None,
            "span",
            &[("role", "label")],
            &attrs(&[("role", "heading")]),
        )
        .unwrap();
        assert_eq!(element.get_attribute("role").as_deref(), Some("heading"));
    }

    #[test]
    fn test_patch_removes_stale_passthrough() {
        let document = Document::new();
        let first = Primitive::render(
            &document,
            None,
            "span",
            &[("id", "l1")],
            &attrs(&[("title", "old")]),
        )
        .unwrap();
        let second =
            Primitive::render(&document, Some(&first), "span", &[("id", "l1")], &attrs(&[]))
                .unwrap();

        assert_eq!(first, second);
        assert!(!second.has_attribute("title"));
    }

    #[test]
    fn test_tag_change_replaces_element_in_place() {
        let document = Document::new();
        let child = document.create_element("em");
        let first = Primitive::render(&document, None, "span", &[], &attrs(&[])).unwrap();
        first.append_child(&child).unwrap();
        document.body().append_child(&first).unwrap();

        let second = Primitive::render(&document, Some(&first), "label", &[], &attrs(&[])).unwrap();

        assert_ne!(first, second);
        assert_eq!(document.body().children(), vec![second.clone()]);
        assert_eq!(second.children(), vec![child]);
        assert!(first.parent().is_none());
    }
}

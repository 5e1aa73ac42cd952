//! Space-separated id lists shared between several writers
//!
//! Attributes like `aria-labelledby` may be written by more than one label at a time.
//! Each writer only ever adds or removes its own token, and always starts from the
//! live attribute value.

use crate::dom::Element;

/// Whether to add or remove a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOp {
    Add,
    Remove,
}

/// Apply `op` for `id` to a space-separated token list
///
/// Returns `None` when the resulting list is empty. Adding a token that is already
/// present leaves the list unchanged; removing drops every occurrence.
pub fn update_token_set(current: Option<&str>, id: &str, op: TokenOp) -> Option<String> {
    let mut tokens: Vec<&str> = current
        .map(|value| value.split_ascii_whitespace().collect())
        .unwrap_or_default();

    match op {
        TokenOp::Add => {
            if !tokens.contains(&id) {
                tokens.push(id);
            }
        }
        TokenOp::Remove => tokens.retain(|token| *token != id),
    }

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Read `attribute` from `element`, apply `op` for `id`, and write the result back
///
/// Only `id`'s own span is edited, so whatever other writers put in the attribute
/// survives byte for byte: adding appends ` id`, removing cuts the token with one
/// neighbouring separator. The attribute is removed rather than left blank. Nothing
/// is written when `id`'s membership would not change. Returns the value now on the
/// element.
pub fn apply_token_update(
    element: &Element,
    attribute: &str,
    id: &str,
    op: TokenOp,
) -> Option<String> {
    let current = element.get_attribute(attribute);
    let present = current
        .as_deref()
        .is_some_and(|value| value.split_ascii_whitespace().any(|token| token == id));

    let next = match (op, current.as_deref()) {
        (TokenOp::Add, _) if present => return current,
        (TokenOp::Remove, _) if !present => return current,
        (TokenOp::Add, Some(value)) if !is_blank(value) => Some(format!("{value} {id}")),
        (TokenOp::Add, _) => Some(id.to_string()),
        (TokenOp::Remove, value) => {
            let remaining = cut_token(value.unwrap_or_default(), id);
            (!is_blank(&remaining)).then_some(remaining)
        }
    };

    match &next {
        Some(value) => element.set_attribute(attribute, value),
        None => {
            element.remove_attribute(attribute);
        }
    }
    next
}

fn is_blank(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_whitespace())
}

/// Byte ranges of the whitespace-separated tokens in `value`
fn token_spans(value: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, b) in value.bytes().enumerate() {
        if b.is_ascii_whitespace() {
            if let Some(start) = start.take() {
                spans.push((start, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(start) = start {
        spans.push((start, value.len()));
    }
    spans
}

/// Remove every `id` token together with the separator before it (or after it,
/// for a leading token)
fn cut_token(value: &str, id: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut kept_from = 0;
    for (start, end) in token_spans(value) {
        if &value[start..end] != id {
            continue;
        }
        // ASCII whitespace is one byte, so these offsets stay on char boundaries
        let (cut_start, cut_end) = if start > kept_from {
            (start - 1, end)
        } else {
            (start, (end + 1).min(value.len()))
        };
        out.push_str(&value[kept_from..cut_start]);
        kept_from = cut_end;
    }
    out.push_str(&value[kept_from..]);
    out
}

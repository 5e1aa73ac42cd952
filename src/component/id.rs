//! Stable identifiers for component instances

use std::cell::OnceCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prefix used for generated ids when no configuration says otherwise
pub const DEFAULT_ID_PREFIX: &str = "orbit-label";

fn next_sequence() -> usize {
    static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

/// Per-instance id resolver
///
/// An explicit id always wins. Without one, the instance gets a generated id on first
/// use and keeps it for its whole lifetime, including after an explicit id is dropped
/// again.
#[derive(Debug)]
pub struct StableId {
    prefix: String,
    generated: OnceCell<String>,
}

impl Default for StableId {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl StableId {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            generated: OnceCell::new(),
        }
    }

    pub fn resolve(&self, explicit: Option<&str>) -> String {
        match explicit {
            Some(id) => id.to_string(),
            None => self
                .generated
                .get_or_init(|| format!("{}-{}", self.prefix, next_sequence()))
                .clone(),
        }
    }
}

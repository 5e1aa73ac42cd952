// Configuration for the kit components

use serde::{Deserialize, Serialize};

use crate::component::id::DEFAULT_ID_PREFIX;
use crate::Error;

/// Kit-wide defaults, loadable from JSON
///
/// Every field is optional in the JSON form; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Element type a label renders as when no `as_tag` is given
    pub default_label_tag: String,
    /// Prefix for generated label ids
    pub id_prefix: String,
    /// Attribute on the control that lists the ids naming it
    pub labelledby_attribute: String,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            default_label_tag: "span".to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            labelledby_attribute: "aria-labelledby".to_string(),
        }
    }
}

impl KitConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

//! Diff-aware map rendering.

use std::collections::BTreeSet;

use super::{to_text, Represent, Representation, StandardRepresentation};

/// A map rendering policy that highlights unequal entries.
///
/// Entries are marked by key; a marked entry (or just its value) is wrapped
/// in square brackets in the output, all other entries render unchanged:
///
/// ```text
/// {["b"=2], "a"=1}    // entry unequal by key
/// {"b"=[2], "a"=1}    // entry unequal by value
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let mut repr = MapRepresentation::new();
/// repr.mark_unequal_entry_by_value(&"b");
/// let text = to_text(&repr, &map);   // {"a"=1, "b"=[2]}
/// ```
#[derive(Debug, Default)]
pub struct MapRepresentation {
    unequal_keys: BTreeSet<String>,
    unequal_values: BTreeSet<String>,
}

impl MapRepresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the entry under `key` as unequal by key: the whole entry is
    /// bracketed.
    pub fn mark_unequal_entry_by_key(&mut self, key: &dyn Represent) {
        self.unequal_keys.insert(rendered_key(key));
    }

    /// Mark the entry under `key` as unequal by value: only the value is
    /// bracketed.
    pub fn mark_unequal_entry_by_value(&mut self, key: &dyn Represent) {
        self.unequal_values.insert(rendered_key(key));
    }
}

// Markers are matched against the standard rendering of the key, so the
// same key value marks the same entry regardless of this policy's state.
fn rendered_key(key: &dyn Represent) -> String {
    to_text(&StandardRepresentation, key)
}

impl Representation for MapRepresentation {
    fn format_entry(&self, key: &str, value: &str) -> String {
        if self.unequal_keys.contains(key) {
            format!("[{}={}]", key, value)
        } else if self.unequal_values.contains(key) {
            format!("{}=[{}]", key, value)
        } else {
            format!("{}={}", key, value)
        }
    }
}

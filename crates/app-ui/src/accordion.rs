//! Single-open accordion state
//!
//! The weekly tracker and the project phases both show a list of cards where
//! at most one card is expanded at a time.

use serde::{Deserialize, Serialize};

/// Tracks which item of a list is expanded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accordion<K> {
    expanded: Option<K>,
}

impl<K> Default for Accordion<K> {
    fn default() -> Self {
        Self { expanded: None }
    }
}

impl<K: PartialEq> Accordion<K> {
    /// Create an accordion with everything collapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `key`, or collapse it if it is already expanded
    ///
    /// Returns true if `key` ends up expanded.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.expanded.as_ref() == Some(&key) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(key);
            true
        }
    }

    /// Check if `key` is expanded
    pub fn is_expanded(&self, key: &K) -> bool {
        self.expanded.as_ref() == Some(key)
    }

    /// Currently expanded key
    pub fn expanded(&self) -> Option<&K> {
        self.expanded.as_ref()
    }

    /// Collapse everything
    pub fn collapse_all(&mut self) {
        self.expanded = None;
    }
}

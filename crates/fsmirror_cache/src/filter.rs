//! Traversal filters applied when snapshotting a directory tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Include and exclude patterns used to enumerate a directory tree.
///
/// Matching is done by the prober; the mirror only needs the filter as part
/// of a cache key. Two filters are equal when their pattern sets and case
/// sensitivity are equal, regardless of the order patterns were added in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternSet {
    includes: BTreeSet<String>,
    excludes: BTreeSet<String>,
    case_sensitive: bool,
}

impl PatternSet {
    /// Creates a filter that accepts everything.
    pub fn new() -> Self {
        Self {
            includes: BTreeSet::new(),
            excludes: BTreeSet::new(),
            case_sensitive: true,
        }
    }

    /// Adds an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.insert(pattern.into());
        self
    }

    /// Adds an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.insert(pattern.into());
        self
    }

    /// Sets whether patterns match case-sensitively.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// The include patterns, sorted.
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(String::as_str)
    }

    /// The exclude patterns, sorted.
    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(String::as_str)
    }

    /// Whether patterns match case-sensitively.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns `true` if the filter has no include or exclude patterns.
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

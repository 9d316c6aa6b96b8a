//! Cache key for directory-tree snapshots outside the trusted stores.

use fsmirror_common::AbsPath;

use crate::filter::PatternSet;

/// A directory root together with the filter its listing was produced under.
///
/// The same directory listed with different filters gives different trees,
/// so ordinary tree snapshots are keyed by both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeKey {
    root: AbsPath,
    patterns: PatternSet,
}

impl TreeKey {
    /// Creates a key for `root` listed under `patterns`.
    pub fn new(root: AbsPath, patterns: PatternSet) -> Self {
        Self { root, patterns }
    }

    /// The directory root.
    pub fn root(&self) -> &AbsPath {
        &self.root
    }

    /// The traversal filter.
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }
}

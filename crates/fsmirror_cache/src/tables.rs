//! Partitioned snapshot storage.
//!
//! Every snapshot kind (file, directory tree, content) has two tables: one
//! for paths under a trusted cache store and one for everything else. Which
//! table a path uses is decided by [`SnapshotTables::partition_of`] on every
//! get and put, never by where an earlier value happened to be written.
//!
//! The tables are [`DashMap`]s so that parallel build workers only contend
//! when they touch the same shard. A single get or put is atomic with respect
//! to its key, but nothing spans keys or tables: a put racing with
//! [`SnapshotTables::clear_ordinary`] may or may not survive the clear. The
//! worst outcome is one extra probe of the file system, so this must not be
//! serialized behind a global lock.

use std::sync::Arc;

use dashmap::DashMap;
use fsmirror_common::AbsPath;

use crate::filter::PatternSet;
use crate::hierarchy::PathHierarchyIndex;
use crate::snapshot::{ContentSnapshot, FileSnapshot, FileTreeSnapshot};
use crate::tree_key::TreeKey;

/// Which set of tables a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// Under a trusted cache-store root. Entries live for the whole process.
    Trusted,
    /// Anywhere else. Entries are dropped whenever task outputs are generated.
    Ordinary,
}

/// Tables for paths under trusted roots. Trees are keyed by root path only.
#[derive(Default)]
struct TrustedTables {
    files: DashMap<AbsPath, FileSnapshot>,
    trees: DashMap<AbsPath, Arc<FileTreeSnapshot>>,
    contents: DashMap<AbsPath, ContentSnapshot>,
}

/// Tables for all other paths. Trees are keyed by root path and filter.
#[derive(Default)]
struct OrdinaryTables {
    files: DashMap<AbsPath, FileSnapshot>,
    trees: DashMap<TreeKey, Arc<FileTreeSnapshot>>,
    contents: DashMap<AbsPath, ContentSnapshot>,
}

/// Number of entries held by each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    /// File snapshots under trusted roots.
    pub trusted_files: usize,
    /// File snapshots elsewhere.
    pub ordinary_files: usize,
    /// Tree snapshots under trusted roots.
    pub trusted_trees: usize,
    /// Tree snapshots elsewhere.
    pub ordinary_trees: usize,
    /// Content snapshots under trusted roots.
    pub trusted_contents: usize,
    /// Content snapshots elsewhere.
    pub ordinary_contents: usize,
}

impl TableStats {
    /// Total entries across all six tables.
    pub fn total(&self) -> usize {
        self.trusted_files
            + self.ordinary_files
            + self.trusted_trees
            + self.ordinary_trees
            + self.trusted_contents
            + self.ordinary_contents
    }
}

/// Entries removed from the ordinary tables by one clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discarded {
    /// File snapshots removed.
    pub files: usize,
    /// Tree snapshots removed.
    pub trees: usize,
    /// Content snapshots removed.
    pub contents: usize,
}

/// The six snapshot tables plus the index that routes paths between them.
pub struct SnapshotTables {
    trusted_roots: PathHierarchyIndex,
    trusted: TrustedTables,
    ordinary: OrdinaryTables,
}

impl SnapshotTables {
    /// Creates empty tables. `trusted_roots` is fixed for the lifetime of
    /// the tables, which keeps classification stable between put and get.
    pub fn new(trusted_roots: PathHierarchyIndex) -> Self {
        Self {
            trusted_roots,
            trusted: TrustedTables::default(),
            ordinary: OrdinaryTables::default(),
        }
    }

    /// The index used to classify paths.
    pub fn trusted_roots(&self) -> &PathHierarchyIndex {
        &self.trusted_roots
    }

    /// Classifies `path`.
    pub fn partition_of(&self, path: &AbsPath) -> Partition {
        if self.trusted_roots.contains(path) {
            Partition::Trusted
        } else {
            Partition::Ordinary
        }
    }

    /// Returns the file snapshot recorded for `path`, if any.
    pub fn get_file(&self, path: &AbsPath) -> Option<FileSnapshot> {
        let table = match self.partition_of(path) {
            Partition::Trusted => &self.trusted.files,
            Partition::Ordinary => &self.ordinary.files,
        };
        table.get(path).map(|entry| entry.value().clone())
    }

    /// Records `file`, replacing any earlier snapshot of the same path.
    pub fn put_file(&self, file: FileSnapshot) {
        let table = match self.partition_of(file.path()) {
            Partition::Trusted => &self.trusted.files,
            Partition::Ordinary => &self.ordinary.files,
        };
        table.insert(file.path().clone(), file);
    }

    /// Returns the content snapshot recorded for `path`, if any.
    pub fn get_content(&self, path: &AbsPath) -> Option<ContentSnapshot> {
        let table = match self.partition_of(path) {
            Partition::Trusted => &self.trusted.contents,
            Partition::Ordinary => &self.ordinary.contents,
        };
        table.get(path).map(|entry| *entry.value())
    }

    /// Records the content of `path`, replacing any earlier value.
    pub fn put_content(&self, path: AbsPath, content: ContentSnapshot) {
        let table = match self.partition_of(&path) {
            Partition::Trusted => &self.trusted.contents,
            Partition::Ordinary => &self.ordinary.contents,
        };
        table.insert(path, content);
    }

    /// Returns the tree snapshot recorded for `path` under `patterns`.
    ///
    /// Under a trusted root the filter is not part of the key, so any
    /// filter finds the last tree stored for the path.
    pub fn get_directory_tree(
        &self,
        path: &AbsPath,
        patterns: &PatternSet,
    ) -> Option<Arc<FileTreeSnapshot>> {
        match self.partition_of(path) {
            Partition::Trusted => self.trusted.trees.get(path).map(|e| Arc::clone(e.value())),
            Partition::Ordinary => {
                let key = TreeKey::new(path.clone(), patterns.clone());
                self.ordinary.trees.get(&key).map(|e| Arc::clone(e.value()))
            }
        }
    }

    /// Records `tree` as listed under `patterns`, replacing any earlier value
    /// for the same key.
    pub fn put_directory(&self, tree: Arc<FileTreeSnapshot>, patterns: &PatternSet) {
        let root = tree.path().clone();
        match self.partition_of(&root) {
            Partition::Trusted => {
                self.trusted.trees.insert(root, tree);
            }
            Partition::Ordinary => {
                self.ordinary
                    .trees
                    .insert(TreeKey::new(root, patterns.clone()), tree);
            }
        }
    }

    /// Empties the three ordinary tables. Trusted tables are never cleared.
    ///
    /// Each table is cleared shard by shard while other threads keep running;
    /// see the module documentation for what that means for concurrent puts.
    pub fn clear_ordinary(&self) -> Discarded {
        Discarded {
            files: drain(&self.ordinary.files),
            trees: drain(&self.ordinary.trees),
            contents: drain(&self.ordinary.contents),
        }
    }

    /// Counts the entries in every table.
    pub fn stats(&self) -> TableStats {
        TableStats {
            trusted_files: self.trusted.files.len(),
            ordinary_files: self.ordinary.files.len(),
            trusted_trees: self.trusted.trees.len(),
            ordinary_trees: self.ordinary.trees.len(),
            trusted_contents: self.trusted.contents.len(),
            ordinary_contents: self.ordinary.contents.len(),
        }
    }
}

/// Removes every entry, returning how many were removed.
fn drain<K, V>(table: &DashMap<K, V>) -> usize
where
    K: Eq + std::hash::Hash,
{
    let mut removed = 0;
    table.retain(|_, _| {
        removed += 1;
        false
    });
    removed
}

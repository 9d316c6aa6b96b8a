//! The file-system mirror consulted by probing code before touching disk.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fsmirror_common::AbsPath;
use fsmirror_config::MirrorConfig;
use tracing::debug;

use crate::filter::PatternSet;
use crate::hierarchy::PathHierarchyIndex;
use crate::snapshot::{ContentSnapshot, FileSnapshot, FileTreeSnapshot};
use crate::store::CachedFileStore;
use crate::tables::{Discarded, Partition, SnapshotTables, TableStats};

/// In-memory record of what is known about the file system.
///
/// Probing code calls a `get_*` method before stat-ing, listing or hashing a
/// path, and the matching `put_*` method after computing a fresh snapshot.
/// `None` means nothing is known and the caller has to look at the disk.
pub trait FileSystemMirror: Send + Sync {
    /// Returns the known details of `path`.
    fn get_file(&self, path: &AbsPath) -> Option<FileSnapshot>;

    /// Records the details of a single path.
    fn put_file(&self, file: FileSnapshot);

    /// Returns the known content identity of `path`.
    fn get_content(&self, path: &AbsPath) -> Option<ContentSnapshot>;

    /// Records the content identity of `path`.
    fn put_content(&self, path: AbsPath, content: ContentSnapshot);

    /// Returns the known listing of the directory at `path` under `patterns`.
    fn get_directory_tree(
        &self,
        path: &AbsPath,
        patterns: &PatternSet,
    ) -> Option<Arc<FileTreeSnapshot>>;

    /// Records the listing of a directory produced under `patterns`.
    fn put_directory(&self, tree: Arc<FileTreeSnapshot>, patterns: &PatternSet);
}

/// Counters describing the mirror's current contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorStats {
    /// Entry counts per table.
    pub tables: TableStats,
    /// How many times the ordinary tables have been discarded.
    pub invalidations: u64,
}

/// Mirror that keeps snapshots under trusted cache stores for the whole
/// process and drops everything else whenever task outputs are generated.
///
/// Build one per build session and share it between workers behind an
/// [`Arc`]. All methods take `&self`.
pub struct DefaultFileSystemMirror {
    tables: SnapshotTables,
    invalidations: AtomicU64,
}

impl DefaultFileSystemMirror {
    /// Creates a mirror trusting every root of every store.
    pub fn new(stores: &[&dyn CachedFileStore]) -> Self {
        let trusted_roots = stores
            .iter()
            .flat_map(|store| store.file_store_roots())
            .fold(PathHierarchyIndex::empty(), |index, root| index.plus(&root));
        Self::with_index(trusted_roots)
    }

    /// Creates a mirror trusting exactly `roots`.
    pub fn with_roots<'a>(roots: impl IntoIterator<Item = &'a AbsPath>) -> Self {
        Self::with_index(PathHierarchyIndex::of(roots))
    }

    /// Creates a mirror trusting the stores listed in a parsed configuration.
    pub fn from_config(config: &MirrorConfig) -> Self {
        Self::new(&[config as &dyn CachedFileStore])
    }

    fn with_index(trusted_roots: PathHierarchyIndex) -> Self {
        debug!(
            roots = trusted_roots.roots().len(),
            "created file system mirror"
        );
        Self {
            tables: SnapshotTables::new(trusted_roots),
            invalidations: AtomicU64::new(0),
        }
    }

    /// Returns `true` if `path` lies under a trusted cache-store root.
    pub fn is_trusted(&self, path: &AbsPath) -> bool {
        self.partition_of(path) == Partition::Trusted
    }

    /// Classifies `path`.
    pub fn partition_of(&self, path: &AbsPath) -> Partition {
        self.tables.partition_of(path)
    }

    /// The trusted roots, with nested roots folded into their ancestors.
    pub fn trusted_roots(&self) -> Vec<AbsPath> {
        self.tables.trusted_roots().roots()
    }

    /// Current entry counts and invalidation count.
    pub fn stats(&self) -> MirrorStats {
        MirrorStats {
            tables: self.tables.stats(),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }

    /// Drops every ordinary snapshot.
    pub(crate) fn invalidate_ordinary(&self) -> Discarded {
        let discarded = self.tables.clear_ordinary();
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        discarded
    }
}

impl FileSystemMirror for DefaultFileSystemMirror {
    fn get_file(&self, path: &AbsPath) -> Option<FileSnapshot> {
        self.tables.get_file(path)
    }

    fn put_file(&self, file: FileSnapshot) {
        self.tables.put_file(file);
    }

    fn get_content(&self, path: &AbsPath) -> Option<ContentSnapshot> {
        self.tables.get_content(path)
    }

    fn put_content(&self, path: AbsPath, content: ContentSnapshot) {
        self.tables.put_content(path, content);
    }

    fn get_directory_tree(
        &self,
        path: &AbsPath,
        patterns: &PatternSet,
    ) -> Option<Arc<FileTreeSnapshot>> {
        self.tables.get_directory_tree(path, patterns)
    }

    fn put_directory(&self, tree: Arc<FileTreeSnapshot>, patterns: &PatternSet) {
        self.tables.put_directory(tree, patterns);
    }
}

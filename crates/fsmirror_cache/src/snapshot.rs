//! Immutable snapshot values handed to the mirror by the file-system prober.
//!
//! The mirror never inspects these beyond reading their path; they are built
//! by whoever stats, lists and hashes the file system.

use fsmirror_common::{AbsPath, ContentHash, ContentHasher};
use serde::{Deserialize, Serialize};

/// The kind of entry found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    /// A regular file.
    RegularFile,
    /// A directory.
    Directory,
    /// Nothing exists at the path.
    Missing,
}

/// Identity of the content found at a path, independent of file metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentSnapshot {
    /// Nothing exists at the path.
    Missing,
    /// A directory. Its listing is captured by a [`FileTreeSnapshot`].
    Directory,
    /// A regular file with the given content hash.
    File(ContentHash),
}

impl ContentSnapshot {
    /// Returns the kind of entry this content belongs to.
    pub fn file_type(&self) -> FileType {
        match self {
            ContentSnapshot::Missing => FileType::Missing,
            ContentSnapshot::Directory => FileType::Directory,
            ContentSnapshot::File(_) => FileType::RegularFile,
        }
    }

    fn feed(&self, hasher: &mut ContentHasher) {
        match self {
            ContentSnapshot::Missing => hasher.update(&[0]),
            ContentSnapshot::Directory => hasher.update(&[1]),
            ContentSnapshot::File(hash) => {
                hasher.update(&[2]);
                hasher.update_hash(*hash);
            }
        }
    }
}

/// Known details of a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSnapshot {
    path: AbsPath,
    content: ContentSnapshot,
}

impl FileSnapshot {
    /// Creates a snapshot of `path` with the given content.
    pub fn new(path: AbsPath, content: ContentSnapshot) -> Self {
        Self { path, content }
    }

    /// Snapshot of a regular file with the given content hash.
    pub fn regular_file(path: AbsPath, hash: ContentHash) -> Self {
        Self::new(path, ContentSnapshot::File(hash))
    }

    /// Snapshot of a directory.
    pub fn directory(path: AbsPath) -> Self {
        Self::new(path, ContentSnapshot::Directory)
    }

    /// Snapshot of a path where nothing exists.
    pub fn missing(path: AbsPath) -> Self {
        Self::new(path, ContentSnapshot::Missing)
    }

    /// The snapshotted path.
    pub fn path(&self) -> &AbsPath {
        &self.path
    }

    /// The content identity at the path.
    pub fn content(&self) -> ContentSnapshot {
        self.content
    }

    /// The kind of entry at the path.
    pub fn file_type(&self) -> FileType {
        self.content.file_type()
    }
}

/// Recursive listing of a directory, as produced under some traversal filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeSnapshot {
    path: AbsPath,
    descendants: Vec<FileSnapshot>,
}

impl FileTreeSnapshot {
    /// Creates a tree snapshot rooted at `path`. Descendants are kept in the
    /// order the prober visited them.
    pub fn new(path: AbsPath, descendants: Vec<FileSnapshot>) -> Self {
        Self { path, descendants }
    }

    /// The root directory of the tree.
    pub fn path(&self) -> &AbsPath {
        &self.path
    }

    /// Every entry found below the root.
    pub fn descendants(&self) -> &[FileSnapshot] {
        &self.descendants
    }

    /// Number of entries below the root.
    pub fn len(&self) -> usize {
        self.descendants.len()
    }

    /// Returns `true` if the directory was empty or everything was filtered out.
    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }

    /// Hash over the path relative to the root and the content of every
    /// descendant, in listing order. The same listing under two different
    /// roots has the same fingerprint.
    pub fn fingerprint(&self) -> ContentHash {
        let depth = self.path.segments().count();
        let mut hasher = ContentHasher::new();
        for entry in &self.descendants {
            for segment in entry.path.segments().skip(depth) {
                hasher.update(segment.as_bytes());
                hasher.update(b"/");
            }
            hasher.update(&[0]);
            entry.content.feed(&mut hasher);
        }
        hasher.finish()
    }
}

//! In-process cache of file-system snapshots for incremental builds.
//!
//! The [`DefaultFileSystemMirror`] remembers file snapshots, directory-tree
//! listings and content hashes by absolute path so that the build engine does
//! not stat and hash the same files on every check. Paths under a trusted
//! cache store (content-addressed and append-only) are kept for the whole
//! process; all other entries are thrown away whenever a task is about to
//! generate outputs.
//!
//! ```
//! use std::sync::Arc;
//! use fsmirror_cache::{
//!     DefaultFileSystemMirror, FileSnapshot, FileSystemMirror, TaskOutputsGenerationListener,
//! };
//! use fsmirror_common::{AbsPath, ContentHash};
//!
//! let jars = AbsPath::new("/home/.cache/jars").unwrap();
//! let mirror = Arc::new(DefaultFileSystemMirror::with_roots(&[jars]));
//!
//! let jar = AbsPath::new("/home/.cache/jars/a.jar").unwrap();
//! let source = AbsPath::new("/src/Main.java").unwrap();
//! mirror.put_file(FileSnapshot::regular_file(jar.clone(), ContentHash::from_bytes(b"a")));
//! mirror.put_file(FileSnapshot::regular_file(source.clone(), ContentHash::from_bytes(b"b")));
//!
//! mirror.before_task_outputs_generated();
//!
//! assert!(mirror.get_file(&jar).is_some());
//! assert!(mirror.get_file(&source).is_none());
//! ```

#![warn(missing_docs)]

pub mod filter;
pub mod hierarchy;
pub mod lifecycle;
pub mod mirror;
pub mod snapshot;
pub mod store;
pub mod tables;
pub mod tree_key;

pub use filter::PatternSet;
pub use hierarchy::PathHierarchyIndex;
pub use lifecycle::{LifecycleState, RootBuildLifecycleListener, TaskOutputsGenerationListener};
pub use mirror::{DefaultFileSystemMirror, FileSystemMirror, MirrorStats};
pub use snapshot::{ContentSnapshot, FileSnapshot, FileTreeSnapshot, FileType};
pub use store::CachedFileStore;
pub use tables::{Discarded, Partition, SnapshotTables, TableStats};
pub use tree_key::TreeKey;

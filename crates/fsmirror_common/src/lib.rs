//! Shared foundational types used across the fsmirror crates.
//!
//! This crate provides validated absolute paths, which every cache table is
//! keyed by, and XXH3 content hashing used as the identity of file content.

#![warn(missing_docs)]

pub mod hash;
pub mod path;

pub use hash::{ContentHash, ContentHasher};
pub use path::{AbsPath, PathError};

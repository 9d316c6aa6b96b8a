//! Parsing and validation of `fsmirror.toml` configuration files.
//!
//! The configuration names the cache stores whose directories are
//! content-addressed and append-only for the lifetime of a build process.
//! Snapshots under those roots survive task-output invalidation.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::{MirrorConfig, StoreConfig};

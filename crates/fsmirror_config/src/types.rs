//! Configuration types deserialized from `fsmirror.toml`.

use fsmirror_common::AbsPath;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level configuration parsed from `fsmirror.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct MirrorConfig {
    /// Named cache stores, e.g. `jars` or `transforms`.
    #[serde(default)]
    pub stores: BTreeMap<String, StoreConfig>,
}

impl MirrorConfig {
    /// Returns the roots of every configured store, in store-name order.
    pub fn all_roots(&self) -> Vec<AbsPath> {
        self.stores
            .values()
            .flat_map(|store| store.roots.iter().cloned())
            .collect()
    }
}

/// A cache store whose directories hold immutable, content-addressed files.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Absolute directory roots owned by the store.
    #[serde(default)]
    pub roots: Vec<AbsPath>,
}

//! Sources of trusted cache-store roots.

use fsmirror_common::AbsPath;
use fsmirror_config::{MirrorConfig, StoreConfig};

/// A store of immutable, content-addressed files, such as a cache of
/// downloaded jars. Everything under its roots is append-only for the
/// lifetime of the process.
pub trait CachedFileStore {
    /// The directories owned by the store.
    fn file_store_roots(&self) -> Vec<AbsPath>;
}

impl CachedFileStore for StoreConfig {
    fn file_store_roots(&self) -> Vec<AbsPath> {
        self.roots.clone()
    }
}

impl CachedFileStore for MirrorConfig {
    fn file_store_roots(&self) -> Vec<AbsPath> {
        self.all_roots()
    }
}

impl CachedFileStore for Vec<AbsPath> {
    fn file_store_roots(&self) -> Vec<AbsPath> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_config_exposes_its_roots() {
        let config = fsmirror_config::load_config_from_str(
            "[stores.jars]\nroots = [\"/cache/jars\", \"/opt/jars\"]\n",
        )
        .unwrap();
        let roots = config.stores["jars"].file_store_roots();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].as_str(), "/opt/jars");
        assert_eq!(config.file_store_roots(), roots);
    }

    #[test]
    fn plain_root_list() {
        let roots = vec![AbsPath::new("/cache").unwrap()];
        assert_eq!(roots.file_store_roots(), roots);
    }
}

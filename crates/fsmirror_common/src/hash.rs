//! Content hashing for file snapshots and directory listings.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::Xxh3;

/// A 128-bit content hash computed using XXH3.
///
/// Two files with the same `ContentHash` are assumed to have identical content.
/// The build engine compares these to decide whether a file changed between
/// two probes of the file system.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Returns the raw little-endian hash bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.as_bytes();
        write!(f, "ContentHash({:02x}{:02x}..)", bytes[0], bytes[1])
    }
}

/// Streaming XXH3-128 hasher for values assembled from several parts.
///
/// Feeding the same parts in a different order yields a different hash.
pub struct ContentHasher {
    state: Xxh3,
}

impl ContentHasher {
    /// Creates a hasher with no input.
    pub fn new() -> Self {
        Self { state: Xxh3::new() }
    }

    /// Feeds raw bytes into the hash.
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    /// Feeds a previously computed hash into this one.
    pub fn update_hash(&mut self, hash: ContentHash) {
        self.state.update(hash.as_bytes());
    }

    /// Returns the hash of everything fed so far.
    pub fn finish(&self) -> ContentHash {
        ContentHash(self.state.digest128().to_le_bytes())
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = ContentHash::from_bytes(b"class Main {}");
        let b = ContentHash::from_bytes(b"class Main {}");
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let a = ContentHash::from_bytes(b"a.jar");
        let b = ContentHash::from_bytes(b"b.jar");
        assert_ne!(a, b);
    }

    #[test]
    fn as_bytes_matches_xxh3() {
        let h = ContentHash::from_bytes(b"bytes");
        let expected = xxhash_rust::xxh3::xxh3_128(b"bytes").to_le_bytes();
        assert_eq!(h.as_bytes(), &expected);
    }

    #[test]
    fn display_format() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h}");
        assert_eq!(s.len(), 32, "Display should be 32 hex chars");
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_abbreviated() {
        let h = ContentHash::from_bytes(b"test");
        let s = format!("{h:?}");
        assert!(s.starts_with("ContentHash("));
        assert!(s.ends_with(")"));
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut hasher = ContentHasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finish(), ContentHash::from_bytes(b"hello world"));
    }

    #[test]
    fn streaming_is_order_sensitive() {
        let a = ContentHash::from_bytes(b"a");
        let b = ContentHash::from_bytes(b"b");

        let mut ab = ContentHasher::new();
        ab.update_hash(a);
        ab.update_hash(b);

        let mut ba = ContentHasher::new();
        ba.update_hash(b);
        ba.update_hash(a);

        assert_ne!(ab.finish(), ba.finish());
    }

    #[test]
    fn serde_roundtrip() {
        let h = ContentHash::from_bytes(b"serde test");
        let json = serde_json::to_string(&h).unwrap();
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}

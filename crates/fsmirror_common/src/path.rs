//! Absolute file-system paths used as cache keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Errors produced when a string cannot be used as an [`AbsPath`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path string was empty.
    #[error("path is empty")]
    Empty,

    /// The path string was relative.
    #[error("path '{0}' is not absolute")]
    NotAbsolute(String),
}

/// An absolute file-system path.
///
/// The text is shared, so cloning an `AbsPath` is a reference count bump.
/// Equality, hashing and ordering are by string value. Case folding and
/// `.`/`..` normalization are left to whoever probes the file system; two
/// spellings of the same file are two different keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AbsPath(Arc<str>);

impl AbsPath {
    /// Validates `path` and wraps it.
    ///
    /// Accepts Unix-style (`/usr/lib`), UNC-style (`\\server\share`) and
    /// drive-letter (`C:\src`, `C:/src`) paths on every platform. Both `/`
    /// and `\` separate components.
    pub fn new(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if !is_absolute(path) {
            return Err(PathError::NotAbsolute(path.to_string()));
        }
        Ok(Self(Arc::from(path)))
    }

    /// Returns the path text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the non-empty components of the path.
    ///
    /// Repeated and trailing separators produce no components, so `/a//b/`
    /// yields `a`, `b`.
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        segments(&self.0)
    }

    /// Returns `true` if `self` equals `ancestor` or lies underneath it,
    /// comparing whole components.
    pub fn starts_with(&self, ancestor: &AbsPath) -> bool {
        let mut own = self.segments();
        ancestor.segments().all(|seg| own.next() == Some(seg))
    }
}

/// Splits a path string into its non-empty components. `/` and `\` are
/// both separators, whatever the host platform.
pub fn segments(path: &str) -> impl Iterator<Item = &str> + '_ {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
}

fn is_absolute(path: &str) -> bool {
    match path.as_bytes() {
        [b'/' | b'\\', ..] => true,
        [drive, b':', b'/' | b'\\', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

impl TryFrom<String> for AbsPath {
    type Error = PathError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::new(&path)
    }
}

impl TryFrom<&str> for AbsPath {
    type Error = PathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<AbsPath> for String {
    fn from(path: AbsPath) -> Self {
        path.0.to_string()
    }
}

impl AsRef<str> for AbsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AbsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AbsPath({:?})", &*self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_unix_path() {
        let path = AbsPath::new("/src/Main.java").unwrap();
        assert_eq!(path.as_str(), "/src/Main.java");
    }

    #[test]
    fn accepts_drive_path() {
        assert!(AbsPath::new("C:\\Users\\dev").is_ok());
        assert!(AbsPath::new("d:/work").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(AbsPath::new(""), Err(PathError::Empty));
    }

    #[test]
    fn rejects_relative() {
        assert_eq!(
            AbsPath::new("src/Main.java"),
            Err(PathError::NotAbsolute("src/Main.java".to_string()))
        );
        assert!(AbsPath::new("C:relative").is_err());
    }

    #[test]
    fn segments_skip_empty_components() {
        let path = AbsPath::new("/a//b/c/").unwrap();
        let segs: Vec<&str> = path.segments().collect();
        assert_eq!(segs, vec!["a", "b", "c"]);
    }

    #[test]
    fn backslash_separates_components() {
        let path = AbsPath::new("C:\\cache\\a.jar").unwrap();
        let segs: Vec<&str> = path.segments().collect();
        assert_eq!(segs, vec!["C:", "cache", "a.jar"]);

        let unc = AbsPath::new("\\\\server\\share/dir").unwrap();
        assert_eq!(unc.segments().collect::<Vec<_>>(), vec!["server", "share", "dir"]);
    }

    #[test]
    fn drive_paths_nest_under_drive_roots() {
        let root = AbsPath::new("C:\\cache").unwrap();
        assert!(AbsPath::new("C:\\cache\\a.jar").unwrap().starts_with(&root));
        assert!(AbsPath::new("C:/cache/a.jar").unwrap().starts_with(&root));
        assert!(!AbsPath::new("C:\\cacheX").unwrap().starts_with(&root));
    }

    #[test]
    fn starts_with_is_component_aware() {
        let root = AbsPath::new("/a/b").unwrap();
        assert!(AbsPath::new("/a/b").unwrap().starts_with(&root));
        assert!(AbsPath::new("/a/b/c").unwrap().starts_with(&root));
        assert!(!AbsPath::new("/a/bc").unwrap().starts_with(&root));
        assert!(!AbsPath::new("/a").unwrap().starts_with(&root));
    }

    #[test]
    fn clones_share_text() {
        let a = AbsPath::new("/cache/store").unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        assert!(std::ptr::eq(a.as_str(), b.as_str()));
    }

    #[test]
    fn display_and_debug() {
        let path = AbsPath::new("/x").unwrap();
        assert_eq!(format!("{path}"), "/x");
        assert_eq!(format!("{path:?}"), "AbsPath(\"/x\")");
    }

    #[test]
    fn serde_roundtrip() {
        let path = AbsPath::new("/home/.cache/jars").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"/home/.cache/jars\"");
        let back: AbsPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }

    #[test]
    fn serde_rejects_relative() {
        let result: Result<AbsPath, _> = serde_json::from_str("\"relative/path\"");
        assert!(result.is_err());
    }
}

//! Membership index for trusted directory hierarchies.
//!
//! A [`PathHierarchyIndex`] answers "is this path equal to or underneath one
//! of the roots?" by walking a trie of path components, so the cost of a
//! lookup depends on the depth of the path and not on the number of roots.
//! The index is persistent: [`PathHierarchyIndex::plus`] returns a new index
//! sharing every untouched subtree with the receiver.

use std::collections::BTreeMap;
use std::sync::Arc;

use fsmirror_common::path::segments;
use fsmirror_common::AbsPath;

#[derive(Debug, Default)]
struct Node {
    /// Set when the path leading to this node is a root. A root node never
    /// has children, since everything below it is already covered.
    root: Option<AbsPath>,
    children: BTreeMap<Box<str>, Arc<Node>>,
}

impl Node {
    fn leaf(root: &AbsPath) -> Self {
        Self {
            root: Some(root.clone()),
            children: BTreeMap::new(),
        }
    }

    /// Builds the chain of nodes for `rest`, ending in a root leaf.
    fn chain(rest: &[&str], root: &AbsPath) -> Arc<Node> {
        match rest.split_first() {
            None => Arc::new(Node::leaf(root)),
            Some((first, tail)) => {
                let mut children = BTreeMap::new();
                children.insert(Box::from(*first), Node::chain(tail, root));
                Arc::new(Node {
                    root: None,
                    children,
                })
            }
        }
    }

    /// Returns a copy of `self` with `rest` added, or `None` if an existing
    /// root already covers it.
    fn insert(&self, rest: &[&str], root: &AbsPath) -> Option<Arc<Node>> {
        if self.root.is_some() {
            return None;
        }
        let Some((first, tail)) = rest.split_first() else {
            // New root subsumes everything below this point.
            return Some(Arc::new(Node::leaf(root)));
        };
        let child = match self.children.get(*first) {
            Some(existing) => existing.insert(tail, root)?,
            None => Node::chain(tail, root),
        };
        let mut children = self.children.clone();
        children.insert(Box::from(*first), child);
        Some(Arc::new(Node {
            root: None,
            children,
        }))
    }

    fn collect_roots(&self, out: &mut Vec<AbsPath>) {
        if let Some(root) = &self.root {
            out.push(root.clone());
        }
        for child in self.children.values() {
            child.collect_roots(out);
        }
    }
}

/// An immutable set of directory hierarchies.
///
/// Cloning is cheap; the trie is shared.
#[derive(Debug, Clone, Default)]
pub struct PathHierarchyIndex {
    top: Arc<Node>,
}

impl PathHierarchyIndex {
    /// Creates an index containing no paths.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an index containing the hierarchies under all of `roots`.
    pub fn of<'a>(roots: impl IntoIterator<Item = &'a AbsPath>) -> Self {
        roots
            .into_iter()
            .fold(Self::empty(), |index, root| index.plus(root))
    }

    /// Returns an index that additionally contains `root` and everything
    /// underneath it. The receiver is left unchanged.
    pub fn plus(&self, root: &AbsPath) -> Self {
        let segs: Vec<&str> = root.segments().collect();
        match self.top.insert(&segs, root) {
            Some(top) => Self { top },
            None => self.clone(),
        }
    }

    /// Returns `true` if `path` equals a root or lies underneath one.
    ///
    /// Components are compared whole: with root `/a/b`, the path `/a/bc` is
    /// not contained.
    pub fn contains(&self, path: &AbsPath) -> bool {
        self.contains_str(path.as_str())
    }

    /// Same as [`contains`](Self::contains) for an unvalidated path string.
    pub fn contains_str(&self, path: &str) -> bool {
        let mut node = &self.top;
        if node.root.is_some() {
            return true;
        }
        for segment in segments(path) {
            match node.children.get(segment) {
                Some(child) if child.root.is_some() => return true,
                Some(child) => node = child,
                None => return false,
            }
        }
        false
    }

    /// Returns `true` if the index contains no paths.
    pub fn is_empty(&self) -> bool {
        self.top.root.is_none() && self.top.children.is_empty()
    }

    /// The roots that make up the index, with roots nested under another
    /// root left out. Sorted by component.
    pub fn roots(&self) -> Vec<AbsPath> {
        let mut out = Vec::new();
        self.top.collect_roots(&mut out);
        out
    }
}

// src/tree.rs

//! Dependency trees and their construction
//!
//! A [`DependencyTree`] maps each direct requirement of a package to that
//! requirement's own tree, in the order the registry declared them. A
//! [`Forest`] holds one tree per requested root.
//!
//! [`TreeBuilder`] walks the registry with an explicit work stack instead of
//! recursion. Every frame on the stack is one package on the current
//! ancestry path, and a set of the same names makes cycle detection a
//! single lookup. Trees also drop iteratively, so depth is bounded by memory
//! rather than by the call stack.

use crate::acquire::Acquirer;
use crate::error::{Error, Result};
use crate::flatten::{self, OccurrenceCounts, unique_in_order};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ordered mapping from package name to that package's dependency tree
///
/// Keys are unique and keep insertion order. An empty tree is a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyTree {
    entries: Vec<(String, DependencyTree)>,
    seen: HashSet<String>,
}

impl DependencyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a child subtree, keeping the first insertion of a name
    ///
    /// Returns `false` and leaves the tree untouched when `name` is already
    /// a key.
    pub fn insert(&mut self, name: impl Into<String>, subtree: DependencyTree) -> bool {
        let name = name.into();
        if !self.seen.insert(name.clone()) {
            return false;
        }
        self.entries.push((name, subtree));
        true
    }

    pub fn get(&self, name: &str) -> Option<&DependencyTree> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, subtree)| subtree)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct child names in insertion order
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Direct children in insertion order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &DependencyTree)> {
        self.entries
            .iter()
            .map(|(name, subtree)| (name.as_str(), subtree))
    }

    /// Dependency-first, duplicate-free listing of every name below this node
    pub fn flatten(&self) -> Vec<String> {
        flatten::flatten(self)
    }

    /// How many positions each name occupies as a direct child, tree-wide
    pub fn count_occurrences(&self) -> OccurrenceCounts {
        flatten::count_occurrences(self)
    }
}

impl Drop for DependencyTree {
    fn drop(&mut self) {
        // Detach grandchildren before each child drops, so nothing recurses
        let mut pending = std::mem::take(&mut self.entries);
        while let Some((_, mut subtree)) = pending.pop() {
            pending.append(&mut subtree.entries);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, DependencyTree)> for DependencyTree {
    fn from_iter<I: IntoIterator<Item = (S, DependencyTree)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (name, subtree) in iter {
            tree.insert(name, subtree);
        }
        tree
    }
}

impl Serialize for DependencyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, subtree) in self.iter() {
            map.serialize_entry(name, subtree)?;
        }
        map.end()
    }
}

/// One dependency tree per requested root, in the order roots were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: DependencyTree,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root's tree; a root that is already present is kept as is
    pub fn insert(&mut self, root: impl Into<String>, tree: DependencyTree) -> bool {
        self.roots.insert(root, tree)
    }

    pub fn get(&self, root: &str) -> Option<&DependencyTree> {
        self.roots.get(root)
    }

    pub fn roots(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.roots.keys()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &DependencyTree)> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Flatten every root in order and drop repeats across roots
    pub fn flatten(&self) -> Vec<String> {
        flatten::flatten_forest(self)
    }

    /// Occurrence counts over all trees, each root counting once
    pub fn count_occurrences(&self) -> OccurrenceCounts {
        flatten::count_forest_occurrences(self)
    }
}

impl<S: Into<String>> FromIterator<(S, DependencyTree)> for Forest {
    fn from_iter<I: IntoIterator<Item = (S, DependencyTree)>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Forest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.roots.serialize(serializer)
    }
}

/// A package on the current ancestry path with the requirements still to visit
struct Frame {
    name: String,
    pending: std::vec::IntoIter<String>,
    children: DependencyTree,
}

/// Builds dependency trees by repeatedly asking the [`Acquirer`]
pub struct TreeBuilder<'a> {
    acquirer: Acquirer<'a>,
    memo: Option<HashMap<String, DependencyTree>>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder that resolves every edge independently
    pub fn new(acquirer: Acquirer<'a>) -> Self {
        Self {
            acquirer,
            memo: None,
        }
    }

    /// Resolve each package at most once and reuse its finished subtree
    ///
    /// Without this, a package reached through several parents is looked up
    /// (and possibly installed) once per parent.
    pub fn with_memo(mut self) -> Self {
        self.memo = Some(HashMap::new());
        self
    }

    /// Build the dependency tree below `name`
    ///
    /// The returned tree holds `name`'s requirements, not `name` itself.
    pub fn build(&mut self, name: &str) -> Result<DependencyTree> {
        if let Some(tree) = self.memoized(name) {
            return Ok(tree);
        }

        let mut current = self.open(name)?;
        let mut ancestors: Vec<Frame> = Vec::new();
        let mut on_path = HashSet::from([current.name.clone()]);

        loop {
            match current.pending.next() {
                Some(dep) => {
                    if on_path.contains(&dep) {
                        let path = ancestors
                            .iter()
                            .map(|f| f.name.clone())
                            .chain([current.name, dep])
                            .collect();
                        return Err(Error::CyclicDependency { path });
                    }

                    if let Some(tree) = self.memoized(&dep) {
                        current.children.insert(dep, tree);
                        continue;
                    }

                    let child = self.open(&dep)?;
                    on_path.insert(dep);
                    ancestors.push(std::mem::replace(&mut current, child));
                }
                None => {
                    self.remember(&current.name, &current.children);
                    on_path.remove(&current.name);

                    let Some(mut parent) = ancestors.pop() else {
                        return Ok(current.children);
                    };
                    parent.children.insert(current.name, current.children);
                    current = parent;
                }
            }
        }
    }

    /// Build one tree per root, stopping at the first root that fails
    pub fn build_forest<I, S>(&mut self, roots: I) -> Result<Forest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut forest = Forest::new();

        for root in roots {
            let root = root.as_ref();
            if forest.get(root).is_some() {
                debug!("Root {} requested twice, keeping the first", root);
                continue;
            }
            let tree = self.build(root)?;
            forest.insert(root, tree);
        }

        Ok(forest)
    }

    fn open(&self, name: &str) -> Result<Frame> {
        debug!("Resolving dependencies of {}", name);
        let requires = self.acquirer.resolve_direct_dependencies(name)?;

        let declared = requires.len();
        let unique = unique_in_order(requires);
        if unique.len() != declared {
            debug!(
                "{} declares {} duplicate requirement(s), keeping first occurrences",
                name,
                declared - unique.len()
            );
        }

        Ok(Frame {
            name: name.to_string(),
            pending: unique.into_iter(),
            children: DependencyTree::new(),
        })
    }

    fn memoized(&self, name: &str) -> Option<DependencyTree> {
        self.memo.as_ref()?.get(name).cloned()
    }

    fn remember(&mut self, name: &str, tree: &DependencyTree) {
        if let Some(memo) = self.memo.as_mut() {
            memo.insert(name.to_string(), tree.clone());
        }
    }
}

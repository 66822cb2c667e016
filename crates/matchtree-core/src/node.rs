//! Trie vertices.
//!
//! Nodes are shared between tree handles through `Arc`. A handle may only
//! write to a node carrying its own [`Version`]; everything else is copied
//! first (path copying), so a node reachable from another handle is never
//! changed underneath it.

use crate::version::Version;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// A vertex of the match tree.
#[derive(Debug, Clone)]
pub struct Node<V> {
    /// Edge label: a literal token, `*` or `#`.
    token: String,
    /// Dot-joined tokens from the root to this node.
    path: String,
    /// Number of tokens in `path`; zero only for the root.
    depth: usize,
    /// Children keyed by their token.
    children: HashMap<String, Arc<Node<V>>>,
    /// Values registered exactly at this path, in insertion order.
    values: Vec<V>,
    /// Tag of the handle that owns this node.
    version: Version,
}

impl<V> Node<V> {
    /// Create an empty root node.
    pub(crate) fn root(version: Version) -> Self {
        Self::new(String::new(), String::new(), 0, version)
    }

    fn new(token: String, path: String, depth: usize, version: Version) -> Self {
        Self {
            token,
            path,
            depth,
            children: HashMap::new(),
            values: Vec::new(),
            version,
        }
    }

    /// Get the edge token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the canonical path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the number of tokens in the path.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the values registered at this path.
    #[must_use]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Get the child reached through `token`.
    #[must_use]
    pub fn child(&self, token: &str) -> Option<&Node<V>> {
        self.children.get(token).map(Arc::as_ref)
    }

    /// Iterate over the children in no particular order.
    pub fn children(&self) -> impl Iterator<Item = &Node<V>> {
        self.children.values().map(Arc::as_ref)
    }

    /// Children sorted by token, for deterministic traversal.
    pub(crate) fn sorted_children(&self) -> Vec<&Node<V>> {
        let mut children: Vec<_> = self.children().collect();
        children.sort_unstable_by(|a, b| a.token.cmp(&b.token));
        children
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Check if the node has neither children nor values.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.children.is_empty() && self.values.is_empty()
    }

    pub(crate) fn version(&self) -> Version {
        self.version
    }

    /// Get the child slot for `token`, creating an empty child if missing.
    ///
    /// Returns the slot and whether it was created.
    pub(crate) fn child_entry(
        &mut self,
        token: &str,
        version: Version,
    ) -> (&mut Arc<Node<V>>, bool) {
        match self.children.entry(token.to_owned()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => {
                let path = if self.depth == 0 {
                    token.to_owned()
                } else {
                    format!("{}.{}", self.path, token)
                };
                let child = Node::new(token.to_owned(), path, self.depth + 1, version);
                (entry.insert(Arc::new(child)), true)
            }
        }
    }

    pub(crate) fn child_slot(&mut self, token: &str) -> Option<&mut Arc<Node<V>>> {
        self.children.get_mut(token)
    }

    pub(crate) fn remove_child(&mut self, token: &str) -> Option<Arc<Node<V>>> {
        self.children.remove(token)
    }

    pub(crate) fn push_value(&mut self, value: V) {
        self.values.push(value);
    }
}

impl<V: PartialEq> Node<V> {
    /// Remove the first value equal to `value`.
    ///
    /// Returns `true` if a value was removed.
    pub(crate) fn remove_value(&mut self, value: &V) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<V: Clone> Node<V> {
    /// Make the node in `slot` writable under `version`.
    ///
    /// A node tagged with another version is replaced by a shallow copy
    /// stamped with `version`: the child map is copied but the children
    /// themselves stay shared.
    pub(crate) fn promote(slot: &mut Arc<Node<V>>, version: Version) -> &mut Node<V> {
        if slot.version() != version {
            let mut copy = Node::clone(&**slot);
            copy.version = version;
            *slot = Arc::new(copy);
        }
        // Only ever clones if a node with the current tag is still shared.
        Arc::make_mut(slot)
    }
}

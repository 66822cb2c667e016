//! The match tree handle.
//!
//! A [`MatchTree`] owns a root node and a version tag. Cloning a tree is
//! O(1): both handles keep pointing at the same nodes and each gets a fresh
//! tag, so the first write on either side copies only the nodes along the
//! path it touches.
//!
//! The intended pattern for concurrent use is to clone, mutate the clone
//! privately, then publish it (for example through an atomic pointer swap
//! owned by the caller). Readers holding the previous handle keep a stable
//! snapshot.

use crate::config::MatchTreeConfig;
use crate::error::TopicResult;
use crate::matcher::{collect_all, collect_unique, Matcher};
use crate::node::Node;
use crate::topic::{normalized_tokens, validate_pattern};
use crate::version::{Version, VersionCell};
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, trace};

/// Match tree statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeStats {
    /// Number of nodes, excluding the root.
    pub node_count: usize,
    /// Number of distinct paths holding at least one value.
    pub pattern_count: usize,
    /// Total number of registered values.
    pub value_count: usize,
}

/// A wildcard topic index with copy-on-write snapshots.
///
/// # Example
///
/// ```rust
/// use tenvis_matchtree_core::MatchTree;
///
/// let mut tree = MatchTree::new();
/// tree.insert("orders.*.created", "audit");
/// tree.insert("orders.#", "archive");
///
/// assert_eq!(tree.matches("orders.eu.created"), vec!["audit", "archive"]);
///
/// let snapshot = tree.clone();
/// tree.remove("orders.#", &"archive");
/// assert_eq!(tree.matches("orders.eu.created"), vec!["audit"]);
/// assert_eq!(snapshot.matches("orders.eu.created"), vec!["audit", "archive"]);
/// ```
pub struct MatchTree<V> {
    /// Tag of the nodes this handle may write in place.
    version: VersionCell,
    /// Root node; token and path are empty.
    root: Arc<Node<V>>,
    /// Total number of registered values.
    len: usize,
    /// Limits for checked registration.
    config: MatchTreeConfig,
}

impl<V> MatchTree<V> {
    /// Create an empty tree with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MatchTreeConfig::default())
    }

    /// Create an empty tree with custom configuration.
    #[must_use]
    pub fn with_config(config: MatchTreeConfig) -> Self {
        let version = Version::next();
        Self {
            version: VersionCell::new(version),
            root: Arc::new(Node::root(version)),
            len: 0,
            config,
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MatchTreeConfig {
        &self.config
    }

    /// Get the root node.
    #[must_use]
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Total number of registered values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no values are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the values registered at exactly `pattern`.
    ///
    /// This is a literal lookup: wildcards in `pattern` only select the
    /// wildcard edges of the same name.
    #[must_use]
    pub fn get(&self, pattern: &str) -> Option<&[V]> {
        let mut node: &Node<V> = &self.root;
        for token in normalized_tokens(pattern) {
            node = node.child(token)?;
        }
        let values = node.values();
        (!values.is_empty()).then_some(values)
    }

    /// Visit every matched node once, in traversal order.
    ///
    /// The visitor receives the matched path and the values registered there.
    pub fn for_each_match<F>(&self, key: &str, mut visitor: F)
    where
        F: FnMut(&str, &[V]),
    {
        let tokens = normalized_tokens(key);
        for node in Matcher::new().run(&*self.root, &tokens) {
            visitor(node.path(), node.values());
        }
    }

    /// Visit every path holding values, depth first with children in token
    /// order.
    ///
    /// Returns `ControlFlow::Break` if the visitor stopped the walk.
    pub fn walk<F>(&self, mut visitor: F) -> ControlFlow<()>
    where
        F: FnMut(&str, &[V]) -> ControlFlow<()>,
    {
        walk_node(&*self.root, &mut visitor)
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack: Vec<&Node<V>> = self.root.children().collect();
        while let Some(node) = stack.pop() {
            stats.node_count += 1;
            if !node.values().is_empty() {
                stats.pattern_count += 1;
                stats.value_count += node.values().len();
            }
            stack.extend(node.children());
        }
        stats
    }

    fn current_version(&self) -> Version {
        self.version.get()
    }
}

impl<V: Clone> MatchTree<V> {
    /// Register `value` under `pattern`.
    ///
    /// Missing nodes are created; nodes shared with another handle are
    /// copied first. The same value may be registered more than once.
    pub fn insert(&mut self, pattern: &str, value: V) {
        let version = self.current_version();
        let mut created = 0usize;

        let mut node = Node::promote(&mut self.root, version);
        for token in normalized_tokens(pattern) {
            let (slot, is_new) = node.child_entry(token, version);
            created += usize::from(is_new);
            node = Node::promote(slot, version);
        }
        node.push_value(value);
        self.len += 1;

        if created > 0 {
            debug!(pattern = %pattern, created, "Created nodes");
        }
        trace!(pattern = %pattern, version = %version, "Inserted value");
    }

    /// Register `value` under `pattern` after validating the pattern against
    /// the tree's configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern violates the configured limits. The
    /// tree is left unchanged in that case.
    pub fn try_insert(&mut self, pattern: &str, value: V) -> TopicResult<()> {
        validate_pattern(pattern, &self.config)?;
        self.insert(pattern, value);
        Ok(())
    }

    /// Get every value whose pattern matches `key`.
    ///
    /// Values are ordered by traversal (literal edge, then `*`, then `#` at
    /// each level) and keep their insertion order within a path. A value
    /// registered twice at the same path is returned twice.
    #[must_use]
    pub fn matches(&self, key: &str) -> Vec<V> {
        let tokens = normalized_tokens(key);
        let nodes = Matcher::new().run(&*self.root, &tokens);
        let values = collect_all(&nodes);
        trace!(key = %key, paths = nodes.len(), values = values.len(), "Matched");
        values
    }

    /// Get the values of every matching path, each path contributing once.
    ///
    /// Values are ordered by path.
    #[must_use]
    pub fn matches_uniq(&self, key: &str) -> Vec<V> {
        let tokens = normalized_tokens(key);
        let nodes = Matcher::new().run(&*self.root, &tokens);
        let values = collect_unique(&nodes);
        trace!(key = %key, paths = nodes.len(), values = values.len(), "Matched unique");
        values
    }

    /// Get every registration as `(path, values)`, in walk order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Vec<V>)> {
        let mut entries = Vec::new();
        let _ = self.walk(|path, values| {
            entries.push((path.to_string(), values.to_vec()));
            ControlFlow::Continue(())
        });
        entries
    }
}

impl<V: Clone + PartialEq> MatchTree<V> {
    /// Check if `value` is registered at exactly `pattern`.
    #[must_use]
    pub fn contains(&self, pattern: &str, value: &V) -> bool {
        self.get(pattern).is_some_and(|values| values.contains(value))
    }

    /// Remove the first registration of `value` at exactly `pattern`.
    ///
    /// Does nothing if the pattern or the value is absent. Nodes left with
    /// neither values nor children are pruned bottom-up.
    pub fn remove(&mut self, pattern: &str, value: &V) {
        if !self.contains(pattern, value) {
            trace!(pattern = %pattern, "Remove of absent value");
            return;
        }

        let version = self.current_version();
        let tokens = normalized_tokens(pattern);
        let mut pruned = 0usize;

        let root = Node::promote(&mut self.root, version);
        if remove_at(root, &tokens, value, version, &mut pruned) {
            self.len -= 1;
        }

        if pruned > 0 {
            debug!(pattern = %pattern, pruned, "Pruned empty nodes");
        }
        trace!(pattern = %pattern, version = %version, "Removed value");
    }
}

/// Remove `value` below `node` along `tokens`, pruning vacant children on
/// the way back up.
fn remove_at<V: Clone + PartialEq>(
    node: &mut Node<V>,
    tokens: &[&str],
    value: &V,
    version: Version,
    pruned: &mut usize,
) -> bool {
    let Some((token, rest)) = tokens.split_first() else {
        return node.remove_value(value);
    };
    let Some(slot) = node.child_slot(token) else {
        return false;
    };

    let child = Node::promote(slot, version);
    let removed = remove_at(child, rest, value, version, pruned);
    if removed && child.is_vacant() {
        node.remove_child(token);
        *pruned += 1;
    }
    removed
}

fn walk_node<V, F>(node: &Node<V>, visitor: &mut F) -> ControlFlow<()>
where
    F: FnMut(&str, &[V]) -> ControlFlow<()>,
{
    if !node.values().is_empty() {
        visitor(node.path(), node.values())?;
    }
    for child in node.sorted_children() {
        walk_node(child, visitor)?;
    }
    ControlFlow::Continue(())
}

impl<V> Default for MatchTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for MatchTree<V> {
    /// Create an independent handle sharing every node with `self`.
    ///
    /// Both handles get fresh tags, so neither may write to the shared nodes
    /// in place afterwards.
    fn clone(&self) -> Self {
        let previous = self.current_version();
        let original = self.version.rotate();
        let version = Version::next();
        debug!(
            previous = %previous,
            original = %original,
            clone = %version,
            "Cloned match tree"
        );
        Self {
            version: VersionCell::new(version),
            root: Arc::clone(&self.root),
            len: self.len,
            config: self.config.clone(),
        }
    }
}

impl<V> fmt::Debug for MatchTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchTree")
            .field("version", &self.current_version())
            .field("len", &self.len)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

//! Wildcard matching over the trie.
//!
//! A key is matched by recursive descent over `(node, remaining tokens)`:
//!
//! - the literal edge and the `*` edge each consume exactly one token;
//! - the `#` edge consumes any number of tokens, zero included, which is
//!   expressed as one descent per possible split of the remaining input;
//! - a node reached with no tokens left is a match if it holds values.
//!
//! Several `#` edges on one path can reach the same node with the same
//! remaining input through different splits. Each `(node, remaining)`
//! state is therefore explored once per query, which keeps the work bounded
//! by `nodes * (key length + 1)` and reports every matching node once.

use crate::node::Node;
use crate::topic::{is_wildcard, MULTI_WILDCARD, SINGLE_WILDCARD};
use std::collections::{BTreeMap, HashSet};

/// A single matching query over one snapshot.
pub(crate) struct Matcher<'a, V> {
    /// States already explored: node address and number of remaining tokens.
    visited: HashSet<(*const Node<V>, usize)>,
    /// Matched nodes in traversal order.
    matched: Vec<&'a Node<V>>,
}

impl<'a, V> Matcher<'a, V> {
    pub(crate) fn new() -> Self {
        Self {
            visited: HashSet::new(),
            matched: Vec::new(),
        }
    }

    /// Run the query from `root` and return the matched nodes.
    ///
    /// Nodes are ordered by traversal: at each step the literal edge first,
    /// then `*`, then `#`.
    pub(crate) fn run(mut self, root: &'a Node<V>, tokens: &[&str]) -> Vec<&'a Node<V>> {
        self.descend(root, tokens);
        self.matched
    }

    fn descend(&mut self, node: &'a Node<V>, tokens: &[&str]) {
        if !self.visited.insert((node as *const Node<V>, tokens.len())) {
            return;
        }

        match tokens.split_first() {
            None if node.values().is_empty() => {}
            None => self.matched.push(node),
            Some((token, rest)) => {
                // Wildcards in a key are reached through the wildcard edges
                // only, so a key token `*` does not visit the `*` edge twice.
                if !is_wildcard(token) {
                    if let Some(child) = node.child(token) {
                        self.descend(child, rest);
                    }
                }
                if let Some(child) = node.child(SINGLE_WILDCARD) {
                    self.descend(child, rest);
                }
            }
        }

        if let Some(child) = node.child(MULTI_WILDCARD) {
            for skip in 0..=tokens.len() {
                self.descend(child, &tokens[skip..]);
            }
        }
    }
}

/// Collect the values of every matched node, in traversal order.
pub(crate) fn collect_all<V: Clone>(nodes: &[&Node<V>]) -> Vec<V> {
    nodes
        .iter()
        .flat_map(|node| node.values().iter().cloned())
        .collect()
}

/// Collect the values of every matched node once per distinct path,
/// ordered by path.
pub(crate) fn collect_unique<V: Clone>(nodes: &[&Node<V>]) -> Vec<V> {
    let by_path: BTreeMap<&str, &[V]> = nodes
        .iter()
        .map(|node| (node.path(), node.values()))
        .collect();

    by_path
        .into_values()
        .flat_map(|values| values.iter().cloned())
        .collect()
}

//! # matchtree-core
//!
//! Wildcard topic index for publish/subscribe routing.
//!
//! Patterns are dot-delimited topics registered with a value. Given a
//! concrete routing key, the tree answers which registered values have a
//! pattern matching it:
//!
//! - a literal token matches itself
//! - `*` matches exactly one token
//! - `#` matches zero or more tokens
//!
//! ## Snapshots
//!
//! Cloning a [`MatchTree`] is O(1). Nodes are shared between handles and
//! copied lazily, one node at a time along the written path, the first time
//! a handle writes to them. A writer can clone, mutate its private handle
//! and publish it while readers keep using the previous snapshot.
//!
//! ```text
//!  before clone            after clone              after clone.insert(..)
//!
//!  tree(v1) ──▶ root       tree(v2)  ──┐            tree(v2)  ──▶ root  ──┐
//!                                      ├──▶ root                          ├──▶ untouched
//!                          clone(v3) ──┘            clone(v3) ──▶ root' ──┘    children
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tenvis_matchtree_core::MatchTree;
//!
//! let mut tree = MatchTree::new();
//! tree.insert("sensors.*.temperature", 1);
//! tree.insert("sensors.#", 2);
//!
//! assert_eq!(tree.matches("sensors.kitchen.temperature"), vec![1, 2]);
//! assert_eq!(tree.matches("sensors"), vec![2]);
//! ```

pub mod config;
pub mod error;
mod matcher;
pub mod node;
pub mod topic;
pub mod tree;
pub mod version;

pub use config::MatchTreeConfig;
pub use error::{TopicError, TopicResult};
pub use node::Node;
pub use tree::{MatchTree, TreeStats};
pub use version::Version;

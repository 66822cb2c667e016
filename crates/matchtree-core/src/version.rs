//! Version tags for copy-on-write ownership.
//!
//! A node may be mutated in place only by the tree handle whose current tag
//! equals the node's tag. Tags carry no content; only equality matters.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide counter so tags are never reused, even across trees.
static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// An opaque ownership tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version(u64);

impl Version {
    /// Mint a tag distinct from every previously minted one.
    #[must_use]
    pub fn next() -> Self {
        Self(VERSION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The current tag of a tree handle.
///
/// Held atomically so that cloning a handle through `&self` can hand the
/// original a fresh tag as well, without giving up `Sync`.
#[derive(Debug)]
pub(crate) struct VersionCell(AtomicU64);

impl VersionCell {
    pub(crate) fn new(version: Version) -> Self {
        Self(AtomicU64::new(version.0))
    }

    pub(crate) fn get(&self) -> Version {
        Version(self.0.load(Ordering::Acquire))
    }

    /// Replace the tag with a freshly minted one and return it.
    pub(crate) fn rotate(&self) -> Version {
        let next = Version::next();
        self.0.store(next.0, Ordering::Release);
        next
    }
}

//! Shared fixtures for the matchtree benchmarks.
//!
//! Tables are generated from a fixed seed so runs are comparable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use tenvis_matchtree_core::MatchTree;

/// Seed used by every generated table.
pub const SEED: u64 = 0x7061_7474_6572_6e73;

/// Generate `count` patterns of `tokens` tokens each.
///
/// Tokens are single hex digits; roughly one in ten is replaced by `#`.
#[must_use]
pub fn random_patterns(count: usize, tokens: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count)
        .map(|_| {
            (0..tokens)
                .map(|_| {
                    if rng.gen_ratio(1, 10) {
                        "#".to_string()
                    } else {
                        format!("{:x}", rng.gen_range(0..16u8))
                    }
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .collect()
}

/// Build a tree registering each pattern with its index.
#[must_use]
pub fn build_tree(patterns: &[String]) -> MatchTree<usize> {
    let mut tree = MatchTree::new();
    for (i, pattern) in patterns.iter().enumerate() {
        tree.insert(pattern, i);
    }
    tree
}

/// Linear scan over one compiled regex per pattern.
///
/// This is the baseline the tree is measured against.
pub struct RegexTable {
    entries: Vec<(Regex, usize)>,
}

impl RegexTable {
    /// Compile every pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern does not compile.
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let entries = patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| pattern_regex(pattern).map(|re| (re, i)))
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    /// Get the values whose pattern matches `key`.
    #[must_use]
    pub fn matches(&self, key: &str) -> Vec<usize> {
        let dotted = format!(".{key}");
        self.entries
            .iter()
            .filter(|(re, _)| re.is_match(&dotted))
            .map(|(_, value)| *value)
            .collect()
    }
}

/// Compile a pattern into a regex over the key prefixed with a dot.
///
/// # Errors
///
/// Returns an error if the resulting expression does not compile.
pub fn pattern_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut expr = String::from("^");
    for token in pattern.split('.') {
        match token {
            "*" => expr.push_str(r"\.[^.]*"),
            "#" => expr.push_str(r"(?:\.[^.]*)*"),
            literal => {
                expr.push_str(r"\.");
                expr.push_str(&regex::escape(literal));
            }
        }
    }
    expr.push('$');
    Regex::new(&expr)
}

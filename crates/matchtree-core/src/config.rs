//! Match tree configuration.
//!
//! The limits here only apply to [`MatchTree::try_insert`]; the unchecked
//! operations accept any pattern.
//!
//! [`MatchTree::try_insert`]: crate::MatchTree::try_insert

use serde::{Deserialize, Serialize};

/// Limits applied to checked pattern registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTreeConfig {
    /// Maximum number of tokens after normalization.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Maximum pattern length in bytes.
    #[serde(default = "default_max_pattern_length")]
    pub max_pattern_length: usize,

    /// Whether empty tokens (`a..b`) are accepted.
    #[serde(default)]
    pub allow_empty_tokens: bool,
}

fn default_max_tokens() -> usize {
    32
}

fn default_max_pattern_length() -> usize {
    256
}

impl Default for MatchTreeConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            max_pattern_length: default_max_pattern_length(),
            allow_empty_tokens: false,
        }
    }
}

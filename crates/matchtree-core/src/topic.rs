//! Topic tokenization for patterns and routing keys.
//!
//! Topics are dot-delimited sequences of tokens. Two tokens are reserved
//! in patterns: `*` matches exactly one token and `#` matches zero or more.

use crate::config::MatchTreeConfig;
use crate::error::{TopicError, TopicResult};

/// Token separator.
pub const SEPARATOR: char = '.';

/// Wildcard matching exactly one token.
pub const SINGLE_WILDCARD: &str = "*";

/// Wildcard matching zero or more tokens.
pub const MULTI_WILDCARD: &str = "#";

/// Check if a token is one of the reserved wildcards.
#[must_use]
pub fn is_wildcard(token: &str) -> bool {
    token == SINGLE_WILDCARD || token == MULTI_WILDCARD
}

/// Split a topic on `.`.
///
/// Empty segments are kept as literal tokens, so `""` yields one empty token
/// and `"a..b"` yields three.
#[must_use]
pub fn tokenize(topic: &str) -> Vec<&str> {
    topic.split(SEPARATOR).collect()
}

/// Collapse runs of consecutive `#` tokens into a single `#`.
///
/// `a.#.#.b` and `a.#.b` match exactly the same keys, but the former would
/// make the matcher try every split of the input between the two wildcards.
pub fn normalize(tokens: &mut Vec<&str>) {
    tokens.dedup_by(|a, b| *a == MULTI_WILDCARD && *b == MULTI_WILDCARD);
}

/// Tokenize and normalize a topic in one step.
#[must_use]
pub fn normalized_tokens(topic: &str) -> Vec<&str> {
    let mut tokens = tokenize(topic);
    normalize(&mut tokens);
    tokens
}

/// Join tokens into a canonical path.
#[must_use]
pub fn join(tokens: &[&str]) -> String {
    tokens.join(".")
}

/// Canonical form of a pattern: tokenized, normalized and re-joined.
#[must_use]
pub fn normalize_pattern(pattern: &str) -> String {
    join(&normalized_tokens(pattern))
}

/// Validate a pattern against configured limits.
///
/// # Errors
///
/// Returns an error if the pattern is empty, too long, has too many tokens,
/// or contains an empty token while those are disallowed.
pub fn validate_pattern(pattern: &str, config: &MatchTreeConfig) -> TopicResult<()> {
    if pattern.is_empty() {
        return Err(TopicError::Empty);
    }
    if pattern.len() > config.max_pattern_length {
        return Err(TopicError::TooLong {
            len: pattern.len(),
            max: config.max_pattern_length,
        });
    }

    let tokens = normalized_tokens(pattern);
    if tokens.len() > config.max_tokens {
        return Err(TopicError::TooManyTokens {
            count: tokens.len(),
            max: config.max_tokens,
        });
    }
    if !config.allow_empty_tokens {
        if let Some(index) = tokens.iter().position(|t| t.is_empty()) {
            return Err(TopicError::EmptyToken { index });
        }
    }
    Ok(())
}

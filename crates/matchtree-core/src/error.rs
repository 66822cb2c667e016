//! Error types for checked pattern registration.

use thiserror::Error;

/// Pattern validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
    /// Empty pattern.
    #[error("Pattern cannot be empty")]
    Empty,

    /// Pattern exceeds the configured byte length.
    #[error("Pattern too long: {len} bytes (max {max})")]
    TooLong { len: usize, max: usize },

    /// Pattern exceeds the configured token count.
    #[error("Pattern has too many tokens: {count} (max {max})")]
    TooManyTokens { count: usize, max: usize },

    /// Pattern contains an empty token.
    #[error("Pattern contains an empty token at position {index}")]
    EmptyToken { index: usize },
}

/// Result type for topic operations.
pub type TopicResult<T> = Result<T, TopicError>;

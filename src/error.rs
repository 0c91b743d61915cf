//! Error types for completion engine configuration.
//!
//! The completion core itself never fails on data: malformed or undersized
//! words are filtered out silently and queries without matches return empty
//! results. The only fallible surface is configuration, which is validated
//! before it reaches a [`VocabularyManager`](crate::vocabulary::VocabularyManager).

use thiserror::Error;

/// Errors raised while validating or loading a [`CompletionConfig`](crate::config::CompletionConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The minimum word length must be at least one character.
    #[error("min_word_length must be >= 1 (got {0})")]
    InvalidMinWordLength(usize),

    /// The result cap must allow at least one completion.
    #[error("max_results must be >= 1 (got {0})")]
    InvalidMaxResults(usize),

    /// The maximum word length cannot be below the minimum.
    ///
    /// With such a configuration every word would be rejected.
    #[error("max_word_length ({max}) is smaller than min_word_length ({min})")]
    WordLengthRange {
        /// Configured minimum length
        min: usize,
        /// Configured maximum length
        max: usize,
    },

    /// The configuration document could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

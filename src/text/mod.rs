//! Word harvesting and validation.
//!
//! [`extract_words`] is the minimal tokenizer feeding the vocabulary: it
//! splits free text into identifier-like tokens. [`WordFilter`] is the
//! deterministic predicate every word passes before it reaches the prefix
//! tree. Rejection is silent filtering, never an error.

use std::collections::BTreeSet;

use crate::config::CompletionConfig;

/// Words built from one repeated character are rejected from this length on.
pub const REPEATED_CHAR_THRESHOLD: usize = 4;

/// Split `text` into a deduplicated set of candidate words.
///
/// Tokens are maximal runs of alphanumeric characters, `_` and `$`. No
/// length filtering happens here; that is the job of [`WordFilter`].
///
/// ```rust
/// use libcompletion::text::extract_words;
///
/// let words = extract_words("let user_name = getUser($id); // getUser again");
/// let expected: Vec<&str> = vec!["$id", "again", "getUser", "let", "user_name"];
/// assert_eq!(words.iter().map(String::as_str).collect::<Vec<_>>(), expected);
/// ```
pub fn extract_words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Why a word was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer characters than the configured minimum
    TooShort,
    /// More characters than the configured maximum
    TooLong,
    /// Contains a control or whitespace character
    InvalidCharacter,
    /// One character repeated over and over
    RepeatedCharacter,
}

/// Input-validation predicate applied before insertion.
///
/// Rules, checked in order:
///
/// 1. character count below `min_word_length`;
/// 2. character count above `max_word_length`;
/// 3. any control or whitespace character;
/// 4. a single character repeated, at least [`REPEATED_CHAR_THRESHOLD`] long.
///
/// # Example
///
/// ```rust
/// use libcompletion::text::{Rejection, WordFilter};
///
/// let filter = WordFilter::new(3, 10);
/// assert!(filter.accepts("value"));
/// assert_eq!(filter.check("ab"), Err(Rejection::TooShort));
/// assert_eq!(filter.check("========"), Err(Rejection::RepeatedCharacter));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    min_length: usize,
    max_length: usize,
}

impl WordFilter {
    /// Filter accepting words of `min_length..=max_length` characters.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Filter using the length bounds of `config`.
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self::new(config.min_word_length, config.max_word_length)
    }

    /// Minimum accepted length in characters.
    #[inline]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum accepted length in characters.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Run every rule, reporting the first one violated.
    pub fn check(&self, word: &str) -> Result<(), Rejection> {
        // Only count as far as the maximum so huge inputs are rejected cheaply.
        let len = word.chars().take(self.max_length.saturating_add(1)).count();
        if len < self.min_length {
            return Err(Rejection::TooShort);
        }
        if len > self.max_length {
            return Err(Rejection::TooLong);
        }
        if word.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(Rejection::InvalidCharacter);
        }
        if len >= REPEATED_CHAR_THRESHOLD && is_single_char_run(word) {
            return Err(Rejection::RepeatedCharacter);
        }
        Ok(())
    }

    /// Whether `word` passes every rule.
    #[inline]
    pub fn accepts(&self, word: &str) -> bool {
        self.check(word).is_ok()
    }
}

impl Default for WordFilter {
    fn default() -> Self {
        Self::from_config(&CompletionConfig::default())
    }
}

fn is_single_char_run(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

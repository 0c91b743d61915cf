//! Settings consumed by the completion engine.
//!
//! Configuration is passed explicitly into
//! [`VocabularyManager::with_config`](crate::vocabulary::VocabularyManager::with_config)
//! rather than read from global state, so every engine instance can be tested
//! in isolation.
//!
//! # Example
//!
//! ```rust
//! use libcompletion::config::CompletionConfig;
//!
//! let config = CompletionConfig::builder()
//!     .min_word_length(2)
//!     .max_results(5)
//!     .case_insensitive(false)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_results, 5);
//! assert!(!config.case_insensitive);
//! ```

use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default minimum word length accepted into the vocabulary.
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Default maximum word length accepted into the vocabulary.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 64;

/// Default number of completions returned per query.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Edit-distance budget used by combined search.
pub const DEFAULT_FUZZY_DISTANCE: usize = 2;

/// Minimum time between rebuilds triggered by content-change signals.
pub const DEFAULT_THROTTLE_WINDOW_MS: u64 = 5000;

/// Completion engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CompletionConfig {
    /// Words with fewer characters are rejected at insertion time.
    pub min_word_length: usize,

    /// Words with more characters are rejected at insertion time.
    pub max_word_length: usize,

    /// Cap on the number of completions returned.
    pub max_results: usize,

    /// When false, only exact-prefix results are produced.
    pub fuzzy_matching: bool,

    /// Match against lowercased forms while preserving original casing in output.
    pub case_insensitive: bool,

    /// Edit-distance budget for the fuzzy half of combined search.
    pub fuzzy_distance: usize,

    /// Throttle window for change-driven rebuilds, in milliseconds.
    pub throttle_window_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
            max_results: DEFAULT_MAX_RESULTS,
            fuzzy_matching: true,
            case_insensitive: true,
            fuzzy_distance: DEFAULT_FUZZY_DISTANCE,
            throttle_window_ms: DEFAULT_THROTTLE_WINDOW_MS,
        }
    }
}

impl CompletionConfig {
    /// Start a builder seeded with the default settings.
    pub fn builder() -> CompletionConfigBuilder {
        CompletionConfigBuilder::new()
    }

    /// Throttle window as a [`Duration`].
    #[inline]
    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_window_ms)
    }

    /// Check the settings for values that would make the engine unusable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidMinWordLength`] if `min_word_length == 0`
    /// - [`ConfigError::InvalidMaxResults`] if `max_results == 0`
    /// - [`ConfigError::WordLengthRange`] if `max_word_length < min_word_length`
    pub fn validate(&self) -> Result<()> {
        if self.min_word_length == 0 {
            return Err(ConfigError::InvalidMinWordLength(self.min_word_length));
        }
        if self.max_results == 0 {
            return Err(ConfigError::InvalidMaxResults(self.max_results));
        }
        if self.max_word_length < self.min_word_length {
            return Err(ConfigError::WordLengthRange {
                min: self.min_word_length,
                max: self.max_word_length,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// ```rust
    /// use libcompletion::config::CompletionConfig;
    ///
    /// let config = CompletionConfig::from_json_str(r#"{ "maxResults": 3 }"#).unwrap();
    /// assert_eq!(config.max_results, 3);
    /// assert_eq!(config.min_word_length, 3);
    /// ```
    #[cfg(feature = "serialization")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Fluent builder for [`CompletionConfig`].
#[derive(Debug, Clone, Default)]
pub struct CompletionConfigBuilder {
    config: CompletionConfig,
}

impl CompletionConfigBuilder {
    /// Create a builder seeded with the default settings.
    pub fn new() -> Self {
        Self {
            config: CompletionConfig::default(),
        }
    }

    /// Set the minimum accepted word length.
    pub fn min_word_length(mut self, len: usize) -> Self {
        self.config.min_word_length = len;
        self
    }

    /// Set the maximum accepted word length.
    pub fn max_word_length(mut self, len: usize) -> Self {
        self.config.max_word_length = len;
        self
    }

    /// Set the completion cap.
    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    /// Enable or disable fuzzy matching.
    pub fn fuzzy_matching(mut self, enabled: bool) -> Self {
        self.config.fuzzy_matching = enabled;
        self
    }

    /// Enable or disable case-insensitive matching.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.config.case_insensitive = enabled;
        self
    }

    /// Set the fuzzy edit-distance budget.
    pub fn fuzzy_distance(mut self, distance: usize) -> Self {
        self.config.fuzzy_distance = distance;
        self
    }

    /// Set the rebuild throttle window.
    pub fn throttle_window(mut self, window: Duration) -> Self {
        self.config.throttle_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by [`CompletionConfig::validate`].
    pub fn build(self) -> Result<CompletionConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

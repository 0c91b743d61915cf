//! # libcompletion
//!
//! Word completion over a vocabulary harvested from text.
//!
//! The engine stores words in a character-level prefix tree and answers two
//! kinds of lookups against it: exact-prefix enumeration and bounded
//! Levenshtein search. A [`VocabularyManager`](vocabulary::VocabularyManager)
//! owns the tree, rebuilds it wholesale from fresh word sets, folds case when
//! asked to, and ranks results against the word being typed.
//!
//! ## Example
//!
//! ```rust
//! use libcompletion::prelude::*;
//!
//! let manager = VocabularyManager::new();
//! manager.rebuild_from_text("fn function() { let functional = fundamental(); }");
//!
//! let completions = manager.complete("fun", 10);
//! let terms: Vec<&str> = completions.iter().map(|c| c.term.as_str()).collect();
//! assert_eq!(terms, vec!["function", "functional", "fundamental"]);
//!
//! // Typos still find their target
//! assert_eq!(manager.search("fucntion", 1)[0], "function");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dictionary;
pub mod distance;
pub mod error;
pub mod fuzzy;
pub mod ranking;
pub mod text;
pub mod vocabulary;

/// Command-line front end
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::config::{CompletionConfig, CompletionConfigBuilder};
    pub use crate::dictionary::{Dictionary, DictionaryNode, PrefixIterator, PrefixTree};
    pub use crate::distance::standard_distance;
    pub use crate::error::ConfigError;
    pub use crate::fuzzy::{fuzzy_search, Candidate, FuzzyMatcher};
    pub use crate::ranking::{rank_completions, Completion, MatchKind, Ranker};
    pub use crate::text::{extract_words, WordFilter};
    pub use crate::vocabulary::{
        RebuildThrottle, VocabularyManager, VocabularySnapshot, VocabularyStats,
    };
}

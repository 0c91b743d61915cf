//! Combined exact/fuzzy search and completion ranking.
//!
//! Two orderings live here:
//!
//! - [`Ranker::search`] blends exact-prefix matches (in enumeration order)
//!   with a surplus pool of fuzzy matches, the way a raw dictionary search is
//!   answered.
//! - [`rank_completions`] reorders a set of suggestions against the word the
//!   user is typing: case-exact prefix matches first, then case-insensitive
//!   prefix matches, then fuzzy-only matches; shorter before longer;
//!   lexicographic as the final tiebreak.

use std::cmp::Ordering;
use std::fmt;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::config::{CompletionConfig, DEFAULT_FUZZY_DISTANCE};
use crate::dictionary::{descend, Dictionary, PrefixIterator};
use crate::fuzzy::{Candidate, FuzzyMatcher};

/// How a completion relates to the word being typed.
///
/// Variants are declared in ranking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
    /// The completion starts with the typed text, casing included
    ExactPrefix,
    /// The completion starts with the typed text once both are lowercased
    CaseInsensitivePrefix,
    /// The completion only matched within the edit-distance budget
    Fuzzy,
}

impl MatchKind {
    /// Classify `term` against the typed text.
    pub fn classify(term: &str, typed: &str) -> Self {
        if term.starts_with(typed) {
            MatchKind::ExactPrefix
        } else if term.to_lowercase().starts_with(&typed.to_lowercase()) {
            MatchKind::CaseInsensitivePrefix
        } else {
            MatchKind::Fuzzy
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchKind::ExactPrefix => "prefix",
            MatchKind::CaseInsensitivePrefix => "prefix (case-insensitive)",
            MatchKind::Fuzzy => "fuzzy",
        };
        f.write_str(label)
    }
}

/// A ranked completion for an in-progress word.
///
/// # Sorting
///
/// Completions are sorted by:
/// 1. Match kind (case-exact prefix, case-insensitive prefix, fuzzy)
/// 2. Term length in characters (ascending)
/// 3. Term lexicographically (ascending)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The completed term, in its stored casing
    pub term: String,

    /// Relation to the typed text
    pub kind: MatchKind,

    /// Edit distance from the query (0 for prefix matches)
    pub distance: usize,
}

impl Ord for Completion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.term.chars().count().cmp(&other.term.chars().count()))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Completion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, distance: {})",
            self.term, self.kind, self.distance
        )
    }
}

/// Blends exact-prefix and fuzzy lookups into one result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranker {
    fuzzy_matching: bool,
    fuzzy_distance: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            fuzzy_matching: true,
            fuzzy_distance: DEFAULT_FUZZY_DISTANCE,
        }
    }
}

impl Ranker {
    /// Ranker with fuzzy matching on and the default distance budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranker honoring the fuzzy settings of `config`.
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            fuzzy_matching: config.fuzzy_matching,
            fuzzy_distance: config.fuzzy_distance,
        }
    }

    /// Toggle the fuzzy half of the search.
    pub fn with_fuzzy_matching(mut self, enabled: bool) -> Self {
        self.fuzzy_matching = enabled;
        self
    }

    /// Override the fuzzy distance budget.
    pub fn with_fuzzy_distance(mut self, distance: usize) -> Self {
        self.fuzzy_distance = distance;
        self
    }

    /// Combined exact-prefix and fuzzy search, returning terms only.
    ///
    /// See [`search_candidates`](Self::search_candidates).
    pub fn search<D: Dictionary>(&self, dictionary: &D, query: &str, max_results: usize) -> Vec<String> {
        self.search_candidates(dictionary, query, max_results)
            .into_iter()
            .map(|candidate| candidate.term)
            .collect()
    }

    /// Combined exact-prefix and fuzzy search.
    ///
    /// 1. An empty query returns nothing.
    /// 2. Exact-prefix matches are enumerated in dictionary order; once
    ///    `max_results` of them exist they are the whole answer.
    /// 3. Otherwise a fuzzy pool of `max_results * 2` candidates is fetched and
    ///    appended, skipping terms already present, until `max_results` is
    ///    reached.
    ///
    /// Exact-prefix matches are reported with distance 0.
    pub fn search_candidates<D: Dictionary>(
        &self,
        dictionary: &D,
        query: &str,
        max_results: usize,
    ) -> Vec<Candidate> {
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let mut results: Vec<Candidate> = match descend(dictionary.root(), query) {
            Some(node) => PrefixIterator::new(node, query)
                .take(max_results)
                .map(|term| Candidate::new(term, 0))
                .collect(),
            None => Vec::new(),
        };
        let exact = results.len();

        if exact >= max_results || !self.fuzzy_matching {
            trace!(query, exact, "search answered from exact prefix");
            return results;
        }

        let pool = FuzzyMatcher::new(dictionary).search(
            query,
            self.fuzzy_distance,
            max_results.saturating_mul(2),
        );
        let pool_size = pool.len();

        let mut seen: FxHashSet<String> = results.iter().map(|c| c.term.clone()).collect();
        for candidate in pool {
            if results.len() >= max_results {
                break;
            }
            if seen.insert(candidate.term.clone()) {
                results.push(candidate);
            }
        }

        trace!(
            query,
            exact,
            fuzzy_pool = pool_size,
            returned = results.len(),
            "combined search finished"
        );
        results
    }
}

/// Rank suggestions against the in-progress word `typed`.
///
/// Suggestions equal to `typed` are dropped since there is nothing left to
/// complete; with `case_insensitive` the comparison ignores case. The rest is
/// sorted by [`Completion`]'s ordering. Duplicate terms keep their first
/// occurrence.
pub fn rank_completions<I>(suggestions: I, typed: &str, case_insensitive: bool) -> Vec<Completion>
where
    I: IntoIterator<Item = Candidate>,
{
    let typed_folded = typed.to_lowercase();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    let mut ranked: Vec<Completion> = suggestions
        .into_iter()
        .filter(|candidate| {
            if case_insensitive {
                candidate.term.to_lowercase() != typed_folded
            } else {
                candidate.term != typed
            }
        })
        .filter(|candidate| seen.insert(candidate.term.clone()))
        .map(|candidate| Completion {
            kind: MatchKind::classify(&candidate.term, typed),
            term: candidate.term,
            distance: candidate.distance,
        })
        .collect();

    ranked.sort();
    ranked
}

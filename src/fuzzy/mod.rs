//! Bounded edit-distance search over a dictionary.
//!
//! [`FuzzyMatcher`] walks the dictionary depth-first from the root while
//! carrying one row of the Levenshtein DP matrix per visited node. The value
//! recorded at a final node is exactly
//! [`standard_distance`](crate::distance::standard_distance) between the
//! stored word and the query.
//!
//! Two pruning rules keep the walk tractable:
//!
//! - a child is never entered when its word would be longer than
//!   `query_len + max_distance`;
//! - a child is never entered when the minimum of its DP row already exceeds
//!   `max_distance`, since no extension can get back under the budget.
//!
//! # Example
//!
//! ```rust
//! use libcompletion::dictionary::PrefixTree;
//! use libcompletion::fuzzy::FuzzyMatcher;
//!
//! let tree = PrefixTree::from_terms(["sitting", "kitchen", "mitten"]);
//! let matcher = FuzzyMatcher::new(&tree);
//!
//! let results = matcher.search("kitten", 3, 10);
//! assert_eq!(results[0].term, "mitten");
//! assert_eq!(results[0].distance, 1);
//! assert!(results.iter().any(|c| c.term == "sitting" && c.distance == 3));
//! ```

use std::cmp::Ordering;
use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::dictionary::{Dictionary, DictionaryNode};
use crate::distance::{initial_row, step_row, DistanceRow};

/// Fuzzy match result containing term and distance.
///
/// # Sorting
///
/// Candidates are sorted by:
/// 1. Distance (ascending - closer matches first)
/// 2. Term length in characters (ascending)
/// 3. Term lexicographically (ascending)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// The matching term
    pub term: String,
    /// Edit distance from query
    pub distance: usize,
}

impl Candidate {
    /// Create a candidate.
    pub fn new(term: impl Into<String>, distance: usize) -> Self {
        Self {
            term: term.into(),
            distance,
        }
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.term.chars().count().cmp(&other.term.chars().count()))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (distance: {})", self.term, self.distance)
    }
}

/// Pending node of the depth-first walk.
struct Frame<N> {
    node: N,
    label: Option<char>,
    /// Path length before `label` is appended
    depth: usize,
    row: DistanceRow,
}

/// Bounded edit-distance matcher borrowing a dictionary.
pub struct FuzzyMatcher<'d, D: Dictionary> {
    dictionary: &'d D,
}

impl<'d, D: Dictionary> FuzzyMatcher<'d, D> {
    /// Create a matcher over `dictionary`.
    pub fn new(dictionary: &'d D) -> Self {
        Self { dictionary }
    }

    /// Every stored word within `max_distance` edits of `query`.
    ///
    /// Results are sorted (see [`Candidate`]), deduplicated by term and
    /// truncated to `max_results`. The query is matched as given; callers
    /// lowercase it first for case-insensitive matching.
    pub fn search(&self, query: &str, max_distance: usize, max_results: usize) -> Vec<Candidate> {
        if max_results == 0 {
            return Vec::new();
        }

        let query_chars: SmallVec<[char; 32]> = query.chars().collect();
        let query_len = query_chars.len();
        // Budgets beyond any word length simply disable length pruning.
        let max_len = query_len.saturating_add(max_distance);

        let mut found: Vec<Candidate> = Vec::new();
        let mut path: Vec<char> = Vec::with_capacity(query_len);
        let mut stack = vec![Frame {
            node: self.dictionary.root(),
            label: None,
            depth: 0,
            row: initial_row(query_len),
        }];
        let mut visited = 0usize;
        let mut pruned = 0usize;

        while let Some(frame) = stack.pop() {
            visited += 1;
            path.truncate(frame.depth);
            if let Some(c) = frame.label {
                path.push(c);
            }
            let len = path.len();

            if len > 0 && frame.node.is_final() {
                let distance = frame.row[query_len];
                if distance <= max_distance {
                    found.push(Candidate {
                        term: path.iter().collect(),
                        distance,
                    });
                }
            }

            if len >= max_len {
                pruned += frame.node.edge_count().unwrap_or(1);
                continue;
            }

            for (c, child) in frame.node.edges() {
                let mut row = DistanceRow::new();
                step_row(&frame.row, len + 1, c, &query_chars, &mut row);

                let lower_bound = row.iter().copied().min().unwrap_or(usize::MAX);
                if lower_bound > max_distance {
                    pruned += 1;
                    continue;
                }

                stack.push(Frame {
                    node: child,
                    label: Some(c),
                    depth: len,
                    row,
                });
            }
        }

        let results = finalize(found, max_results);
        trace!(
            query,
            max_distance,
            visited,
            pruned,
            matches = results.len(),
            "fuzzy search finished"
        );
        results
    }

    /// Like [`search`](Self::search), returning only the terms.
    pub fn search_terms(&self, query: &str, max_distance: usize, max_results: usize) -> Vec<String> {
        self.search(query, max_distance, max_results)
            .into_iter()
            .map(|candidate| candidate.term)
            .collect()
    }
}

/// Sort ascending, keep the first occurrence of each term, truncate.
fn finalize(mut found: Vec<Candidate>, max_results: usize) -> Vec<Candidate> {
    found.sort();

    let mut seen: FxHashSet<String> = FxHashSet::default();
    found.retain(|candidate| seen.insert(candidate.term.clone()));
    found.truncate(max_results);
    found
}

/// Convenience wrapper for a one-off [`FuzzyMatcher::search`].
pub fn fuzzy_search<D: Dictionary>(
    dictionary: &D,
    query: &str,
    max_distance: usize,
    max_results: usize,
) -> Vec<Candidate> {
    FuzzyMatcher::new(dictionary).search(query, max_distance, max_results)
}

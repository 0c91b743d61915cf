//! Edit distance computation.
//!
//! This module provides the textbook Levenshtein distance (insertion,
//! deletion and substitution each cost 1) measured over Unicode scalar
//! values, plus the single-row step the fuzzy matcher uses to compute the
//! same distance incrementally while walking a prefix tree.

use smallvec::SmallVec;

/// One row of the Levenshtein DP matrix.
///
/// Rows are indexed by query position (`0..=query_len`). Short queries stay
/// on the stack.
pub type DistanceRow = SmallVec<[usize; 32]>;

/// Compute standard Levenshtein distance between two strings.
///
/// Uses dynamic programming to compute the minimum number of
/// single-character edits (insertions, deletions, substitutions)
/// required to transform `source` into `target`.
///
/// # Example
///
/// ```rust
/// use libcompletion::distance::standard_distance;
///
/// assert_eq!(standard_distance("kitten", "sitting"), 3);
/// assert_eq!(standard_distance("", "abc"), 3);
/// assert_eq!(standard_distance("ab", "ba"), 2);
/// ```
pub fn standard_distance(source: &str, target: &str) -> usize {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    standard_distance_impl(&source_chars, &target_chars)
}

/// Levenshtein distance over pre-split character slices.
pub fn standard_distance_impl(source: &[char], target: &[char]) -> usize {
    let m = source.len();
    let n = target.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev_row = initial_row(n);
    let mut curr_row = DistanceRow::from_elem(0, n + 1);

    for (i, &c) in source.iter().enumerate() {
        step_row(&prev_row, i + 1, c, target, &mut curr_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// First row of the DP matrix: the distance from the empty word to every
/// prefix of the query.
#[inline]
pub fn initial_row(query_len: usize) -> DistanceRow {
    (0..=query_len).collect()
}

/// Compute the next DP row after appending `c` to the word.
///
/// `word_len` is the length of the word *including* `c`; `prev` is the row
/// for the word without `c`. After the call, `out[query.len()]` is the
/// distance between the extended word and the full query, and
/// `out.iter().min()` is a lower bound for every extension of the word.
#[inline]
pub fn step_row(prev: &[usize], word_len: usize, c: char, query: &[char], out: &mut DistanceRow) {
    out.clear();
    out.push(word_len);

    for (j, &q) in query.iter().enumerate() {
        let cost = usize::from(q != c);
        let value = (prev[j + 1] + 1) // deletion
            .min(out[j] + 1) // insertion
            .min(prev[j] + cost); // substitution
        out.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_distance_identical() {
        assert_eq!(standard_distance("test", "test"), 0);
        assert_eq!(standard_distance("abc", "abc"), 0);
        assert_eq!(standard_distance("", ""), 0);
    }

    #[test]
    fn test_standard_distance_empty() {
        assert_eq!(standard_distance("", "abc"), 3);
        assert_eq!(standard_distance("test", ""), 4);
    }

    #[test]
    fn test_standard_distance_basic() {
        assert_eq!(standard_distance("kitten", "sitting"), 3);
        assert_eq!(standard_distance("saturday", "sunday"), 3);
        assert_eq!(standard_distance("test", "best"), 1);
    }

    #[test]
    fn test_swap_costs_two() {
        assert_eq!(standard_distance("ab", "ba"), 2);
        assert_eq!(standard_distance("test", "tset"), 2);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [("kitten", "sitting"), ("flaw", "lawn"), ("", "xyz"), ("abc", "yabd")];
        for (a, b) in pairs {
            assert_eq!(standard_distance(a, b), standard_distance(b, a), "{a} vs {b}");
        }
    }

    #[test]
    fn test_unicode_counts_characters() {
        assert_eq!(standard_distance("café", "cafe"), 1);
        assert_eq!(standard_distance("", "¡"), 1);
        assert_eq!(standard_distance("日本", "日本語"), 1);
    }

    #[test]
    fn test_incremental_rows_match_full_computation() {
        let query: Vec<char> = "sitting".chars().collect();
        let word: Vec<char> = "kitten".chars().collect();

        let mut row = initial_row(query.len());
        let mut next = DistanceRow::new();
        for (i, &c) in word.iter().enumerate() {
            step_row(&row, i + 1, c, &query, &mut next);
            std::mem::swap(&mut row, &mut next);

            let prefix: String = word[..=i].iter().collect();
            assert_eq!(row[query.len()], standard_distance(&prefix, "sitting"));
        }
        assert_eq!(row[query.len()], 3);
    }
}

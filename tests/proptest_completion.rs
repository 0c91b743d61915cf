//! Property-based tests for the prefix tree, fuzzy matcher and ranking
//!
//! Fuzzy results are cross-checked against a naive full-matrix Levenshtein
//! implementation and against a brute-force scan of the vocabulary.

use libcompletion::prelude::*;
use proptest::prelude::*;

// Strategy for generating simple ASCII words
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,8}"
}

// Strategy for generating a small dictionary
fn small_dict_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 1..=20)
}

// Helper: compute naive Levenshtein distance for verification
fn naive_levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = usize::from(s1_chars[i - 1] != s2_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len1][len2]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: every fuzzy result is within budget and its recorded
    /// distance equals the textbook distance
    #[test]
    fn prop_fuzzy_distances_are_exact(
        dict_words in small_dict_strategy(),
        query in word_strategy(),
        max_dist in 0usize..=3
    ) {
        let tree = PrefixTree::from_terms(&dict_words);

        for candidate in fuzzy_search(&tree, &query, max_dist, usize::MAX) {
            let expected = naive_levenshtein_distance(&candidate.term, &query);
            prop_assert!(candidate.distance <= max_dist);
            prop_assert_eq!(candidate.distance, expected);
        }
    }

    /// Property: a budget beyond every word length returns the whole
    /// vocabulary with exact distances
    #[test]
    fn prop_huge_budget_returns_everything(
        dict_words in small_dict_strategy(),
        query in word_strategy(),
        max_dist in 16usize..=usize::MAX
    ) {
        let tree = PrefixTree::from_terms(&dict_words);
        let results = fuzzy_search(&tree, &query, max_dist, usize::MAX);

        let mut expected = dict_words.clone();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(results.len(), expected.len());
        for candidate in results {
            prop_assert_eq!(
                candidate.distance,
                naive_levenshtein_distance(&candidate.term, &query)
            );
        }
    }

    /// Property: pruning never loses a word that is within budget
    #[test]
    fn prop_fuzzy_is_complete(
        dict_words in small_dict_strategy(),
        query in word_strategy(),
        max_dist in 0usize..=3
    ) {
        let tree = PrefixTree::from_terms(&dict_words);
        let mut found: Vec<String> = fuzzy_search(&tree, &query, max_dist, usize::MAX)
            .into_iter()
            .map(|c| c.term)
            .collect();
        found.sort();

        let mut expected: Vec<String> = dict_words
            .iter()
            .filter(|w| naive_levenshtein_distance(w, &query) <= max_dist)
            .cloned()
            .collect();
        expected.sort();
        expected.dedup();

        prop_assert_eq!(found, expected);
    }

    /// Property: fuzzy results come back sorted by (distance, length, term)
    #[test]
    fn prop_fuzzy_results_sorted(
        dict_words in small_dict_strategy(),
        query in word_strategy()
    ) {
        let tree = PrefixTree::from_terms(&dict_words);
        let results = fuzzy_search(&tree, &query, 2, usize::MAX);

        for pair in results.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    /// Property: every proper prefix of an inserted word completes to it
    #[test]
    fn prop_prefix_containment(dict_words in small_dict_strategy()) {
        let tree = PrefixTree::from_terms(&dict_words);

        for word in &dict_words {
            for end in 1..word.len() {
                let completions = tree.auto_complete(&word[..end]);
                prop_assert!(completions.contains(word));
                prop_assert!(completions.iter().all(|c| c.starts_with(&word[..end])));
            }
        }
    }

    /// Property: inserting a word again never changes the size
    #[test]
    fn prop_idempotent_insertion(
        dict_words in small_dict_strategy(),
        repeats in 1usize..=4
    ) {
        let mut tree = PrefixTree::new();
        for _ in 0..repeats {
            for word in &dict_words {
                tree.insert(word);
            }
        }

        let mut distinct = dict_words.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(tree.size(), distinct.len());
    }

    /// Property: full enumeration is sorted and matches the inserted set
    #[test]
    fn prop_enumeration_lexicographic(dict_words in small_dict_strategy()) {
        let tree = PrefixTree::from_terms(&dict_words);

        let mut expected = dict_words.clone();
        expected.sort();
        expected.dedup();

        prop_assert_eq!(tree.auto_complete(""), expected);
    }

    /// Property: combined search never exceeds the cap and has no duplicates
    #[test]
    fn prop_search_capped_and_unique(
        dict_words in small_dict_strategy(),
        query in word_strategy(),
        max_results in 1usize..=8
    ) {
        let tree = PrefixTree::from_terms(&dict_words);
        let results = Ranker::new().search(&tree, &query, max_results);

        prop_assert!(results.len() <= max_results);
        let mut unique = results.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), results.len());
    }

    /// Property: ranked completions never contain the typed word
    #[test]
    fn prop_ranking_excludes_typed(
        dict_words in small_dict_strategy(),
        typed in word_strategy()
    ) {
        let manager = VocabularyManager::with_config(
            CompletionConfig::builder().min_word_length(1).build().unwrap(),
        ).unwrap();
        manager.rebuild(dict_words);

        let completions = manager.complete(&typed, 10);
        prop_assert!(completions.iter().all(|c| c.term != typed));
        for pair in completions.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }
}

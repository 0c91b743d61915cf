//! Vocabulary lifecycle: rebuild, custom words, reset and rebuild throttling.
//!
//! [`VocabularyManager`] owns the current [`PrefixTree`] together with the
//! snapshot of words it was built from. A rebuild never mutates the live tree:
//! a fresh [`VocabularySnapshot`] is built off-lock and swapped in, so readers
//! that already hold the previous snapshot finish against it undisturbed.
//!
//! # Case-insensitive mode
//!
//! Every accepted word is inserted as given and, when different, as its
//! lowercased form. Lookups run against the lowercased query, and every hit
//! is expanded back to the original spellings that fold to it, so output
//! keeps the casing the words were harvested with.
//!
//! # Example
//!
//! ```rust
//! use libcompletion::vocabulary::VocabularyManager;
//!
//! let manager = VocabularyManager::new();
//! manager.rebuild(["function", "functional", "fundamental", "Functor"]);
//!
//! let results = manager.search("fun", 10);
//! assert!(results.contains(&"Functor".to_string()));
//!
//! let completions = manager.complete("func", 10);
//! assert_eq!(completions[0].term, "function");
//! ```

mod throttle;

pub use throttle::{should_rebuild, RebuildThrottle};

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::CompletionConfig;
use crate::dictionary::PrefixTree;
use crate::error::Result;
use crate::fuzzy::Candidate;
use crate::ranking::{rank_completions, Completion, Ranker};
use crate::text::{extract_words, WordFilter};

/// Lowercased form -> original spellings folding to it, sorted.
type CaseForms = FxHashMap<String, SmallVec<[String; 2]>>;

/// One generation of the vocabulary: the tree plus the words it came from.
///
/// Snapshots are immutable once published. Holding one keeps that generation
/// alive even after the manager has moved on.
#[derive(Debug, Clone, Default)]
pub struct VocabularySnapshot {
    tree: PrefixTree,
    words: FxHashSet<String>,
    case_forms: CaseForms,
    last_rebuild: Option<Instant>,
}

impl VocabularySnapshot {
    /// The prefix tree of this generation.
    #[inline]
    pub fn tree(&self) -> &PrefixTree {
        &self.tree
    }

    /// Words this generation was built from, including rejected ones.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of words in the snapshot.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// When this generation was built (`None` if never rebuilt).
    #[inline]
    pub fn last_rebuild(&self) -> Option<Instant> {
        self.last_rebuild
    }

    /// Original spellings stored for a folded hit, or the hit itself.
    fn originals<'a>(&'a self, hit: &'a str) -> SmallVec<[&'a str; 2]> {
        match self.case_forms.get(&hit.to_lowercase()) {
            Some(forms) => forms.iter().map(String::as_str).collect(),
            None => SmallVec::from_iter([hit]),
        }
    }
}

/// Engine statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyStats {
    /// Words in the vocabulary snapshot (pre-filter input plus custom words)
    pub word_count: usize,
    /// Terminal nodes in the prefix tree (both casings count)
    pub tree_size: usize,
    /// Time of the last rebuild, `None` before the first one and after a reset
    pub last_rebuild: Option<Instant>,
}

/// Owner of the completion vocabulary.
///
/// The manager is a cheap, clonable handle; clones share the same
/// vocabulary. All operations take `&self` and are safe to call from several
/// threads: readers never block each other and only contend with writers for
/// the instant it takes to swap a snapshot pointer.
///
/// # Thread Safety
///
/// State lives behind `Arc<RwLock<Arc<VocabularySnapshot>>>`. Queries clone the
/// inner `Arc` and traverse without holding the lock. [`rebuild`](Self::rebuild)
/// builds the next snapshot before taking the write lock;
/// [`add_custom_words`](Self::add_custom_words) copies the snapshot first if a
/// reader still holds it.
#[derive(Debug, Clone)]
pub struct VocabularyManager {
    config: Arc<CompletionConfig>,
    ranker: Ranker,
    filter: WordFilter,
    throttle: RebuildThrottle,
    state: Arc<RwLock<Arc<VocabularySnapshot>>>,
}

impl Default for VocabularyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyManager {
    /// Create an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(CompletionConfig::default())
    }

    /// Create an empty manager with `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`](crate::error::ConfigError) reported by
    /// [`CompletionConfig::validate`].
    pub fn with_config(config: CompletionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CompletionConfig) -> Self {
        Self {
            ranker: Ranker::from_config(&config),
            filter: WordFilter::from_config(&config),
            throttle: RebuildThrottle::new(config.throttle_window()),
            config: Arc::new(config),
            state: Arc::new(RwLock::new(Arc::new(VocabularySnapshot::default()))),
        }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Current snapshot. Stays valid across later rebuilds.
    pub fn snapshot(&self) -> Arc<VocabularySnapshot> {
        Arc::clone(&self.state.read())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Replace the vocabulary with `words`.
    ///
    /// The previous tree and snapshot are discarded. Each word passing the
    /// [`WordFilter`] is inserted; the snapshot records the whole input set,
    /// rejected words included, and the rebuild is timestamped.
    pub fn rebuild<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rebuild_at(words, Instant::now());
    }

    /// [`rebuild`](Self::rebuild) recording `now` as the rebuild time.
    pub fn rebuild_at<I, S>(&self, words: I, now: Instant)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self.build_snapshot(words, now);
        *self.state.write() = Arc::new(next);
    }

    /// Rebuild only if the throttle window has elapsed since the last rebuild.
    ///
    /// Meant for rebuilds proposed by content-change signals.
    ///
    /// # Returns
    ///
    /// `true` if the vocabulary was rebuilt.
    pub fn rebuild_throttled<I, S>(&self, words: I, now: Instant) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.is_throttled(now) {
            return false;
        }
        self.swap_if_stale(words, now)
    }

    /// Build a snapshot and publish it unless a rebuild landed meanwhile.
    fn swap_if_stale<I, S>(&self, words: I, now: Instant) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self.build_snapshot(words, now);
        let mut guard = self.state.write();
        // Another writer may have rebuilt while this snapshot was being built.
        if !self.throttle.should_rebuild(now, guard.last_rebuild) {
            debug!("rebuild skipped: superseded by concurrent rebuild");
            return false;
        }
        *guard = Arc::new(next);
        true
    }

    /// Extract words from `text` and rebuild from them.
    pub fn rebuild_from_text(&self, text: &str) {
        self.rebuild(extract_words(text));
    }

    /// Extract words from `text` and rebuild if the throttle allows it.
    pub fn rebuild_from_text_throttled(&self, text: &str, now: Instant) -> bool {
        // Checked before tokenizing so a throttled call does no work.
        if self.is_throttled(now) {
            return false;
        }
        self.swap_if_stale(extract_words(text), now)
    }

    fn is_throttled(&self, now: Instant) -> bool {
        let throttled = !self.should_rebuild(now);
        if throttled {
            debug!("rebuild skipped: inside throttle window");
        }
        throttled
    }

    /// Whether a change-driven rebuild at `now` is allowed.
    pub fn should_rebuild(&self, now: Instant) -> bool {
        self.throttle.should_rebuild(now, self.state.read().last_rebuild)
    }

    /// Drop all state, timestamp included.
    pub fn reset(&self) {
        *self.state.write() = Arc::new(VocabularySnapshot::default());
        debug!("vocabulary reset");
    }

    /// Whether a rebuild happened since construction or the last reset.
    pub fn is_initialized(&self) -> bool {
        self.state.read().last_rebuild.is_some()
    }

    /// Insert qualifying `words` into the existing tree, keeping prior content.
    ///
    /// Every word is added to the snapshot; only words passing the
    /// [`WordFilter`] reach the tree.
    ///
    /// # Returns
    ///
    /// The number of words accepted into the tree.
    pub fn add_custom_words<I, S>(&self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.state.write();
        let state = Arc::make_mut(&mut guard);

        let mut accepted = 0;
        for word in words {
            let word = word.into();
            if self.insert_word(state, &word) {
                accepted += 1;
            }
            state.words.insert(word);
        }

        debug!(accepted, tree_size = state.tree.size(), "custom words added");
        accepted
    }

    /// Insert a single word into the existing tree.
    ///
    /// # Returns
    ///
    /// `true` if the word passed the [`WordFilter`].
    pub fn insert(&self, word: &str) -> bool {
        self.add_custom_words([word]) == 1
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Exact membership test against the tree (case-literal).
    pub fn contains(&self, word: &str) -> bool {
        self.snapshot().tree.contains(word)
    }

    /// Exact-prefix enumeration against the tree (case-literal).
    pub fn auto_complete(&self, prefix: &str) -> Vec<String> {
        self.snapshot().tree.auto_complete(prefix)
    }

    /// Combined exact-prefix and fuzzy search, returning terms only.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<String> {
        self.search_candidates(query, max_results)
            .into_iter()
            .map(|candidate| candidate.term)
            .collect()
    }

    /// Combined exact-prefix and fuzzy search.
    ///
    /// In case-insensitive mode the query is lowercased and every hit is
    /// expanded to its original spellings.
    pub fn search_candidates(&self, query: &str, max_results: usize) -> Vec<Candidate> {
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let snapshot = self.snapshot();
        if !self.config.case_insensitive {
            return self.ranker.search_candidates(&snapshot.tree, query, max_results);
        }

        // Dual insertion can make several hits fold to one original.
        let key = query.to_lowercase();
        let hits = self.ranker.search_candidates(
            &snapshot.tree,
            &key,
            max_results.saturating_mul(2),
        );

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut results = Vec::with_capacity(max_results);
        'hits: for hit in &hits {
            for original in snapshot.originals(&hit.term) {
                if results.len() >= max_results {
                    break 'hits;
                }
                if seen.insert(original) {
                    results.push(Candidate::new(original, hit.distance));
                }
            }
        }

        trace!(query, hits = hits.len(), returned = results.len(), "case-folded search");
        results
    }

    /// Ranked completions for the in-progress word `typed`.
    ///
    /// Runs [`search_candidates`](Self::search_candidates) and orders the
    /// result with [`rank_completions`].
    pub fn complete(&self, typed: &str, max_results: usize) -> Vec<Completion> {
        let suggestions = self.search_candidates(typed, max_results);
        rank_completions(suggestions, typed, self.config.case_insensitive)
    }

    /// [`complete`](Self::complete) capped at the configured `max_results`.
    pub fn complete_default(&self, typed: &str) -> Vec<Completion> {
        self.complete(typed, self.config.max_results)
    }

    /// Terminal nodes in the current tree.
    pub fn size(&self) -> usize {
        self.snapshot().tree.size()
    }

    /// Words in the current snapshot.
    pub fn word_count(&self) -> usize {
        self.snapshot().word_count()
    }

    /// Word count, tree size and last rebuild time.
    pub fn stats(&self) -> VocabularyStats {
        let snapshot = self.snapshot();
        VocabularyStats {
            word_count: snapshot.word_count(),
            tree_size: snapshot.tree.size(),
            last_rebuild: snapshot.last_rebuild,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn build_snapshot<I, S>(&self, words: I, now: Instant) -> VocabularySnapshot
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let started = Instant::now();
        let mut snapshot = VocabularySnapshot {
            last_rebuild: Some(now),
            ..VocabularySnapshot::default()
        };

        let mut inserted = 0usize;
        let mut rejected = 0usize;
        for word in words {
            let word = word.into();
            if snapshot.words.contains(&word) {
                continue;
            }
            if self.insert_word(&mut snapshot, &word) {
                inserted += 1;
            } else {
                rejected += 1;
            }
            snapshot.words.insert(word);
        }

        debug!(
            words = snapshot.words.len(),
            inserted,
            rejected,
            tree_size = snapshot.tree.size(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "vocabulary rebuilt"
        );
        snapshot
    }

    /// Filter and insert one word, with its lowercased twin when folding case.
    ///
    /// A twin failing the [`WordFilter`] is left out of the tree.
    fn insert_word(&self, snapshot: &mut VocabularySnapshot, word: &str) -> bool {
        if !self.filter.accepts(word) {
            return false;
        }

        snapshot.tree.insert(word);
        if self.config.case_insensitive {
            let folded = word.to_lowercase();
            // Folding can lengthen a word, so the twin is filtered too.
            if folded != word && self.filter.accepts(&folded) {
                snapshot.tree.insert(&folded);
            }
            let forms = snapshot.case_forms.entry(folded).or_default();
            if let Err(index) = forms.binary_search_by(|form| form.as_str().cmp(word)) {
                forms.insert(index, word.to_owned());
            }
        }
        true
    }
}

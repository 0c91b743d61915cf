//! Character-indexed prefix tree.
//!
//! The tree is case-literal: it stores exactly the words it is given.
//! Case-insensitive lookups are layered on top by inserting a lowercased copy
//! next to the original and querying with a lowercased key (see
//! [`VocabularyManager`](crate::vocabulary::VocabularyManager)). With both
//! forms stored, [`PrefixTree::size`] counts both of them.
//!
//! # Enumeration order
//!
//! Children are kept sorted by code point and enumeration is depth-first
//! pre-order: a word is produced before its extensions, and siblings are
//! visited in ascending code-point order. For `{"Testing", "test", "testing"}`
//! the order is `"Testing"`, `"test"`, `"testing"`.
//!
//! # Example
//!
//! ```rust
//! use libcompletion::dictionary::PrefixTree;
//!
//! let mut tree = PrefixTree::new();
//! tree.insert("function");
//! tree.insert("functional");
//! tree.insert("fundamental");
//!
//! assert!(tree.contains("function"));
//! assert!(!tree.contains("func"));
//! assert_eq!(
//!     tree.auto_complete("func"),
//!     vec!["function".to_string(), "functional".to_string()]
//! );
//! assert_eq!(tree.size(), 3);
//! ```

use super::iterator::PrefixIterator;
use super::{descend, Dictionary, DictionaryNode};

/// Sentinel character held by the root node.
pub const ROOT_CHAR: char = '\0';

/// One character position of some inserted word.
///
/// Each node is exclusively owned by its parent; the root is owned by the
/// [`PrefixTree`]. Children are sorted by `character` and looked up with a
/// binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTreeNode {
    character: char,
    is_terminal: bool,
    children: Vec<PrefixTreeNode>,
}

impl PrefixTreeNode {
    fn new(character: char) -> Self {
        Self {
            character,
            is_terminal: false,
            children: Vec::new(),
        }
    }

    /// Character on the edge leading to this node ([`ROOT_CHAR`] for the root).
    #[inline]
    pub fn character(&self) -> char {
        self.character
    }

    /// Whether some inserted word ends exactly at this node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Child nodes in ascending code-point order.
    #[inline]
    pub fn children(&self) -> &[PrefixTreeNode] {
        &self.children
    }

    /// Find the child reached through `c`.
    #[inline]
    pub fn child(&self, c: char) -> Option<&PrefixTreeNode> {
        self.children
            .binary_search_by_key(&c, |n| n.character)
            .ok()
            .map(|index| &self.children[index])
    }

    fn child_or_insert(&mut self, c: char) -> &mut PrefixTreeNode {
        let index = match self.children.binary_search_by_key(&c, |n| n.character) {
            Ok(index) => index,
            Err(index) => {
                self.children.insert(index, PrefixTreeNode::new(c));
                index
            }
        };
        &mut self.children[index]
    }
}

/// Prefix tree over a vocabulary of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTree {
    root: PrefixTreeNode,
}

impl Default for PrefixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixTree {
    /// Create an empty tree holding only the sentinel root.
    pub fn new() -> Self {
        Self {
            root: PrefixTreeNode::new(ROOT_CHAR),
        }
    }

    /// Build a tree from an iterator of terms.
    ///
    /// Empty terms are skipped, duplicates collapse.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::new();
        for term in terms {
            tree.insert(term.as_ref());
        }
        tree
    }

    /// Insert a word, creating one node per character.
    ///
    /// Inserting an empty word is a no-op. Inserting a word that is already
    /// present leaves the tree unchanged.
    ///
    /// # Returns
    ///
    /// `true` if the word was not present before.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.child_or_insert(c);
        }

        let added = !node.is_terminal;
        node.is_terminal = true;
        added
    }

    /// Exact membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(PrefixTreeNode::is_terminal)
    }

    /// Node reached by walking `prefix` from the root.
    pub fn find(&self, prefix: &str) -> Option<&PrefixTreeNode> {
        descend(&self.root, prefix)
    }

    /// Lazily enumerate every stored word starting with `prefix`.
    ///
    /// The iterator is empty when `prefix` leaves the tree.
    pub fn iter_prefix<'a>(&'a self, prefix: &str) -> PrefixIterator<&'a PrefixTreeNode> {
        match self.find(prefix) {
            Some(node) => PrefixIterator::new(node, prefix),
            None => PrefixIterator::empty(),
        }
    }

    /// Every stored word beginning with `prefix`, in enumeration order.
    ///
    /// A prefix absent from the tree yields an empty vector. The empty prefix
    /// enumerates the whole tree.
    pub fn auto_complete(&self, prefix: &str) -> Vec<String> {
        self.iter_prefix(prefix).collect()
    }

    /// Iterate over every stored word.
    pub fn iter(&self) -> PrefixIterator<&PrefixTreeNode> {
        PrefixIterator::new(&self.root, "")
    }

    /// Number of terminal nodes in the tree.
    ///
    /// Counted by traversal. Words stored in two casings count twice.
    pub fn size(&self) -> usize {
        self.fold_nodes(0, |count, node| count + usize::from(node.is_terminal))
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.fold_nodes(0, |count, _| count + 1)
    }

    /// Check whether the tree stores no words.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Root node.
    #[inline]
    pub fn root(&self) -> &PrefixTreeNode {
        &self.root
    }

    fn fold_nodes<B>(&self, init: B, mut f: impl FnMut(B, &PrefixTreeNode) -> B) -> B {
        let mut acc = init;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            acc = f(acc, node);
            stack.extend(node.children.iter());
        }
        acc
    }
}

impl<'n> DictionaryNode for &'n PrefixTreeNode {
    #[inline]
    fn is_final(&self) -> bool {
        self.is_terminal
    }

    #[inline]
    fn transition(&self, label: char) -> Option<Self> {
        let node: &'n PrefixTreeNode = *self;
        node.child(label)
    }

    fn edges(&self) -> Box<dyn Iterator<Item = (char, Self)> + '_> {
        let node: &'n PrefixTreeNode = *self;
        Box::new(node.children.iter().map(|child| (child.character, child)))
    }

    #[inline]
    fn edge_count(&self) -> Option<usize> {
        Some(self.children.len())
    }
}

impl Dictionary for PrefixTree {
    type Node<'a> = &'a PrefixTreeNode
    where
        Self: 'a;

    #[inline]
    fn root(&self) -> Self::Node<'_> {
        &self.root
    }

    fn contains(&self, term: &str) -> bool {
        PrefixTree::contains(self, term)
    }

    fn len(&self) -> Option<usize> {
        Some(self.size())
    }

    fn is_empty(&self) -> bool {
        PrefixTree::is_empty(self)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixTree {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for term in iter {
            self.insert(term.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_single_word() {
        let mut tree = PrefixTree::new();
        assert!(tree.insert("cat"));

        assert!(tree.contains("cat"));
        assert!(!tree.contains("ca")); // prefix only
        assert!(!tree.contains("car"));
        assert!(!tree.contains("cats"));
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut tree = PrefixTree::new();
        assert!(!tree.insert(""));
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.node_count(), 1);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_idempotent() {
        let mut tree = PrefixTree::new();
        assert!(tree.insert("hello"));
        let nodes = tree.node_count();

        for _ in 0..5 {
            assert!(!tree.insert("hello"));
        }

        assert_eq!(tree.size(), 1);
        assert_eq!(tree.node_count(), nodes);
    }

    #[test]
    fn test_prefix_chain() {
        let tree = PrefixTree::from_terms(["a", "ab", "abc"]);

        assert!(tree.contains("a"));
        assert!(tree.contains("ab"));
        assert!(tree.contains("abc"));
        assert!(!tree.contains("abcd"));
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_auto_complete_lexicographic_preorder() {
        let tree = PrefixTree::from_terms(["cart", "cat", "car", "dog", "caravan"]);

        assert_eq!(
            tree.auto_complete("ca"),
            vec!["car", "caravan", "cart", "cat"]
        );
        assert_eq!(tree.auto_complete("dog"), vec!["dog"]);
    }

    #[test]
    fn test_auto_complete_missing_prefix() {
        let tree = PrefixTree::from_terms(["rust", "ruby"]);
        assert!(tree.auto_complete("py").is_empty());
        assert!(tree.auto_complete("rusty").is_empty());
    }

    #[test]
    fn test_auto_complete_empty_prefix_lists_everything() {
        let tree = PrefixTree::from_terms(["b", "a", "ab"]);
        assert_eq!(tree.auto_complete(""), vec!["a", "ab", "b"]);
        assert_eq!(tree.iter().count(), 3);
    }

    #[test]
    fn test_case_literal_storage() {
        let tree = PrefixTree::from_terms(["Testing", "test", "testing"]);

        assert_eq!(tree.auto_complete("test"), vec!["test", "testing"]);
        assert_eq!(tree.auto_complete("Test"), vec!["Testing"]);
        assert_eq!(tree.auto_complete(""), vec!["Testing", "test", "testing"]);
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn test_unicode_words() {
        let tree = PrefixTree::from_terms(["café", "cafés", "日本語", "日本"]);

        assert!(tree.contains("café"));
        assert!(!tree.contains("cafe"));
        assert_eq!(tree.auto_complete("caf"), vec!["café", "cafés"]);
        assert_eq!(tree.auto_complete("日"), vec!["日本", "日本語"]);
    }

    #[test]
    fn test_node_access() {
        let tree = PrefixTree::from_terms(["ab"]);
        let a = tree.find("a").unwrap();

        assert_eq!(a.character(), 'a');
        assert!(!a.is_terminal());
        assert_eq!(a.children().len(), 1);
        assert!(a.child('b').unwrap().is_terminal());
        assert!(a.child('c').is_none());
        assert_eq!(tree.root().character(), ROOT_CHAR);
    }

    #[test]
    fn test_dictionary_trait() {
        let tree = PrefixTree::from_terms(["foo", "foobar"]);
        let root = Dictionary::root(&tree);

        assert_eq!(Dictionary::len(&tree), Some(2));
        assert!(Dictionary::contains(&tree, "foobar"));
        assert!(root.has_edge('f'));
        assert!(!root.has_edge('b'));
        assert_eq!(root.edge_count(), Some(1));

        let labels: Vec<char> = root
            .transition('f')
            .unwrap()
            .transition('o')
            .unwrap()
            .transition('o')
            .unwrap()
            .edges()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(labels, vec!['b']);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut tree: PrefixTree = vec!["one", "two"].into_iter().collect();
        tree.extend(["three", "two"]);
        assert_eq!(tree.size(), 3);
    }
}

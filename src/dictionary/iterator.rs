//! Depth-first enumeration of stored words.
//!
//! [`PrefixIterator`] walks a subtree with an explicit stack, so very long
//! words never risk exhausting the call stack. The path is rebuilt in a
//! single reusable buffer and only materialized into a `String` when a final
//! node is reached.
//!
//! ```rust
//! use libcompletion::dictionary::PrefixTree;
//!
//! let tree = PrefixTree::from_terms(["cat", "cats", "car"]);
//! let words: Vec<String> = tree.iter_prefix("ca").collect();
//! assert_eq!(words, vec!["car", "cat", "cats"]);
//! ```

use smallvec::SmallVec;

use super::DictionaryNode;

/// Iterator over every final node below a starting node.
///
/// Yields words in depth-first pre-order, siblings in the order reported by
/// [`DictionaryNode::edges`]. Every yielded word is the starting prefix
/// followed by the edge labels from the starting node downwards.
pub struct PrefixIterator<N: DictionaryNode> {
    prefix: String,
    path: Vec<char>,
    /// Pending nodes as `(node, edge label, path length before the label)`.
    stack: Vec<(N, Option<char>, usize)>,
}

impl<N: DictionaryNode> PrefixIterator<N> {
    /// Enumerate the subtree rooted at `start`, prepending `prefix` to each word.
    pub fn new(start: N, prefix: &str) -> Self {
        let mut stack = Vec::with_capacity(16);
        stack.push((start, None, 0));
        Self {
            prefix: prefix.to_owned(),
            path: Vec::with_capacity(16),
            stack,
        }
    }

    /// An iterator that yields nothing.
    pub fn empty() -> Self {
        Self {
            prefix: String::new(),
            path: Vec::new(),
            stack: Vec::new(),
        }
    }
}

impl<N: DictionaryNode> Iterator for PrefixIterator<N> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, label, depth)) = self.stack.pop() {
            self.path.truncate(depth);
            if let Some(c) = label {
                self.path.push(c);
            }

            // Reverse push so the smallest label is popped first.
            let depth = self.path.len();
            let children: SmallVec<[(char, N); 8]> = node.edges().collect();
            for (c, child) in children.into_iter().rev() {
                self.stack.push((child, Some(c), depth));
            }

            if node.is_final() {
                let mut word = String::with_capacity(self.prefix.len() + self.path.len());
                word.push_str(&self.prefix);
                word.extend(self.path.iter());
                return Some(word);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::dictionary::PrefixTree;

    #[test]
    fn test_empty_iterator() {
        let tree = PrefixTree::new();
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.iter_prefix("x").count(), 0);
    }

    #[test]
    fn test_prefix_is_prepended() {
        let tree = PrefixTree::from_terms(["hello", "help", "world"]);
        let words: Vec<String> = tree.iter_prefix("hel").collect();
        assert_eq!(words, vec!["hello", "help"]);
    }

    #[test]
    fn test_exact_word_as_prefix() {
        let tree = PrefixTree::from_terms(["test", "testing", "tested"]);
        let words: Vec<String> = tree.iter_prefix("test").collect();
        assert_eq!(words, vec!["test", "tested", "testing"]);
    }

    #[test]
    fn test_deep_word_is_iterative() {
        let long: String = std::iter::repeat('x').take(5_000).collect();
        let tree = PrefixTree::from_terms([long.as_str()]);
        let words: Vec<String> = tree.iter().collect();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].len(), 5_000);
    }

    #[test]
    fn test_lazy_take() {
        let tree = PrefixTree::from_terms(["aa", "ab", "ac", "ad"]);
        let first_two: Vec<String> = tree.iter_prefix("a").take(2).collect();
        assert_eq!(first_two, vec!["aa", "ab"]);
    }
}

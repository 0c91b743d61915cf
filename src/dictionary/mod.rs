//! Dictionary abstractions for completion lookups.
//!
//! This module provides the traits that the fuzzy matcher and prefix
//! enumeration use to walk a vocabulary, plus the [`PrefixTree`] backend that
//! implements them.
//!
//! Edges are labelled with Unicode scalar values (`char`), so edit distances
//! and word lengths are measured in characters rather than UTF-8 bytes.

pub mod iterator;
pub mod prefix_tree;

pub use iterator::PrefixIterator;
pub use prefix_tree::{PrefixTree, PrefixTreeNode};

/// Core dictionary abstraction for completion lookups.
///
/// A dictionary is a collection of terms that can be traversed
/// character-by-character via graph-like nodes. Traversal always proceeds
/// from the root downwards; nodes carry no parent references.
pub trait Dictionary {
    /// The node type used for traversal, borrowed from the dictionary
    type Node<'a>: DictionaryNode
    where
        Self: 'a;

    /// Get the root node of the dictionary
    fn root(&self) -> Self::Node<'_>;

    /// Check if a term exists in the dictionary
    fn contains(&self, term: &str) -> bool {
        descend(self.root(), term).is_some_and(|node| node.is_final())
    }

    /// Get the total number of terms (if available efficiently)
    fn len(&self) -> Option<usize>;

    /// Check if the dictionary is empty
    fn is_empty(&self) -> bool {
        self.len().map(|n| n == 0).unwrap_or(false)
    }
}

/// Traversable dictionary node.
///
/// Nodes form a tree whose edges are labelled with characters and whose
/// final nodes mark the end of a stored term.
pub trait DictionaryNode: Clone + Send + Sync {
    /// Check if this node marks the end of a valid term
    fn is_final(&self) -> bool;

    /// Transition to a child node via the given character
    ///
    /// Returns `None` if no such transition exists
    fn transition(&self, label: char) -> Option<Self>;

    /// Iterate over all outgoing edges as `(char, child_node)` pairs.
    ///
    /// Implementations yield edges in ascending code-point order so that
    /// traversal output is reproducible.
    fn edges(&self) -> Box<dyn Iterator<Item = (char, Self)> + '_>;

    /// Check if a specific edge exists
    fn has_edge(&self, label: char) -> bool {
        self.transition(label).is_some()
    }

    /// Get the number of outgoing edges (if efficiently available)
    fn edge_count(&self) -> Option<usize> {
        None
    }
}

/// Follow `path` from `node`, one character at a time.
///
/// Returns the node reached after consuming every character, or `None` as
/// soon as a character has no matching edge.
pub fn descend<N: DictionaryNode>(node: N, path: &str) -> Option<N> {
    path.chars()
        .try_fold(node, |current, label| current.transition(label))
}

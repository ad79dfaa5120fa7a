//! Per-tree counts behind the constituency measures.

use super::pattern::Pattern;
use crate::data::Tree;

/// Number of matches of `pattern` and the yield length of each match.
pub fn count_and_lengths(tree: &Tree, pattern: &Pattern) -> (usize, Vec<usize>) {
    let lengths: Vec<usize> = pattern.find(tree).map(|n| tree.yield_len(n)).collect();
    (lengths.len(), lengths)
}

/// Number of constituents (phrase and pre-terminal nodes).
pub fn constituents(tree: &Tree) -> usize {
    tree.constituents().count()
}

/// Number of constituents minus the number of words.
pub fn constituents_without_leaves(tree: &Tree) -> isize {
    constituents(tree) as isize - tree.n_words() as isize
}

/// Height of the tree; a pre-terminal over a word has height 2.
pub fn height(tree: &Tree) -> usize {
    tree.height()
}

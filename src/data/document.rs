//! One input document in the normalized in-memory form.

use crate::data::{DependencyGraph, Token, Tree};
use std::collections::BTreeSet;

/// Sentences of a document with their optional annotations.
///
/// `graphs` and `trees` are either empty (layer not annotated) or hold
/// one entry per sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document name, usually the input path.
    pub name: String,
    /// Tokens per sentence.
    pub sentences: Vec<Vec<Token>>,
    /// Dependency graph per sentence.
    pub graphs: Vec<Option<DependencyGraph>>,
    /// Constituency tree per sentence.
    pub trees: Vec<Option<Tree>>,
    /// Why the adapter could not build a sentence's tree, if it tried.
    pub tree_errors: Vec<Option<String>>,
}

impl Document {
    /// Create an empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a sentence with its annotations.
    pub fn push_sentence(
        &mut self,
        tokens: Vec<Token>,
        graph: Option<DependencyGraph>,
        tree: Option<Tree>,
    ) {
        self.sentences.push(tokens);
        self.graphs.push(graph);
        self.trees.push(tree);
        self.tree_errors.push(None);
    }

    /// Add a sentence whose bracketed tree was annotated but unusable.
    pub fn push_sentence_with_tree_error(
        &mut self,
        tokens: Vec<Token>,
        graph: Option<DependencyGraph>,
        reason: impl Into<String>,
    ) {
        self.push_sentence(tokens, graph, None);
        if let Some(last) = self.tree_errors.last_mut() {
            *last = Some(reason.into());
        }
    }

    /// Reason recorded for the missing tree of sentence `index`.
    pub fn tree_error(&self, index: usize) -> Option<&str> {
        self.tree_errors.get(index).and_then(|e| e.as_deref())
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of tokens.
    pub fn n_tokens(&self) -> usize {
        self.sentences.iter().map(Vec::len).sum()
    }

    /// The running text as one token sequence, optionally without
    /// punctuation.
    pub fn tokens(&self, skip_tags: Option<&BTreeSet<String>>) -> Vec<Token> {
        self.sentences
            .iter()
            .flatten()
            .filter(|t| skip_tags.map_or(true, |tags| !t.has_tag(tags)))
            .cloned()
            .collect()
    }

    /// Whether any sentence carries a dependency graph.
    pub fn has_graphs(&self) -> bool {
        self.graphs.iter().any(Option::is_some)
    }

    /// Whether any sentence carries a constituency tree.
    pub fn has_trees(&self) -> bool {
        self.trees.iter().any(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_punctuation_tags;

    #[test]
    fn test_tokens() {
        let mut doc = Document::new("doc");
        doc.push_sentence(
            vec![Token::new("Ja", "ITJ"), Token::new("!", "PUNCT")],
            None,
            None,
        );
        doc.push_sentence(vec![Token::new("Gut", "ADJD")], None, None);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.n_tokens(), 3);
        assert_eq!(doc.tokens(None).len(), 3);
        let punct = default_punctuation_tags();
        let words: Vec<String> = doc.tokens(Some(&punct)).into_iter().map(|t| t.word).collect();
        assert_eq!(words, vec!["Ja", "Gut"]);
        assert!(!doc.has_graphs());
        assert!(!doc.has_trees());
    }

    #[test]
    fn test_tree_errors() {
        let mut doc = Document::new("doc");
        doc.push_sentence(vec![Token::new("Ja", "ITJ")], None, None);
        doc.push_sentence_with_tree_error(
            vec![Token::new("Gut", "ADJD")],
            None,
            "missing closing bracket",
        );
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.trees.len(), 2);
        assert_eq!(doc.tree_error(0), None);
        assert_eq!(doc.tree_error(1), Some("missing closing bracket"));
        assert_eq!(doc.tree_error(5), None);
    }
}

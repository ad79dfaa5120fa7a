//! Token records produced by the input adapters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single token: surface form, language-specific POS tag and, when the
/// source provides it, a universal POS tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Surface form.
    pub word: String,
    /// Part-of-speech tag (e.g. STTS or PTB).
    pub pos: String,
    /// Universal POS tag, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upos: Option<String>,
}

impl Token {
    /// Create a token with a POS tag and no universal tag.
    pub fn new(word: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos: pos.into(),
            upos: None,
        }
    }

    /// Create a token carrying both tag layers.
    pub fn with_upos(
        word: impl Into<String>,
        pos: impl Into<String>,
        upos: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            pos: pos.into(),
            upos: Some(upos.into()),
        }
    }

    /// Create a token without tags (tag `_`).
    pub fn untagged(word: impl Into<String>) -> Self {
        Self::new(word, "_")
    }

    /// Build an untagged token sequence from words.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Vec<Token> {
        words.iter().map(|w| Token::untagged(w.as_ref())).collect()
    }

    /// Whether this token's POS tag or universal tag is one of `tags`.
    #[inline]
    pub fn has_tag(&self, tags: &BTreeSet<String>) -> bool {
        tags.contains(&self.pos) || self.upos.as_ref().is_some_and(|u| tags.contains(u))
    }

    /// Length of the surface form in characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }
}

/// Default punctuation tag set (`PUNCT`).
pub fn default_punctuation_tags() -> BTreeSet<String> {
    std::iter::once("PUNCT".to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words() {
        let tokens = Token::from_words(&["a", "b"]);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].word, "b");
        assert_eq!(tokens[1].pos, "_");
    }

    #[test]
    fn test_char_len_counts_scalar_values() {
        assert_eq!(Token::untagged("Straße").char_len(), 6);
    }

    #[test]
    fn test_has_tag() {
        let tags = default_punctuation_tags();
        assert!(Token::new(",", "PUNCT").has_tag(&tags));
        assert!(!Token::new("Haus", "NN").has_tag(&tags));
        assert!(Token::with_upos(".", "$.", "PUNCT").has_tag(&tags));
    }
}

//! Frequency snapshot of a token sequence.

use crate::data::Token;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Frequency spectrum: frequency value → number of types with that frequency.
///
/// Buckets with a count of zero are never stored, so two spectra compare
/// equal exactly when they describe the same distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencySpectrum(BTreeMap<usize, usize>);

impl FrequencySpectrum {
    /// Empty spectrum.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a spectrum from a word → frequency table.
    pub fn from_frequencies<'a, I>(frequencies: I) -> Self
    where
        I: IntoIterator<Item = &'a usize>,
    {
        let mut spectrum = Self::new();
        for &freq in frequencies {
            spectrum.add(freq);
        }
        spectrum
    }

    /// Number of types occurring exactly `freq` times.
    #[inline]
    pub fn get(&self, freq: usize) -> usize {
        self.0.get(&freq).copied().unwrap_or(0)
    }

    /// Number of hapax legomena.
    #[inline]
    pub fn hapaxes(&self) -> usize {
        self.get(1)
    }

    /// Number of dis legomena.
    #[inline]
    pub fn dislegomena(&self) -> usize {
        self.get(2)
    }

    /// Highest frequency of any type.
    pub fn max_frequency(&self) -> Option<usize> {
        self.0.keys().next_back().copied()
    }

    /// Iterate over `(freq, freq_size)` pairs in ascending frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().map(|(&f, &n)| (f, n))
    }

    /// Number of distinct frequency classes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Σ freq_size, i.e. the vocabulary size.
    pub fn vocabulary_size(&self) -> usize {
        self.0.values().sum()
    }

    /// Σ freq · freq_size, i.e. the text length.
    pub fn text_length(&self) -> usize {
        self.0.iter().map(|(f, n)| f * n).sum()
    }

    /// Register one more type with frequency `freq`.
    pub(crate) fn add(&mut self, freq: usize) {
        if freq > 0 {
            *self.0.entry(freq).or_insert(0) += 1;
        }
    }

    /// Remove one type with frequency `freq`, dropping the bucket when empty.
    pub(crate) fn remove(&mut self, freq: usize) {
        if freq == 0 {
            return;
        }
        if let Some(n) = self.0.get_mut(&freq) {
            *n -= 1;
            if *n == 0 {
                self.0.remove(&freq);
            }
        }
    }

    /// Move one type from frequency `from` to frequency `to`.
    #[inline]
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        self.remove(from);
        self.add(to);
    }
}

impl FromIterator<(usize, usize)> for FrequencySpectrum {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|&(f, n)| f > 0 && n > 0).collect())
    }
}

/// A frequency snapshot of a contiguous token sequence.
///
/// Invariants: `text_length == tokens.len()`, the spectrum sums to the
/// vocabulary size and its weighted sum to the text length. A `Text` is
/// never mutated once handed to a formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Text<'a> {
    tokens: &'a [Token],
    vocabulary_size: usize,
    frequency_spectrum: FrequencySpectrum,
}

impl<'a> Text<'a> {
    /// Build length, vocabulary size and frequency spectrum in one pass.
    pub fn from_tokens(tokens: &'a [Token]) -> Self {
        let frequencies = word_frequencies(tokens);
        let frequency_spectrum = FrequencySpectrum::from_frequencies(frequencies.values());
        Self {
            tokens,
            vocabulary_size: frequencies.len(),
            frequency_spectrum,
        }
    }

    /// Assemble a text from incrementally maintained statistics.
    pub(crate) fn from_parts(
        tokens: &'a [Token],
        vocabulary_size: usize,
        frequency_spectrum: FrequencySpectrum,
    ) -> Self {
        debug_assert_eq!(frequency_spectrum.text_length(), tokens.len());
        debug_assert_eq!(frequency_spectrum.vocabulary_size(), vocabulary_size);
        Self {
            tokens,
            vocabulary_size,
            frequency_spectrum,
        }
    }

    /// The tokens, in text order.
    #[inline]
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Iterate over the surface forms.
    pub fn words(&self) -> impl DoubleEndedIterator<Item = &'a str> + 'a {
        self.tokens.iter().map(|t| t.word.as_str())
    }

    /// Number of tokens (N).
    #[inline]
    pub fn text_length(&self) -> usize {
        self.tokens.len()
    }

    /// Number of types (V).
    #[inline]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// The frequency spectrum.
    #[inline]
    pub fn frequency_spectrum(&self) -> &FrequencySpectrum {
        &self.frequency_spectrum
    }

    /// Check if the text has no tokens.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Word → frequency table.
pub(crate) fn word_frequencies(tokens: &[Token]) -> FxHashMap<&str, usize> {
    let mut frequencies: FxHashMap<&str, usize> = FxHashMap::default();
    for token in tokens {
        *frequencies.entry(token.word.as_str()).or_insert(0) += 1;
    }
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tokens() {
        let tokens = Token::from_words(&["a", "b", "a", "c", "b", "a"]);
        let text = Text::from_tokens(&tokens);

        assert_eq!(text.text_length(), 6);
        assert_eq!(text.vocabulary_size(), 3);
        let expected: FrequencySpectrum = [(1, 1), (2, 1), (3, 1)].into_iter().collect();
        assert_eq!(text.frequency_spectrum(), &expected);
    }

    #[test]
    fn test_spectrum_invariants() {
        let tokens = Token::from_words(&["x", "y", "x", "x", "z", "y", "w", "w", "w", "w"]);
        let text = Text::from_tokens(&tokens);
        let spectrum = text.frequency_spectrum();

        assert_eq!(spectrum.vocabulary_size(), text.vocabulary_size());
        assert_eq!(spectrum.text_length(), text.text_length());
        assert_eq!(spectrum.max_frequency(), Some(4));
        assert_eq!(spectrum.hapaxes(), 1);
        assert_eq!(spectrum.dislegomena(), 1);
    }

    #[test]
    fn test_empty_text() {
        let tokens: Vec<Token> = Vec::new();
        let text = Text::from_tokens(&tokens);
        assert!(text.is_empty());
        assert_eq!(text.vocabulary_size(), 0);
        assert!(text.frequency_spectrum().is_empty());
        assert_eq!(text.frequency_spectrum().max_frequency(), None);
    }

    #[test]
    fn test_shift_removes_empty_buckets() {
        let mut spectrum: FrequencySpectrum = [(1, 1), (2, 1)].into_iter().collect();
        spectrum.shift(1, 2);
        assert_eq!(spectrum.get(1), 0);
        assert_eq!(spectrum.get(2), 2);
        assert_eq!(spectrum.len(), 1);
    }
}

//! Sentence length and punctuation measures.

use crate::data::{Diagnostics, Measurement, MeasurementSet, Token, Warning};
use crate::stats::{average_measure, Summary};
use std::collections::BTreeSet;

/// Sentence length in words, i.e. tokens that are not punctuation.
pub fn sentence_length_words(sentence: &[Token], punctuation: &BTreeSet<String>) -> usize {
    sentence.iter().filter(|t| !t.has_tag(punctuation)).count()
}

/// Sentence length in tokens.
pub fn sentence_length_tokens(sentence: &[Token]) -> usize {
    sentence.len()
}

/// Sentence length in characters: token lengths plus one space between
/// adjacent tokens.
pub fn sentence_length_characters(sentence: &[Token]) -> usize {
    let chars: usize = sentence.iter().map(Token::char_len).sum();
    chars + sentence.len().saturating_sub(1)
}

/// Number of punctuation tokens in a sentence.
pub fn punctuation_count(sentence: &[Token], punctuation: &BTreeSet<String>) -> usize {
    sentence.iter().filter(|t| t.has_tag(punctuation)).count()
}

/// Punctuation tokens per token, pooled over all sentences.
pub fn punctuation_per_token(sentences: &[Vec<Token>], punctuation: &BTreeSet<String>) -> f64 {
    let (punct, tokens) = sentences.iter().fold((0, 0), |(p, n), s| {
        (p + punctuation_count(s, punctuation), n + s.len())
    });
    if tokens == 0 {
        return f64::NAN;
    }
    punct as f64 / tokens as f64
}

fn summarized(name: &str, summary: Summary, diagnostics: &mut Diagnostics) -> Measurement {
    diagnostics.undefined(name, summary.n_nan);
    Measurement::with_stdev(name, summary.mean, summary.stdev)
}

/// Compute sentence-level measures.
///
/// Punctuation-dependent measures are only reported when
/// `punctuation_tags` is non-empty.
pub fn compute(sentences: &[Vec<Token>], punctuation_tags: &BTreeSet<String>) -> MeasurementSet {
    let mut diagnostics = Diagnostics::new();
    if sentences.is_empty() {
        diagnostics.push(Warning::EmptyInput {
            family: "sentence".to_string(),
        });
        return MeasurementSet::new(Vec::new(), diagnostics);
    }

    let mut measurements = Vec::new();
    if !punctuation_tags.is_empty() {
        measurements.push(Measurement::value(
            "punctuation per token",
            punctuation_per_token(sentences, punctuation_tags),
        ));
        let words = average_measure(sentences, |s| {
            sentence_length_words(s, punctuation_tags) as f64
        });
        measurements.push(summarized("average sentence length (words)", words, &mut diagnostics));
        let punct = average_measure(sentences, |s| punctuation_count(s, punctuation_tags) as f64);
        measurements.push(summarized("punctuation per sentence", punct, &mut diagnostics));
    }
    let tokens = average_measure(sentences, |s| sentence_length_tokens(s) as f64);
    measurements.push(summarized("average sentence length (tokens)", tokens, &mut diagnostics));
    let chars = average_measure(sentences, |s| sentence_length_characters(s) as f64);
    measurements.push(summarized(
        "average sentence length (characters)",
        chars,
        &mut diagnostics,
    ));

    tracing::debug!(n_sentences = sentences.len(), "sentence measures computed");
    MeasurementSet::new(measurements, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_punctuation_tags;
    use approx::assert_relative_eq;

    fn sentence(tagged: &[(&str, &str)]) -> Vec<Token> {
        tagged.iter().map(|(w, p)| Token::new(*w, *p)).collect()
    }

    fn sample() -> Vec<Vec<Token>> {
        vec![
            sentence(&[("Er", "PRON"), ("kommt", "VERB"), (".", "PUNCT")]),
            sentence(&[("Ja", "INTJ"), (",", "PUNCT"), ("gut", "ADJ"), ("!", "PUNCT")]),
        ]
    }

    #[test]
    fn test_lengths() {
        let s = &sample()[0];
        let punct = default_punctuation_tags();
        assert_eq!(sentence_length_words(s, &punct), 2);
        assert_eq!(sentence_length_tokens(s), 3);
        // "Er kommt ."
        assert_eq!(sentence_length_characters(s), 10);
        assert_eq!(sentence_length_characters(&[]), 0);
    }

    #[test]
    fn test_compute() {
        let set = compute(&sample(), &default_punctuation_tags());
        assert_eq!(set.len(), 5);
        assert_relative_eq!(set.get("punctuation per token").unwrap().value, 3.0 / 7.0, epsilon = 1e-12);
        let words = set.get("average sentence length (words)").unwrap();
        assert_relative_eq!(words.value, 2.0, epsilon = 1e-12);
        assert_eq!(words.stdev, Some(0.0));
        let tokens = set.get("average sentence length (tokens)").unwrap();
        assert_relative_eq!(tokens.value, 3.5, epsilon = 1e-12);
        assert_relative_eq!(tokens.stdev.unwrap(), 0.5f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            set.get("punctuation per sentence").unwrap().value,
            1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_compute_without_punctuation_tags() {
        let set = compute(&sample(), &BTreeSet::new());
        assert_eq!(set.len(), 2);
        assert!(set.get("punctuation per token").is_none());
    }

    #[test]
    fn test_compute_empty() {
        let set = compute(&[], &default_punctuation_tags());
        assert!(set.is_empty());
        assert_eq!(set.diagnostics.len(), 1);
    }
}

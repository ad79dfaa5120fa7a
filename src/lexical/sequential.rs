//! Measures that scan the token sequence instead of a frequency summary.

use crate::data::Text;
use crate::error::Result;
use crate::stats::mean;
use crate::window::moving_windows;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Default factor threshold of MTLD.
pub const MTLD_FACTOR_SIZE: f64 = 0.72;

/// Moving-average type-token ratio (Covington and McFall 2010): the mean
/// TTR over every window of `window_size` tokens, advancing one token at
/// a time.
///
/// Fails if the window is larger than the text.
pub fn mattr(text: &Text, window_size: usize) -> Result<f64> {
    let ttrs: Vec<f64> = moving_windows(text.tokens(), window_size, 1)?
        .map(|w| w.vocabulary_size() as f64 / window_size as f64)
        .collect();
    Ok(mean(&ttrs))
}

/// Number of MTLD factors in one scan direction.
fn mtld_factors<'a, I>(words: I, factor_size: f64) -> f64
where
    I: Iterator<Item = &'a str>,
{
    let mut factors = 0.0;
    let mut types: FxHashSet<&str> = FxHashSet::default();
    let mut token_count = 0usize;
    for word in words {
        types.insert(word);
        token_count += 1;
        if types.len() as f64 / token_count as f64 <= factor_size {
            factors += 1.0;
            types.clear();
            token_count = 0;
        }
    }
    if token_count > 0 {
        let ttr = types.len() as f64 / token_count as f64;
        factors += (1.0 - ttr) / (1.0 - factor_size);
    }
    factors
}

/// Measure of textual lexical diversity (McCarthy and Jarvis 2010).
///
/// Tokens are scanned forward and backward; each direction yields
/// `N / factors` and the result is the mean of both. A scan that ends in
/// a partial segment contributes `(1 − ttr) / (1 − factor_size)` of a
/// factor. Undefined when a direction produces no factor at all.
pub fn mtld(text: &Text, factor_size: f64) -> f64 {
    let n = text.text_length() as f64;
    let forward = mtld_factors(text.words(), factor_size);
    let backward = mtld_factors(text.words().rev(), factor_size);
    if forward == 0.0 || backward == 0.0 {
        return f64::NAN;
    }
    (n / forward + n / backward) / 2.0
}

/// Mean token length in characters.
pub fn average_token_length(text: &Text) -> f64 {
    let n = text.text_length();
    if n == 0 {
        return f64::NAN;
    }
    let chars: usize = text.tokens().iter().map(|t| t.char_len()).sum();
    chars as f64 / n as f64
}

/// Default open word classes for lexical density (universal tags).
pub fn default_open_tags() -> BTreeSet<String> {
    ["ADJ", "ADV", "INTJ", "NOUN", "PROPN", "VERB"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

/// Proportion of content words: tokens whose POS tag or universal tag
/// belongs to `open_tags`.
pub fn lexical_density(text: &Text, open_tags: &BTreeSet<String>) -> f64 {
    let n = text.text_length();
    if n == 0 {
        return f64::NAN;
    }
    let content = text
        .tokens()
        .iter()
        .filter(|t| t.has_tag(open_tags))
        .count();
    content as f64 / n as f64
}

//! Dispersion of types across contiguous parts of a text.
//!
//! The text is cut into `n_parts` parts of `N / n_parts` tokens (floor
//! division; trailing tokens are not covered). Only types that occur in
//! the covered tokens enter the type × part frequency matrix, so every
//! row has a positive sum.

use crate::data::Text;
use crate::error::{ComplexityError, Result};
use nalgebra::DMatrix;
use rustc_hash::FxHashMap;

/// Default number of parts for the dispersion measures.
pub const DEFAULT_N_PARTS: usize = 10;

/// Row-normalized type × part frequency matrix: entry (t, p) is the share
/// of type t's occurrences that fall into part p.
fn relative_part_frequencies(text: &Text, n_parts: usize) -> Result<Option<DMatrix<f64>>> {
    if n_parts == 0 {
        return Err(ComplexityError::InvalidParameter(
            "number of parts must be positive".to_string(),
        ));
    }
    let part_size = text.text_length() / n_parts;
    if part_size == 0 {
        return Ok(None);
    }
    let covered = &text.tokens()[..part_size * n_parts];

    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for token in covered {
        let next = index.len();
        index.entry(token.word.as_str()).or_insert(next);
    }
    let mut frequencies = DMatrix::<f64>::zeros(index.len(), n_parts);
    for (part, chunk) in covered.chunks(part_size).enumerate() {
        for token in chunk {
            let row = index[token.word.as_str()];
            frequencies[(row, part)] += 1.0;
        }
    }
    for mut row in frequencies.row_iter_mut() {
        let total = row.sum();
        row /= total;
    }
    Ok(Some(frequencies))
}

/// Per-type DP scores: ½ · Σ_p |v_p − 1/n|.
fn dp_scores(text: &Text, n_parts: usize) -> Result<Option<Vec<f64>>> {
    let Some(relative) = relative_part_frequencies(text, n_parts)? else {
        return Ok(None);
    };
    let expected = 1.0 / n_parts as f64;
    let scores = relative
        .row_iter()
        .map(|row| row.iter().map(|v| (v - expected).abs()).sum::<f64>() / 2.0)
        .collect();
    Ok(Some(scores))
}

fn mean_or_nan(scores: Option<Vec<f64>>) -> f64 {
    match scores {
        Some(s) if !s.is_empty() => s.iter().sum::<f64>() / s.len() as f64,
        _ => f64::NAN,
    }
}

/// Gries' DP (2008), averaged over all types.
///
/// 0 for a type spread exactly evenly, approaching 1 for a type
/// concentrated in one part.
pub fn gries_dp(text: &Text, n_parts: usize) -> Result<f64> {
    Ok(mean_or_nan(dp_scores(text, n_parts)?))
}

/// DP normalized to [0, 1] (Lijffijt and Gries 2012), averaged over all
/// types. Undefined for a single part.
pub fn gries_dp_norm(text: &Text, n_parts: usize) -> Result<f64> {
    let dp = gries_dp(text, n_parts)?;
    let norm = 1.0 - 1.0 / n_parts as f64;
    if norm == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(dp / norm)
}

/// Kullback-Leibler divergence of each type's part distribution from the
/// uniform distribution, in bits, averaged over all types.
pub fn kl_divergence(text: &Text, n_parts: usize) -> Result<f64> {
    let Some(relative) = relative_part_frequencies(text, n_parts)? else {
        return Ok(f64::NAN);
    };
    let n = n_parts as f64;
    let scores: Vec<f64> = relative
        .row_iter()
        .map(|row| {
            row.iter()
                .filter(|&&v| v > 0.0)
                .map(|&v| v * (v * n).log2())
                .sum()
        })
        .collect();
    Ok(mean_or_nan(Some(scores)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Token;
    use approx::assert_relative_eq;

    fn tokens(s: &str) -> Vec<Token> {
        Token::from_words(&s.split_whitespace().collect::<Vec<_>>())
    }

    #[test]
    fn test_even_dispersion() {
        let toks = tokens("a b a b a b");
        let text = Text::from_tokens(&toks);
        assert_relative_eq!(gries_dp(&text, 3).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(kl_divergence(&text, 3).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_concentrated_dispersion() {
        // a only in part 0, b only in part 1
        let toks = tokens("a a b b");
        let text = Text::from_tokens(&toks);
        // ½ (|1 − ½| + |0 − ½|) = ½
        assert_relative_eq!(gries_dp(&text, 2).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(gries_dp_norm(&text, 2).unwrap(), 1.0, epsilon = 1e-12);
        // 1 · log2(2) = 1 bit
        assert_relative_eq!(kl_divergence(&text, 2).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_truncated_tail_is_ignored() {
        // part size 2: "z" is not covered and does not become a row
        let toks = tokens("a a b b z");
        let text = Text::from_tokens(&toks);
        assert_relative_eq!(gries_dp(&text, 2).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_parts() {
        let toks = tokens("a b");
        let text = Text::from_tokens(&toks);
        assert!(gries_dp(&text, 0).is_err());
        assert!(gries_dp(&text, 3).unwrap().is_nan());
        assert!(gries_dp_norm(&text, 1).unwrap().is_nan());
    }
}

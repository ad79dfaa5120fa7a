//! Compression-based lexical measures.

use crate::data::Text;
use crate::error::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// gzip compression ratio: compressed size / original size of the
/// space-joined tokens. Repetitive text compresses better and yields a
/// lower ratio. NaN for an empty text.
pub fn gzip_compression(text: &Text) -> Result<f64> {
    let original = text.words().collect::<Vec<_>>().join(" ");
    if original.is_empty() {
        return Ok(f64::NAN);
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(original.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(compressed.len() as f64 / original.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Token;
    use crate::lexical::bootstrap;
    use crate::window::Strategy;

    fn repetitive(n: usize) -> Vec<Token> {
        let words: Vec<String> = (0..n).map(|i| format!("w{}", i % 3)).collect();
        Token::from_words(&words)
    }

    fn varied(n: usize) -> Vec<Token> {
        let words: Vec<String> = (0..n).map(|i| format!("w{}", i * 7919 % 10007)).collect();
        Token::from_words(&words)
    }

    #[test]
    fn test_repetitive_text_compresses_better() {
        let rep = repetitive(500);
        let var = varied(500);
        let rep_ratio = gzip_compression(&Text::from_tokens(&rep)).unwrap();
        let var_ratio = gzip_compression(&Text::from_tokens(&var)).unwrap();
        assert!(rep_ratio > 0.0);
        assert!(rep_ratio < var_ratio);
    }

    #[test]
    fn test_empty_text() {
        let tokens: Vec<Token> = Vec::new();
        assert!(gzip_compression(&Text::from_tokens(&tokens)).unwrap().is_nan());
    }

    #[test]
    fn test_bootstrap_over_windows() {
        let rep = repetitive(1000);
        let var = varied(1000);
        let measure = |t: &Text| gzip_compression(t).unwrap_or(f64::NAN);
        let rep_b = bootstrap(measure, &rep, 200, Strategy::Spread).unwrap();
        let var_b = bootstrap(measure, &var, 200, Strategy::Spread).unwrap();
        assert_eq!(rep_b.n_windows(), 5);
        assert!(rep_b.mean < var_b.mean);
        assert_eq!(rep_b.n_nan, 0);
    }
}

//! Overlapping windows with incrementally maintained frequency spectra.

use super::check_window;
use crate::data::{word_frequencies, FrequencySpectrum, Text, Token};
use crate::error::{ComplexityError, Result};
use rustc_hash::FxHashMap;

/// Iterator over moving windows.
///
/// Each step swaps the frequency contribution of the outgoing and incoming
/// tokens, moving a type between adjacent spectrum buckets, so the cost per
/// step is proportional to `step_size` rather than `window_size`.
#[derive(Debug, Clone)]
pub struct MovingWindows<'a> {
    tokens: &'a [Token],
    window_size: usize,
    step_size: usize,
    start: usize,
    frequencies: FxHashMap<&'a str, usize>,
    spectrum: FrequencySpectrum,
    started: bool,
}

impl<'a> MovingWindows<'a> {
    fn new(tokens: &'a [Token], window_size: usize, step_size: usize) -> Self {
        let frequencies = word_frequencies(&tokens[..window_size]);
        let spectrum = FrequencySpectrum::from_frequencies(frequencies.values());
        Self {
            tokens,
            window_size,
            step_size,
            start: 0,
            frequencies,
            spectrum,
            started: false,
        }
    }

    /// Number of windows this iterator yields in total.
    pub fn n_windows(&self) -> usize {
        (self.tokens.len() - self.window_size) / self.step_size + 1
    }

    fn advance(&mut self) {
        for j in 0..self.step_size {
            let old = self.tokens[self.start + j].word.as_str();
            let new = self.tokens[self.start + self.window_size + j].word.as_str();
            if old == new {
                continue;
            }

            let f_new = self.frequencies.entry(new).or_insert(0);
            *f_new += 1;
            let f_new = *f_new;
            if f_new > 1 {
                self.spectrum.shift(f_new - 1, f_new);
            } else {
                self.spectrum.add(1);
            }

            if let Some(f_old) = self.frequencies.get_mut(old) {
                *f_old -= 1;
                let f_old = *f_old;
                self.spectrum.shift(f_old + 1, f_old);
                if f_old == 0 {
                    self.frequencies.remove(old);
                }
            }
        }
        self.start += self.step_size;
    }
}

impl<'a> Iterator for MovingWindows<'a> {
    type Item = Text<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            if self.start + self.step_size + self.window_size > self.tokens.len() {
                return None;
            }
            self.advance();
        }
        self.started = true;
        let window = &self.tokens[self.start..self.start + self.window_size];
        Some(Text::from_parts(
            window,
            self.frequencies.len(),
            self.spectrum.clone(),
        ))
    }
}

/// Moving windows of `window_size` tokens advancing by `step_size`.
///
/// The first window covers the first `window_size` tokens; windows that
/// would extend past the end of the text are not produced.
pub fn moving_windows(
    tokens: &[Token],
    window_size: usize,
    step_size: usize,
) -> Result<MovingWindows<'_>> {
    check_window(window_size, tokens.len())?;
    if step_size == 0 {
        return Err(ComplexityError::InvalidParameter(
            "step size must be positive".to_string(),
        ));
    }
    Ok(MovingWindows::new(tokens, window_size, step_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<Token> {
        Token::from_words(&s.split_whitespace().collect::<Vec<_>>())
    }

    fn windows_as_strings(tokens: &[Token], size: usize, step: usize) -> Vec<String> {
        moving_windows(tokens, size, step)
            .unwrap()
            .map(|w| w.words().collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn test_step_one() {
        let tokens = words("a b c d e f g h i j k");
        let expected = vec![
            "a b c d", "b c d e", "c d e f", "d e f g", "e f g h", "f g h i", "g h i j", "h i j k",
        ];
        assert_eq!(windows_as_strings(&tokens, 4, 1), expected);
    }

    #[test]
    fn test_step_two() {
        let tokens = words("a b c d e f g h i j k");
        assert_eq!(
            windows_as_strings(&tokens, 4, 2),
            vec!["a b c d", "c d e f", "e f g h", "g h i j"]
        );
        let tokens = words("a b c d e f g h i j k l");
        let wins = moving_windows(&tokens, 4, 2).unwrap();
        assert_eq!(wins.n_windows(), 5);
        assert_eq!(wins.count(), 5);
    }

    #[test]
    fn test_spectrum_matches_recomputation() {
        let tokens = words(
            "d c b i c i i h b a d a i e b j h d a j j h a f i j e f e b f b e c d e c f g j \
             i g h d h i g g h f d c i j b h g b e e d f h a h j c a j c h i a f c j g d",
        );
        for (size, step) in [(1, 1), (5, 1), (10, 1), (10, 3), (7, 7), (30, 4)] {
            let wins = moving_windows(&tokens, size, step).unwrap();
            let expected_count = wins.n_windows();
            let mut count = 0;
            for (i, w) in wins.enumerate() {
                let start = i * step;
                let fresh = Text::from_tokens(&tokens[start..start + size]);
                assert_eq!(w, fresh, "window {} (size {}, step {})", i, size, step);
                count += 1;
            }
            assert_eq!(count, expected_count);
        }
    }

    #[test]
    fn test_whole_text_window() {
        let tokens = words("a b a");
        let wins: Vec<_> = moving_windows(&tokens, 3, 1).unwrap().collect();
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].vocabulary_size(), 2);
    }

    #[test]
    fn test_invalid_parameters() {
        let tokens = words("a b c");
        assert!(moving_windows(&tokens, 4, 1).is_err());
        assert!(moving_windows(&tokens, 2, 0).is_err());
    }
}

//! Non-overlapping windows with deterministic placement.

use super::check_window;
use crate::data::{Text, Token, Warning};
use crate::error::{ComplexityError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Below this many windows bootstrap confidence intervals are unreliable.
pub const MIN_RELIABLE_WINDOWS: usize = 5;

/// Where the tokens that do not fill a whole window are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Drop leftover tokens at the end of the text.
    Left,
    /// Drop leftover tokens at the beginning of the text.
    Right,
    /// Drop leftover tokens evenly at the beginning and the end.
    Center,
    /// Drop leftover tokens between the windows. The only placement
    /// without positional bias.
    #[default]
    Spread,
}

impl Strategy {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Spread => "spread",
        }
    }

    /// Number of leftover tokens skipped before window `i`.
    ///
    /// Uses floor division throughout, so `center` puts the odd token at
    /// the end and `spread` may leave gaps of unequal size.
    fn skip(&self, i: usize, n_windows: usize, rest: usize) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => rest,
            Self::Center => rest / 2,
            Self::Spread if n_windows > 1 => (i * rest) / (n_windows - 1),
            Self::Spread => rest / 2,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ComplexityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            "spread" => Ok(Self::Spread),
            other => Err(ComplexityError::InvalidParameter(format!(
                "unknown window strategy '{}'",
                other
            ))),
        }
    }
}

/// Iterator over disjoint windows of a token sequence.
#[derive(Debug, Clone)]
pub struct DisjointWindows<'a> {
    tokens: &'a [Token],
    window_size: usize,
    strategy: Strategy,
    n_windows: usize,
    rest: usize,
    next: usize,
}

impl<'a> DisjointWindows<'a> {
    /// Total number of windows this iterator yields.
    pub fn n_windows(&self) -> usize {
        self.n_windows
    }

    /// Number of tokens not covered by any window.
    pub fn dropped_tokens(&self) -> usize {
        self.rest
    }

    /// Whether there are enough windows for a reliable confidence interval.
    pub fn is_reliable(&self) -> bool {
        self.n_windows >= MIN_RELIABLE_WINDOWS
    }

    /// Warning to report when there are fewer than five windows.
    pub fn reliability_warning(&self) -> Option<Warning> {
        (!self.is_reliable()).then(|| Warning::FewWindows {
            n_windows: self.n_windows,
            text_length: self.tokens.len(),
            window_size: self.window_size,
        })
    }

    /// Start offset of window `i`.
    fn start(&self, i: usize) -> usize {
        self.strategy.skip(i, self.n_windows, self.rest) + i * self.window_size
    }
}

impl<'a> Iterator for DisjointWindows<'a> {
    type Item = Text<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.n_windows {
            return None;
        }
        let start = self.start(self.next);
        self.next += 1;
        Some(Text::from_tokens(&self.tokens[start..start + self.window_size]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n_windows - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DisjointWindows<'_> {}

/// Partition `tokens` into `len / window_size` disjoint windows placed
/// according to `strategy`.
///
/// Fails if `window_size` is zero or exceeds the number of tokens.
pub fn disjoint_windows(
    tokens: &[Token],
    window_size: usize,
    strategy: Strategy,
) -> Result<DisjointWindows<'_>> {
    check_window(window_size, tokens.len())?;
    let n_windows = tokens.len() / window_size;
    let rest = tokens.len() % window_size;
    tracing::debug!(
        n_windows,
        rest,
        window_size,
        strategy = strategy.name(),
        "disjoint windows"
    );
    Ok(DisjointWindows {
        tokens,
        window_size,
        strategy,
        n_windows,
        rest,
        next: 0,
    })
}

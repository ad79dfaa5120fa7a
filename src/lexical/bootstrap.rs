//! Resampling over disjoint windows (Evert et al. 2017).

use crate::data::{Text, Token, Warning};
use crate::error::Result;
use crate::lexical::formulas::type_token_ratio;
use crate::stats::Summary;
use crate::window::{disjoint_windows, Strategy};
use serde::{Deserialize, Serialize};

/// Per-window results of one measure and their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bootstrap {
    /// Mean over the defined window values.
    pub mean: f64,
    /// Half-width of the 95% confidence interval of the mean.
    pub confidence_interval: f64,
    /// One value per window, in window order, NaNs included.
    pub results: Vec<f64>,
    /// Number of undefined window values excluded from the summary.
    pub n_nan: usize,
    /// Set when there were too few windows for a reliable interval.
    pub warning: Option<Warning>,
}

impl Bootstrap {
    /// Summarize per-window values.
    pub(crate) fn from_results(results: Vec<f64>, warning: Option<Warning>) -> Self {
        let summary = Summary::from_values(results.iter().copied());
        Self {
            mean: summary.mean,
            confidence_interval: summary.confidence_interval(),
            results,
            n_nan: summary.n_nan,
            warning,
        }
    }

    /// Number of windows.
    pub fn n_windows(&self) -> usize {
        self.results.len()
    }

    /// Whether there were at least five windows.
    pub fn is_reliable(&self) -> bool {
        self.warning.is_none()
    }
}

/// Apply `measure` to every disjoint window of `tokens` and summarize.
///
/// The confidence interval is `1.96 · stdev / √n`, i.e. it treats the
/// window values as draws from a normal sampling distribution. With a
/// single window the interval is 0.
///
/// # Arguments
/// * `measure` - Function evaluated on each window
/// * `tokens` - The token sequence
/// * `window_size` - Tokens per window
/// * `strategy` - Where leftover tokens are dropped
///
/// # Returns
/// Mean, confidence interval and raw window values
pub fn bootstrap<F>(
    mut measure: F,
    tokens: &[Token],
    window_size: usize,
    strategy: Strategy,
) -> Result<Bootstrap>
where
    F: FnMut(&Text) -> f64,
{
    let windows = disjoint_windows(tokens, window_size, strategy)?;
    let warning = windows.reliability_warning();
    let results = windows.map(|w| measure(&w)).collect();
    Ok(Bootstrap::from_results(results, warning))
}

/// Standardized type-token ratio (Kubát and Milička 2013): the
/// bootstrapped TTR.
pub fn sttr(tokens: &[Token], window_size: usize, strategy: Strategy) -> Result<Bootstrap> {
    bootstrap(type_token_ratio, tokens, window_size, strategy)
}

//! Aggregation statistics and numeric helpers shared by all measure families.

mod root;
mod special;

pub use root::{brent, RootResult};
pub use special::{hypergeom_pmf, LnBetaCache};

use serde::{Deserialize, Serialize};

/// z-value of the two-sided 95% interval under a normal approximation.
pub const Z_95: f64 = 1.96;

/// Mean and sample standard deviation of a set of values, with undefined
/// (NaN) values excluded and counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Mean of the defined values; NaN if there are none.
    pub mean: f64,
    /// Sample standard deviation (n - 1); 0 for a single value, NaN for none.
    pub stdev: f64,
    /// Number of defined values.
    pub n: usize,
    /// Number of excluded NaN values.
    pub n_nan: usize,
}

impl Summary {
    /// Summarize values, skipping NaNs.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut n_nan = 0;
        let defined: Vec<f64> = values
            .into_iter()
            .filter(|v| {
                let nan = v.is_nan();
                if nan {
                    n_nan += 1;
                }
                !nan
            })
            .collect();
        let n = defined.len();
        let mean = mean(&defined);
        let stdev = match n {
            0 => f64::NAN,
            1 => 0.0,
            _ => {
                let ss: f64 = defined.iter().map(|v| (v - mean).powi(2)).sum();
                (ss / (n - 1) as f64).sqrt()
            }
        };
        Self {
            mean,
            stdev,
            n,
            n_nan,
        }
    }

    /// 95% confidence interval half-width of the mean:
    /// `1.96 · stdev / sqrt(n)`.
    ///
    /// This treats the window-level estimates as a sample from a normal
    /// sampling distribution. A single value yields 0.
    pub fn confidence_interval(&self) -> f64 {
        match self.n {
            0 => f64::NAN,
            1 => 0.0,
            n => Z_95 * self.stdev / (n as f64).sqrt(),
        }
    }
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 95% confidence interval half-width of the mean of `values`.
pub fn confidence_interval(values: &[f64]) -> f64 {
    Summary::from_values(values.iter().copied()).confidence_interval()
}

/// Summary of a per-item measure over a collection.
pub fn average_measure<T, F>(items: &[T], measure: F) -> Summary
where
    F: Fn(&T) -> f64,
{
    Summary::from_values(items.iter().map(measure))
}

/// Summary of per-item counts plus the pooled summary of all per-item
/// length samples.
pub fn average_measure_and_length<T, F>(items: &[T], measure: F) -> (Summary, Summary)
where
    F: Fn(&T) -> (usize, Vec<usize>),
{
    let mut counts = Vec::with_capacity(items.len());
    let mut lengths = Vec::new();
    for item in items {
        let (count, item_lengths) = measure(item);
        counts.push(count as f64);
        lengths.extend(item_lengths.into_iter().map(|l| l as f64));
    }
    (Summary::from_values(counts), Summary::from_values(lengths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary() {
        let s = Summary::from_values(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(s.mean, 5.0, epsilon = 1e-12);
        assert_relative_eq!(s.stdev, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_eq!(s.n, 8);
        assert_eq!(s.n_nan, 0);
    }

    #[test]
    fn test_summary_excludes_nan() {
        let s = Summary::from_values(vec![1.0, f64::NAN, 3.0]);
        assert_relative_eq!(s.mean, 2.0, epsilon = 1e-12);
        assert_eq!(s.n, 2);
        assert_eq!(s.n_nan, 1);
    }

    #[test]
    fn test_single_value_has_zero_interval() {
        let s = Summary::from_values(vec![0.7]);
        assert_eq!(s.stdev, 0.0);
        assert_eq!(s.confidence_interval(), 0.0);
    }

    #[test]
    fn test_empty_summary() {
        let s = Summary::from_values(Vec::new());
        assert!(s.mean.is_nan());
        assert!(s.stdev.is_nan());
        assert!(s.confidence_interval().is_nan());
    }

    #[test]
    fn test_confidence_interval() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let sd = (5.0f64 / 3.0).sqrt();
        assert_relative_eq!(confidence_interval(&values), 1.96 * sd / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_average_measure_and_length() {
        let items = vec![(2, vec![3, 5]), (0, vec![]), (1, vec![4])];
        let (counts, lengths) = average_measure_and_length(&items, |(c, l)| (*c, l.clone()));
        assert_relative_eq!(counts.mean, 1.0, epsilon = 1e-12);
        assert_eq!(lengths.n, 3);
        assert_relative_eq!(lengths.mean, 4.0, epsilon = 1e-12);
    }
}

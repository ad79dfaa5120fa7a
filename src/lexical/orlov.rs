//! Orlov's Z (Orlov 1983): the text length at which Zipf's law with the
//! observed relative frequency of the most frequent word predicts the
//! observed vocabulary size.

use crate::data::Text;
use crate::stats::brent;

/// Default iteration budget of the root search.
pub const ORLOV_MAX_ITERATIONS: usize = 100;
/// Default absolute tolerance on z.
pub const ORLOV_TOLERANCE: f64 = 1.0;

fn objective(z: f64, n: f64, v: f64, p_star: f64) -> f64 {
    if z <= 0.0 {
        return f64::NAN;
    }
    (z / (p_star * z).ln()) * (n / (n - z)) * (n / z).ln() - v
}

/// Solve `(z / ln(p*·z)) · (N / (N − z)) · ln(N / z) = V` for z.
///
/// The bracket is chosen among the probes z = 10^i + 0.1, i = 1..9: the
/// lower end is the probe with the largest negative value, the upper end
/// the probe above it with the smallest positive value. Undefined when no
/// such bracket exists.
pub fn orlov_z(text: &Text, max_iterations: usize, tolerance: f64) -> f64 {
    let Some(most_frequent) = text.frequency_spectrum().max_frequency() else {
        return f64::NAN;
    };
    let n = text.text_length() as f64;
    let v = text.vocabulary_size() as f64;
    let p_star = most_frequent as f64 / n;
    let f = |z: f64| objective(z, n, v, p_star);

    let probes: Vec<(f64, f64)> = (1..10)
        .map(|i| {
            let z = 10f64.powi(i) + 0.1;
            (z, f(z))
        })
        .collect();
    let lower = probes
        .iter()
        .filter(|(_, fz)| *fz < 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1));
    let Some(&(z_min, _)) = lower else {
        return f64::NAN;
    };
    let upper = probes
        .iter()
        .filter(|(z, fz)| *fz > 0.0 && *z > z_min)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    let Some(&(z_max, _)) = upper else {
        return f64::NAN;
    };

    match brent(f, z_min, z_max, tolerance, max_iterations) {
        Some(result) => {
            if !result.converged {
                tracing::debug!(
                    iterations = result.iterations,
                    "Orlov's Z did not reach the requested tolerance"
                );
            }
            result.root
        }
        None => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Token;
    use approx::assert_relative_eq;

    fn zipfian_tokens(freqs: &[usize]) -> Vec<Token> {
        let words: Vec<String> = freqs
            .iter()
            .enumerate()
            .flat_map(|(i, &f)| std::iter::repeat(format!("w{}", i)).take(f))
            .collect();
        Token::from_words(&words)
    }

    #[test]
    fn test_orlov_z() {
        let mut freqs = vec![10, 5, 5, 3, 3, 2, 2, 2];
        freqs.extend(std::iter::repeat(1).take(60));
        let toks = zipfian_tokens(&freqs);
        let text = Text::from_tokens(&toks);
        let z = orlov_z(&text, ORLOV_MAX_ITERATIONS, ORLOV_TOLERANCE);
        assert_relative_eq!(z, 60343.93, epsilon = 2.0);

        let precise = orlov_z(&text, ORLOV_MAX_ITERATIONS, 1e-6);
        let (n, v, p) = (92.0, 68.0, 10.0 / 92.0);
        assert!(objective(precise, n, v, p).abs() < 1e-3);
    }

    fn probe_signs(text: &Text) -> Vec<f64> {
        let n = text.text_length() as f64;
        let v = text.vocabulary_size() as f64;
        let p_star = text.frequency_spectrum().max_frequency().unwrap_or(0) as f64 / n;
        (1..10)
            .map(|i| objective(10f64.powi(i) + 0.1, n, v, p_star).signum())
            .collect()
    }

    #[test]
    fn test_orlov_z_without_bracket() {
        // every probe lies below the root
        let mut freqs = vec![20];
        freqs.extend(std::iter::repeat(1).take(200));
        let toks = zipfian_tokens(&freqs);
        let text = Text::from_tokens(&toks);
        assert!(probe_signs(&text).iter().all(|&s| s == -1.0));
        assert!(orlov_z(&text, ORLOV_MAX_ITERATIONS, ORLOV_TOLERANCE).is_nan());

        // every probe lies above the root
        let toks = zipfian_tokens(&[1, 1, 1, 1, 1]);
        let text = Text::from_tokens(&toks);
        assert!(probe_signs(&text).iter().all(|&s| s == 1.0));
        assert!(orlov_z(&text, ORLOV_MAX_ITERATIONS, ORLOV_TOLERANCE).is_nan());
    }

    #[test]
    fn test_orlov_z_iteration_budget() {
        let mut freqs = vec![10, 5, 5, 3, 3, 2, 2, 2];
        freqs.extend(std::iter::repeat(1).take(60));
        let toks = zipfian_tokens(&freqs);
        let text = Text::from_tokens(&toks);
        // one step is not enough, but the last iterate is still inside the bracket
        let z = orlov_z(&text, 1, 1e-9);
        assert!(z.is_finite());
        assert!(z > 10.1 && z < 1e9 + 0.1);
    }

    #[test]
    fn test_orlov_z_empty() {
        let toks: Vec<Token> = Vec::new();
        assert!(orlov_z(&Text::from_tokens(&toks), ORLOV_MAX_ITERATIONS, ORLOV_TOLERANCE).is_nan());
    }
}

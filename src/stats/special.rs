//! Log-space special functions for hypergeometric probabilities.

use rustc_hash::FxHashMap;
use statrs::function::gamma::ln_gamma;

/// Bounded memo table for `ln B(a, b)` over positive integer arguments.
///
/// HD-D evaluates the same beta terms for every window of a text, so the
/// table is kept by the caller across windows. When the table is full it
/// is cleared rather than evicting single entries.
#[derive(Debug, Clone)]
pub struct LnBetaCache {
    table: FxHashMap<(u64, u64), f64>,
    capacity: usize,
}

impl Default for LnBetaCache {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

impl LnBetaCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity: capacity.max(1),
        }
    }

    /// `ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a + b)` for `a, b ≥ 1`.
    pub fn ln_beta(&mut self, a: u64, b: u64) -> f64 {
        // B is symmetric
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(&v) = self.table.get(&key) {
            return v;
        }
        let (x, y) = (key.0 as f64, key.1 as f64);
        let value = ln_gamma(x) + ln_gamma(y) - ln_gamma(x + y);
        if self.table.len() >= self.capacity {
            self.table.clear();
        }
        self.table.insert(key, value);
        value
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Hypergeometric probability of drawing exactly `k` successes in `draws`
/// draws without replacement from a population of `population` items of
/// which `successes` are successes.
///
/// Evaluated as a sum of log-beta terms so that realistic corpus sizes do
/// not overflow binomial coefficients.
pub fn hypergeom_pmf(
    k: u64,
    population: u64,
    successes: u64,
    draws: u64,
    cache: &mut LnBetaCache,
) -> f64 {
    if successes > population || draws > population {
        return f64::NAN;
    }
    let failures = population - successes;
    if k > successes || k > draws || draws - k > failures {
        return 0.0;
    }
    let ln_p = cache.ln_beta(successes + 1, 1)
        + cache.ln_beta(failures + 1, 1)
        + cache.ln_beta(population - draws + 1, draws + 1)
        - cache.ln_beta(k + 1, successes - k + 1)
        - cache.ln_beta(draws - k + 1, failures - draws + k + 1)
        - cache.ln_beta(population + 1, 1);
    ln_p.exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn binom(n: u64, k: u64) -> f64 {
        (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
    }

    #[test]
    fn test_ln_beta() {
        let mut cache = LnBetaCache::default();
        // B(2, 3) = 1/12
        assert_relative_eq!(cache.ln_beta(2, 3), (1.0f64 / 12.0).ln(), epsilon = 1e-10);
        assert_relative_eq!(cache.ln_beta(3, 2), (1.0f64 / 12.0).ln(), epsilon = 1e-10);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_hypergeom_matches_binomials() {
        let mut cache = LnBetaCache::default();
        let (pop, succ, draws) = (50u64, 7u64, 10u64);
        for k in 0..=7 {
            let expected = binom(succ, k) * binom(pop - succ, draws - k) / binom(pop, draws);
            assert_relative_eq!(
                hypergeom_pmf(k, pop, succ, draws, &mut cache),
                expected,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_hypergeom_impossible_draws() {
        let mut cache = LnBetaCache::default();
        // only 3 failures, so 5 draws must contain a success
        assert_eq!(hypergeom_pmf(0, 10, 7, 5, &mut cache), 0.0);
        assert!(hypergeom_pmf(0, 10, 7, 11, &mut cache).is_nan());
    }

    #[test]
    fn test_cache_is_bounded() {
        let mut cache = LnBetaCache::with_capacity(4);
        for a in 1..20 {
            cache.ln_beta(a, 1);
        }
        assert!(cache.len() <= 4);
    }

    #[test]
    fn test_large_population_is_finite() {
        let mut cache = LnBetaCache::default();
        let p = hypergeom_pmf(0, 1_000_000, 120, 42, &mut cache);
        assert!(p.is_finite());
        assert!(p > 0.99 && p < 1.0);
    }
}

//! Closed-form lexical richness indices over length, vocabulary size and
//! frequency spectrum.
//!
//! Every function is total: undefined cases yield NaN, never a panic.

use crate::data::Text;
use crate::stats::{hypergeom_pmf, LnBetaCache};

/// Map infinities (division by zero, log of zero) to NaN.
#[inline]
fn defined(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        f64::NAN
    }
}

#[inline]
fn n_v(text: &Text) -> (f64, f64) {
    (text.text_length() as f64, text.vocabulary_size() as f64)
}

// ------------------------------------------------------------------
// Text length and vocabulary size
// ------------------------------------------------------------------

/// Type-token ratio: V / N.
pub fn type_token_ratio(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined(v / n)
}

/// Guiraud's R (1954): V / √N.
pub fn guiraud_r(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined(v / n.sqrt())
}

/// Herdan's C (1960, 1964): log V / log N.
pub fn herdan_c(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined(v.ln() / n.ln())
}

/// Dugast's k (1979): log V / log log N.
pub fn dugast_k(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined(v.ln() / n.ln().ln())
}

/// Maas' a² (1972): (log N − log V) / log² N.
pub fn maas_a2(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined((n.ln() - v.ln()) / n.ln().powi(2))
}

/// Dugast's U (1978, 1979): log² N / (log N − log V).
///
/// Undefined when every token is a distinct type (N = V).
pub fn dugast_u(text: &Text) -> f64 {
    if text.text_length() == text.vocabulary_size() {
        return f64::NAN;
    }
    let (n, v) = n_v(text);
    defined(n.ln().powi(2) / (n.ln() - v.ln()))
}

/// Tuldava's LN (1977): (1 − V²) / (V² · log N).
pub fn tuldava_ln(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    let v2 = v * v;
    defined((1.0 - v2) / (v2 * n.ln()))
}

/// Default exponent of Brunet's W.
pub const BRUNET_A: f64 = -0.172;

/// Brunet's W (1978): N^(V^a), conventionally with a = −0.172.
pub fn brunet_w(text: &Text, a: f64) -> f64 {
    let (n, v) = n_v(text);
    defined(n.powf(v.powf(a)))
}

/// Corrected type-token ratio (Carroll 1964): V / √(2N).
pub fn cttr(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined(v / (2.0 * n).sqrt())
}

/// Summer's S: log log V / log log N.
pub fn summer_s(text: &Text) -> f64 {
    let (n, v) = n_v(text);
    defined(v.ln().ln() / n.ln().ln())
}

// ------------------------------------------------------------------
// Parts of the frequency spectrum
// ------------------------------------------------------------------

/// Sichel's S (1975): share of dis legomena among the types.
///
/// Zero when no type occurs exactly twice.
pub fn sichel_s(text: &Text) -> f64 {
    let v = text.vocabulary_size() as f64;
    defined(text.frequency_spectrum().dislegomena() as f64 / v)
}

/// Michéa's M (1969, 1971): V / V₂.
///
/// Undefined when no type occurs exactly twice.
pub fn michea_m(text: &Text) -> f64 {
    let v2 = text.frequency_spectrum().dislegomena();
    if v2 == 0 {
        return f64::NAN;
    }
    text.vocabulary_size() as f64 / v2 as f64
}

/// Honoré's H (1979): 100 · log N / (1 − V₁ / V).
///
/// Undefined when every type is a hapax legomenon.
pub fn honore_h(text: &Text) -> f64 {
    let hapaxes = text.frequency_spectrum().hapaxes();
    if hapaxes == text.vocabulary_size() {
        return f64::NAN;
    }
    let (n, v) = n_v(text);
    defined(100.0 * (n.ln() / (1.0 - hapaxes as f64 / v)))
}

// ------------------------------------------------------------------
// The whole frequency spectrum
// ------------------------------------------------------------------

/// Shannon entropy of the word distribution in bits.
pub fn entropy(text: &Text) -> f64 {
    let n = text.text_length() as f64;
    if n == 0.0 {
        return f64::NAN;
    }
    text.frequency_spectrum()
        .iter()
        .map(|(freq, freq_size)| {
            let p = freq as f64 / n;
            freq_size as f64 * -p.log2() * p
        })
        .sum()
}

/// Evenness (normalized entropy): entropy / log₂ V.
pub fn evenness(text: &Text) -> f64 {
    let v = text.vocabulary_size() as f64;
    defined(entropy(text) / v.log2())
}

fn sum_squared_probabilities(text: &Text) -> f64 {
    let n = text.text_length() as f64;
    text.frequency_spectrum()
        .iter()
        .map(|(freq, freq_size)| freq_size as f64 * (freq as f64 / n).powi(2))
        .sum()
}

/// Yule's K (1944): 10⁴ · (Σ V_f (f/N)² − 1/N).
pub fn yule_k(text: &Text) -> f64 {
    let n = text.text_length() as f64;
    defined(10_000.0 * (sum_squared_probabilities(text) - 1.0 / n))
}

/// Simpson's D (1949): Σ V_f · (f/N) · ((f − 1)/(N − 1)).
pub fn simpson_d(text: &Text) -> f64 {
    let n = text.text_length() as f64;
    let d: f64 = text
        .frequency_spectrum()
        .iter()
        .map(|(freq, freq_size)| {
            let f = freq as f64;
            freq_size as f64 * (f / n) * ((f - 1.0) / (n - 1.0))
        })
        .sum();
    defined(d)
}

/// Herdan's Vm (1955): √(Σ V_f (f/N)² − 1/V).
pub fn herdan_vm(text: &Text) -> f64 {
    let v = text.vocabulary_size() as f64;
    defined((sum_squared_probabilities(text) - 1.0 / v).sqrt())
}

/// Default sample size of HD-D.
pub const HDD_SAMPLE_SIZE: usize = 42;

/// HD-D (McCarthy and Jarvis 2010): for every type, the probability of
/// drawing it at least once in a random sample of `sample_size` tokens,
/// divided by the sample size, summed over all types.
///
/// Undefined when the text is shorter than the sample.
pub fn hdd(text: &Text, sample_size: usize, cache: &mut LnBetaCache) -> f64 {
    let n = text.text_length();
    if sample_size == 0 || n < sample_size {
        return f64::NAN;
    }
    let s = sample_size as f64;
    text.frequency_spectrum()
        .iter()
        .map(|(freq, freq_size)| {
            let p_absent = hypergeom_pmf(0, n as u64, freq as u64, sample_size as u64, cache);
            freq_size as f64 * (1.0 - p_absent) / s
        })
        .sum()
}

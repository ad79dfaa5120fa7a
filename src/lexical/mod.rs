//! Lexical richness: formulas over frequency spectra, whole-text
//! algorithms and the bootstrap over disjoint windows.

mod bootstrap;
pub mod compression;
pub mod dispersion;
pub mod formulas;
pub mod orlov;
pub mod sequential;

pub use bootstrap::{bootstrap, sttr, Bootstrap};

use crate::data::{Diagnostics, Measurement, MeasurementSet, Text, Token, Warning};
use crate::error::{ComplexityError, Result};
use crate::stats::LnBetaCache;
use crate::window::{disjoint_windows, Strategy};
use dispersion::DEFAULT_N_PARTS;
use formulas::{BRUNET_A, HDD_SAMPLE_SIZE};
use orlov::{ORLOV_MAX_ITERATIONS, ORLOV_TOLERANCE};
use rayon::prelude::*;
use sequential::MTLD_FACTOR_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default window size for disjoint and moving windows.
pub const DEFAULT_WINDOW_SIZE: usize = 1000;

fn default_brunet_a() -> f64 {
    BRUNET_A
}
fn default_sample_size() -> usize {
    HDD_SAMPLE_SIZE
}
fn default_max_iterations() -> usize {
    ORLOV_MAX_ITERATIONS
}
fn default_tolerance() -> f64 {
    ORLOV_TOLERANCE
}
fn default_n_parts() -> usize {
    DEFAULT_N_PARTS
}
fn default_factor_size() -> f64 {
    MTLD_FACTOR_SIZE
}
fn default_open_tags() -> BTreeSet<String> {
    sequential::default_open_tags()
}

/// Whether a measure is bootstrapped over disjoint windows or evaluated
/// once on the whole text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Windowed,
    WholeText,
}

/// A lexical measure and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "measure", rename_all = "snake_case")]
pub enum LexicalMeasure {
    TypeTokenRatio,
    GuiraudR,
    HerdanC,
    DugastK,
    MaasA2,
    DugastU,
    TuldavaLn,
    BrunetW {
        #[serde(default = "default_brunet_a")]
        a: f64,
    },
    Cttr,
    SummerS,
    SichelS,
    MicheaM,
    HonoreH,
    Entropy,
    Evenness,
    YuleK,
    SimpsonD,
    HerdanVm,
    Hdd {
        #[serde(default = "default_sample_size")]
        sample_size: usize,
    },
    AverageTokenLength,
    GzipCompression,
    OrlovZ {
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    },
    LexicalDensity {
        #[serde(default = "default_open_tags")]
        open_tags: BTreeSet<String>,
    },
    GriesDp {
        #[serde(default = "default_n_parts")]
        n_parts: usize,
    },
    GriesDpNorm {
        #[serde(default = "default_n_parts")]
        n_parts: usize,
    },
    KlDivergence {
        #[serde(default = "default_n_parts")]
        n_parts: usize,
    },
    /// Moving-average TTR; without a window size the analysis window size
    /// is used.
    Mattr {
        #[serde(default)]
        window_size: Option<usize>,
    },
    Mtld {
        #[serde(default = "default_factor_size")]
        factor_size: f64,
    },
}

impl LexicalMeasure {
    /// Every measure key, in reporting order.
    pub const KEYS: [&'static str; 28] = [
        "type_token_ratio",
        "guiraud_r",
        "herdan_c",
        "dugast_k",
        "maas_a2",
        "dugast_u",
        "tuldava_ln",
        "brunet_w",
        "cttr",
        "summer_s",
        "sichel_s",
        "michea_m",
        "honore_h",
        "entropy",
        "evenness",
        "yule_k",
        "simpson_d",
        "herdan_vm",
        "hdd",
        "average_token_length",
        "gzip_compression",
        "orlov_z",
        "lexical_density",
        "gries_dp",
        "gries_dp_norm",
        "kl_divergence",
        "mattr",
        "mtld",
    ];

    /// Look up a measure by its snake_case key, with default parameters.
    pub fn from_key(key: &str) -> Result<Self> {
        let measure = match key {
            "type_token_ratio" => Self::TypeTokenRatio,
            "guiraud_r" => Self::GuiraudR,
            "herdan_c" => Self::HerdanC,
            "dugast_k" => Self::DugastK,
            "maas_a2" => Self::MaasA2,
            "dugast_u" => Self::DugastU,
            "tuldava_ln" => Self::TuldavaLn,
            "brunet_w" => Self::BrunetW { a: BRUNET_A },
            "cttr" => Self::Cttr,
            "summer_s" => Self::SummerS,
            "sichel_s" => Self::SichelS,
            "michea_m" => Self::MicheaM,
            "honore_h" => Self::HonoreH,
            "entropy" => Self::Entropy,
            "evenness" => Self::Evenness,
            "yule_k" => Self::YuleK,
            "simpson_d" => Self::SimpsonD,
            "herdan_vm" => Self::HerdanVm,
            "hdd" => Self::Hdd {
                sample_size: HDD_SAMPLE_SIZE,
            },
            "average_token_length" => Self::AverageTokenLength,
            "gzip_compression" => Self::GzipCompression,
            "orlov_z" => Self::OrlovZ {
                max_iterations: ORLOV_MAX_ITERATIONS,
                tolerance: ORLOV_TOLERANCE,
            },
            "lexical_density" => Self::LexicalDensity {
                open_tags: default_open_tags(),
            },
            "gries_dp" => Self::GriesDp {
                n_parts: DEFAULT_N_PARTS,
            },
            "gries_dp_norm" => Self::GriesDpNorm {
                n_parts: DEFAULT_N_PARTS,
            },
            "kl_divergence" => Self::KlDivergence {
                n_parts: DEFAULT_N_PARTS,
            },
            "mattr" => Self::Mattr { window_size: None },
            "mtld" => Self::Mtld {
                factor_size: MTLD_FACTOR_SIZE,
            },
            other => return Err(ComplexityError::UnknownMeasure(other.to_string())),
        };
        Ok(measure)
    }

    /// The snake_case key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::TypeTokenRatio => "type_token_ratio",
            Self::GuiraudR => "guiraud_r",
            Self::HerdanC => "herdan_c",
            Self::DugastK => "dugast_k",
            Self::MaasA2 => "maas_a2",
            Self::DugastU => "dugast_u",
            Self::TuldavaLn => "tuldava_ln",
            Self::BrunetW { .. } => "brunet_w",
            Self::Cttr => "cttr",
            Self::SummerS => "summer_s",
            Self::SichelS => "sichel_s",
            Self::MicheaM => "michea_m",
            Self::HonoreH => "honore_h",
            Self::Entropy => "entropy",
            Self::Evenness => "evenness",
            Self::YuleK => "yule_k",
            Self::SimpsonD => "simpson_d",
            Self::HerdanVm => "herdan_vm",
            Self::Hdd { .. } => "hdd",
            Self::AverageTokenLength => "average_token_length",
            Self::GzipCompression => "gzip_compression",
            Self::OrlovZ { .. } => "orlov_z",
            Self::LexicalDensity { .. } => "lexical_density",
            Self::GriesDp { .. } => "gries_dp",
            Self::GriesDpNorm { .. } => "gries_dp_norm",
            Self::KlDivergence { .. } => "kl_divergence",
            Self::Mattr { .. } => "mattr",
            Self::Mtld { .. } => "mtld",
        }
    }

    /// Human-readable name without the window suffix.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TypeTokenRatio => "type-token ratio",
            Self::GuiraudR => "Guiraud's R",
            Self::HerdanC => "Herdan's C",
            Self::DugastK => "Dugast's k",
            Self::MaasA2 => "Maas' a²",
            Self::DugastU => "Dugast's U",
            Self::TuldavaLn => "Tuldava's LN",
            Self::BrunetW { .. } => "Brunet's W",
            Self::Cttr => "CTTR",
            Self::SummerS => "Summer's S",
            Self::SichelS => "Sichel's S",
            Self::MicheaM => "Michéa's M",
            Self::HonoreH => "Honoré's H",
            Self::Entropy => "Entropy",
            Self::Evenness => "Evenness",
            Self::YuleK => "Yule's K",
            Self::SimpsonD => "Simpson's D",
            Self::HerdanVm => "Herdan's Vm",
            Self::Hdd { .. } => "HD-D",
            Self::AverageTokenLength => "average token length",
            Self::GzipCompression => "gzip compression",
            Self::OrlovZ { .. } => "Orlov's Z",
            Self::LexicalDensity { .. } => "lexical density",
            Self::GriesDp { .. } => "Gries' DP",
            Self::GriesDpNorm { .. } => "Gries' DP norm",
            Self::KlDivergence { .. } => "KL divergence",
            Self::Mattr { .. } => "type-token ratio (moving windows)",
            Self::Mtld { .. } => "MTLD",
        }
    }

    /// Name under which the measure is reported.
    pub fn name(&self) -> String {
        match self.scope() {
            Scope::Windowed => format!("{} (disjoint windows)", self.label()),
            Scope::WholeText => self.label().to_string(),
        }
    }

    /// How the measure is evaluated.
    pub fn scope(&self) -> Scope {
        match self {
            Self::GriesDp { .. }
            | Self::GriesDpNorm { .. }
            | Self::KlDivergence { .. }
            | Self::Mattr { .. }
            | Self::Mtld { .. } => Scope::WholeText,
            _ => Scope::Windowed,
        }
    }

    /// Fill in a missing moving-window size.
    pub fn with_window_size(self, window_size: usize) -> Self {
        match self {
            Self::Mattr { window_size: None } => Self::Mattr {
                window_size: Some(window_size),
            },
            other => other,
        }
    }

    /// Evaluate the measure on one text (a window or the whole text).
    ///
    /// Undefined values are NaN. Errors only for invalid parameters.
    pub fn evaluate(&self, text: &Text, cache: &mut LnBetaCache) -> Result<f64> {
        let value = match self {
            Self::TypeTokenRatio => formulas::type_token_ratio(text),
            Self::GuiraudR => formulas::guiraud_r(text),
            Self::HerdanC => formulas::herdan_c(text),
            Self::DugastK => formulas::dugast_k(text),
            Self::MaasA2 => formulas::maas_a2(text),
            Self::DugastU => formulas::dugast_u(text),
            Self::TuldavaLn => formulas::tuldava_ln(text),
            Self::BrunetW { a } => formulas::brunet_w(text, *a),
            Self::Cttr => formulas::cttr(text),
            Self::SummerS => formulas::summer_s(text),
            Self::SichelS => formulas::sichel_s(text),
            Self::MicheaM => formulas::michea_m(text),
            Self::HonoreH => formulas::honore_h(text),
            Self::Entropy => formulas::entropy(text),
            Self::Evenness => formulas::evenness(text),
            Self::YuleK => formulas::yule_k(text),
            Self::SimpsonD => formulas::simpson_d(text),
            Self::HerdanVm => formulas::herdan_vm(text),
            Self::Hdd { sample_size } => formulas::hdd(text, *sample_size, cache),
            Self::AverageTokenLength => sequential::average_token_length(text),
            Self::GzipCompression => compression::gzip_compression(text)?,
            Self::OrlovZ {
                max_iterations,
                tolerance,
            } => orlov::orlov_z(text, *max_iterations, *tolerance),
            Self::LexicalDensity { open_tags } => sequential::lexical_density(text, open_tags),
            Self::GriesDp { n_parts } => dispersion::gries_dp(text, *n_parts)?,
            Self::GriesDpNorm { n_parts } => dispersion::gries_dp_norm(text, *n_parts)?,
            Self::KlDivergence { n_parts } => dispersion::kl_divergence(text, *n_parts)?,
            Self::Mattr { window_size } => {
                sequential::mattr(text, window_size.unwrap_or(DEFAULT_WINDOW_SIZE))?
            }
            Self::Mtld { factor_size } => sequential::mtld(text, *factor_size),
        };
        Ok(value)
    }
}

impl std::str::FromStr for LexicalMeasure {
    type Err = ComplexityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_key(s)
    }
}

/// The measures reported by default: the most robust windowed indices
/// plus MATTR and MTLD.
pub fn default_measures() -> Vec<LexicalMeasure> {
    [
        "type_token_ratio",
        "sichel_s",
        "honore_h",
        "entropy",
        "evenness",
        "simpson_d",
        "hdd",
        "average_token_length",
        "orlov_z",
        "mattr",
        "mtld",
    ]
    .iter()
    .filter_map(|k| LexicalMeasure::from_key(k).ok())
    .collect()
}

/// Every windowed spectrum measure plus MATTR and MTLD. Dispersion,
/// lexical density and gzip compression are only computed when requested.
pub fn all_measures() -> Vec<LexicalMeasure> {
    LexicalMeasure::KEYS
        .iter()
        .filter(|k| {
            !matches!(
                **k,
                "lexical_density" | "gzip_compression" | "gries_dp" | "gries_dp_norm" | "kl_divergence"
            )
        })
        .filter_map(|k| LexicalMeasure::from_key(k).ok())
        .collect()
}

/// Compute lexical measures for one token sequence.
///
/// Windowed measures are bootstrapped over the disjoint windows of
/// `window_size` tokens; the reported `stdev` is the 95% confidence
/// interval. Whole-text measures are evaluated once.
///
/// # Arguments
/// * `tokens` - The whole document as one token sequence
/// * `window_size` - Tokens per disjoint window (and default MATTR window)
/// * `strategy` - Placement of the disjoint windows
/// * `measures` - Measures to compute, in reporting order
///
/// # Returns
/// One measurement per measure plus diagnostics. Fails if the window size
/// is invalid for the text or a measure parameter is invalid.
pub fn compute(
    tokens: &[Token],
    window_size: usize,
    strategy: Strategy,
    measures: &[LexicalMeasure],
) -> Result<MeasurementSet> {
    let _span = tracing::info_span!("lexical", n_tokens = tokens.len()).entered();
    let mut diagnostics = Diagnostics::new();

    let needs_windows = measures.iter().any(|m| m.scope() == Scope::Windowed);
    let windows: Vec<Text> = if needs_windows {
        let iter = disjoint_windows(tokens, window_size, strategy)?;
        if let Some(warning) = iter.reliability_warning() {
            tracing::debug!("{}", warning);
            diagnostics.push(warning);
        }
        iter.collect()
    } else {
        Vec::new()
    };
    let whole = Text::from_tokens(tokens);

    let evaluated: Vec<(Measurement, usize)> = measures
        .par_iter()
        .map(|measure| -> Result<(Measurement, usize)> {
            let measure = measure.clone().with_window_size(window_size);
            let mut cache = LnBetaCache::default();
            let name = measure.name();
            match measure.scope() {
                Scope::Windowed => {
                    let results = windows
                        .iter()
                        .map(|w| measure.evaluate(w, &mut cache))
                        .collect::<Result<Vec<f64>>>()?;
                    let b = Bootstrap::from_results(results, None);
                    Ok((
                        Measurement::with_stdev(name, b.mean, b.confidence_interval),
                        b.n_nan,
                    ))
                }
                Scope::WholeText => {
                    let value = measure.evaluate(&whole, &mut cache)?;
                    Ok((Measurement::value(name, value), usize::from(value.is_nan())))
                }
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let mut measurements = Vec::with_capacity(evaluated.len());
    for (measurement, n_nan) in evaluated {
        diagnostics.undefined(&measurement.name, n_nan);
        measurements.push(measurement);
    }
    tracing::debug!(n_measures = measurements.len(), "lexical measures computed");
    Ok(MeasurementSet::new(measurements, diagnostics))
}

/// Warning for a document without tokens.
pub(crate) fn empty_input() -> Warning {
    Warning::EmptyInput {
        family: "lexical".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn numbered_tokens(n: usize, n_types: usize) -> Vec<Token> {
        let words: Vec<String> = (0..n).map(|i| format!("w{}", (i * 7) % n_types)).collect();
        Token::from_words(&words)
    }

    #[test]
    fn test_keys_round_trip() {
        for key in LexicalMeasure::KEYS {
            let measure = LexicalMeasure::from_key(key).unwrap();
            assert_eq!(measure.key(), key);
        }
        assert!(matches!(
            LexicalMeasure::from_key("vocd"),
            Err(ComplexityError::UnknownMeasure(_))
        ));
    }

    #[test]
    fn test_names() {
        assert_eq!(LexicalMeasure::HonoreH.name(), "Honoré's H (disjoint windows)");
        assert_eq!(
            LexicalMeasure::from_key("mattr").unwrap().name(),
            "type-token ratio (moving windows)"
        );
        assert_eq!(LexicalMeasure::from_key("mtld").unwrap().name(), "MTLD");
        assert_eq!(LexicalMeasure::Entropy.name(), "Entropy (disjoint windows)");
        assert_eq!(LexicalMeasure::Evenness.name(), "Evenness (disjoint windows)");
    }

    #[test]
    fn test_compute_gzip_compression() {
        let measures = vec![LexicalMeasure::from_key("gzip_compression").unwrap()];
        let repetitive = numbered_tokens(600, 4);
        let varied = numbered_tokens(600, 599);
        let low = compute(&repetitive, 100, Strategy::Spread, &measures).unwrap();
        let high = compute(&varied, 100, Strategy::Spread, &measures).unwrap();
        let low = low.get("gzip compression (disjoint windows)").unwrap();
        let high = high.get("gzip compression (disjoint windows)").unwrap();
        assert!(low.stdev.is_some());
        assert!(low.value < high.value);
    }

    #[test]
    fn test_default_and_all_measures() {
        let defaults = default_measures();
        assert_eq!(defaults.len(), 11);
        let all = all_measures();
        assert_eq!(all.len(), 23);
        assert!(defaults.iter().all(|m| all.contains(m)));
    }

    #[test]
    fn test_compute_default_measures() {
        let tokens = numbered_tokens(500, 60);
        let set = compute(&tokens, 100, Strategy::Spread, &default_measures()).unwrap();
        assert_eq!(set.len(), 11);
        assert_eq!(set.measurements[0].name, "type-token ratio (disjoint windows)");

        let ttr = set.get("type-token ratio (disjoint windows)").unwrap();
        assert_relative_eq!(ttr.value, 0.6, epsilon = 1e-12);
        assert_eq!(ttr.stdev, Some(0.0));

        let mattr = set.get("type-token ratio (moving windows)").unwrap();
        assert!(mattr.stdev.is_none());
        assert!(mattr.value > 0.0 && mattr.value <= 1.0);

        // 5 windows: no reliability warning
        assert!(!set
            .diagnostics
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::FewWindows { .. })));
    }

    #[test]
    fn test_compute_reports_few_windows_and_undefined_values() {
        let tokens = Token::from_words(&["a", "b", "c", "d", "e", "f"]);
        let measures = vec![LexicalMeasure::MicheaM, LexicalMeasure::TypeTokenRatio];
        let set = compute(&tokens, 3, Strategy::Spread, &measures).unwrap();
        assert!(set.get("Michéa's M (disjoint windows)").unwrap().value.is_nan());
        assert!(set.diagnostics.warnings.contains(&Warning::FewWindows {
            n_windows: 2,
            text_length: 6,
            window_size: 3,
        }));
        assert!(set.diagnostics.warnings.contains(&Warning::UndefinedValues {
            measure: "Michéa's M (disjoint windows)".to_string(),
            count: 2,
        }));
    }

    #[test]
    fn test_compute_invalid_window() {
        let tokens = Token::from_words(&["a", "b"]);
        assert!(matches!(
            compute(&tokens, 10, Strategy::Spread, &default_measures()),
            Err(ComplexityError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_compute_whole_text_only() {
        let tokens = Token::from_words(&["a", "b", "a", "b"]);
        let measures = vec![LexicalMeasure::GriesDp { n_parts: 2 }];
        let set = compute(&tokens, 1000, Strategy::Spread, &measures).unwrap();
        assert_relative_eq!(set.get("Gries' DP").unwrap().value, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_measure_from_yaml() {
        let yaml = "- measure: hdd\n- measure: gries_dp\n  n_parts: 4\n- measure: type_token_ratio\n";
        let measures: Vec<LexicalMeasure> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            measures,
            vec![
                LexicalMeasure::Hdd { sample_size: 42 },
                LexicalMeasure::GriesDp { n_parts: 4 },
                LexicalMeasure::TypeTokenRatio,
            ]
        );
    }
}

//! Constituency tree measures averaged over the sentences of a document.

pub mod metrics;
mod pattern;

pub use pattern::{Pattern, Relation};

use crate::data::{Diagnostics, Measurement, MeasurementSet, Tree, Warning};
use crate::error::{ComplexityError, Result};
use crate::stats::{average_measure, average_measure_and_length, Summary};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Treebank annotation scheme of the trees. Pattern-based measures
/// assume specific category labels and are only reported for a known
/// scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageProfile {
    /// Unknown scheme: only label-independent measures.
    #[default]
    None,
    /// German, NEGRA/TIGER labels (S, CS, NP, VP, PP, CNP, ...).
    DeNegra,
}

impl LanguageProfile {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DeNegra => "de_negra",
        }
    }

    /// Named patterns meaningful under this scheme.
    pub fn patterns(&self) -> Result<Vec<(&'static str, Pattern)>> {
        let sources: &[(&'static str, &str)] = match self {
            Self::None => &[],
            Self::DeNegra => &[
                ("t-units", "S > (CS > TOP) | > TOP"),
                ("complex t-units", "(S > (CS > TOP) | > TOP) << S"),
                ("clauses", "S"),
                ("dependent clauses", "S > S"),
                ("noun phrases", "NP"),
                ("verb phrases", "VP"),
                ("prepositional phrases", "PP"),
                ("coordinate phrases", "CAP|CAVP|CNP|CVP"),
            ],
        };
        sources
            .iter()
            .map(|(name, src)| Ok((*name, Pattern::parse(src)?)))
            .collect()
    }
}

impl std::fmt::Display for LanguageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LanguageProfile {
    type Err = ComplexityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "de_negra" => Ok(Self::DeNegra),
            other => Err(ComplexityError::InvalidParameter(format!(
                "unknown language profile '{}'",
                other
            ))),
        }
    }
}

fn summarized(name: &str, summary: Summary, diagnostics: &mut Diagnostics) -> Measurement {
    diagnostics.undefined(name, summary.n_nan);
    Measurement::with_stdev(name, summary.mean, summary.stdev)
}

/// Compute constituency measures over the trees of a document.
///
/// For each pattern of the profile the mean and stdev of the per-tree
/// match count are reported together with the mean and stdev of the
/// pooled match lengths. Missing trees are reported as
/// [`Warning::DroppedTree`].
pub fn compute(trees: &[Option<Tree>], profile: LanguageProfile) -> Result<MeasurementSet> {
    compute_with_errors(trees, &[], profile)
}

/// Like [`compute`], with the adapter's reason for each missing tree
/// (parallel to `trees`) carried into the drop warnings.
pub fn compute_with_errors(
    trees: &[Option<Tree>],
    tree_errors: &[Option<String>],
    profile: LanguageProfile,
) -> Result<MeasurementSet> {
    let _span = tracing::info_span!("constituency", n_trees = trees.len()).entered();
    let mut diagnostics = Diagnostics::new();

    if trees.iter().all(Option::is_none) {
        diagnostics.push(Warning::EmptyInput {
            family: "constituency".to_string(),
        });
        return Ok(MeasurementSet::new(Vec::new(), diagnostics));
    }
    let mut usable: Vec<&Tree> = Vec::with_capacity(trees.len());
    for (i, tree) in trees.iter().enumerate() {
        match tree {
            Some(t) => usable.push(t),
            None => {
                let reason = tree_errors
                    .get(i)
                    .and_then(|e| e.clone())
                    .unwrap_or_else(|| "no parse tree".to_string());
                diagnostics.push(Warning::DroppedTree {
                    sentence: (i + 1).to_string(),
                    reason,
                });
            }
        }
    }
    if diagnostics.dropped_trees() > 0 {
        tracing::info!(
            dropped = diagnostics.dropped_trees(),
            kept = usable.len(),
            "ignored parse trees"
        );
    }

    let mut measurements = Vec::new();
    for (name, pattern) in profile.patterns()? {
        let (counts, lengths) =
            average_measure_and_length(&usable, |t| metrics::count_and_lengths(t, &pattern));
        measurements.push(Measurement::with_length(
            name,
            counts.mean,
            counts.stdev,
            lengths.mean,
            lengths.stdev,
        ));
    }
    let constituents = average_measure(&usable, |t| metrics::constituents(t) as f64);
    measurements.push(summarized("constituents", constituents, &mut diagnostics));
    let non_terminal =
        average_measure(&usable, |t| metrics::constituents_without_leaves(t) as f64);
    measurements.push(summarized(
        "non-terminal constituents",
        non_terminal,
        &mut diagnostics,
    ));
    let height = average_measure(&usable, |t| metrics::height(t) as f64);
    measurements.push(summarized("parse tree height", height, &mut diagnostics));

    Ok(MeasurementSet::new(measurements, diagnostics))
}

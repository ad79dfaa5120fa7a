//! Analysis runner: configuration and the builder that applies measure
//! families to documents.

use crate::constituency::{self, LanguageProfile};
use crate::data::{default_punctuation_tags, Document, MeasurementSet, Report};
use crate::dependency;
use crate::error::{ComplexityError, Result};
use crate::lexical::{
    self, all_measures, default_measures, sequential::MTLD_FACTOR_SIZE, LexicalMeasure,
    DEFAULT_WINDOW_SIZE,
};
use crate::sentence;
use crate::window::Strategy;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A group of measures computed from one annotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureFamily {
    /// Lexical richness over the token stream.
    Surface,
    /// Sentence length and punctuation.
    Sentence,
    /// Dependency graph structure.
    Dependency,
    /// Constituency tree structure.
    Constituency,
}

impl MeasureFamily {
    /// All families, in reporting order.
    pub const ALL: [MeasureFamily; 4] = [
        MeasureFamily::Surface,
        MeasureFamily::Sentence,
        MeasureFamily::Dependency,
        MeasureFamily::Constituency,
    ];
}

fn all_families() -> Vec<MeasureFamily> {
    MeasureFamily::ALL.to_vec()
}
fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}
fn default_factor_size() -> f64 {
    MTLD_FACTOR_SIZE
}
fn default_name() -> String {
    "unnamed".to_string()
}

/// Analysis configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Name of the analysis.
    #[serde(default = "default_name")]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Measure families to compute.
    #[serde(default = "all_families")]
    pub families: Vec<MeasureFamily>,
    /// Tokens per disjoint window.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Placement of the disjoint windows.
    #[serde(default)]
    pub strategy: Strategy,
    /// MATTR window; defaults to `window_size`.
    #[serde(default)]
    pub moving_window_size: Option<usize>,
    /// MTLD factor threshold.
    #[serde(default = "default_factor_size")]
    pub mtld_factor_size: f64,
    /// Report every lexical measure instead of the default subset.
    #[serde(default)]
    pub all_measures: bool,
    /// Explicit lexical measures; overrides `all_measures`.
    #[serde(default)]
    pub lexical_measures: Option<Vec<LexicalMeasure>>,
    /// POS tags that mark punctuation.
    #[serde(default = "default_punctuation_tags")]
    pub punctuation_tags: BTreeSet<String>,
    /// Drop punctuation from the token stream of the lexical measures.
    #[serde(default)]
    pub ignore_punctuation: bool,
    /// Annotation scheme of the constituency trees.
    #[serde(default)]
    pub language: LanguageProfile,
    /// Open word classes for lexical density.
    #[serde(default)]
    pub open_tags: Option<BTreeSet<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            families: all_families(),
            window_size: DEFAULT_WINDOW_SIZE,
            strategy: Strategy::default(),
            moving_window_size: None,
            mtld_factor_size: MTLD_FACTOR_SIZE,
            all_measures: false,
            lexical_measures: None,
            punctuation_tags: default_punctuation_tags(),
            ignore_punctuation: false,
            language: LanguageProfile::default(),
            open_tags: None,
        }
    }
}

impl AnalysisConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(ComplexityError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ComplexityError::from)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }
}

/// Builder for configuring and running complexity analyses.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with default settings: every family, the
    /// default lexical subset, windows of 1000 tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a config.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Convert to a serializable config.
    pub fn to_config(&self, description: Option<&str>) -> AnalysisConfig {
        AnalysisConfig {
            description: description.map(|s| s.to_string()),
            ..self.config.clone()
        }
    }

    /// Set the analysis name.
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = name.to_string();
        self
    }

    /// Restrict the measure families.
    pub fn families(mut self, families: &[MeasureFamily]) -> Self {
        self.config.families = families.to_vec();
        self
    }

    /// Set the disjoint window size.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.config.window_size = window_size;
        self
    }

    /// Set the window placement strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the MATTR window size.
    pub fn moving_window_size(mut self, window_size: usize) -> Self {
        self.config.moving_window_size = Some(window_size);
        self
    }

    /// Set the MTLD factor threshold.
    pub fn mtld_factor_size(mut self, factor_size: f64) -> Self {
        self.config.mtld_factor_size = factor_size;
        self
    }

    /// Report every lexical measure.
    pub fn all_measures(mut self, all: bool) -> Self {
        self.config.all_measures = all;
        self
    }

    /// Compute exactly these lexical measures.
    pub fn lexical_measures(mut self, measures: Vec<LexicalMeasure>) -> Self {
        self.config.lexical_measures = Some(measures);
        self
    }

    /// Set the punctuation tag set.
    pub fn punctuation_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.punctuation_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Drop punctuation from the lexical token stream.
    pub fn ignore_punctuation(mut self, ignore: bool) -> Self {
        self.config.ignore_punctuation = ignore;
        self
    }

    /// Set the treebank annotation scheme.
    pub fn language(mut self, profile: LanguageProfile) -> Self {
        self.config.language = profile;
        self
    }

    /// Set the open word classes for lexical density.
    pub fn open_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.open_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn enabled(&self, family: MeasureFamily) -> bool {
        self.config.families.contains(&family)
    }

    /// The lexical measures this analyzer computes, with configured
    /// parameters filled in.
    pub fn resolved_lexical_measures(&self) -> Vec<LexicalMeasure> {
        let cfg = &self.config;
        let measures = match (&cfg.lexical_measures, cfg.all_measures) {
            (Some(explicit), _) => explicit.clone(),
            (None, true) => all_measures(),
            (None, false) => default_measures(),
        };
        let moving = cfg.moving_window_size.unwrap_or(cfg.window_size);
        measures
            .into_iter()
            .map(|m| match m {
                // explicit measures keep their own factor size
                LexicalMeasure::Mtld { .. } if cfg.lexical_measures.is_none() => {
                    LexicalMeasure::Mtld {
                        factor_size: cfg.mtld_factor_size,
                    }
                }
                LexicalMeasure::LexicalDensity { open_tags } => LexicalMeasure::LexicalDensity {
                    open_tags: cfg.open_tags.clone().unwrap_or(open_tags),
                },
                other => other.with_window_size(moving),
            })
            .collect()
    }

    /// Analyze one document.
    ///
    /// Families whose annotation layer is absent from the document are
    /// skipped. Fails only on invalid parameters, e.g. a window larger
    /// than the document.
    pub fn run(&self, document: &Document) -> Result<Report> {
        let _span = tracing::info_span!("analyze", document = %document.name).entered();
        let cfg = &self.config;
        let mut results = MeasurementSet::default();

        if self.enabled(MeasureFamily::Surface) {
            let skip = cfg.ignore_punctuation.then_some(&cfg.punctuation_tags);
            let tokens = document.tokens(skip);
            if tokens.is_empty() {
                results.diagnostics.push(lexical::empty_input());
            } else {
                results.extend(lexical::compute(
                    &tokens,
                    cfg.window_size,
                    cfg.strategy,
                    &self.resolved_lexical_measures(),
                )?);
            }
        }
        if self.enabled(MeasureFamily::Sentence) {
            results.extend(sentence::compute(&document.sentences, &cfg.punctuation_tags));
        }
        if self.enabled(MeasureFamily::Dependency) && document.has_graphs() {
            results.extend(dependency::compute(&document.graphs));
        }
        if self.enabled(MeasureFamily::Constituency) && document.has_trees() {
            results.extend(constituency::compute_with_errors(
                &document.trees,
                &document.tree_errors,
                cfg.language,
            )?);
        }

        tracing::info!(
            measures = results.len(),
            warnings = results.diagnostics.len(),
            "document analyzed"
        );
        Ok(Report::new(document.name.clone(), results))
    }

    /// Analyze several documents in parallel, preserving their order.
    pub fn run_all(&self, documents: &[Document]) -> Result<Vec<Report>> {
        documents.par_iter().map(|d| self.run(d)).collect()
    }
}

//! Linguistic Complexity Measurement Library
//!
//! This library computes lexical, syntactic and structural complexity
//! measures over annotated text corpora.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (Token, Text, Document, DependencyGraph, Tree, Report)
//! - **window**: Disjoint and moving windows over token sequences
//! - **stats**: Aggregation (mean, stdev, confidence interval) and numeric helpers
//! - **lexical**: Lexical richness formulas, bootstrapping, MATTR, MTLD, dispersion
//! - **sentence**: Sentence length and punctuation measures
//! - **dependency**: Dependency graph metrics averaged over sentences
//! - **constituency**: Tree patterns and constituency tree metrics
//! - **io**: CoNLL-U and TSV input adapters
//! - **pipeline**: Analysis configuration and execution
//!
//! # Example
//!
//! ```no_run
//! use textcomplexity::prelude::*;
//!
//! // Load data
//! let document = read_document("corpus.conllu", InputFormat::Conllu).unwrap();
//!
//! // Run analysis
//! let report = Analyzer::new()
//!     .window_size(500)
//!     .strategy(Strategy::Spread)
//!     .language(LanguageProfile::DeNegra)
//!     .run(&document)
//!     .unwrap();
//!
//! for m in &report.measurements {
//!     println!("{}\t{}", m.name, m.value);
//! }
//! ```

pub mod constituency;
pub mod data;
pub mod dependency;
pub mod error;
pub mod io;
pub mod lexical;
pub mod pipeline;
pub mod sentence;
pub mod stats;
pub mod window;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::constituency::{LanguageProfile, Pattern, Relation};
    pub use crate::data::{
        default_punctuation_tags, reports_to_json, write_reports_tsv, DependencyGraph,
        Diagnostics, Document, FrequencySpectrum, GraphDefect, GraphNode, Measurement,
        MeasurementSet, Report, Text, Token, Tree, Warning,
    };
    pub use crate::dependency::GraphMetrics;
    pub use crate::error::{ComplexityError, Result};
    pub use crate::io::{read_conllu, read_document, read_tsv, InputFormat};
    pub use crate::lexical::{
        all_measures, bootstrap, default_measures, sttr, Bootstrap, LexicalMeasure, Scope,
        DEFAULT_WINDOW_SIZE,
    };
    pub use crate::pipeline::{AnalysisConfig, Analyzer, MeasureFamily};
    pub use crate::stats::{confidence_interval, mean, Summary};
    pub use crate::window::{disjoint_windows, moving_windows, Strategy};
}

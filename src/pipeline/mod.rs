//! Analysis configuration and execution over documents.

mod runner;

pub use runner::{AnalysisConfig, Analyzer, MeasureFamily};

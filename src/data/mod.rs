//! Core data structures: tokens, documents, frequency snapshots,
//! sentence graphs, constituency trees and result records.

mod document;
mod graph;
mod result;
mod text;
mod token;
mod tree;

pub use document::Document;
pub use graph::{DependencyEdge, DependencyGraph, GraphDefect, GraphNode};
pub use result::{
    reports_to_json, write_reports_tsv, Diagnostics, Measurement, MeasurementSet, Report,
    Warning,
};
pub use text::{FrequencySpectrum, Text};
pub(crate) use text::word_frequencies;
pub use token::{default_punctuation_tags, Token};
pub use tree::{NodeId, Tree, TreeNode};

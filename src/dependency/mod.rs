//! Dependency graph measures averaged over the sentences of a document.

pub mod metrics;

pub use metrics::GraphMetrics;

use crate::data::{DependencyGraph, Diagnostics, Measurement, MeasurementSet, Warning};
use crate::stats::Summary;

/// Names of the dependency measures, in reporting order.
pub const MEASURE_NAMES: [&str; 6] = [
    "average dependency distance",
    "closeness centrality",
    "outdegree centralization",
    "closeness centralization",
    "longest shortest path",
    "dependents per word",
];

fn sentence_label(graph: Option<&DependencyGraph>, index: usize) -> String {
    graph
        .and_then(DependencyGraph::sentence_id)
        .map(str::to_string)
        .unwrap_or_else(|| (index + 1).to_string())
}

/// Compute dependency measures over the graphs of a document.
///
/// Every graph is checked with [`DependencyGraph::validate`] first;
/// missing graphs and graphs that fail the check are excluded from the
/// averages and reported as [`Warning::DroppedGraph`]. If no graph is
/// annotated at all, only [`Warning::EmptyInput`] is reported.
pub fn compute(graphs: &[Option<DependencyGraph>]) -> MeasurementSet {
    let _span = tracing::info_span!("dependency", n_graphs = graphs.len()).entered();
    let mut diagnostics = Diagnostics::new();

    if graphs.iter().all(Option::is_none) {
        diagnostics.push(Warning::EmptyInput {
            family: "dependency".to_string(),
        });
        return MeasurementSet::new(Vec::new(), diagnostics);
    }

    let mut per_graph = Vec::with_capacity(graphs.len());
    for (i, graph) in graphs.iter().enumerate() {
        let reason = match graph {
            None => "no dependency annotation".to_string(),
            Some(g) => match g.validate() {
                Ok(()) => {
                    per_graph.push(GraphMetrics::of(g));
                    continue;
                }
                Err(defect) => defect.to_string(),
            },
        };
        let sentence = sentence_label(graph.as_ref(), i);
        tracing::debug!(%sentence, %reason, "dropping dependency graph");
        diagnostics.push(Warning::DroppedGraph { sentence, reason });
    }
    if diagnostics.dropped_graphs() > 0 {
        tracing::info!(
            dropped = diagnostics.dropped_graphs(),
            kept = per_graph.len(),
            "ignored dependency graphs"
        );
    }

    let columns: [fn(&GraphMetrics) -> f64; 6] = [
        |m| m.dependency_distance,
        |m| m.closeness_centrality,
        |m| m.outdegree_centralization,
        |m| m.closeness_centralization,
        |m| m.longest_shortest_path,
        |m| m.dependents_per_word,
    ];
    let measurements: Vec<Measurement> = MEASURE_NAMES
        .iter()
        .zip(columns)
        .map(|(name, column)| {
            let summary = Summary::from_values(per_graph.iter().map(column));
            diagnostics.undefined(name, summary.n_nan);
            Measurement::with_stdev(*name, summary.mean, summary.stdev)
        })
        .collect();
    MeasurementSet::new(measurements, diagnostics)
}

//! Structural metrics of a single sensible dependency graph.
//!
//! All functions assume the graph passed
//! [`DependencyGraph::validate`](crate::data::DependencyGraph::validate).

use crate::data::DependencyGraph;

/// Mean absolute position difference between governor and dependent over
/// all edges (Oya 2011); 0 without edges.
pub fn average_dependency_distance(graph: &DependencyGraph) -> f64 {
    let edges = graph.edges();
    if edges.is_empty() {
        return 0.0;
    }
    let nodes = graph.nodes();
    let total: usize = edges
        .iter()
        .map(|e| nodes[e.governor].position.abs_diff(nodes[e.dependent].position))
        .sum();
    total as f64 / edges.len() as f64
}

/// Closeness of `v` from its outward distances, with the Wasserman-Faust
/// correction for vertices that do not reach the whole graph.
fn closeness(graph: &DependencyGraph, v: usize) -> f64 {
    let n = graph.len();
    if n <= 1 {
        return 0.0;
    }
    let (reachable, total) = graph
        .distances_from(v)
        .iter()
        .flatten()
        .fold((0usize, 0usize), |(r, t), &d| (r + 1, t + d));
    if total == 0 {
        return 0.0;
    }
    let r = (reachable - 1) as f64;
    (r / total as f64) * (r / (n - 1) as f64)
}

/// Closeness centrality of the root (Oya 2012): the inverse mean length
/// of the shortest paths from the root to every other vertex. 1 for a
/// single vertex.
pub fn closeness_centrality(graph: &DependencyGraph) -> f64 {
    if graph.len() <= 1 {
        return 1.0;
    }
    match graph.root() {
        Some(root) => closeness(graph, root),
        None => f64::NAN,
    }
}

/// Freeman's (1978) outdegree centralization for directed graphs:
/// Σ(max − outdegree) / (n² − 2n + 1). 1 means every vertex depends on
/// the root. 1 for a single vertex.
pub fn outdegree_centralization(graph: &DependencyGraph) -> f64 {
    let n = graph.len();
    if n <= 1 {
        return 1.0;
    }
    let degrees: Vec<usize> = (0..n).map(|v| graph.out_degree(v)).collect();
    let max = degrees.iter().copied().max().unwrap_or(0);
    let sum: usize = degrees.iter().map(|d| max - d).sum();
    let centralization = sum as f64 / (n * n - 2 * n + 1) as f64;
    debug_assert!(centralization <= 1.0 + 1e-12);
    centralization
}

/// Freeman's (1978) closeness centralization for directed graphs:
/// Σ(max − closeness) / (n − 1). 1 for a single vertex.
pub fn closeness_centralization(graph: &DependencyGraph) -> f64 {
    let n = graph.len();
    if n <= 1 {
        return 1.0;
    }
    let scores: Vec<f64> = (0..n).map(|v| closeness(graph, v)).collect();
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = scores.iter().map(|c| max - c).sum();
    let centralization = sum / (n - 1) as f64;
    debug_assert!(centralization <= 1.0 + 1e-12);
    centralization
}

/// Longest shortest path from the root, i.e. the depth of the tree.
pub fn longest_shortest_path(graph: &DependencyGraph) -> f64 {
    if graph.len() <= 1 {
        return 0.0;
    }
    match graph.root() {
        Some(root) => graph
            .distances_from(root)
            .into_iter()
            .flatten()
            .max()
            .map_or(f64::NAN, |d| d as f64),
        None => f64::NAN,
    }
}

/// Mean outdegree.
pub fn dependents_per_word(graph: &DependencyGraph) -> f64 {
    let n = graph.len();
    if n == 0 {
        return f64::NAN;
    }
    let total: usize = (0..n).map(|v| graph.out_degree(v)).sum();
    total as f64 / n as f64
}

/// Per-graph values of every dependency measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphMetrics {
    pub dependency_distance: f64,
    pub closeness_centrality: f64,
    pub outdegree_centralization: f64,
    pub closeness_centralization: f64,
    pub longest_shortest_path: f64,
    pub dependents_per_word: f64,
}

impl GraphMetrics {
    /// Evaluate all metrics on one graph.
    pub fn of(graph: &DependencyGraph) -> Self {
        Self {
            dependency_distance: average_dependency_distance(graph),
            closeness_centrality: closeness_centrality(graph),
            outdegree_centralization: outdegree_centralization(graph),
            closeness_centralization: closeness_centralization(graph),
            longest_shortest_path: longest_shortest_path(graph),
            dependents_per_word: dependents_per_word(graph),
        }
    }
}

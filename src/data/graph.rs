//! Dependency graphs of single sentences.

use crate::error::{ComplexityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// A vertex of a dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Position of the token in its sentence (used for dependency distance).
    pub position: usize,
    /// Surface form.
    pub word: String,
    /// Lemma, if annotated.
    pub lemma: Option<String>,
    /// Part-of-speech tag.
    pub pos: String,
    /// Universal POS tag, if annotated.
    pub upos: Option<String>,
    /// Whether this vertex is marked as the sentence root.
    pub is_root: bool,
}

impl GraphNode {
    /// Create a non-root node.
    pub fn new(position: usize, word: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            position,
            word: word.into(),
            lemma: None,
            pos: pos.into(),
            upos: None,
            is_root: false,
        }
    }

    /// Mark this node as the root.
    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }

    /// Attach a lemma.
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Attach a universal POS tag.
    pub fn with_upos(mut self, upos: impl Into<String>) -> Self {
        self.upos = Some(upos.into());
        self
    }
}

/// A labeled edge from governor to dependent (node indices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub governor: usize,
    pub dependent: usize,
    pub relation: String,
}

/// Reason why a graph is not a sensible sentence representation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphDefect {
    #[error("there is no explicit root vertex")]
    NoRoot,
    #[error("there is more than one explicit root vertex")]
    MultipleRoots,
    #[error("the graph is not connected")]
    Disconnected,
    #[error("the vertex labeled as root does not reach every other vertex")]
    RootNotReaching,
}

/// Directed dependency graph for one sentence.
///
/// Read-only to the measurement layer. Metrics assume the graph passed
/// [`DependencyGraph::validate`]; callers go through
/// [`dependency::compute`](crate::dependency::compute), which filters.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyGraph {
    sentence_id: Option<String>,
    nodes: Vec<GraphNode>,
    edges: Vec<DependencyEdge>,
    children: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Create a graph with the given vertices and no edges.
    pub fn new(nodes: Vec<GraphNode>) -> Self {
        let children = vec![Vec::new(); nodes.len()];
        Self {
            sentence_id: None,
            nodes,
            edges: Vec::new(),
            children,
        }
    }

    /// Attach a sentence identifier.
    pub fn with_sentence_id(mut self, id: impl Into<String>) -> Self {
        self.sentence_id = Some(id.into());
        self
    }

    /// Sentence identifier, if known.
    pub fn sentence_id(&self) -> Option<&str> {
        self.sentence_id.as_deref()
    }

    /// Add a directed edge. Duplicate governor/dependent pairs are ignored.
    pub fn add_edge(
        &mut self,
        governor: usize,
        dependent: usize,
        relation: impl Into<String>,
    ) -> Result<()> {
        let n = self.nodes.len();
        if governor >= n || dependent >= n {
            return Err(ComplexityError::InvalidParameter(format!(
                "edge {} -> {} out of range for graph with {} vertices",
                governor, dependent, n
            )));
        }
        if self.children[governor].contains(&dependent) {
            return Ok(());
        }
        self.children[governor].push(dependent);
        self.edges.push(DependencyEdge {
            governor,
            dependent,
            relation: relation.into(),
        });
        Ok(())
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Vertices in index order.
    #[inline]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edges in insertion order.
    #[inline]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    /// Dependents of vertex `v`.
    #[inline]
    pub fn children(&self, v: usize) -> &[usize] {
        &self.children[v]
    }

    /// Outdegree of vertex `v`.
    #[inline]
    pub fn out_degree(&self, v: usize) -> usize {
        self.children[v].len()
    }

    /// Index of the root vertex, if exactly one vertex is marked as root.
    pub fn root(&self) -> Option<usize> {
        let mut roots = self.nodes.iter().enumerate().filter(|(_, n)| n.is_root);
        match (roots.next(), roots.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    /// Shortest directed distances from `source`; `None` for unreachable vertices.
    pub fn distances_from(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.nodes.len()];
        let mut queue = VecDeque::new();
        dist[source] = Some(0);
        queue.push_back(source);
        while let Some(v) = queue.pop_front() {
            let d = dist[v].unwrap_or(0);
            for &w in &self.children[v] {
                if dist[w].is_none() {
                    dist[w] = Some(d + 1);
                    queue.push_back(w);
                }
            }
        }
        dist
    }

    /// Whether the graph is weakly connected (edge direction ignored).
    pub fn is_weakly_connected(&self) -> bool {
        let n = self.nodes.len();
        if n == 0 {
            return false;
        }
        let mut neighbours = vec![Vec::new(); n];
        for e in &self.edges {
            neighbours[e.governor].push(e.dependent);
            neighbours[e.dependent].push(e.governor);
        }
        let mut seen = vec![false; n];
        let mut stack = vec![0];
        seen[0] = true;
        let mut visited = 1;
        while let Some(v) = stack.pop() {
            for &w in &neighbours[v] {
                if !seen[w] {
                    seen[w] = true;
                    visited += 1;
                    stack.push(w);
                }
            }
        }
        visited == n
    }

    /// Check that the graph is rooted, connected and that the root reaches
    /// every vertex.
    pub fn validate(&self) -> std::result::Result<(), GraphDefect> {
        let n_roots = self.nodes.iter().filter(|n| n.is_root).count();
        if n_roots == 0 {
            return Err(GraphDefect::NoRoot);
        }
        if n_roots > 1 {
            return Err(GraphDefect::MultipleRoots);
        }
        if !self.is_weakly_connected() {
            return Err(GraphDefect::Disconnected);
        }
        let root = self.root().ok_or(GraphDefect::NoRoot)?;
        if self.distances_from(root).iter().any(Option::is_none) {
            return Err(GraphDefect::RootNotReaching);
        }
        Ok(())
    }

    /// Drop vertices that are neither the root nor touched by any edge
    /// (e.g. multi-word range tokens), re-indexing the rest.
    pub fn without_isolated(self) -> Self {
        let n = self.nodes.len();
        let mut touched = vec![false; n];
        for e in &self.edges {
            touched[e.governor] = true;
            touched[e.dependent] = true;
        }
        let mut remap = vec![usize::MAX; n];
        let mut nodes = Vec::with_capacity(n);
        for (i, node) in self.nodes.into_iter().enumerate() {
            if node.is_root || touched[i] {
                remap[i] = nodes.len();
                nodes.push(node);
            }
        }
        let mut graph = DependencyGraph::new(nodes);
        graph.sentence_id = self.sentence_id;
        for e in self.edges {
            let (g, d) = (remap[e.governor], remap[e.dependent]);
            graph.children[g].push(d);
            graph.edges.push(DependencyEdge {
                governor: g,
                dependent: d,
                relation: e.relation,
            });
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "the dog barks": barks is root, dog depends on barks, the on dog.
    fn chain() -> DependencyGraph {
        let mut g = DependencyGraph::new(vec![
            GraphNode::new(0, "the", "DET"),
            GraphNode::new(1, "dog", "NOUN"),
            GraphNode::new(2, "barks", "VERB").root(),
        ]);
        g.add_edge(2, 1, "nsubj").unwrap();
        g.add_edge(1, 0, "det").unwrap();
        g
    }

    #[test]
    fn test_valid_graph() {
        let g = chain();
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.root(), Some(2));
        assert_eq!(g.distances_from(2), vec![Some(2), Some(1), Some(0)]);
    }

    #[test]
    fn test_no_root() {
        let g = DependencyGraph::new(vec![GraphNode::new(0, "a", "X")]);
        assert_eq!(g.validate(), Err(GraphDefect::NoRoot));
    }

    #[test]
    fn test_multiple_roots() {
        let mut g = DependencyGraph::new(vec![
            GraphNode::new(0, "a", "X").root(),
            GraphNode::new(1, "b", "X").root(),
        ]);
        g.add_edge(0, 1, "dep").unwrap();
        assert_eq!(g.validate(), Err(GraphDefect::MultipleRoots));
    }

    #[test]
    fn test_disconnected() {
        let g = DependencyGraph::new(vec![
            GraphNode::new(0, "a", "X").root(),
            GraphNode::new(1, "b", "X"),
        ]);
        assert_eq!(g.validate(), Err(GraphDefect::Disconnected));
    }

    #[test]
    fn test_root_not_reaching() {
        let mut g = DependencyGraph::new(vec![
            GraphNode::new(0, "a", "X").root(),
            GraphNode::new(1, "b", "X"),
        ]);
        g.add_edge(1, 0, "dep").unwrap();
        assert_eq!(g.validate(), Err(GraphDefect::RootNotReaching));
    }

    #[test]
    fn test_edge_out_of_range() {
        let mut g = DependencyGraph::new(vec![GraphNode::new(0, "a", "X").root()]);
        assert!(g.add_edge(0, 3, "dep").is_err());
    }

    #[test]
    fn test_without_isolated() {
        let mut g = DependencyGraph::new(vec![
            GraphNode::new(0, "zum", "_"),
            GraphNode::new(1, "zu", "ADP"),
            GraphNode::new(2, "dem", "DET"),
            GraphNode::new(3, "Haus", "NOUN").root(),
        ]);
        g.add_edge(3, 1, "case").unwrap();
        g.add_edge(3, 2, "det").unwrap();
        let g = g.without_isolated();
        assert_eq!(g.len(), 3);
        assert_eq!(g.root(), Some(2));
        assert_eq!(g.nodes()[0].word, "zu");
        assert_eq!(g.validate(), Ok(()));
    }
}

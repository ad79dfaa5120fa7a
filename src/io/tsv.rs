//! Reader for the custom six-column tab-separated format.
//!
//! Columns: token index, word, POS tag, index of the dependency head
//! (`-1` for the root), dependency relation, and the token's fragment of
//! the bracketed phrase structure tree with `*` standing in for
//! `(POS word)`. Missing values are written as `_`.

use super::{blocks, fields};
use crate::data::{DependencyGraph, Document, GraphNode, Token, Tree};
use crate::error::{ComplexityError, Result};
use rustc_hash::FxHashMap;
use std::io::BufRead;

struct Row<'a> {
    line: usize,
    id: &'a str,
    word: &'a str,
    pos: &'a str,
    head: &'a str,
    deprel: &'a str,
    pstree: &'a str,
}

/// Read a document in the six-column format.
pub fn read_tsv<R: BufRead>(reader: R, name: &str) -> Result<Document> {
    let mut document = Document::new(name);
    for (n, block) in blocks(reader, None)?.iter().enumerate() {
        let mut rows = Vec::with_capacity(block.rows.len());
        for (line, row) in &block.rows {
            let f = fields(*line, row, 6)?;
            rows.push(Row {
                line: *line,
                id: f[0],
                word: f[1],
                pos: f[2],
                head: f[3],
                deprel: f[4],
                pstree: f[5],
            });
        }
        let sentence_id = (n + 1).to_string();
        let tokens = rows.iter().map(|r| Token::new(r.word, r.pos)).collect();
        let graph = dependency_graph(&rows)?.map(|g| g.with_sentence_id(sentence_id.as_str()));
        match phrase_structure_tree(&rows) {
            Some(Err(e)) => {
                tracing::debug!(sentence = %sentence_id, error = %e, "failed to build parse tree");
                document.push_sentence_with_tree_error(tokens, graph, e.to_string());
            }
            tree => document.push_sentence(tokens, graph, tree.and_then(|t| t.ok())),
        }
    }
    Ok(document)
}

fn dependency_graph(rows: &[Row]) -> Result<Option<DependencyGraph>> {
    if rows.iter().any(|r| r.head == "_" || r.deprel == "_") {
        return Ok(None);
    }
    let index: FxHashMap<&str, usize> = rows.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
    let nodes = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let node = GraphNode::new(i, r.word, r.pos);
            if r.head == "-1" {
                node.root()
            } else {
                node
            }
        })
        .collect();
    let mut graph = DependencyGraph::new(nodes);
    for (i, row) in rows.iter().enumerate() {
        if row.head == "-1" {
            continue;
        }
        let governor = index.get(row.head).copied().ok_or_else(|| ComplexityError::Format {
            line: row.line,
            message: format!("unknown head '{}'", row.head),
        })?;
        graph.add_edge(governor, i, row.deprel)?;
    }
    Ok(Some(graph))
}

fn escape(s: &str) -> String {
    s.replace('(', "-LRB-").replace(')', "-RRB-")
}

fn phrase_structure_tree(rows: &[Row]) -> Option<Result<Tree>> {
    if rows.iter().any(|r| r.pstree == "_") {
        return None;
    }
    let src: String = rows
        .iter()
        .map(|r| {
            let leaf = format!("({} {})", escape(r.pos), escape(r.word));
            r.pstree.replace('*', &leaf)
        })
        .collect();
    Some(Tree::parse(&src))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1\tEr\tPPER\t2\tSB\t(TOP(S*
2\tsagt\tVVFIN\t-1\tROOT\t*
3\t(\t$(\t2\tPUNC\t*
4\tja\tADV\t2\tMO\t*))

1\tGut\tADJD\t-1\tROOT\t_
";

    #[test]
    fn test_read() {
        let doc = read_tsv(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.sentences[0][2].pos, "$(");

        let g = doc.graphs[0].as_ref().unwrap();
        assert_eq!(g.validate(), Ok(()));
        assert_eq!(g.root(), Some(1));
        assert_eq!(g.sentence_id(), Some("1"));

        let tree = doc.trees[0].as_ref().unwrap();
        assert_eq!(tree.n_words(), 4);
        assert_eq!(
            tree.words().collect::<Vec<_>>(),
            vec!["Er", "sagt", "-LRB-", "ja"]
        );
        assert_eq!(tree.label(tree.children(1)[2]), "$-LRB-");

        assert!(doc.graphs[1].is_some());
        assert!(doc.trees[1].is_none());
        assert_eq!(doc.tree_error(1), None);
    }

    #[test]
    fn test_missing_dependencies() {
        let src = "1\tJa\tITJ\t_\t_\t(TOP*)\n";
        let doc = read_tsv(src.as_bytes(), "x").unwrap();
        assert!(doc.graphs[0].is_none());
        assert!(doc.trees[0].is_some());
    }

    #[test]
    fn test_broken_tree_becomes_none() {
        let src = "1\tJa\tITJ\t-1\tROOT\t(TOP*\n";
        let doc = read_tsv(src.as_bytes(), "x").unwrap();
        assert!(doc.trees[0].is_none());
        assert_eq!(doc.tree_error(0), Some("Tree parse error: missing closing bracket"));
    }

    #[test]
    fn test_wrong_column_count() {
        let src = "1\tJa\tITJ\n";
        assert!(matches!(
            read_tsv(src.as_bytes(), "x"),
            Err(ComplexityError::Format { line: 1, .. })
        ));
    }
}

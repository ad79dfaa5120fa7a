//! CoNLL-U reader.

use super::{blocks, fields};
use crate::data::{DependencyGraph, Document, GraphNode, Token};
use crate::error::{ComplexityError, Result};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::io::BufRead;

struct Row<'a> {
    line: usize,
    id: &'a str,
    form: &'a str,
    lemma: &'a str,
    upos: &'a str,
    xpos: &'a str,
    head: &'a str,
    deprel: &'a str,
    deps: &'a str,
}

struct Patterns {
    sent_id: Regex,
    range: Regex,
    simple: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        let compile = |re: &str| {
            Regex::new(re).map_err(|e| ComplexityError::InvalidParameter(e.to_string()))
        };
        Ok(Self {
            sent_id: compile(r"^#\s*sent_id\s*=\s*(\S.*)$")?,
            range: compile(r"^(\d+)-(\d+)$")?,
            simple: compile(r"^\d+$")?,
        })
    }
}

/// Read a CoNLL-U document.
///
/// The token stream keeps multi-word range tokens and skips their
/// syntactic words; empty nodes are skipped. Graph vertices are all
/// lines of the sentence; edges come from DEPS when present, otherwise
/// from HEAD/DEPREL. Vertices without any edge that are not the root
/// (e.g. range tokens) are removed.
pub fn read_conllu<R: BufRead>(reader: R, name: &str) -> Result<Document> {
    let patterns = Patterns::new()?;
    let mut document = Document::new(name);
    for block in blocks(reader, Some('#'))? {
        let sent_id = block
            .comments
            .iter()
            .rev()
            .find_map(|c| patterns.sent_id.captures(c))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());

        let mut rows = Vec::with_capacity(block.rows.len());
        for (line, row) in &block.rows {
            let f = fields(*line, row, 10)?;
            rows.push(Row {
                line: *line,
                id: f[0],
                form: f[1],
                lemma: f[2],
                upos: f[3],
                xpos: f[4],
                head: f[6],
                deprel: f[7],
                deps: f[8],
            });
        }

        let tokens = surface_tokens(&rows, &patterns)?;
        let graph = dependency_graph(&rows)?.map(|g| match &sent_id {
            Some(id) => g.with_sentence_id(id.clone()),
            None => g,
        });
        document.push_sentence(tokens, graph, None);
    }
    Ok(document)
}

fn tag(row: &Row) -> String {
    if row.xpos != "_" {
        row.xpos.to_string()
    } else {
        row.upos.to_string()
    }
}

fn surface_tokens(rows: &[Row], patterns: &Patterns) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(rows.len());
    let mut current_mwt_end = 0usize;
    for row in rows {
        if let Some(caps) = patterns.range.captures(row.id) {
            current_mwt_end = caps[2].parse().map_err(|_| ComplexityError::Format {
                line: row.line,
                message: format!("invalid token range '{}'", row.id),
            })?;
            tokens.push(Token::with_upos(row.form, tag(row), row.upos));
        } else if patterns.simple.is_match(row.id) {
            let id: usize = row.id.parse().map_err(|_| ComplexityError::Format {
                line: row.line,
                message: format!("invalid token id '{}'", row.id),
            })?;
            if id > current_mwt_end {
                tokens.push(Token::with_upos(row.form, tag(row), row.upos));
            }
        }
    }
    Ok(tokens)
}

fn dependency_graph(rows: &[Row]) -> Result<Option<DependencyGraph>> {
    if rows.iter().all(|r| r.deprel == "_" && r.deps == "_") {
        return Ok(None);
    }
    let index: FxHashMap<&str, usize> = rows.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
    let nodes = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut node = GraphNode::new(i, r.form, tag(r)).with_upos(r.upos);
            if r.lemma != "_" {
                node = node.with_lemma(r.lemma);
            }
            if r.deprel == "root" {
                node = node.root();
            }
            node
        })
        .collect();
    let mut graph = DependencyGraph::new(nodes);

    let lookup = |row: &Row, head: &str| {
        index.get(head).copied().ok_or_else(|| ComplexityError::Format {
            line: row.line,
            message: format!("unknown head '{}'", head),
        })
    };
    for (i, row) in rows.iter().enumerate() {
        if row.deps != "_" {
            for rel in row.deps.split('|') {
                let (head, relation) = rel.split_once(':').ok_or_else(|| ComplexityError::Format {
                    line: row.line,
                    message: format!("malformed enhanced dependency '{}'", rel),
                })?;
                if relation != "root" {
                    graph.add_edge(lookup(row, head)?, i, relation)?;
                }
            }
        } else if row.deprel != "_" && row.deprel != "root" {
            graph.add_edge(lookup(row, row.head)?, i, row.deprel)?;
        }
    }
    Ok(Some(graph.without_isolated()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sent_id = s1
# text = Er geht zum Haus.
1\tEr\ter\tPRON\tPPER\t_\t2\tnsubj\t_\t_
2\tgeht\tgehen\tVERB\tVVFIN\t_\t0\troot\t_\t_
3-4\tzum\t_\t_\t_\t_\t_\t_\t_\t_
3\tzu\tzu\tADP\tAPPR\t_\t5\tcase\t_\t_
4\tdem\tder\tDET\tART\t_\t5\tdet\t_\t_
5\tHaus\tHaus\tNOUN\tNN\t_\t2\tobl\t_\t_
6\t.\t.\tPUNCT\t$.\t_\t2\tpunct\t_\t_

# sent_id = s2
1\tJa\tja\tINTJ\tITJ\t_\t0\troot\t_\t_
";

    #[test]
    fn test_tokens() {
        let doc = read_conllu(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(doc.len(), 2);
        let words: Vec<&str> = doc.sentences[0].iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["Er", "geht", "zum", "Haus", "."]);
        assert_eq!(doc.sentences[0][4].pos, "$.");
        assert_eq!(doc.sentences[0][4].upos.as_deref(), Some("PUNCT"));
    }

    #[test]
    fn test_graph() {
        let doc = read_conllu(SAMPLE.as_bytes(), "sample").unwrap();
        let g = doc.graphs[0].as_ref().unwrap();
        // range token removed
        assert_eq!(g.len(), 6);
        assert_eq!(g.sentence_id(), Some("s1"));
        assert_eq!(g.validate(), Ok(()));
        let root = g.root().unwrap();
        assert_eq!(g.nodes()[root].word, "geht");
        assert_eq!(g.nodes()[root].lemma.as_deref(), Some("gehen"));
        // positions keep the original line order
        assert_eq!(g.nodes()[2].position, 3);

        let single = doc.graphs[1].as_ref().unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.validate(), Ok(()));
    }

    #[test]
    fn test_enhanced_dependencies() {
        let src = "\
1\tsie\tsie\tPRON\tPPER\t_\t2\tnsubj\t2:nsubj|4:nsubj\t_
2\tkam\tkommen\tVERB\tVVFIN\t_\t0\troot\t0:root\t_
3\tund\tund\tCCONJ\tKON\t_\t4\tcc\t4:cc\t_
4\tsah\tsehen\tVERB\tVVFIN\t_\t2\tconj\t2:conj\t_
";
        let doc = read_conllu(src.as_bytes(), "enhanced").unwrap();
        let g = doc.graphs[0].as_ref().unwrap();
        assert_eq!(g.edges().len(), 4);
        assert_eq!(g.out_degree(3), 2);
    }

    #[test]
    fn test_unannotated_sentence_has_no_graph() {
        let src = "1\tHallo\t_\t_\t_\t_\t_\t_\t_\t_\n";
        let doc = read_conllu(src.as_bytes(), "plain").unwrap();
        assert!(doc.graphs[0].is_none());
        assert_eq!(doc.sentences[0][0].pos, "_");
    }

    #[test]
    fn test_format_errors() {
        let short = "1\tHallo\t_\n";
        assert!(matches!(
            read_conllu(short.as_bytes(), "bad"),
            Err(ComplexityError::Format { line: 1, .. })
        ));
        let bad_head = "1\tHallo\t_\tX\t_\t_\t7\tdep\t_\t_\n";
        assert!(read_conllu(bad_head.as_bytes(), "bad").is_err());
    }
}

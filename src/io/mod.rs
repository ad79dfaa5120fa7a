//! Input adapters: turn annotated corpora into [`Document`]s.
//!
//! Adapters only normalize; graphs are not validated here and trees that
//! fail to parse become `None`. The measurement layer decides what to
//! drop and reports it.

mod conllu;
mod tsv;

pub use conllu::read_conllu;
pub use tsv::read_tsv;

use crate::data::Document;
use crate::error::{ComplexityError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Universal Dependencies CoNLL-U.
    #[default]
    Conllu,
    /// Six tab-separated columns: index, word, POS, head, relation and
    /// bracket fragment.
    Tsv,
}

impl InputFormat {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Conllu => "conllu",
            Self::Tsv => "tsv",
        }
    }

    /// Parse a document from a reader.
    pub fn read<R: BufRead>(&self, reader: R, name: &str) -> Result<Document> {
        match self {
            Self::Conllu => read_conllu(reader, name),
            Self::Tsv => read_tsv(reader, name),
        }
    }
}

impl FromStr for InputFormat {
    type Err = ComplexityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "conllu" => Ok(Self::Conllu),
            "tsv" => Ok(Self::Tsv),
            other => Err(ComplexityError::InvalidParameter(format!(
                "unknown input format '{}'",
                other
            ))),
        }
    }
}

/// Read a document from a file; `-` reads standard input. The path
/// becomes the document name.
pub fn read_document<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<Document> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let document = if name == "-" {
        format.read(std::io::stdin().lock(), &name)?
    } else {
        format.read(BufReader::new(File::open(path)?), &name)?
    };
    tracing::info!(
        document = %name,
        sentences = document.len(),
        tokens = document.n_tokens(),
        format = format.name(),
        "read document"
    );
    Ok(document)
}

/// Lines of one blank-line separated block, with 1-based line numbers.
pub(crate) struct Block {
    pub comments: Vec<String>,
    pub rows: Vec<(usize, String)>,
}

/// Split input into blank-line separated blocks.
pub(crate) fn blocks<R: BufRead>(reader: R, comment_prefix: Option<char>) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut current = Block {
        comments: Vec::new(),
        rows: Vec::new(),
    };
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.rows.is_empty() {
                blocks.push(std::mem::replace(
                    &mut current,
                    Block {
                        comments: Vec::new(),
                        rows: Vec::new(),
                    },
                ));
            }
            continue;
        }
        if comment_prefix.is_some_and(|c| trimmed.starts_with(c)) {
            current.comments.push(trimmed.to_string());
            continue;
        }
        current.rows.push((idx + 1, trimmed.to_string()));
    }
    if !current.rows.is_empty() {
        blocks.push(current);
    }
    Ok(blocks)
}

/// Split a row into exactly `n` tab-separated fields.
pub(crate) fn fields(line: usize, row: &str, n: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = row.split('\t').collect();
    if fields.len() != n {
        return Err(ComplexityError::Format {
            line,
            message: format!("expected {} tab-separated columns, found {}", n, fields.len()),
        });
    }
    Ok(fields)
}

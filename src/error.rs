//! Error types for the textcomplexity library.

use thiserror::Error;

/// Main error type for the library.
///
/// Only misuse is reported through this type. Degenerate data (undefined
/// formulas, invalid sentence graphs, unparsable trees) is reported via
/// [`Diagnostics`](crate::data::Diagnostics) instead.
#[derive(Error, Debug)]
pub enum ComplexityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Window size {window_size} exceeds text length {text_length}")]
    InvalidWindow {
        window_size: usize,
        text_length: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown measure '{0}'")]
    UnknownMeasure(String),

    #[error("Tree pattern error: {0}")]
    Pattern(String),

    #[error("Tree parse error: {0}")]
    TreeParse(String),

    #[error("Malformed input at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, ComplexityError>;

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while surveying a tree. Everything except
/// [`AnalyzeError::Save`] and [`AnalyzeError::Serialize`] is scoped to one file
/// or directory and is recovered by the pipeline.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file too large: {} is {size} bytes (limit {limit})", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("syntax error in {} at line {line}, column {column}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("parser setup failed: {0}")]
    Parser(String),

    #[error("failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("failed to save results to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AnalyzeError {
    /// Short category name used in run diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::Read { .. } => "read",
            AnalyzeError::TooLarge { .. } => "size",
            AnalyzeError::Syntax { .. } => "parse",
            AnalyzeError::Parser(_) => "parse",
            AnalyzeError::Walk { .. } => "walk",
            AnalyzeError::Save { .. } => "save",
            AnalyzeError::Serialize(_) => "save",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

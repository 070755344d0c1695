use std::path::Path;

use crate::error::AnalyzeError;

/// One recovered failure, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub kind: &'static str,
    pub message: String,
}

/// Sink for per-file failures. Every entry is also emitted as a warning.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, path: &Path, err: AnalyzeError) {
        let message = err.to_string();
        tracing::warn!("{}", message);
        self.entries.push(Diagnostic {
            path: path.to_string_lossy().into_owned(),
            kind: err.kind(),
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry mentions `needle` in its path.
    pub fn mentions(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.path.contains(needle))
    }
}

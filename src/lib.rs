//! # CODESURVEY
//!
//! Single-pass survey of a source tree for AI code analysis.
//!
//! CODESURVEY walks a directory, pulls lightweight structural facts out of the
//! source files it recognises and writes one JSON report with three sections:
//!
//! - **Directory and File Structure**: the sorted directory tree
//! - **Classes, Functions, and Imports**: per-file symbol inventories
//! - **Documentation and Comments**: raw text of every readme-like file
//!
//! ## Supported Languages
//!
//! Python (tree-sitter parse), JavaScript/TypeScript and Java (regex heuristics).
//! Every other file still shows up in the structure section.

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
pub mod parsers;

pub use config::{AnalyzerConfig, LogConfig, PathMode};
pub use error::AnalyzeError;

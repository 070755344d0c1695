pub mod analyzer;
pub mod collector;
pub mod diagnostics;
pub mod docs;
pub mod report;
pub mod scanner;
pub mod symbols;

pub use analyzer::{CodebaseAnalyzer, RunSummary};
pub use collector::{CollectedFile, FileCollector};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use docs::DocumentationCollector;
pub use report::{AnalysisReport, DirectoryNode, FileRecord};
pub use scanner::FileScanner;
pub use symbols::SymbolExtractor;

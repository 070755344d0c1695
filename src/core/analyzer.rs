use std::time::Instant;

use super::collector::FileCollector;
use super::diagnostics::{Diagnostic, Diagnostics};
use super::docs::DocumentationCollector;
use super::report::AnalysisReport;
use super::scanner::FileScanner;
use super::symbols::SymbolExtractor;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::formatters::JsonReportFormatter;
use crate::parsers::ExtractorRegistry;

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub files_collected: usize,
    pub records: usize,
    pub documents: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// `false` if the report could not be written.
    pub saved: bool,
}

/// Walk → collect → extract symbols → collect docs → assemble → save.
/// Every stage runs to completion before the next starts.
pub struct CodebaseAnalyzer {
    config: AnalyzerConfig,
    file_scanner: FileScanner,
    file_collector: FileCollector,
    symbol_extractor: SymbolExtractor,
    doc_collector: DocumentationCollector,
    formatter: JsonReportFormatter,
}

impl CodebaseAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Ok(Self::with_registry(config, ExtractorRegistry::new()?))
    }

    pub fn with_registry(config: AnalyzerConfig, registry: ExtractorRegistry) -> Self {
        let size_limit = config.size_limit();
        Self {
            file_scanner: FileScanner::new().with_follow_symlinks(config.follow_symlinks),
            file_collector: FileCollector::new(config.path_mode, config.base_dir()),
            symbol_extractor: SymbolExtractor::new(registry, size_limit),
            doc_collector: DocumentationCollector::new(size_limit),
            formatter: JsonReportFormatter::new(),
            config,
        }
    }

    /// Build the report without writing it. Per-file problems end up in the
    /// returned diagnostics and as warnings.
    pub fn analyze(&self) -> (AnalysisReport, Diagnostics) {
        let mut diagnostics = Diagnostics::new();

        tracing::info!("Scanning {}", self.config.root.display());
        let structure = self
            .file_scanner
            .scan_directory(&self.config.root, &mut diagnostics);

        let files = self.file_collector.collect(&structure);
        tracing::info!("Found {} files", files.len());

        let symbols = self.symbol_extractor.extract_all(&files, &mut diagnostics);
        tracing::info!("Extracted symbols from {} files", symbols.len());

        let documentation = self.doc_collector.collect(&files, &mut diagnostics);
        tracing::info!("Collected {} documentation files", documentation.len());

        (
            AnalysisReport::new(structure, symbols, documentation),
            diagnostics,
        )
    }

    pub fn save(&self, report: &AnalysisReport) -> Result<()> {
        self.formatter.format_to_file(report, &self.config.output)
    }

    /// Analyze and save. Nothing here fails the run: a save error is logged
    /// and reported through [`RunSummary::saved`].
    pub fn run(&self) -> RunSummary {
        match self.config.log {
            Some(log) => tracing::subscriber::with_default(log.subscriber(), || self.run_once()),
            None => self.run_once(),
        }
    }

    fn run_once(&self) -> RunSummary {
        let start_time = Instant::now();
        let (report, diagnostics) = self.analyze();
        let files_collected = report.structure.file_count();

        let saved = match self.save(&report) {
            Ok(()) => {
                tracing::info!(
                    "Results written to {} in {:.2}s",
                    self.config.output.display(),
                    start_time.elapsed().as_secs_f64()
                );
                true
            }
            Err(err) => {
                tracing::error!("{}", err);
                false
            }
        };

        if !diagnostics.is_empty() {
            tracing::info!("{} warnings during the run", diagnostics.len());
        }

        RunSummary {
            files_collected,
            records: report.symbols.len(),
            documents: report.documentation.len(),
            diagnostics: diagnostics.into_entries(),
            saved,
        }
    }
}

use std::collections::BTreeMap;

use super::collector::CollectedFile;
use super::diagnostics::Diagnostics;
use super::report::FileRecord;
use crate::error::Result;
use crate::parsers::common::read_source_lossy;
use crate::parsers::ExtractorRegistry;

/// Runs the registered extractor for each collected file.
pub struct SymbolExtractor {
    registry: ExtractorRegistry,
    size_limit: Option<u64>,
}

impl SymbolExtractor {
    pub fn new(registry: ExtractorRegistry, size_limit: Option<u64>) -> Self {
        Self {
            registry,
            size_limit,
        }
    }

    /// `Ok(None)` when the file type is unsupported or nothing was found.
    pub fn extract_file(&self, file: &CollectedFile) -> Result<Option<FileRecord>> {
        let extractor = self.registry.for_extension(file.extension());
        if !extractor.is_supported() {
            return Ok(None);
        }

        let source = read_source_lossy(&file.location, self.size_limit)?;
        let record = extractor.extract(&source, &file.location)?;
        tracing::debug!(
            "{}: {} classes, {} functions, {} imports ({})",
            file.key,
            record.classes.len(),
            record.functions.len(),
            record.imports.len(),
            extractor.language_name()
        );

        Ok((!record.is_empty()).then_some(record))
    }

    /// One failing file never stops the others; failures go to `diagnostics`.
    pub fn extract_all(
        &self,
        files: &[CollectedFile],
        diagnostics: &mut Diagnostics,
    ) -> BTreeMap<String, FileRecord> {
        let mut symbols = BTreeMap::new();

        for file in files {
            match self.extract_file(file) {
                Ok(Some(record)) => {
                    symbols.insert(file.key.clone(), record);
                }
                Ok(None) => {}
                Err(err) => diagnostics.warn(&file.location, err),
            }
        }

        symbols
    }
}

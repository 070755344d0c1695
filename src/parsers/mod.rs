pub mod common;
pub mod pattern;
pub mod python;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::FileRecord;
use crate::error::Result;

/// Pulls classes, functions and imports out of one file's text.
pub trait LanguageExtractor {
    fn extract(&self, source: &str, file_path: &Path) -> Result<FileRecord>;
    fn language_name(&self) -> &str;

    /// `false` for the fallback: the file is neither read nor reported.
    fn is_supported(&self) -> bool {
        true
    }
}

/// Fallback for extensions nobody registered.
pub struct UnsupportedExtractor;

impl LanguageExtractor for UnsupportedExtractor {
    fn extract(&self, _source: &str, _file_path: &Path) -> Result<FileRecord> {
        Ok(FileRecord::default())
    }

    fn language_name(&self) -> &str {
        "unsupported"
    }

    fn is_supported(&self) -> bool {
        false
    }
}

type SharedExtractor = Arc<dyn LanguageExtractor + Send + Sync>;

/// Extension-keyed lookup of extractors. Matching is exact and case-sensitive
/// on the last extension of the file name.
pub struct ExtractorRegistry {
    by_extension: HashMap<String, SharedExtractor>,
    fallback: UnsupportedExtractor,
}

impl ExtractorRegistry {
    /// Registry with no languages at all; every file falls through.
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
            fallback: UnsupportedExtractor,
        }
    }

    /// Python via tree-sitter, ECMAScript and Java via regex heuristics.
    pub fn new() -> Result<Self> {
        let mut registry = Self::empty();
        registry.register(&["py"], Arc::new(python::PythonExtractor::new()?));
        registry.register(
            &["js", "ts", "jsx", "tsx"],
            Arc::new(pattern::PatternExtractor::ecmascript()?),
        );
        registry.register(&["java"], Arc::new(pattern::PatternExtractor::java()?));
        Ok(registry)
    }

    pub fn register(&mut self, extensions: &[&str], extractor: SharedExtractor) {
        for extension in extensions {
            self.by_extension
                .insert((*extension).to_string(), Arc::clone(&extractor));
        }
    }

    pub fn for_extension(&self, extension: Option<&str>) -> &dyn LanguageExtractor {
        match extension.and_then(|ext| self.by_extension.get(ext)) {
            Some(extractor) => extractor.as_ref(),
            None => &self.fallback,
        }
    }

    pub fn for_path(&self, path: &Path) -> &dyn LanguageExtractor {
        self.for_extension(path.extension().and_then(|ext| ext.to_str()))
    }

    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

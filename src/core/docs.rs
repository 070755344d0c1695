use std::collections::BTreeMap;

use super::collector::CollectedFile;
use super::diagnostics::Diagnostics;
use crate::parsers::common::read_source_lossy;

const DOC_MARKER: &str = "readme";

/// Captures the raw text of readme-like files.
pub struct DocumentationCollector {
    size_limit: Option<u64>,
}

impl DocumentationCollector {
    pub fn new(size_limit: Option<u64>) -> Self {
        Self { size_limit }
    }

    /// Case-insensitive substring match on the file name.
    pub fn is_documentation(name: &str) -> bool {
        name.to_lowercase().contains(DOC_MARKER)
    }

    pub fn collect(
        &self,
        files: &[CollectedFile],
        diagnostics: &mut Diagnostics,
    ) -> BTreeMap<String, String> {
        let mut documentation = BTreeMap::new();

        for file in files.iter().filter(|f| Self::is_documentation(&f.name)) {
            match read_source_lossy(&file.location, self.size_limit) {
                Ok(text) => {
                    documentation.insert(file.key.clone(), text);
                }
                Err(err) => diagnostics.warn(&file.location, err),
            }
        }

        documentation
    }
}

use regex::{Captures, Regex};
use std::path::Path;

use super::LanguageExtractor;
use crate::core::FileRecord;
use crate::error::{AnalyzeError, Result};

const CLASS_PATTERN: &str = r"class\s+(\w+)";

const ECMASCRIPT_FUNCTION_PATTERN: &str =
    r"(?:function\s+(\w+)|const\s+(\w+)\s*=\s*(?:function|\([^)]*\)\s*=>))";
const ECMASCRIPT_IMPORT_PATTERN: &str = r"(?m)^(import\s+.*?;)$";

const JAVA_FUNCTION_PATTERN: &str =
    r"(?:public|private|protected|static|\s) +[\w<>\[\]]+\s+(\w+) *\([^)]*\) *\{";
const JAVA_IMPORT_PATTERN: &str = r"(?m)^(import\s+.*;)$";

/// Regex heuristics over raw text. Over-matches inside strings and comments,
/// misses anonymous functions; no attempt is made to fix either.
pub struct PatternExtractor {
    language: &'static str,
    class: Regex,
    function: Regex,
    import: Regex,
}

impl PatternExtractor {
    pub fn new(
        language: &'static str,
        class: &str,
        function: &str,
        import: &str,
    ) -> Result<Self> {
        Ok(Self {
            language,
            class: compile(class)?,
            function: compile(function)?,
            import: compile(import)?,
        })
    }

    /// JavaScript and TypeScript, with or without JSX.
    pub fn ecmascript() -> Result<Self> {
        Self::new(
            "ecmascript",
            CLASS_PATTERN,
            ECMASCRIPT_FUNCTION_PATTERN,
            ECMASCRIPT_IMPORT_PATTERN,
        )
    }

    pub fn java() -> Result<Self> {
        Self::new("java", CLASS_PATTERN, JAVA_FUNCTION_PATTERN, JAVA_IMPORT_PATTERN)
    }

    fn matches(pattern: &Regex, source: &str) -> Vec<String> {
        pattern
            .captures_iter(source)
            .filter_map(|caps| first_group(&caps))
            .collect()
    }
}

impl LanguageExtractor for PatternExtractor {
    fn extract(&self, source: &str, _file_path: &Path) -> Result<FileRecord> {
        Ok(FileRecord {
            classes: Self::matches(&self.class, source),
            functions: Self::matches(&self.function, source),
            imports: Self::matches(&self.import, source),
        })
    }

    fn language_name(&self) -> &str {
        self.language
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| AnalyzeError::Parser(err.to_string()))
}

/// Text of whichever capture group took part in the match, skipping empties.
fn first_group(caps: &Captures) -> Option<String> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::core::AnalysisReport;
use crate::error::{AnalyzeError, Result};

const DEFAULT_INDENT: &[u8] = b"    ";

/// Human-readable JSON for the survey report. Key order is fixed by the
/// report types, so identical trees give byte-identical output.
pub struct JsonReportFormatter {
    indent: &'static [u8],
}

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_indent(mut self, indent: &'static [u8]) -> Self {
        self.indent = indent;
        self
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        let json_content = self.format_report(report)?;
        fs::write(output_path, json_content).map_err(|source| AnalyzeError::Save {
            path: output_path.to_path_buf(),
            source,
        })
    }

    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut buffer = Vec::with_capacity(4096);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(self.indent));
        report.serialize(&mut serializer)?;
        buffer.push(b'\n');

        // serde_json only ever writes valid UTF-8.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

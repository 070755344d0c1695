use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One directory of the scanned tree. Child directories are keyed by name,
/// files are bare names. Both are kept in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub directories: BTreeMap<String, DirectoryNode>,
    pub files: Vec<String>,
}

impl DirectoryNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend along `parts`, creating missing directories on the way.
    pub fn entry(&mut self, parts: &[String]) -> &mut DirectoryNode {
        let mut current = self;
        for part in parts {
            current = current.directories.entry(part.clone()).or_default();
        }
        current
    }

    /// Drop the directory at `parts` if it exists and has no content.
    pub fn remove_empty(&mut self, parts: &[String]) -> bool {
        let Some((name, parents)) = parts.split_last() else {
            return false;
        };

        let mut current = self;
        for part in parents {
            match current.directories.get_mut(part) {
                Some(next) => current = next,
                None => return false,
            }
        }

        let removable = current
            .directories
            .get(name)
            .map_or(false, |node| node.is_empty());
        if removable {
            current.directories.remove(name);
        }
        removable
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .directories
                .values()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }
}

/// Symbols pulled out of one source file, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub classes: Vec<String>,
    pub functions: Vec<String>,
    pub imports: Vec<String>,
}

impl FileRecord {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.imports.is_empty()
    }
}

/// The whole survey, serialized once at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(rename = "Directory and File Structure")]
    pub structure: DirectoryNode,
    #[serde(rename = "Classes, Functions, and Imports")]
    pub symbols: BTreeMap<String, FileRecord>,
    #[serde(rename = "Documentation and Comments")]
    pub documentation: BTreeMap<String, String>,
}

impl AnalysisReport {
    pub fn new(
        structure: DirectoryNode,
        symbols: BTreeMap<String, FileRecord>,
        documentation: BTreeMap<String, String>,
    ) -> Self {
        Self {
            structure,
            symbols,
            documentation,
        }
    }

    pub fn from_json(data: &str) -> serde_json::Result<Self> {
        serde_json::from_str(data)
    }
}

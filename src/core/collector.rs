use std::path::{Path, PathBuf};

use super::report::DirectoryNode;
use crate::config::PathMode;

/// A file picked up from the directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    /// Identifier used as the report key.
    pub key: String,
    /// Bare file name, used for extension and readme matching.
    pub name: String,
    /// Where the file is opened from.
    pub location: PathBuf,
}

impl CollectedFile {
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.name).extension().and_then(|ext| ext.to_str())
    }
}

/// Flattens a [`DirectoryNode`] into a file list, depth-first: a directory's
/// own files come before the contents of its subdirectories.
pub struct FileCollector {
    mode: PathMode,
    base_dir: PathBuf,
}

impl FileCollector {
    pub fn new(mode: PathMode, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            base_dir: base_dir.into(),
        }
    }

    pub fn collect(&self, structure: &DirectoryNode) -> Vec<CollectedFile> {
        let mut files = Vec::with_capacity(structure.file_count());
        let mut prefix = Vec::new();
        self.collect_into(structure, &mut prefix, &mut files);
        files
    }

    fn collect_into(
        &self,
        node: &DirectoryNode,
        prefix: &mut Vec<String>,
        files: &mut Vec<CollectedFile>,
    ) {
        for name in &node.files {
            files.push(self.make_file(prefix, name));
        }

        for (dir_name, child) in &node.directories {
            prefix.push(dir_name.clone());
            self.collect_into(child, prefix, files);
            prefix.pop();
        }
    }

    fn make_file(&self, prefix: &[String], name: &str) -> CollectedFile {
        match self.mode {
            PathMode::Relative => {
                let mut location = self.base_dir.clone();
                location.extend(prefix);
                location.push(name);

                let key = prefix
                    .iter()
                    .map(String::as_str)
                    .chain(std::iter::once(name))
                    .collect::<Vec<_>>()
                    .join("/");

                CollectedFile {
                    key,
                    name: name.to_string(),
                    location,
                }
            }
            // Directory context is dropped on purpose in this mode.
            PathMode::FileName => CollectedFile {
                key: name.to_string(),
                name: name.to_string(),
                location: self.base_dir.join(name),
            },
        }
    }
}

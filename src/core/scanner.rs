use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::diagnostics::Diagnostics;
use super::report::DirectoryNode;
use crate::error::AnalyzeError;

/// Builds the sorted directory tree for a scan root.
pub struct FileScanner {
    follow_symlinks: bool,
}

impl FileScanner {
    pub fn new() -> Self {
        Self {
            follow_symlinks: false,
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Walk `root_path` top-down. Entries are sorted by name at every level, so
    /// the result does not depend on the platform's enumeration order.
    ///
    /// Unreadable directories and symlink loops are reported to `diagnostics`
    /// and left out of the tree. Without `follow_symlinks`, symlinked directories are
    /// omitted; symlinked files are listed like regular files.
    pub fn scan_directory(&self, root_path: &Path, diagnostics: &mut Diagnostics) -> DirectoryNode {
        let mut structure = DirectoryNode::new();

        let walker = WalkDir::new(root_path)
            .follow_links(self.follow_symlinks)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root_path.to_path_buf());
                    // The entry was listed before its contents failed to read.
                    if err.loop_ancestor().is_none() {
                        if let Some(parts) = relative_parts(root_path, &path) {
                            structure.remove_empty(&parts);
                        }
                    }
                    let message = match err.loop_ancestor() {
                        Some(ancestor) => {
                            format!("symlink loop back to {}", ancestor.display())
                        }
                        None => err.to_string(),
                    };
                    diagnostics.warn(&path, AnalyzeError::Walk { path: path.clone(), message });
                    continue;
                }
            };

            // The root itself is the top node.
            if entry.depth() == 0 {
                continue;
            }

            let parts = match relative_parts(root_path, entry.path()) {
                Some(parts) => parts,
                None => continue,
            };
            let (name, parents) = match parts.split_last() {
                Some(split) => split,
                None => continue,
            };

            if is_directory(&entry) {
                structure.entry(&parts);
            } else if !self.follow_symlinks && entry.path_is_symlink() && entry.path().is_dir() {
                tracing::debug!("skipping symlinked directory {}", entry.path().display());
            } else {
                structure.entry(parents).files.push(name.clone());
            }
        }

        structure
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
}

fn relative_parts(root_path: &Path, path: &Path) -> Option<Vec<String>> {
    let relative = path.strip_prefix(root_path).ok()?;
    Some(
        relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy().into_owned())
            .collect(),
    )
}

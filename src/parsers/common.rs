use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node as TSNode, Parser, Tree};

use crate::error::{AnalyzeError, Result};

pub struct TreeSitterParser {
    parser: Parser,
    rejected_kinds: &'static [&'static str],
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|err| AnalyzeError::Parser(err.to_string()))?;
        Ok(Self {
            parser,
            rejected_kinds: &[],
        })
    }

    /// Node kinds the grammar accepts but the language itself does not.
    pub fn with_rejected_kinds(mut self, kinds: &'static [&'static str]) -> Self {
        self.rejected_kinds = kinds;
        self
    }

    /// Parse `source`, treating any error, missing or rejected node as a failure.
    pub fn parse_strict(&mut self, source: &str, file_path: &Path) -> Result<Tree> {
        let tree = self.parser.parse(source, None).ok_or_else(|| {
            AnalyzeError::Parser(format!("parser gave up on {}", file_path.display()))
        })?;

        let root = tree.root_node();
        let offending = if root.has_error() {
            Some(first_error(root).unwrap_or(root))
        } else {
            first_of_kind(root, self.rejected_kinds)
        };

        if let Some(node) = offending {
            let at = node.start_position();
            return Err(AnalyzeError::Syntax {
                path: file_path.to_path_buf(),
                line: at.row + 1,
                column: at.column + 1,
            });
        }

        Ok(tree)
    }
}

/// Read a file as text, replacing invalid UTF-8 instead of failing.
/// Files over `limit` bytes are refused before their content is read.
pub fn read_source_lossy(file_path: &Path, limit: Option<u64>) -> Result<String> {
    let read_error = |source| AnalyzeError::Read {
        path: file_path.to_path_buf(),
        source,
    };

    if let Some(limit) = limit {
        let size = fs::metadata(file_path).map_err(read_error)?.len();
        if size > limit {
            return Err(AnalyzeError::TooLarge {
                path: file_path.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let bytes = fs::read(file_path).map_err(read_error)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn extract_text<'a>(node: &TSNode, source: &'a [u8]) -> &'a str {
    std::str::from_utf8(&source[node.byte_range()]).unwrap_or("")
}

/// Breadth-first traversal over named nodes, outer nodes first.
///
/// Nodes whose kind is in `transparent` are never visited; their children
/// take their place on the same level.
pub fn walk_breadth_first<'tree>(
    root: TSNode<'tree>,
    transparent: &[&str],
    mut visit: impl FnMut(TSNode<'tree>),
) {
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        visit(node);
        push_children(node, transparent, &mut queue);
    }
}

fn push_children<'tree>(
    node: TSNode<'tree>,
    transparent: &[&str],
    queue: &mut VecDeque<TSNode<'tree>>,
) {
    let mut cursor = node.walk();
    let children: Vec<TSNode<'tree>> = node.named_children(&mut cursor).collect();
    for child in children {
        if transparent.contains(&child.kind()) {
            push_children(child, transparent, queue);
        } else {
            queue.push_back(child);
        }
    }
}

pub fn find_child_by_kind<'tree>(node: &TSNode<'tree>, kind: &str) -> Option<TSNode<'tree>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// First node in source order whose kind is in `kinds`.
fn first_of_kind<'tree>(node: TSNode<'tree>, kinds: &[&str]) -> Option<TSNode<'tree>> {
    if kinds.is_empty() {
        return None;
    }
    if kinds.contains(&node.kind()) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode> = node.named_children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_of_kind(child, kinds))
}

fn first_error(node: TSNode) -> Option<TSNode> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<TSNode> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lossy_read_replaces_invalid_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("bad.py");
        fs::write(&file, b"x = 1\n\xff\xfe\n").unwrap();

        let text = read_source_lossy(&file, None).unwrap();
        assert!(text.starts_with("x = 1\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn size_limit_refuses_large_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("big.js");
        fs::write(&file, "a".repeat(64)).unwrap();

        let err = read_source_lossy(&file, Some(10)).unwrap_err();
        assert!(matches!(err, AnalyzeError::TooLarge { size: 64, limit: 10, .. }));
        assert!(read_source_lossy(&file, Some(64)).is_ok());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_source_lossy(Path::new("/definitely/not/here.py"), None).unwrap_err();
        assert_eq!(err.kind(), "read");
    }
}

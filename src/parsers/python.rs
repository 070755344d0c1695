use std::path::Path;
use tree_sitter::Node as TSNode;

use super::common::{extract_text, find_child_by_kind, walk_breadth_first, TreeSitterParser};
use super::LanguageExtractor;
use crate::core::FileRecord;
use crate::error::Result;

/// Python 2 statement forms the grammar still parses.
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Wrappers with no node of their own in Python's AST. Walking through them
/// keeps definitions on the same level the interpreter's AST puts them.
const TRANSPARENT_KINDS: &[&str] = &[
    "block",
    "else_clause",
    "finally_clause",
    "decorated_definition",
];

/// Exact extraction for Python through the tree-sitter grammar.
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Result<Self> {
        // Fail at registration time if the grammar and runtime disagree.
        TreeSitterParser::new(tree_sitter_python::language())?;
        Ok(Self)
    }
}

impl LanguageExtractor for PythonExtractor {
    fn extract(&self, source: &str, file_path: &Path) -> Result<FileRecord> {
        let mut parser = TreeSitterParser::new(tree_sitter_python::language())?
            .with_rejected_kinds(PYTHON2_STATEMENTS);
        let tree = parser.parse_strict(source, file_path)?;
        let source_bytes = source.as_bytes();

        let mut record = FileRecord::default();
        walk_breadth_first(tree.root_node(), TRANSPARENT_KINDS, |node| match node.kind() {
            "class_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    record.classes.push(extract_text(&name, source_bytes).to_string());
                }
            }
            // Coroutines (`async def`) are not counted.
            "function_definition" if !is_async(&node) => {
                if let Some(name) = node.child_by_field_name("name") {
                    record.functions.push(extract_text(&name, source_bytes).to_string());
                }
            }
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                record.imports.push(canonical_import(&node, source_bytes));
            }
            _ => {}
        });

        Ok(record)
    }

    fn language_name(&self) -> &str {
        "python"
    }
}

fn is_async(func_node: &TSNode) -> bool {
    func_node
        .child(0)
        .map(|first| first.kind() == "async")
        .unwrap_or(false)
}

/// Rebuild an import statement in normalized form, e.g.
/// `from ..pkg import (a,\n  b as c)` becomes `from ..pkg import a, b as c`.
fn canonical_import(import_node: &TSNode, source: &[u8]) -> String {
    let names = imported_names(import_node, source);

    match import_node.kind() {
        "import_statement" => format!("import {}", names.join(", ")),
        "future_import_statement" => format!("from __future__ import {}", names.join(", ")),
        _ => {
            let module = import_node
                .child_by_field_name("module_name")
                .map(|module| module_path(&module, source))
                .unwrap_or_default();
            let targets = if find_child_by_kind(import_node, "wildcard_import").is_some() {
                "*".to_string()
            } else {
                names.join(", ")
            };
            format!("from {} import {}", module, targets)
        }
    }
}

fn imported_names(import_node: &TSNode, source: &[u8]) -> Vec<String> {
    let mut cursor = import_node.walk();
    let names: Vec<String> = import_node
        .children_by_field_name("name", &mut cursor)
        .map(|name| match name.kind() {
            "aliased_import" => {
                let target = name
                    .child_by_field_name("name")
                    .map(|n| dotted_name(&n, source))
                    .unwrap_or_default();
                match name.child_by_field_name("alias") {
                    Some(alias) => format!("{} as {}", target, extract_text(&alias, source)),
                    None => target,
                }
            }
            _ => dotted_name(&name, source),
        })
        .collect();
    names
}

fn module_path(module: &TSNode, source: &[u8]) -> String {
    if module.kind() != "relative_import" {
        return dotted_name(module, source);
    }

    let dots: String = find_child_by_kind(module, "import_prefix")
        .map(|prefix| {
            extract_text(&prefix, source)
                .chars()
                .filter(|c| *c == '.')
                .collect()
        })
        .unwrap_or_default();
    let name = find_child_by_kind(module, "dotted_name")
        .map(|n| dotted_name(&n, source))
        .unwrap_or_default();
    format!("{}{}", dots, name)
}

fn dotted_name(node: &TSNode, source: &[u8]) -> String {
    if node.kind() != "dotted_name" {
        return extract_text(node, source).trim().to_string();
    }
    let mut cursor = node.walk();
    let parts: Vec<&str> = node
        .named_children(&mut cursor)
        .filter(|part| part.kind() == "identifier")
        .map(|part| extract_text(&part, source))
        .collect();
    parts.join(".")
}

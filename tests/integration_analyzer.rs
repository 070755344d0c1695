use codesurvey::core::{AnalysisReport, CodebaseAnalyzer, FileRecord};
use codesurvey::{AnalyzerConfig, PathMode};
use serde_json::json;
use std::fs;
use std::path::Path;

fn write<P: AsRef<Path>>(path: P, contents: impl AsRef<[u8]>) {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn scenario_tree() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path().join("a/readme.md"), "Hello");
    write(
        dir.path().join("a/x.py"),
        "class Foo:\n    def bar(self):\n        pass\nimport os",
    );
    dir
}

fn foo_record() -> FileRecord {
    FileRecord {
        classes: vec!["Foo".to_string()],
        functions: vec!["bar".to_string()],
        imports: vec!["import os".to_string()],
    }
}

#[test]
fn analyzer_end_to_end_relative_paths() {
    let dir = scenario_tree();
    let out = dir.path().join("analysis.json");

    let analyzer =
        CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()).with_output(&out)).unwrap();
    let summary = analyzer.run();

    assert!(summary.saved);
    assert!(summary.diagnostics.is_empty());
    assert_eq!(summary.files_collected, 2);
    assert_eq!(summary.records, 1);
    assert_eq!(summary.documents, 1);

    let report = AnalysisReport::from_json(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        serde_json::to_value(&report.structure).unwrap(),
        json!({"directories": {"a": {"directories": {}, "files": ["readme.md", "x.py"]}}, "files": []})
    );
    assert_eq!(report.symbols.len(), 1);
    assert_eq!(report.symbols["a/x.py"], foo_record());
    assert_eq!(report.documentation["a/readme.md"], "Hello");
}

#[test]
fn analyzer_file_name_mode_uses_bare_names() {
    let dir = scenario_tree();
    let config = AnalyzerConfig::new(dir.path())
        .with_path_mode(PathMode::FileName)
        .with_working_dir(dir.path().join("a"));

    let (report, diagnostics) = CodebaseAnalyzer::new(config).unwrap().analyze();

    assert!(diagnostics.is_empty());
    assert_eq!(report.symbols.keys().collect::<Vec<_>>(), vec!["x.py"]);
    assert_eq!(report.symbols["x.py"], foo_record());
    assert_eq!(report.documentation["readme.md"], "Hello");
}

#[test]
fn file_name_mode_cannot_open_files_outside_working_dir() {
    let dir = scenario_tree();
    let elsewhere = tempfile::TempDir::new().unwrap();
    let config = AnalyzerConfig::new(dir.path())
        .with_path_mode(PathMode::FileName)
        .with_working_dir(elsewhere.path());

    let (report, diagnostics) = CodebaseAnalyzer::new(config).unwrap().analyze();

    assert!(report.symbols.is_empty());
    assert!(report.documentation.is_empty());
    assert_eq!(report.structure.file_count(), 2);
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.entries().iter().all(|d| d.kind == "read"));
}

#[test]
fn same_named_files_stay_distinct_in_relative_mode() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path().join("one/util.py"), "def first():\n    pass\n");
    write(dir.path().join("two/util.py"), "def second():\n    pass\n");

    let (report, _) = CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()))
        .unwrap()
        .analyze();
    assert_eq!(report.symbols["one/util.py"].functions, vec!["first"]);
    assert_eq!(report.symbols["two/util.py"].functions, vec!["second"]);

    // Bare names collapse; the later file in collection order wins.
    let legacy = AnalyzerConfig::new(dir.path())
        .with_path_mode(PathMode::FileName)
        .with_working_dir(dir.path().join("two"));
    let (report, _) = CodebaseAnalyzer::new(legacy).unwrap().analyze();
    assert_eq!(report.symbols.len(), 1);
    assert_eq!(report.symbols["util.py"].functions, vec!["second"]);
}

#[test]
fn broken_python_file_is_skipped_and_others_survive() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path().join("good.py"), "import sys\n\ndef main():\n    pass\n");
    write(dir.path().join("pkg/bad.py"), "def oops(:\n    return\n");
    write(dir.path().join("pkg/app.js"), "class App {}\n");

    let (report, diagnostics) = CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()))
        .unwrap()
        .analyze();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.entries()[0].kind, "parse");
    assert!(diagnostics.mentions("bad.py"));
    assert!(!report.symbols.contains_key("pkg/bad.py"));
    assert_eq!(report.symbols["good.py"].functions, vec!["main"]);
    assert_eq!(report.symbols["good.py"].imports, vec!["import sys"]);
    assert_eq!(report.symbols["pkg/app.js"].classes, vec!["App"]);
}

#[test]
fn unsupported_and_empty_files_produce_no_record() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path().join("main.go"), "package main\nfunc main() {}\n");
    write(dir.path().join("style.css"), "class Foo {}\n");
    write(dir.path().join("empty.py"), "x = 1\n");
    write(dir.path().join("blank.js"), "");

    let (report, diagnostics) = CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()))
        .unwrap()
        .analyze();

    assert!(diagnostics.is_empty());
    assert!(report.symbols.is_empty());
    assert_eq!(report.structure.files.len(), 4);
}

#[test]
fn undecodable_bytes_do_not_fail_the_run() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path().join("legacy.js"), b"// \xff\xfe\xfd\nfunction ok() {}\n".as_slice());
    write(dir.path().join("README"), b"caf\xe9".as_slice());

    let (report, diagnostics) = CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()))
        .unwrap()
        .analyze();

    assert!(diagnostics.is_empty());
    assert_eq!(report.symbols["legacy.js"].functions, vec!["ok"]);
    assert_eq!(report.documentation["README"], "caf\u{FFFD}");
}

#[test]
fn oversized_files_are_skipped_with_a_size_warning() {
    let dir = tempfile::TempDir::new().unwrap();
    let big = format!("function big() {{}}\n{}", "// pad\n".repeat(200));
    write(dir.path().join("big.js"), &big);
    write(dir.path().join("small.js"), "function small() {}\n");
    write(dir.path().join("README.md"), "x".repeat(500));

    let config = AnalyzerConfig::new(dir.path()).with_max_file_size(256);
    let (report, diagnostics) = CodebaseAnalyzer::new(config).unwrap().analyze();

    assert_eq!(report.symbols.keys().collect::<Vec<_>>(), vec!["small.js"]);
    assert!(report.documentation.is_empty());
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.entries().iter().all(|d| d.kind == "size"));

    let unlimited = AnalyzerConfig::new(dir.path()).with_max_file_size(0);
    let (report, diagnostics) = CodebaseAnalyzer::new(unlimited).unwrap().analyze();
    assert!(diagnostics.is_empty());
    assert_eq!(report.symbols.len(), 2);
    assert_eq!(report.documentation.len(), 1);
}

#[test]
fn save_failure_is_reported_not_raised() {
    let dir = scenario_tree();
    let out = dir.path().join("missing-dir/analysis.json");

    let summary = CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()).with_output(&out))
        .unwrap()
        .run();

    assert!(!summary.saved);
    assert!(!out.exists());
    assert_eq!(summary.records, 1);
}

#[test]
fn js_functions_follow_source_order() {
    let dir = tempfile::TempDir::new().unwrap();
    write(
        dir.path().join("index.js"),
        "function foo() {}\nconst bar = () => {}\n",
    );

    let (report, _) = CodebaseAnalyzer::new(AnalyzerConfig::new(dir.path()))
        .unwrap()
        .analyze();
    assert_eq!(report.symbols["index.js"].functions, vec!["foo", "bar"]);
}

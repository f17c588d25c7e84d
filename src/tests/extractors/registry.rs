use crate::extractors::{analyze, analyze_content, Language};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_detect_by_extension() {
    let cases = [
        ("lib.rs", Language::Rust),
        ("app.py", Language::Python),
        ("index.mjs", Language::JavaScript),
        ("view.tsx", Language::TypeScript),
        ("main.go", Language::Go),
        ("App.java", Language::Java),
        ("main.c", Language::C),
        ("main.cpp", Language::Cpp),
        ("Rakefile.rake", Language::Ruby),
        ("build.sh", Language::Shell),
        ("site.css", Language::Css),
        ("data.json", Language::Json),
        ("ci.yml", Language::Yaml),
        ("Cargo.toml", Language::Toml),
        ("README.md", Language::Plain),
    ];
    for (file, expected) in cases {
        assert_eq!(Language::detect(Path::new(file), None), expected, "{}", file);
    }
}

#[test]
fn test_detect_extensionless_by_shebang() {
    let detect = |content: &str| Language::detect(Path::new("bin/tool"), Some(content));

    assert_eq!(detect("#!/usr/bin/env python3\nprint(1)\n"), Language::Python);
    assert_eq!(detect("#!/bin/bash\necho hi\n"), Language::Shell);
    assert_eq!(detect("#!/usr/bin/env -S node --harmony\n"), Language::JavaScript);
    assert_eq!(detect("#!/usr/bin/ruby\n"), Language::Ruby);
    assert_eq!(detect("#!/usr/bin/perl\n"), Language::Plain);
    assert_eq!(detect("no shebang here\n"), Language::Plain);
}

#[test]
fn test_unknown_file_gets_empty_summary() {
    let summary = analyze_content(Path::new("notes.txt"), "fn main() {}\n");

    assert_eq!(summary.language, "plain");
    assert!(summary.functions.is_empty());
    assert!(summary.errors.is_empty());
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let summary = analyze(&dir.path().join("gone.py"));

    assert_eq!(summary.language, "python");
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("read-error: "), "{}", summary.errors[0]);
    assert!(summary.imports.is_empty());
    assert!(summary.functions.is_empty());
    assert!(summary.types.is_empty());
    assert!(summary.entry_points.is_empty());
}

#[test]
fn test_non_utf8_file_is_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.rs");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x66, 0x6e]).unwrap();

    let summary = analyze(&path);
    assert!(summary.errors[0].starts_with("read-error"));
}

#[test]
fn test_degraded_summary_keeps_core_fields() {
    let summary = analyze_content(Path::new("bad.json"), "{");
    let value = serde_json::to_value(&summary).unwrap();

    for field in ["imports", "functions", "types", "entry_points", "errors"] {
        assert!(value.get(field).is_some(), "missing {}", field);
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.py");
    fs::write(
        &path,
        "import os\n\nclass A:\n    def run(self):\n        pass\n\ndef main():\n    pass\n",
    )
    .unwrap();

    let first = analyze(&path);
    let second = analyze(&path);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

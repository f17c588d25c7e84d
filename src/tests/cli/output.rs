use crate::cli::{OutputFormat, OutputWriter, ProgressEvent, ProgressReporter};
use crate::extractors::{FunctionInfo, StructuralSummary};
use serde_json::Value;

fn summary(language: &str, function: &str) -> StructuralSummary {
    let mut summary = StructuralSummary::empty(language);
    summary.functions.push(FunctionInfo::new(function));
    summary
}

fn render(format: OutputFormat, items: &[(&str, StructuralSummary)]) -> String {
    let mut writer = OutputWriter::new(format, Vec::new());
    for (path, summary) in items {
        writer.write_summary(path, summary).unwrap();
    }
    String::from_utf8(writer.finish().unwrap()).unwrap()
}

#[test]
fn test_json_single_file_prints_bare_summary() {
    let out = render(OutputFormat::Json, &[("main.rs", summary("rust", "main"))]);

    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["language"], "rust");
    assert_eq!(value["functions"][0]["name"], "main");
    for field in ["imports", "functions", "types", "entry_points", "errors"] {
        assert!(value.get(field).is_some(), "missing {}", field);
    }
}

#[test]
fn test_json_multiple_files_keyed_by_path() {
    let out = render(
        OutputFormat::Json,
        &[
            ("b.py", summary("python", "run")),
            ("a.go", summary("go", "Main")),
        ],
    );

    let value: Value = serde_json::from_str(&out).unwrap();
    let object = value.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b.py", "a.go"]);
    assert_eq!(value["a.go"]["language"], "go");
}

#[test]
fn test_ndjson_one_record_per_line() {
    let out = render(
        OutputFormat::Ndjson,
        &[
            ("one.rb", summary("ruby", "greet")),
            ("two.sh", summary("bash", "deploy")),
        ],
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["path"], "one.rb");
    assert_eq!(first["summary"]["functions"][0]["name"], "greet");
    let second: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["summary"]["language"], "bash");
}

#[test]
fn test_json_with_nothing_written_is_empty() {
    assert!(render(OutputFormat::Json, &[]).is_empty());
}

#[test]
fn test_quiet_reporter_still_tracks_completion() {
    let reporter = ProgressReporter::quiet();

    assert!(matches!(
        reporter.complete(5),
        ProgressEvent::Completed { total: 5, .. }
    ));
}

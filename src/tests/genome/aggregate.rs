use crate::error::{ExtractionError, GenomeError};
use crate::extractors::{EntryPoint, FunctionInfo, StructuralSummary};
use crate::genome::{FileEntry, Genome, GenomeStats, GENOME_FORMAT_VERSION};
use std::fs;
use tempfile::tempdir;

fn summary(language: &str, functions: &[&str]) -> StructuralSummary {
    let mut summary = StructuralSummary::empty(language);
    summary.functions = functions.iter().map(|f| FunctionInfo::new(*f)).collect();
    summary
}

#[test]
fn test_merge_replaces_and_remove_drops() {
    let mut genome = Genome::new("/repo");

    genome.merge("src/a.py", summary("python", &["one"]), None);
    genome.merge("src/a.py", summary("python", &["one", "two"]), Some("abc".into()));
    assert_eq!(genome.len(), 1);

    let entry = genome.get("src/a.py").unwrap();
    assert_eq!(entry.summary.function_names(), vec!["one", "two"]);
    assert_eq!(entry.content_hash.as_deref(), Some("abc"));

    assert!(genome.remove("src/a.py").is_some());
    assert!(genome.remove("src/a.py").is_none());
    assert!(genome.is_empty());
}

#[test]
fn test_stats_from_entries_and_absorb() {
    let mut main = summary("rust", &["main", "helper"]);
    main.entry_points.insert(EntryPoint::MainFunction);
    let broken = StructuralSummary::degraded("json", &ExtractionError::parse("eof"));

    let entries = vec![
        FileEntry {
            content_hash: None,
            summary: main,
        },
        FileEntry {
            content_hash: None,
            summary: broken,
        },
    ];

    let mut stats = GenomeStats::from_entries(&entries[..1]);
    stats.absorb(GenomeStats::from_entries(&entries[1..]));

    assert_eq!(stats, GenomeStats::from_entries(&entries));
    assert_eq!(stats.files, 2);
    assert_eq!(stats.functions, 2);
    assert_eq!(stats.entry_point_files, 1);
    assert_eq!(stats.files_with_errors, 1);
    assert_eq!(stats.languages.get("rust"), Some(&1));
    assert_eq!(stats.languages.get("json"), Some(&1));
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("nested/.genome/genome.json");

    let mut genome = Genome::new(dir.path());
    genome.merge("lib.rs", summary("rust", &["run"]), Some("deadbeef".into()));
    let stats = GenomeStats::from_entries(genome.files.values());
    genome.finalize(stats);

    genome.save(&output).unwrap();
    assert!(output.exists());
    assert!(!output.with_extension("json.tmp").exists());

    let loaded = Genome::load(&output).unwrap();
    assert_eq!(loaded, genome);

    // Summary fields sit next to the hash in each file entry
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let entry = &raw["files"]["lib.rs"];
    assert_eq!(entry["language"], "rust");
    assert_eq!(entry["content_hash"], "deadbeef");
    assert!(entry["functions"].is_array());
    assert!(raw["generated_at"].as_str().unwrap().contains('T'));
}

#[test]
fn test_load_rejects_corrupt_and_foreign_versions() {
    let dir = tempdir().unwrap();
    let corrupt = dir.path().join("corrupt.json");
    fs::write(&corrupt, "{ not json").unwrap();
    assert!(matches!(
        Genome::load(&corrupt),
        Err(GenomeError::Serialization(_))
    ));

    let foreign = dir.path().join("foreign.json");
    let mut genome = Genome::new(dir.path());
    genome.version = "999".to_string();
    fs::write(&foreign, serde_json::to_string(&genome).unwrap()).unwrap();
    match Genome::load(&foreign) {
        Err(GenomeError::UnsupportedVersion { found, .. }) => assert_eq!(found, "999"),
        other => panic!("expected version error, got {:?}", other.map(|g| g.version)),
    }

    assert_ne!(GENOME_FORMAT_VERSION, "999");
    assert!(matches!(
        Genome::load(&dir.path().join("missing.json")),
        Err(GenomeError::Io(_))
    ));
}

use crate::cli::{resolve_config, ConfigOverrides};
use crate::config::{worker_count_for, GenomeConfig, DEFAULT_BATCH_SIZE, DEFAULT_DEBOUNCE_SECS};
use crate::error::ConfigError;
use crate::tests::helpers::write_file;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_defaults_are_valid() {
    let config = GenomeConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.debounce_secs, DEFAULT_DEBOUNCE_SECS);
    assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    assert_eq!(config.max_workers, worker_count_for(num_cpus::get()));
    assert!(config.ignore_patterns.iter().any(|p| p == "node_modules/"));
    assert!(!config.ignore_patterns.iter().any(|p| p == "genome.json"));
    assert_eq!(config.debounce_interval(), Duration::from_secs(2));
}

#[test]
fn test_validate_rejects_unusable_values() {
    let base = GenomeConfig::default();

    let zero_debounce = GenomeConfig {
        debounce_secs: 0.0,
        ..base.clone()
    };
    assert!(matches!(
        zero_debounce.validate(),
        Err(ConfigError::InvalidDebounce(_))
    ));

    let nan_debounce = GenomeConfig {
        debounce_secs: f64::NAN,
        ..base.clone()
    };
    assert!(nan_debounce.validate().is_err());

    let no_workers = GenomeConfig {
        max_workers: 0,
        ..base.clone()
    };
    assert!(matches!(
        no_workers.validate(),
        Err(ConfigError::InvalidWorkerCount)
    ));

    let no_batch = GenomeConfig {
        batch_size: 0,
        ..base.clone()
    };
    assert!(matches!(no_batch.validate(), Err(ConfigError::InvalidBatchSize)));

    let empty_pattern = GenomeConfig {
        ignore_patterns: vec![String::new()],
        ..base
    };
    assert!(matches!(
        empty_pattern.validate(),
        Err(ConfigError::EmptyIgnorePattern)
    ));
}

#[test]
fn test_output_path_resolution() {
    let root = Path::new("/repo");
    let relative = GenomeConfig::default();
    assert_eq!(relative.output_path(root), PathBuf::from("/repo/.genome/genome.json"));

    let absolute = GenomeConfig {
        output: PathBuf::from("/var/tmp/genome.json"),
        ..GenomeConfig::default()
    };
    assert_eq!(absolute.output_path(root), PathBuf::from("/var/tmp/genome.json"));
}

#[test]
fn test_config_file_is_loaded() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        ".genome/config.toml",
        "debounce_secs = 0.5\nmax_workers = 3\nignore_patterns = [\"vendor\"]\n",
    );

    let config = GenomeConfig::load_or_default(dir.path()).unwrap();

    assert_eq!(config.debounce_secs, 0.5);
    assert_eq!(config.max_workers, 3);
    assert_eq!(config.ignore_patterns, vec!["vendor"]);
    // Unspecified keys keep their defaults
    assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempdir().unwrap();

    let config = GenomeConfig::load_or_default(dir.path()).unwrap();

    assert_eq!(config, GenomeConfig::default());
}

#[test]
fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), ".genome/config.toml", "debounce_secs = \"soon\"\n");

    let err = GenomeConfig::load_or_default(dir.path()).unwrap_err();

    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_config_file_values_are_validated() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), ".genome/config.toml", "batch_size = 0\n");

    assert!(matches!(
        GenomeConfig::load_or_default(dir.path()),
        Err(ConfigError::InvalidBatchSize)
    ));
}

#[test]
fn test_overrides_win_over_config_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), ".genome/config.toml", "max_workers = 3\nbatch_size = 50\n");

    let config = resolve_config(
        dir.path(),
        ConfigOverrides {
            workers: Some(1),
            debounce_secs: Some(0.25),
            ignore: vec!["fixtures".to_string()],
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(config.max_workers, 1);
    assert_eq!(config.batch_size, 50);
    assert_eq!(config.debounce_secs, 0.25);
    assert!(config.ignore_patterns.contains(&"fixtures".to_string()));
    assert!(config.ignore_patterns.contains(&"node_modules/".to_string()));
}

#[test]
fn test_invalid_override_is_rejected() {
    let dir = tempdir().unwrap();

    let result = resolve_config(
        dir.path(),
        ConfigOverrides {
            debounce_secs: Some(-1.0),
            ..Default::default()
        },
    );

    assert!(matches!(result, Err(ConfigError::InvalidDebounce(d)) if d == -1.0));
}

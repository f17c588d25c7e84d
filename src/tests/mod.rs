// Genome's test infrastructure
//
// Tests are grouped by component. Filesystem tests use tempfile directories;
// watcher tests run on tokio with short debounce intervals.

// ============================================================================
// EXTRACTOR TESTS - One module per analyzer family, plus the registry
// ============================================================================
pub mod extractors {
    pub mod c_family;
    pub mod css;
    pub mod go;
    pub mod java;
    pub mod javascript;
    pub mod python;
    pub mod registry; // Language detection, degraded summaries, idempotence
    pub mod ruby;
    pub mod rust;
    pub mod shell;
    pub mod structured; // JSON / YAML / TOML documents
}

// ============================================================================
// ENGINE TESTS - Strategy selection, ordering, failure isolation, batches
// ============================================================================
pub mod engine {
    pub mod batch;
    pub mod failures;
    pub mod strategy;
}

// ============================================================================
// GENOME TESTS - Aggregate index and generation pipeline
// ============================================================================
pub mod genome {
    pub mod aggregate;
    pub mod pipeline;
}

// ============================================================================
// WATCHER TESTS - Debounce, filtering, regeneration
// ============================================================================
pub mod watcher {
    pub mod debounce;
    pub mod filtering;
    pub mod regeneration;
}

// ============================================================================
// CLI AND CONFIG TESTS
// ============================================================================
pub mod cli {
    pub mod config;
    pub mod output;
}

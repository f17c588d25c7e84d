// JSON analyzer
//
// Malformed documents surface serde_json's own diagnostic (with line and
// column) as a parse error.

use crate::error::ExtractionError;
use crate::extractors::base::{Analyzer, StructuralSummary, SummaryDetails};
use crate::extractors::structure::describe_document;
use serde_json::Value;
use std::path::Path;

pub struct JsonAnalyzer;

impl Analyzer for JsonAnalyzer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let root: Value =
            serde_json::from_str(content).map_err(|e| ExtractionError::parse(e.to_string()))?;

        let mut summary = StructuralSummary::empty(self.name());
        summary.details = Some(SummaryDetails::Document(describe_document(&root)));
        Ok(summary)
    }
}

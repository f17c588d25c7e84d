// TOML analyzer

use crate::error::ExtractionError;
use crate::extractors::base::{Analyzer, StructuralSummary, SummaryDetails};
use crate::extractors::structure::describe_document;
use serde_json::{Map, Number, Value};
use std::path::Path;

pub struct TomlAnalyzer;

impl Analyzer for TomlAnalyzer {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let table: ::toml::Table =
            ::toml::from_str(content).map_err(|e| ExtractionError::parse(e.to_string()))?;

        let root = toml_to_json(::toml::Value::Table(table));
        let mut summary = StructuralSummary::empty(self.name());
        summary.details = Some(SummaryDetails::Document(describe_document(&root)));
        Ok(summary)
    }
}

fn toml_to_json(value: ::toml::Value) -> Value {
    match value {
        ::toml::Value::String(s) => Value::String(s),
        ::toml::Value::Integer(i) => Value::from(i),
        ::toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ::toml::Value::Boolean(b) => Value::Bool(b),
        ::toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        ::toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        ::toml::Value::Table(table) => {
            let mut map = Map::new();
            for (key, value) in table {
                map.insert(key, toml_to_json(value));
            }
            Value::Object(map)
        }
    }
}

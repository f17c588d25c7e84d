// YAML analyzer
//
// Only the first document of a multi-document stream is described.

use crate::error::ExtractionError;
use crate::extractors::base::{Analyzer, StructuralSummary, SummaryDetails};
use crate::extractors::structure::describe_document;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::path::Path;

pub struct YamlAnalyzer;

impl Analyzer for YamlAnalyzer {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let root = match serde_yaml::Deserializer::from_str(content).next() {
            Some(document) => serde_yaml::Value::deserialize(document)
                .map_err(|e| ExtractionError::parse(e.to_string()))?,
            None => serde_yaml::Value::Null,
        };

        let mut summary = StructuralSummary::empty(self.name());
        summary.details = Some(SummaryDetails::Document(describe_document(&yaml_to_json(root))));
        Ok(summary)
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(key_to_string(&key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

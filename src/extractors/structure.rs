//! Bounded structure capture for tree-shaped documents
//!
//! JSON, YAML and TOML are all normalised to `serde_json::Value` and described
//! by the same [`Shape`]. Recursion stops at [`MAX_DEPTH`]; deeper values are
//! reported as `truncated`. Arrays are classified from at most
//! [`ARRAY_SAMPLE_SIZE`] leading elements.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::base::DocumentDetails;

pub const MAX_DEPTH: usize = 5;
pub const ARRAY_SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Object,
    Array,
    String,
    Int,
    Float,
    Bool,
    Null,
    Truncated,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueType::Object,
            Value::Array(_) => ValueType::Array,
            Value::String(_) => ValueType::String,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueType::Int,
            Value::Number(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::Null => ValueType::Null,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shape {
    #[serde(rename = "type")]
    pub value_type: ValueType,
    /// Object keys in document order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Shape>>,
    /// Array length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Set only when every sampled element shares one type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ValueType>,
    /// Structure of the first element of a homogeneous array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_structure: Option<Box<Shape>>,
}

impl Shape {
    fn leaf(value_type: ValueType) -> Self {
        Self {
            value_type,
            keys: None,
            properties: None,
            count: None,
            item_type: None,
            item_structure: None,
        }
    }

    pub fn truncated() -> Self {
        Self::leaf(ValueType::Truncated)
    }
}

/// Describe `value` as seen at `depth` (the document root is depth 0)
pub fn capture(value: &Value, depth: usize) -> Shape {
    if depth >= MAX_DEPTH {
        return Shape::truncated();
    }

    match value {
        Value::Object(map) => {
            let mut shape = Shape::leaf(ValueType::Object);
            shape.keys = Some(map.keys().cloned().collect());
            shape.properties = Some(
                map.iter()
                    .map(|(k, v)| (k.clone(), capture(v, depth + 1)))
                    .collect(),
            );
            shape
        }
        Value::Array(items) => {
            let mut shape = Shape::leaf(ValueType::Array);
            shape.count = Some(items.len());
            if let Some(item_type) = homogeneous_type(items) {
                shape.item_type = Some(item_type);
                shape.item_structure = items.first().map(|first| Box::new(capture(first, depth + 1)));
            }
            shape
        }
        other => Shape::leaf(ValueType::of(other)),
    }
}

/// Shared type of the sampled leading elements, if there is one
fn homogeneous_type(items: &[Value]) -> Option<ValueType> {
    let mut sample = items.iter().take(ARRAY_SAMPLE_SIZE).map(ValueType::of);
    let first = sample.next()?;
    sample.all(|t| t == first).then_some(first)
}

/// Build the document-level details for a parsed root value
pub fn describe_document(root: &Value) -> DocumentDetails {
    let (size, keys) = match root {
        Value::Object(map) => (map.len(), map.keys().cloned().collect()),
        Value::Array(items) => (items.len(), Vec::new()),
        _ => (0, Vec::new()),
    };

    DocumentDetails {
        value_type: ValueType::of(root),
        size,
        keys,
        structure: capture(root, 0),
    }
}

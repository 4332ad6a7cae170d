//! Structured form of one uploaded relationship record.

use medgraph_core::error::{ValidationError, require};
use medgraph_core::graph::Category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A relationship record as it arrives from an upload. Every field is optional
/// until [`IngestRecord::validate`] checks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRecord {
    pub source_entity: Option<String>,
    pub relationship_type: Option<String>,
    pub target_entity: Option<String>,
    pub source_type: Option<String>,
    pub target_type: Option<String>,
}

/// A record whose required fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub source: String,
    pub label: String,
    pub target: String,
    pub source_category: Option<Category>,
    pub target_category: Option<Category>,
}

impl IngestRecord {
    pub fn new(
        source_entity: impl Into<String>,
        relationship_type: impl Into<String>,
        target_entity: impl Into<String>,
    ) -> Self {
        Self {
            source_entity: Some(source_entity.into()),
            relationship_type: Some(relationship_type.into()),
            target_entity: Some(target_entity.into()),
            source_type: None,
            target_type: None,
        }
    }

    #[must_use]
    pub fn with_types(mut self, source_type: Option<&str>, target_type: Option<&str>) -> Self {
        self.source_type = source_type.map(String::from);
        self.target_type = target_type.map(String::from);
        self
    }

    /// Build a record from one element of a JSON list.
    ///
    /// Strings are taken as is, numbers and booleans are stringified; `null`,
    /// arrays and nested objects count as missing.
    pub fn from_json_object(map: &Map<String, Value>) -> Self {
        let field = |name: &str| match map.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        };
        Self {
            source_entity: field("source_entity"),
            relationship_type: field("relationship_type"),
            target_entity: field("target_entity"),
            source_type: field("source_type"),
            target_type: field("target_type"),
        }
    }

    pub fn validate(&self) -> Result<ValidRecord, ValidationError> {
        let source = required("source_entity", self.source_entity.as_deref())?;
        let label = required("relationship_type", self.relationship_type.as_deref())?;
        let target = required("target_entity", self.target_entity.as_deref())?;
        Ok(ValidRecord {
            source,
            label,
            target,
            source_category: type_hint(self.source_type.as_deref()),
            target_category: type_hint(self.target_type.as_deref()),
        })
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    require(field, value)?;
    Ok(value.to_string())
}

fn type_hint(raw: Option<&str>) -> Option<Category> {
    raw.map(Category::parse_lenient).filter(|c| c.is_concrete())
}

//! Payload decoding: JSON list of objects or CSV with a header row.

use crate::error::IngestError;
use crate::record::IngestRecord;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Encoding of an uploaded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Csv,
}

impl PayloadFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, IngestError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// A payload entry that could not be turned into an applied relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// Zero-based position of the entry in the payload.
    pub index: usize,
    pub reason: String,
}

/// Decoded payload. Entry `i` is the `i`-th record of the upload, or the
/// reason it could not be decoded.
#[derive(Debug, Clone, Default)]
pub struct ParsedPayload {
    pub entries: Vec<Result<IngestRecord, String>>,
}

impl ParsedPayload {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode `content` as `format`.
///
/// Fails as a whole only when the payload itself is unreadable; individual bad
/// entries are kept as `Err` entries.
pub fn parse_payload(content: &str, format: PayloadFormat) -> Result<ParsedPayload, IngestError> {
    match format {
        PayloadFormat::Json => parse_json(content),
        PayloadFormat::Csv => parse_csv(content),
    }
}

fn parse_json(content: &str) -> Result<ParsedPayload, IngestError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(IngestError::NotAList);
    };
    let entries = items
        .iter()
        .map(|item| match item {
            Value::Object(map) => Ok(IngestRecord::from_json_object(map)),
            other => Err(format!("expected an object, found {}", json_kind(other))),
        })
        .collect();
    Ok(ParsedPayload { entries })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_csv(content: &str) -> Result<ParsedPayload, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());
    // Surface a broken header row as a payload error before reading rows.
    reader.headers()?;

    let entries = reader
        .deserialize::<IngestRecord>()
        .map(|row| row.map_err(|e| e.to_string()))
        .collect();
    Ok(ParsedPayload { entries })
}

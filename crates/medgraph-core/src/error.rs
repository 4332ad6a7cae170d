//! Validation errors shared by every engine operation.

/// Malformed input to an engine operation.
///
/// Querying an entity that is absent from the graph is *not* an error; see
/// the query engine's `NotFound` status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("unknown query kind: {0}")]
    UnknownQueryKind(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Reject an empty required string field.
pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

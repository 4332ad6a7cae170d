//! Errors that stop a whole payload from being ingested.

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unsupported file type `{0}`: only .json and .csv are supported")]
    UnsupportedFormat(String),
    #[error("failed to read payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV payload: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON payload must be a list of objects")]
    NotAList,
    #[error("record {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
}

//! Ingestion of uploaded relationship records.
//!
//! Decodes JSON (list of objects) and CSV (header row) payloads into
//! [`record::IngestRecord`]s, validates them, and upserts each valid record
//! into a graph. Malformed records are reported and skipped unless the caller
//! asks to abort.

pub mod batch;
pub mod error;
pub mod formats;
pub mod record;

pub use batch::{
    IngestReport, MalformedPolicy, apply_payload, ingest_file, ingest_str, upsert_record,
};
pub use error::IngestError;
pub use formats::{ParsedPayload, PayloadFormat, RejectedRecord, parse_payload};
pub use record::{IngestRecord, ValidRecord};

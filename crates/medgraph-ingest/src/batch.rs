//! Apply decoded payloads to a graph, one record at a time.

use crate::error::IngestError;
use crate::formats::{ParsedPayload, PayloadFormat, RejectedRecord, parse_payload};
use crate::record::IngestRecord;
use medgraph_core::error::ValidationError;
use medgraph_core::graph::{KnowledgeGraph, UpsertOutcome};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// What to do with a record that fails decoding or validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log it, record it in the report, continue with the next record.
    #[default]
    Skip,
    /// Stop with [`IngestError::Malformed`]. Records before it stay applied.
    Abort,
}

impl MalformedPolicy {
    pub fn from_skip(skip_malformed: bool) -> Self {
        if skip_malformed {
            Self::Skip
        } else {
            Self::Abort
        }
    }
}

/// Summary of one ingested payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub total: usize,
    pub applied: usize,
    pub rejected: Vec<RejectedRecord>,
    pub nodes_created: usize,
    pub edges_created: usize,
    pub categories_upgraded: usize,
}

impl IngestReport {
    fn record(&mut self, outcome: &UpsertOutcome) {
        self.applied += 1;
        self.nodes_created += outcome.nodes_created;
        self.categories_upgraded += outcome.categories_upgraded;
        if outcome.edge_created {
            self.edges_created += 1;
        }
    }
}

/// Validate one record and upsert it.
pub fn upsert_record(
    graph: &mut KnowledgeGraph,
    record: &IngestRecord,
) -> Result<UpsertOutcome, ValidationError> {
    let valid = record.validate()?;
    graph.upsert_relationship(
        &valid.source,
        &valid.label,
        &valid.target,
        valid.source_category,
        valid.target_category,
    )
}

/// Upsert every entry of `payload` in order.
///
/// Not atomic: with [`MalformedPolicy::Abort`] the records before the first
/// malformed one remain in the graph.
pub fn apply_payload(
    graph: &mut KnowledgeGraph,
    payload: ParsedPayload,
    policy: MalformedPolicy,
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport {
        total: payload.len(),
        ..IngestReport::default()
    };

    for (index, entry) in payload.entries.into_iter().enumerate() {
        let result = entry.and_then(|record| {
            upsert_record(graph, &record).map_err(|e| {
                tracing::debug!(index, ?record, "record failed validation");
                e.to_string()
            })
        });
        match result {
            Ok(outcome) => report.record(&outcome),
            Err(reason) => {
                if policy == MalformedPolicy::Abort {
                    return Err(IngestError::Malformed { index, reason });
                }
                tracing::warn!(index, %reason, "skipping malformed record");
                report.rejected.push(RejectedRecord { index, reason });
            }
        }
    }

    tracing::info!(
        total = report.total,
        applied = report.applied,
        rejected = report.rejected.len(),
        edges_created = report.edges_created,
        "payload ingested"
    );
    Ok(report)
}

/// Detect the format from `file_name`, decode `content` and apply it.
pub fn ingest_str(
    graph: &mut KnowledgeGraph,
    file_name: &str,
    content: &str,
    policy: MalformedPolicy,
) -> Result<IngestReport, IngestError> {
    let format = PayloadFormat::from_file_name(file_name)?;
    let payload = parse_payload(content, format)?;
    apply_payload(graph, payload, policy)
}

/// Read a `.json` or `.csv` file from disk and apply it.
pub fn ingest_file(
    graph: &mut KnowledgeGraph,
    path: &Path,
    policy: MalformedPolicy,
) -> Result<IngestReport, IngestError> {
    let file_name = path.to_string_lossy();
    // Reject unsupported extensions before touching the filesystem.
    PayloadFormat::from_file_name(&file_name)?;
    let content = fs::read_to_string(path)?;
    ingest_str(graph, &file_name, &content, policy)
}

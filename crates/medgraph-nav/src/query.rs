//! Typed relationship queries over a node's outgoing edges.

use medgraph_core::error::{ValidationError, require};
use medgraph_core::graph::{Category, KnowledgeGraph};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed query patterns: successors reached through one edge label,
/// optionally restricted to one successor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    DiagnosesForSymptom,
    TreatmentsForDisease,
    SpecialistsForDisease,
    SpecialistsForTreatment,
}

impl QueryKind {
    pub const ALL: [QueryKind; 4] = [
        QueryKind::DiagnosesForSymptom,
        QueryKind::TreatmentsForDisease,
        QueryKind::SpecialistsForDisease,
        QueryKind::SpecialistsForTreatment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::DiagnosesForSymptom => "diagnoses_for_symptom",
            QueryKind::TreatmentsForDisease => "treatments_for_disease",
            QueryKind::SpecialistsForDisease => "specialists_for_disease",
            QueryKind::SpecialistsForTreatment => "specialists_for_treatment",
        }
    }

    /// Edge label a successor must be reached through.
    pub fn label(self) -> &'static str {
        match self {
            QueryKind::DiagnosesForSymptom => "indicates",
            QueryKind::TreatmentsForDisease => "treated_by",
            QueryKind::SpecialistsForDisease => "managed_by",
            QueryKind::SpecialistsForTreatment => "prescribed_by",
        }
    }

    /// Category a successor must have, if restricted.
    pub fn category_filter(self) -> Option<Category> {
        match self {
            QueryKind::DiagnosesForSymptom | QueryKind::TreatmentsForDisease => None,
            QueryKind::SpecialistsForDisease | QueryKind::SpecialistsForTreatment => {
                Some(Category::Specialist)
            }
        }
    }

    fn message_prefix(self, entity: &str) -> String {
        match self {
            QueryKind::DiagnosesForSymptom => format!("Possible diagnoses for '{}'", entity),
            QueryKind::TreatmentsForDisease => format!("Recommended treatments for '{}'", entity),
            QueryKind::SpecialistsForDisease => format!("Specialists associated with '{}'", entity),
            QueryKind::SpecialistsForTreatment => format!("Specialists who prescribe '{}'", entity),
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownQueryKind(s.to_string()))
    }
}

/// Whether the queried entity exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// Entity exists; `results` may still be empty.
    Success,
    /// Entity has no known facts. Informational, not an error.
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// `None` only when an unrecognized kind name was asked about an absent entity.
    pub kind: Option<QueryKind>,
    pub entity: String,
    pub status: QueryStatus,
    /// Matching successor ids in edge insertion order.
    pub results: Vec<String>,
    pub message: String,
}

/// Evaluate `kind` against the successors of `entity_id`.
pub fn query(
    graph: &KnowledgeGraph,
    kind: QueryKind,
    entity_id: &str,
) -> Result<QueryResult, ValidationError> {
    require("entity", entity_id)?;

    if !graph.has_node(entity_id) {
        return Ok(not_found(Some(kind), entity_id));
    }

    let label = kind.label();
    let category = kind.category_filter();
    let results: Vec<String> = graph
        .successors(entity_id)
        .into_iter()
        .filter(|edge| edge.label == label)
        .filter(|edge| {
            category.is_none_or(|wanted| {
                graph
                    .get_node(&edge.target)
                    .is_some_and(|n| n.category == wanted)
            })
        })
        .map(|edge| edge.target.clone())
        .collect();

    let listed = if results.is_empty() {
        "None found".to_string()
    } else {
        results.join(", ")
    };
    Ok(QueryResult {
        kind: Some(kind),
        entity: entity_id.to_string(),
        status: QueryStatus::Success,
        message: format!("{}: {}", kind.message_prefix(entity_id), listed),
        results,
    })
}

fn not_found(kind: Option<QueryKind>, entity_id: &str) -> QueryResult {
    QueryResult {
        kind,
        entity: entity_id.to_string(),
        status: QueryStatus::NotFound,
        results: Vec::new(),
        message: format!("'{}' not found in the knowledge graph.", entity_id),
    }
}

/// Evaluate a query whose kind is given by its wire name.
///
/// An absent entity is reported as `NotFound` before the kind name is looked
/// at, so only queries about known entities can fail with `UnknownQueryKind`.
pub fn query_by_name(
    graph: &KnowledgeGraph,
    kind: &str,
    entity_id: &str,
) -> Result<QueryResult, ValidationError> {
    require("entity", entity_id)?;
    if !graph.has_node(entity_id) {
        return Ok(not_found(kind.parse().ok(), entity_id));
    }
    let kind: QueryKind = kind.parse()?;
    query(graph, kind, entity_id)
}

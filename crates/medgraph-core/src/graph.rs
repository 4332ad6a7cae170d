//! Graph data model for the medical knowledge graph.

use crate::error::{ValidationError, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// The kind of medical concept a node stands for.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Symptom,
    Disease,
    Treatment,
    Specialist,
    /// Referenced without a type hint (or with an unrecognized one).
    #[default]
    Unknown,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Symptom,
        Category::Disease,
        Category::Treatment,
        Category::Specialist,
        Category::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Symptom => "symptom",
            Category::Disease => "disease",
            Category::Treatment => "treatment",
            Category::Specialist => "specialist",
            Category::Unknown => "unknown",
        }
    }

    pub fn is_concrete(self) -> bool {
        self != Category::Unknown
    }

    /// Parse a type hint from an untrusted record.
    ///
    /// Surrounding whitespace and ASCII case are ignored; anything unrecognized
    /// degrades to [`Category::Unknown`] instead of failing.
    pub fn parse_lenient(raw: &str) -> Self {
        Self::match_name(raw.trim()).unwrap_or(Category::Unknown)
    }

    fn match_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::match_name(s.trim()).ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// A node: a uniquely named medical concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Display name and unique key. Case- and whitespace-sensitive.
    pub id: String,
    pub category: Category,
}

/// A directed, labeled edge between two entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// What a single upsert changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub nodes_created: usize,
    pub categories_upgraded: usize,
    pub edge_created: bool,
    /// Label already on the edge when the upsert asked for a different one.
    pub conflicting_label: Option<String>,
}

impl UpsertOutcome {
    /// True when the graph is exactly as it was before the upsert.
    pub fn is_noop(&self) -> bool {
        self.nodes_created == 0 && self.categories_upgraded == 0 && !self.edge_created
    }
}

/// Point-in-time copy of every node and edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nodes in first-reference order.
    pub nodes: Vec<Entity>,
    /// Edges grouped by source (in node order), each group in insertion order.
    pub edges: Vec<Relationship>,
    pub taken_at: DateTime<Utc>,
}

/// Aggregate counts for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub nodes_by_category: BTreeMap<Category, usize>,
    pub edges_by_label: BTreeMap<String, usize>,
}

/// In-memory typed, directed knowledge graph.
///
/// Mutated only through [`KnowledgeGraph::upsert_relationship`]; nodes and
/// edges are never removed.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: Vec<Entity>,
    /// Node id → index into `nodes`.
    node_index: HashMap<String, usize>,
    edges: Vec<Relationship>,
    /// Source id → indices into `edges`, in insertion order.
    outgoing: HashMap<String, Vec<usize>>,
    /// Source id → target id → index into `edges`.
    edge_index: HashMap<String, HashMap<String, usize>>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `source --label--> target`, creating nodes as needed.
    ///
    /// A node's category is only ever set once: an `Unknown` node takes the
    /// first concrete hint it sees, later hints are ignored. An existing edge
    /// between the same ordered pair keeps its original label.
    pub fn upsert_relationship(
        &mut self,
        source_id: &str,
        label: &str,
        target_id: &str,
        source_category: Option<Category>,
        target_category: Option<Category>,
    ) -> Result<UpsertOutcome, ValidationError> {
        require("source_id", source_id)?;
        require("label", label)?;
        require("target_id", target_id)?;

        let mut outcome = UpsertOutcome::default();
        self.touch_node(source_id, source_category, &mut outcome);
        self.touch_node(target_id, target_category, &mut outcome);

        if let Some(existing) = self.edge(source_id, target_id) {
            if existing.label != label {
                tracing::debug!(
                    source = source_id,
                    target = target_id,
                    kept = %existing.label,
                    ignored = label,
                    "edge already exists, label unchanged"
                );
                outcome.conflicting_label = Some(existing.label.clone());
            }
            return Ok(outcome);
        }

        let index = self.edges.len();
        self.edges.push(Relationship {
            source: source_id.to_string(),
            target: target_id.to_string(),
            label: label.to_string(),
        });
        self.outgoing
            .entry(source_id.to_string())
            .or_default()
            .push(index);
        self.edge_index
            .entry(source_id.to_string())
            .or_default()
            .insert(target_id.to_string(), index);
        outcome.edge_created = true;
        tracing::debug!("added {} --({})--> {}", source_id, label, target_id);

        Ok(outcome)
    }

    fn touch_node(&mut self, id: &str, hint: Option<Category>, outcome: &mut UpsertOutcome) {
        let hint = hint.filter(|c| c.is_concrete());
        if let Some(&index) = self.node_index.get(id) {
            let node = &mut self.nodes[index];
            if let Some(category) = hint
                && node.category == Category::Unknown
            {
                node.category = category;
                outcome.categories_upgraded += 1;
            }
            return;
        }
        self.node_index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(Entity {
            id: id.to_string(),
            category: hint.unwrap_or_default(),
        });
        outcome.nodes_created += 1;
    }

    pub fn get_node(&self, id: &str) -> Option<&Entity> {
        self.node_index.get(id).and_then(|&i| self.nodes.get(i))
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// The edge from `source_id` to `target_id`, if any.
    pub fn edge(&self, source_id: &str, target_id: &str) -> Option<&Relationship> {
        self.edge_index
            .get(source_id)
            .and_then(|targets| targets.get(target_id))
            .and_then(|&i| self.edges.get(i))
    }

    /// Outgoing edges of `id` in insertion order. Empty for unknown ids.
    pub fn successors(&self, id: &str) -> Vec<&Relationship> {
        self.outgoing
            .get(id)
            .map(|indices| indices.iter().filter_map(|&i| self.edges.get(i)).collect())
            .unwrap_or_default()
    }

    /// Nodes in first-reference order.
    pub fn nodes(&self) -> impl Iterator<Item = &Entity> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Full copy of the graph at this instant.
    pub fn snapshot(&self) -> Snapshot {
        let edges = self
            .nodes
            .iter()
            .flat_map(|n| self.successors(&n.id))
            .cloned()
            .collect();
        Snapshot {
            nodes: self.nodes.clone(),
            edges,
            taken_at: Utc::now(),
        }
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            ..GraphStats::default()
        };
        for node in &self.nodes {
            *stats.nodes_by_category.entry(node.category).or_default() += 1;
        }
        for edge in &self.edges {
            *stats.edges_by_label.entry(edge.label.clone()).or_default() += 1;
        }
        stats
    }
}

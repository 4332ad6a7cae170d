//! Export graph snapshots as visualization JSON, DOT (Graphviz) or Mermaid.

use crate::palette::Palette;
use anyhow::{Context, Result};
use medgraph_core::graph::{Category, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// Label used for an edge that somehow has none.
pub const DEFAULT_LINK_LABEL: &str = "connects";

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Dot,
    Mermaid,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "dot" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            _ => anyhow::bail!(
                "Unknown export format: {}. Use 'json', 'dot' or 'mermaid'.",
                s
            ),
        }
    }
}

/// Node as consumed by force-directed front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "color")]
    pub display_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    pub source: String,
    pub target: String,
    #[serde(rename = "relationship")]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

/// Project a snapshot into the node/link view. Order follows the snapshot.
pub fn graph_view(snapshot: &Snapshot, palette: &Palette) -> GraphView {
    let nodes = snapshot
        .nodes
        .iter()
        .map(|node| NodeView {
            id: node.id.clone(),
            name: node.id.clone(),
            category: node.category,
            display_color: palette.color(node.category).to_string(),
        })
        .collect();
    let links = snapshot
        .edges
        .iter()
        .map(|edge| LinkView {
            source: edge.source.clone(),
            target: edge.target.clone(),
            label: link_label(&edge.label).to_string(),
        })
        .collect();
    GraphView { nodes, links }
}

fn link_label(label: &str) -> &str {
    if label.is_empty() {
        DEFAULT_LINK_LABEL
    } else {
        label
    }
}

/// Serialize a view to a pretty-printed JSON string.
pub fn to_json(view: &GraphView) -> Result<String> {
    serde_json::to_string_pretty(view).context("failed to serialize graph view to JSON")
}

/// Export the graph as a DOT (Graphviz) string.
pub fn export_dot(snapshot: &Snapshot, palette: &Palette) -> String {
    let mut out = String::new();
    writeln!(out, "digraph MedGraph {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out, "  node [shape=box, style=\"rounded,filled\", fontsize=10];").unwrap();
    writeln!(out).unwrap();

    for node in &snapshot.nodes {
        let shape = match node.category {
            Category::Symptom => "ellipse",
            Category::Disease => "box",
            Category::Treatment => "component",
            Category::Specialist => "house",
            Category::Unknown => "plaintext",
        };
        writeln!(
            out,
            "  \"{}\" [shape={}, fillcolor=\"{}\", tooltip=\"{}\"];",
            dot_escape(&node.id),
            shape,
            palette.color(node.category),
            node.category
        )
        .unwrap();
    }

    writeln!(out).unwrap();

    for edge in &snapshot.edges {
        writeln!(
            out,
            "  \"{}\" -> \"{}\" [label=\"{}\"];",
            dot_escape(&edge.source),
            dot_escape(&edge.target),
            dot_escape(link_label(&edge.label))
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Export the graph as a Mermaid flowchart string.
///
/// Node ids are positional (`n0`, `n1`, ...) so arbitrary entity names never
/// collide after sanitizing; names are kept as labels.
pub fn export_mermaid(snapshot: &Snapshot, palette: &Palette) -> String {
    let mut out = String::new();
    writeln!(out, "flowchart LR").unwrap();

    for category in Category::ALL {
        writeln!(
            out,
            "  classDef {} fill:{},color:#000000",
            category,
            palette.color(category)
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    let position: std::collections::HashMap<&str, usize> = snapshot
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    for (i, node) in snapshot.nodes.iter().enumerate() {
        writeln!(
            out,
            "  n{}[\"{}\"]:::{}",
            i,
            mermaid_escape(&node.id),
            node.category
        )
        .unwrap();
    }

    writeln!(out).unwrap();

    for edge in &snapshot.edges {
        let (Some(src), Some(tgt)) = (
            position.get(edge.source.as_str()),
            position.get(edge.target.as_str()),
        ) else {
            continue;
        };
        writeln!(
            out,
            "  n{} -->|{}| n{}",
            src,
            mermaid_escape(link_label(&edge.label)),
            tgt
        )
        .unwrap();
    }

    out
}

/// Make text safe inside a quoted Mermaid label.
fn mermaid_escape(s: &str) -> String {
    s.replace('"', "#quot;").replace('|', "#124;")
}

/// Export the graph in the specified format.
pub fn export(snapshot: &Snapshot, palette: &Palette, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(&graph_view(snapshot, palette)),
        ExportFormat::Dot => Ok(export_dot(snapshot, palette)),
        ExportFormat::Mermaid => Ok(export_mermaid(snapshot, palette)),
    }
}

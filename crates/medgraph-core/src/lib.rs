//! Core types for the medical knowledge graph.
//!
//! Provides the graph data model ([`graph::KnowledgeGraph`]), node categories,
//! labeled relationships with their upsert invariants, a lock-guarded
//! [`shared::SharedGraph`] handle, configuration loading, and the demonstration
//! seed dataset.

pub mod config;
pub mod error;
pub mod graph;
pub mod seed;
pub mod shared;

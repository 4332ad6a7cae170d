//! Navigation tools for querying and rendering the medical knowledge graph.
//!
//! Provides the four fixed relationship queries, the category colour palette,
//! and the JSON/DOT/Mermaid projections consumed by visualization front ends.

pub mod export;
pub mod palette;
pub mod query;

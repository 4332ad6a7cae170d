//! Lock-guarded handle for sharing one graph between callers.
//!
//! Upserts inspect node categories and edge presence before mutating, so every
//! mutation runs under the write lock. Reads share the read lock and always see
//! a state between two complete mutations.

use crate::error::ValidationError;
use crate::graph::{Category, Entity, KnowledgeGraph, Relationship, Snapshot, UpsertOutcome};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cheaply cloneable handle; clones refer to the same graph.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<RwLock<KnowledgeGraph>>,
}

impl SharedGraph {
    pub fn new(graph: KnowledgeGraph) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn upsert_relationship(
        &self,
        source_id: &str,
        label: &str,
        target_id: &str,
        source_category: Option<Category>,
        target_category: Option<Category>,
    ) -> Result<UpsertOutcome, ValidationError> {
        self.inner.write().upsert_relationship(
            source_id,
            label,
            target_id,
            source_category,
            target_category,
        )
    }

    pub fn get_node(&self, id: &str) -> Option<Entity> {
        self.inner.read().get_node(id).cloned()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.inner.read().has_node(id)
    }

    pub fn successors(&self, id: &str) -> Vec<Relationship> {
        self.inner
            .read()
            .successors(id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().snapshot()
    }

    /// Run a read-only closure (e.g. a query) under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&KnowledgeGraph) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run a batch of mutations under a single write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut KnowledgeGraph) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

impl From<KnowledgeGraph> for SharedGraph {
    fn from(graph: KnowledgeGraph) -> Self {
        Self::new(graph)
    }
}

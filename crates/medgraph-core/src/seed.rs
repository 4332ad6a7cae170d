//! Demonstration dataset loaded at startup unless disabled.

use crate::error::ValidationError;
use crate::graph::{Category, KnowledgeGraph};

use crate::graph::Category::{Disease, Specialist, Symptom, Treatment};

/// `(source, label, target, source category, target category)`
pub const DEMO_RELATIONSHIPS: &[(&str, &str, &str, Category, Category)] = &[
    ("Fever", "indicates", "Influenza", Symptom, Disease),
    ("Fever", "indicates", "Common Cold", Symptom, Disease),
    ("Influenza", "treated_by", "Antivirals", Disease, Treatment),
    ("Influenza", "managed_by", "Infectious Disease Specialist", Disease, Specialist),
    ("Common Cold", "treated_by", "Rest and Fluids", Disease, Treatment),
    ("Antivirals", "prescribed_by", "Infectious Disease Specialist", Treatment, Specialist),
    ("Headache", "indicates", "Migraine", Symptom, Disease),
    ("Migraine", "treated_by", "Triptans", Disease, Treatment),
    ("Migraine", "managed_by", "Neurologist", Disease, Specialist),
    ("Triptans", "prescribed_by", "Neurologist", Treatment, Specialist),
    ("Shortness of Breath", "indicates", "Asthma", Symptom, Disease),
    ("Asthma", "treated_by", "Inhalers", Disease, Treatment),
    ("Asthma", "managed_by", "Pulmonologist", Disease, Specialist),
    ("Inhalers", "prescribed_by", "Pulmonologist", Treatment, Specialist),
    ("Chest Pain", "indicates", "Heart Attack", Symptom, Disease),
    ("Heart Attack", "treated_by", "Angioplasty", Disease, Treatment),
    ("Heart Attack", "managed_by", "Cardiologist", Disease, Specialist),
    ("Angioplasty", "prescribed_by", "Cardiologist", Treatment, Specialist),
];

/// Apply the demo relationships. Returns the number of edges created.
pub fn seed_demo(graph: &mut KnowledgeGraph) -> Result<usize, ValidationError> {
    let mut created = 0;
    for &(source, label, target, source_category, target_category) in DEMO_RELATIONSHIPS {
        let outcome = graph.upsert_relationship(
            source,
            label,
            target,
            Some(source_category),
            Some(target_category),
        )?;
        if outcome.edge_created {
            created += 1;
        }
    }
    tracing::info!(edges = created, "seeded demo dataset");
    Ok(created)
}

impl KnowledgeGraph {
    /// A graph pre-loaded with [`DEMO_RELATIONSHIPS`].
    pub fn with_demo_data() -> Result<Self, ValidationError> {
        let mut graph = Self::new();
        seed_demo(&mut graph)?;
        Ok(graph)
    }
}

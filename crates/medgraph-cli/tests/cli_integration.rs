//! Integration tests for medgraph-cli functionality.
//! Tests the underlying library flows that the CLI commands chain together.

use medgraph_core::config::MedGraphConfig;
use medgraph_core::graph::*;
use medgraph_ingest::{IngestError, MalformedPolicy};
use medgraph_nav::export::{ExportFormat, export, graph_view};
use medgraph_nav::palette::Palette;
use medgraph_nav::query::{QueryStatus, query_by_name};

fn write_file(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_seed_then_upload_then_query() {
    let tmpdir = tempfile::tempdir().unwrap();
    let data = write_file(
        tmpdir.path(),
        "extra.json",
        r#"[
            {"source_entity": "Fever", "relationship_type": "indicates", "target_entity": "Dengue",
             "target_type": "disease"},
            {"source_entity": "Dengue", "relationship_type": "managed_by",
             "target_entity": "Infectious Disease Specialist", "target_type": "Specialist"},
            {"source_entity": "Rash", "relationship_type": "indicates"}
        ]"#,
    );

    let mut graph = KnowledgeGraph::with_demo_data().unwrap();
    let report = medgraph_ingest::ingest_file(&mut graph, &data, MalformedPolicy::Skip).unwrap();
    assert_eq!(report.applied, 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].index, 2);
    assert!(!graph.has_node("Rash"));

    let result = query_by_name(&graph, "diagnoses_for_symptom", "Fever").unwrap();
    assert_eq!(result.status, QueryStatus::Success);
    assert_eq!(result.results, vec!["Influenza", "Common Cold", "Dengue"]);

    let result = query_by_name(&graph, "specialists_for_disease", "Dengue").unwrap();
    assert_eq!(result.results, vec!["Infectious Disease Specialist"]);
}

#[test]
fn test_strict_upload_stops_at_bad_record() {
    let tmpdir = tempfile::tempdir().unwrap();
    let data = write_file(
        tmpdir.path(),
        "edges.csv",
        "source_entity,relationship_type,target_entity\n\
         Cough,indicates,Bronchitis\n\
         Wheezing,,Asthma\n\
         Chills,indicates,Malaria\n",
    );

    let mut graph = KnowledgeGraph::new();
    let err = medgraph_ingest::ingest_file(&mut graph, &data, MalformedPolicy::Abort).unwrap_err();
    assert!(matches!(err, IngestError::Malformed { index: 1, .. }));
    assert!(graph.has_node("Bronchitis"));
    assert!(!graph.has_node("Malaria"));
}

#[test]
fn test_config_colors_reach_exported_json() {
    let tmpdir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmpdir.path().join(".medgraph")).unwrap();
    write_file(
        &tmpdir.path().join(".medgraph"),
        "config.toml",
        "[seed]\ndemo = false\n\n[display.colors]\nDisease = \"#B22222\"\n",
    );

    let config = MedGraphConfig::load(tmpdir.path()).unwrap();
    assert!(!config.seed.demo);

    let mut graph = KnowledgeGraph::new();
    graph
        .upsert_relationship(
            "Headache",
            "indicates",
            "Migraine",
            Some(Category::Symptom),
            Some(Category::Disease),
        )
        .unwrap();

    let palette = Palette::from_config(&config.display);
    let json = export(&graph.snapshot(), &palette, ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"][0]["color"], "#FFD700");
    assert_eq!(value["nodes"][1]["color"], "#B22222");
    assert_eq!(value["links"][0]["relationship"], "indicates");
}

#[test]
fn test_invalid_config_color_is_rejected() {
    let tmpdir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmpdir.path().join(".medgraph")).unwrap();
    write_file(
        &tmpdir.path().join(".medgraph"),
        "config.toml",
        "[display.colors]\nsymptom = \"yellow\"\n",
    );
    assert!(MedGraphConfig::load(tmpdir.path()).is_err());
}

#[test]
fn test_demo_graph_exports_every_format() {
    let graph = KnowledgeGraph::with_demo_data().unwrap();
    let snapshot = graph.snapshot();
    let palette = Palette::default();

    let view = graph_view(&snapshot, &palette);
    assert_eq!(view.nodes.len(), 18);
    assert_eq!(view.links.len(), 18);

    let dot = export(&snapshot, &palette, ExportFormat::Dot).unwrap();
    assert!(dot.contains("\"Asthma\" -> \"Inhalers\" [label=\"treated_by\"];"));

    let mermaid = export(&snapshot, &palette, ExportFormat::Mermaid).unwrap();
    assert_eq!(mermaid.matches("-->|").count(), 18);
}

#[test]
fn test_query_unknown_entity_after_reupload_is_not_found() {
    let tmpdir = tempfile::tempdir().unwrap();
    let data = write_file(
        tmpdir.path(),
        "one.json",
        r#"[{"source_entity": "A", "relationship_type": "indicates", "target_entity": "B"}]"#,
    );

    let mut graph = KnowledgeGraph::new();
    medgraph_ingest::ingest_file(&mut graph, &data, MalformedPolicy::Skip).unwrap();
    let again = medgraph_ingest::ingest_file(&mut graph, &data, MalformedPolicy::Skip).unwrap();
    assert_eq!(again.edges_created, 0);
    assert_eq!(graph.edge_count(), 1);

    let result = query_by_name(&graph, "treatments_for_disease", "C").unwrap();
    assert_eq!(result.status, QueryStatus::NotFound);
}

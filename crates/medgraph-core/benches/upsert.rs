use criterion::{Criterion, criterion_group, criterion_main};
use medgraph_core::graph::*;
use std::hint::black_box;

fn build_graph(symptom_count: usize) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();

    for i in 0..symptom_count {
        let symptom = format!("Symptom {}", i);
        let disease = format!("Disease {}", i / 3);
        let treatment = format!("Treatment {}", i / 5);
        graph
            .upsert_relationship(
                &symptom,
                "indicates",
                &disease,
                Some(Category::Symptom),
                Some(Category::Disease),
            )
            .unwrap();
        graph
            .upsert_relationship(
                &disease,
                "treated_by",
                &treatment,
                Some(Category::Disease),
                Some(Category::Treatment),
            )
            .unwrap();
    }

    graph
}

fn bench_upsert_1000(c: &mut Criterion) {
    c.bench_function("upsert_1000_symptoms", |b| {
        b.iter(|| build_graph(black_box(1000)))
    });
}

fn bench_repeat_upsert(c: &mut Criterion) {
    let mut graph = build_graph(1000);

    c.bench_function("upsert_existing_edge", |b| {
        b.iter(|| {
            graph
                .upsert_relationship(
                    black_box("Symptom 500"),
                    "indicates",
                    "Disease 166",
                    Some(Category::Symptom),
                    None,
                )
                .unwrap()
        })
    });
}

fn bench_snapshot_1000(c: &mut Criterion) {
    let graph = build_graph(1000);

    c.bench_function("snapshot_1000_symptoms", |b| {
        b.iter(|| black_box(&graph).snapshot())
    });
}

criterion_group!(
    benches,
    bench_upsert_1000,
    bench_repeat_upsert,
    bench_snapshot_1000
);
criterion_main!(benches);

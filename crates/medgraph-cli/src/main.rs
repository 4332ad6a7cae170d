//! CLI binary for the medical knowledge graph: seed, ingest, query and export.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medgraph_core::config::MedGraphConfig;
use medgraph_core::graph::{Category, KnowledgeGraph};
use medgraph_ingest::{IngestReport, MalformedPolicy};
use medgraph_nav::export::{self, ExportFormat};
use medgraph_nav::palette::Palette;
use medgraph_nav::query::{self, QueryKind, QueryStatus};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "medgraph", about = "Medical knowledge graph builder and query tool")]
struct Cli {
    /// Project root holding .medgraph/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Start from an empty graph instead of the demo dataset
    #[arg(long, global = true)]
    no_seed: bool,

    /// JSON or CSV file to ingest before running the command (repeatable)
    #[arg(short, long, global = true)]
    data: Vec<PathBuf>,

    /// Stop at the first malformed record instead of skipping it
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a single relationship and print the updated graph
    Add {
        /// Source entity (e.g. "Fever")
        source: String,

        /// Relationship label (e.g. "indicates")
        relationship: String,

        /// Target entity (e.g. "Influenza")
        target: String,

        /// Category of the source entity
        #[arg(long)]
        source_type: Option<Category>,

        /// Category of the target entity
        #[arg(long)]
        target_type: Option<Category>,
    },

    /// Ingest a JSON or CSV file and print the updated graph
    Upload {
        /// Path to a .json (list of records) or .csv (with header) file
        file: PathBuf,
    },

    /// Run a relationship query against an entity
    Query {
        /// Query kind, e.g. diagnoses_for_symptom (see `medgraph kinds`)
        kind: String,

        /// Entity to start from
        entity: String,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the whole graph
    Graph {
        /// Output format: json, dot, mermaid
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// List supported query kinds
    Kinds,

    /// Show graph statistics
    Info,
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = MedGraphConfig::load(&project_root).with_context(|| {
        format!("failed to load configuration from {}", project_root.display())
    })?;

    let policy = if cli.strict {
        MalformedPolicy::Abort
    } else {
        MalformedPolicy::from_skip(config.ingest.skip_malformed)
    };
    let palette = Palette::from_config(&config.display);
    let mut graph = build_graph(&config, cli.no_seed, &cli.data, policy)?;

    match cli.command {
        Commands::Add {
            source,
            relationship,
            target,
            source_type,
            target_type,
        } => cmd_add(
            &mut graph,
            &palette,
            &source,
            &relationship,
            &target,
            source_type,
            target_type,
        ),
        Commands::Upload { file } => cmd_upload(&mut graph, &palette, &file, policy),
        Commands::Query { kind, entity, json } => cmd_query(&graph, &kind, &entity, json),
        Commands::Graph { format } => cmd_graph(&graph, &palette, &format),
        Commands::Kinds => {
            cmd_kinds();
            Ok(())
        }
        Commands::Info => {
            cmd_info(&graph);
            Ok(())
        }
    }
}

/// Seed (unless disabled) and ingest every `--data` file.
fn build_graph(
    config: &MedGraphConfig,
    no_seed: bool,
    data: &[PathBuf],
    policy: MalformedPolicy,
) -> Result<KnowledgeGraph> {
    let mut graph = if config.seed.demo && !no_seed {
        KnowledgeGraph::with_demo_data()?
    } else {
        KnowledgeGraph::new()
    };

    for path in data {
        let report = medgraph_ingest::ingest_file(&mut graph, path, policy)
            .with_context(|| format!("failed to ingest {}", path.display()))?;
        print_report(path, &report);
    }
    tracing::debug!(nodes = graph.node_count(), edges = graph.edge_count(), "graph ready");
    Ok(graph)
}

fn print_report(path: &Path, report: &IngestReport) {
    eprintln!(
        "Ingested {}: {}/{} records applied ({} new nodes, {} new edges, {} categories upgraded)",
        path.display(),
        report.applied,
        report.total,
        report.nodes_created,
        report.edges_created,
        report.categories_upgraded
    );
    for rejected in &report.rejected {
        eprintln!("  Skipped record {}: {}", rejected.index, rejected.reason);
    }
}

fn print_graph_json(graph: &KnowledgeGraph, palette: &Palette) -> Result<()> {
    let view = export::graph_view(&graph.snapshot(), palette);
    println!("{}", export::to_json(&view)?);
    Ok(())
}

fn cmd_add(
    graph: &mut KnowledgeGraph,
    palette: &Palette,
    source: &str,
    relationship: &str,
    target: &str,
    source_type: Option<Category>,
    target_type: Option<Category>,
) -> Result<()> {
    let outcome =
        graph.upsert_relationship(source, relationship, target, source_type, target_type)?;
    if let Some(existing) = &outcome.conflicting_label {
        eprintln!(
            "Edge {} -> {} already exists as '{}'; label left unchanged.",
            source, target, existing
        );
    } else if outcome.is_noop() {
        eprintln!("Relationship already present; graph unchanged.");
    } else {
        eprintln!("Added: {} --({})--> {}", source, relationship, target);
    }
    print_graph_json(graph, palette)
}

fn cmd_upload(
    graph: &mut KnowledgeGraph,
    palette: &Palette,
    file: &Path,
    policy: MalformedPolicy,
) -> Result<()> {
    let report = medgraph_ingest::ingest_file(graph, file, policy)
        .with_context(|| format!("failed to process {}", file.display()))?;
    print_report(file, &report);
    print_graph_json(graph, palette)
}

fn cmd_query(graph: &KnowledgeGraph, kind: &str, entity: &str, json: bool) -> Result<()> {
    let result = query::query_by_name(graph, kind, entity)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    println!("{}", result.message);
    if result.status == QueryStatus::NotFound {
        eprintln!("Run `medgraph info` to see what the graph contains.");
    }
    Ok(())
}

fn cmd_graph(graph: &KnowledgeGraph, palette: &Palette, format: &str) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    println!("{}", export::export(&graph.snapshot(), palette, format)?);
    Ok(())
}

fn cmd_kinds() {
    for kind in QueryKind::ALL {
        let filter = kind
            .category_filter()
            .map(|c| format!(" (only {} targets)", c))
            .unwrap_or_default();
        println!("{:<28} follows '{}'{}", kind.as_str(), kind.label(), filter);
    }
}

fn cmd_info(graph: &KnowledgeGraph) {
    let stats = graph.stats();
    println!("=== Medical Knowledge Graph ===");
    println!("Nodes: {}", stats.total_nodes);
    for (category, count) in &stats.nodes_by_category {
        println!("  {:<12} {}", category.as_str(), count);
    }
    println!("Edges: {}", stats.total_edges);
    for (label, count) in &stats.edges_by_label {
        println!("  {:<16} {}", label, count);
    }
}

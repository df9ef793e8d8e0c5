//! Hyperdelta CLI - estimate the Gromov delta-hyperbolicity of a graph
//!
//! Usage:
//!   hyperdelta <edges.tsv>                         # Sample with default settings
//!   hyperdelta <edges.tsv> --graph-size 36691      # Declare the node-count bound
//!   hyperdelta <edges.tsv> --seed 7 -o json        # Reproducible run, JSON report
//!   hyperdelta <edges.tsv> --exhaustive            # Exact check (small graphs only)

use clap::{Parser, ValueEnum};
use hyperdelta_core::{
    exhaustive_max_delta, read_edge_list, run_parallel, AdjacencyGraph, FnProgress, GraphView,
    Improvement, IngestOptions, IterationBudget, NodeId, Quadruple, SamplingPolicy, SearchConfig,
    SearchReport, StopToken, EXHAUSTIVE_NODE_LIMIT,
};
use std::process;

#[derive(Parser)]
#[command(name = "hyperdelta")]
#[command(version)]
#[command(about = "Hyperdelta - sampling estimator for graph delta-hyperbolicity")]
#[command(
    long_about = "Estimate the Gromov delta-hyperbolicity of a large undirected graph by sampling quadruples from BFS discovery orders"
)]
struct Cli {
    /// Tab-separated edge list, one `u<TAB>v` pair per line
    #[arg(value_name = "EDGE_LIST")]
    file: String,

    /// Declared node-count bound N (roots are drawn from 1..=N)
    #[arg(long, value_name = "N")]
    graph_size: Option<usize>,

    /// Fixed number of iterations per round
    #[arg(long, value_name = "N", conflicts_with = "iteration_factor")]
    iterations: Option<usize>,

    /// Iterations per round as K * floor(ln N)
    #[arg(long, value_name = "K")]
    iteration_factor: Option<usize>,

    /// Number of rounds
    #[arg(long, value_name = "R")]
    rounds: Option<usize>,

    /// RNG seed for a reproducible run
    #[arg(long, value_name = "S")]
    seed: Option<u64>,

    /// Candidate pool heuristic
    #[arg(long, value_enum, value_name = "POLICY")]
    policy: Option<PolicyArg>,

    /// Worker threads for the parallel search
    #[arg(long, value_name = "W")]
    workers: Option<usize>,

    /// Stop after this many seconds and report the best value so far
    #[arg(long, value_name = "T")]
    time_budget_secs: Option<u64>,

    /// Skipped roots tolerated per iteration before it is abandoned
    #[arg(long, value_name = "M")]
    max_root_attempts: Option<usize>,

    /// Ignore lines starting with this prefix (e.g. '#')
    #[arg(long, value_name = "C")]
    comment_prefix: Option<String>,

    /// JSON file with search settings; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Compute the exact maximum over all quadruples instead of sampling
    #[arg(long)]
    exhaustive: bool,

    /// Print the adjacency list of the loaded graph
    #[arg(long)]
    dump_graph: bool,

    /// Output format: summary or json
    #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
    output: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    LogBand,
    SqrtCentered,
}

impl From<PolicyArg> for SamplingPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::LogBand => SamplingPolicy::LogBand,
            PolicyArg::SqrtCentered => SamplingPolicy::SqrtCentered,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        process::exit(1);
    }

    let options = IngestOptions {
        comment_prefix: cli.comment_prefix.clone(),
    };
    let (graph, summary) = match read_edge_list(&cli.file, &options) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading '{}': {}", cli.file, e);
            process::exit(1);
        }
    };

    let json = cli.output == "json";
    if !json {
        let max_degree = graph.node_ids().map(|id| graph.degree(id)).max().unwrap_or(0);
        println!(
            "Loaded '{}': {} nodes, {} edges, max degree {} ({} duplicate, {} self-loop lines)",
            cli.file,
            graph.node_count(),
            graph.edge_count(),
            max_degree,
            summary.duplicates,
            summary.self_loops
        );
    }

    if cli.dump_graph {
        for line in graph.adjacency_lines() {
            println!("{}", line);
        }
    }

    if cli.exhaustive {
        run_exhaustive(&graph, json);
        return;
    }

    let progress = FnProgress(|event: &Improvement| {
        if !json {
            println!("{}", format_improvement(&graph, event));
        }
    });
    let report = match run_parallel(&graph, &config, &progress, &StopToken::new()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_summary(&graph, &report);
    }
}

/// Settings from `--config` (if any), then flags on top.
fn build_config(cli: &Cli) -> Result<SearchConfig, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path, e))?;
            serde_json::from_str::<SearchConfig>(&text)
                .map_err(|e| format!("invalid config '{}': {}", path, e))?
        }
        None => SearchConfig::default(),
    };

    if let Some(n) = cli.graph_size {
        config.graph_size = Some(n);
    }
    if let Some(n) = cli.iterations {
        config.iterations = IterationBudget::Fixed(n);
    }
    if let Some(factor) = cli.iteration_factor {
        config.iterations = IterationBudget::LogScaled { factor };
    }
    if let Some(r) = cli.rounds {
        config.rounds = r;
    }
    if let Some(s) = cli.seed {
        config.seed = Some(s);
    }
    if let Some(p) = cli.policy {
        config.policy = p.into();
    }
    if let Some(w) = cli.workers {
        config.workers = Some(w);
    }
    if let Some(t) = cli.time_budget_secs {
        config.time_budget_secs = Some(t);
    }
    if let Some(m) = cli.max_root_attempts {
        config.max_root_attempts = m;
    }
    Ok(config)
}

fn run_exhaustive(graph: &AdjacencyGraph, json: bool) {
    let result = match exhaustive_max_delta(graph, EXHAUSTIVE_NODE_LIMIT) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Exhaustive check failed: {}", e);
            process::exit(1);
        }
    };
    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        }
        return;
    }
    println!(
        "Quadruples: {} evaluated, {} disconnected",
        result.quadruples_evaluated, result.quadruples_disconnected
    );
    if let Some(q) = &result.witness {
        println!("Witness: {}", quadruple_labels(graph, q));
    }
    println!("max delta: {}", result.max_delta);
}

fn format_improvement(graph: &AdjacencyGraph, event: &Improvement) -> String {
    format!(
        "round {} iteration {}: delta {} at {}",
        event.round,
        event.iteration,
        event.delta,
        quadruple_labels(graph, &event.quadruple)
    )
}

/// Quadruple rendered with the input node labels.
fn quadruple_labels(graph: &AdjacencyGraph, q: &Quadruple) -> String {
    let label = |id: NodeId| graph.label(id).unwrap_or("?");
    format!(
        "({}, {}, {}, {})",
        label(q.a),
        label(q.b),
        label(q.c),
        label(q.d)
    )
}

fn print_summary(graph: &AdjacencyGraph, report: &SearchReport) {
    println!(
        "\nSearch ({:?}, seed {}):",
        report.stop_reason, report.seed
    );
    println!(
        "  rounds: {}, iterations: {} ({} per round), abandoned: {}",
        report.rounds_completed,
        report.iterations_completed,
        report.iterations_per_round,
        report.iterations_abandoned
    );
    println!(
        "  samples skipped: {}, quadruples: {} evaluated, {} disconnected",
        report.samples_skipped, report.quadruples_evaluated, report.quadruples_disconnected
    );
    if let Some(w) = &report.witness {
        println!("  witness: {}", quadruple_labels(graph, &w.quadruple));
    }
    println!("max delta: {}", report.max_delta);
}

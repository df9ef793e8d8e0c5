//! # Hyperdelta Core
//!
//! Sampling estimator for the Gromov δ-hyperbolicity of large unweighted,
//! undirected graphs. Quadruples are drawn from BFS discovery orders, scored
//! with the four-point condition, and folded into a running maximum that only
//! ever increases.
//!
//! ```
//! use hyperdelta_core::{estimate, AdjacencyGraph, IterationBudget, SearchConfig};
//!
//! let ring = AdjacencyGraph::from_numeric_edges((1..40).map(|i| (i, i + 1)).chain([(40, 1)]));
//! let config = SearchConfig::default()
//!     .with_seed(7)
//!     .with_iterations(IterationBudget::Fixed(50));
//! let report = estimate(&ring, &config).unwrap();
//! assert_eq!(report.iterations_completed, 50);
//! assert!(report.max_delta.as_f64() >= 0.0);
//! ```

pub mod config;
pub mod engine;
pub mod storage;

// Re-export commonly used types
pub use config::{IterationBudget, SearchConfig};
pub use engine::bfs_sampler::{BfsSampler, SamplingPolicy};
pub use engine::errors::DeltaError;
pub use engine::exhaustive::{exhaustive_max_delta, ExhaustiveResult, EXHAUSTIVE_NODE_LIMIT};
pub use engine::four_point::{Delta, Quadruple};
pub use engine::graph::{AdjacencyGraph, GraphView, NodeId};
pub use engine::parallel_search::run_parallel;
pub use engine::running_max::{
    CollectProgress, FnProgress, Improvement, NoProgress, ProgressSink, RunningMaximum,
};
pub use engine::search::{run_sequential, SearchReport, StopReason, StopToken};
pub use engine::shortest_path::{BfsOracle, Distance, DistanceOracle};
pub use storage::{read_edge_list, IngestOptions, IngestSummary};

/// Run the search with default wiring: worker pool, no progress, no cancellation.
pub fn estimate<G: GraphView + Sync + ?Sized>(
    graph: &G,
    config: &SearchConfig,
) -> Result<SearchReport, DeltaError> {
    run_parallel(graph, config, &NoProgress, &StopToken::new())
}

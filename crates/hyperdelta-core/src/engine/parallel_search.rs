//! Parallel delta search over a bounded worker pool.
//!
//! Iterations of a round are independent: each reads the immutable graph,
//! draws roots from its own seeded RNG and reports candidates to the shared
//! [`RunningMaximum`]. A dedicated rayon pool of `workers` threads consumes the
//! round's iteration range; rounds run one after another.
//!
//! ## Feature gating
//!
//! Parallel search is behind the `parallel` feature flag. When disabled,
//! [`run_parallel`] falls back to the sequential driver.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SearchConfig;

use super::errors::DeltaError;
use super::graph::GraphView;
use super::running_max::ProgressSink;
use super::search::{SearchReport, StopToken};
#[cfg(feature = "parallel")]
use super::search::{finish, run_iteration, IterationStats, SearchPlan};
#[cfg(feature = "parallel")]
use super::running_max::RunningMaximum;

/// Search with a bounded worker pool.
///
/// Produces the same maximum and counters as [`super::search::run_sequential`]
/// for the same seed; only the witness may differ when several quadruples tie
/// for the maximum.
#[cfg(feature = "parallel")]
pub fn run_parallel<G: GraphView + Sync + ?Sized>(
    graph: &G,
    config: &SearchConfig,
    sink: &dyn ProgressSink,
    stop: &StopToken,
) -> Result<SearchReport, DeltaError> {
    let plan = SearchPlan::new(graph, config)?;
    let stop = match config.time_budget() {
        Some(budget) => stop.clone().with_budget(budget),
        None => stop.clone(),
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(workers) = config.workers {
        builder = builder.num_threads(workers);
    }
    let pool = builder
        .build()
        .map_err(|e| DeltaError::Internal(format!("failed to build worker pool: {}", e)))?;

    let max = RunningMaximum::new();
    let mut report = plan.empty_report();

    for round in 0..plan.rounds {
        #[cfg(feature = "tracing")]
        tracing::info!(
            round,
            iterations = plan.iterations_per_round,
            workers = pool.current_num_threads(),
            "round started"
        );

        let stats = pool.install(|| {
            (0..plan.iterations_per_round)
                .into_par_iter()
                .map(|iteration| run_iteration(graph, &plan, round, iteration, &max, sink, &stop))
                .reduce(IterationStats::default, IterationStats::merge)
        });
        stats.apply_to(&mut report);

        if let Some(reason) = stats.stopped {
            report.stop_reason = reason;
            break;
        }
        report.rounds_completed += 1;
        #[cfg(feature = "tracing")]
        tracing::info!(round, max_delta = %max.value(), "round finished");
    }

    Ok(finish(report, &max))
}

/// Sequential fallback for parallel search.
#[cfg(not(feature = "parallel"))]
pub fn run_parallel<G: GraphView + Sync + ?Sized>(
    graph: &G,
    config: &SearchConfig,
    sink: &dyn ProgressSink,
    stop: &StopToken,
) -> Result<SearchReport, DeltaError> {
    super::search::run_sequential(graph, config, sink, stop)
}

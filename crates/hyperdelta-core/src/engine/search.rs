//! Iterative delta search.
//!
//! Runs `rounds × iterations` sampling steps. Each iteration draws uniform roots
//! in `[1, N]` until one yields a usable BFS sample (skips do not count toward
//! the budget), then evaluates every `(b, c, d)` combination of that sample's
//! pools against the shared [`RunningMaximum`].
//!
//! ```text
//! Idle -> Sampling -> Evaluating -> (Sampling | Done)
//! ```
//!
//! Every iteration seeds its own RNG from `(seed, round, iteration)`, so the
//! roots drawn do not depend on scheduling. The parallel driver in
//! [`super::parallel_search`] relies on this to reproduce the sequential result.
//!
//! Stopping is cooperative: the [`StopToken`] is checked before every root
//! draw, and a stopped search still reports the best maximum found so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SearchConfig;

use super::bfs_sampler::{BfsSampler, CandidatePools, SampleOutcome};
use super::errors::DeltaError;
use super::four_point::{evaluate, Delta, Quadruple};
use super::graph::{GraphView, NodeId};
use super::running_max::{Improvement, ProgressSink, RunningMaximum};
use super::shortest_path::{BfsOracle, MemoOracle};

/// Why a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StopReason {
    /// All configured rounds and iterations ran.
    Completed,
    /// The stop token was cancelled.
    Cancelled,
    /// The wall-clock budget ran out.
    TimeBudget,
}

/// Driver state, reported in `trace` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Sampling,
    Evaluating,
    Done,
}

impl SearchPhase {
    /// Phase entered after one sampling attempt: a skip restarts sampling with a
    /// fresh root, an accepted sample moves on to evaluation.
    pub fn after(outcome: &SampleOutcome) -> Self {
        match outcome {
            SampleOutcome::Skipped { .. } => SearchPhase::Sampling,
            SampleOutcome::Accepted { .. } => SearchPhase::Evaluating,
        }
    }
}

#[inline]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn enter_phase(phase: SearchPhase, round: usize, iteration: usize) {
    #[cfg(feature = "tracing")]
    tracing::trace!(?phase, round, iteration, "phase");
}

/// Cooperative cancellation handle. Clones share the cancel flag.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that also stops once `budget` has elapsed from now.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        let deadline = Instant::now() + budget;
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    /// Request a stop; every clone observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// `Some(reason)` once the search should stop.
    pub fn check(&self) -> Option<StopReason> {
        if self.is_cancelled() {
            return Some(StopReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(StopReason::TimeBudget),
            _ => None,
        }
    }
}

/// Outcome of a search run. Partial runs report the same fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchReport {
    /// Final running maximum.
    pub max_delta: Delta,
    /// The improvement that produced `max_delta`; `None` if it never left zero.
    pub witness: Option<Improvement>,
    /// Seed actually used (drawn from the OS when not configured).
    pub seed: u64,
    /// Declared graph size `N`.
    pub graph_size: usize,
    /// Resolved iteration budget per round.
    pub iterations_per_round: usize,
    /// Rounds that ran to the end.
    pub rounds_completed: usize,
    /// Iterations that finished (evaluated or abandoned).
    pub iterations_completed: usize,
    /// Roots discarded for producing a too-small BFS sample.
    pub samples_skipped: usize,
    /// Iterations that hit the root-attempt cap without an accepted sample.
    pub iterations_abandoned: usize,
    /// Quadruples with all six distances known.
    pub quadruples_evaluated: usize,
    /// Quadruples dropped for an unreachable pair.
    pub quadruples_disconnected: usize,
    pub stop_reason: StopReason,
}

/// Resolved, validated parameters shared by the sequential and parallel drivers.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub sampler: BfsSampler,
    pub seed: u64,
    pub graph_size: usize,
    pub rounds: usize,
    pub iterations_per_round: usize,
    pub max_root_attempts: usize,
}

impl SearchPlan {
    /// Validate `config` and resolve it against a graph.
    pub fn new<G: GraphView + ?Sized>(graph: &G, config: &SearchConfig) -> Result<Self, DeltaError> {
        config.validate()?;
        let graph_size = config.effective_graph_size(graph.node_count());
        enter_phase(SearchPhase::Idle, 0, 0);
        Ok(Self {
            sampler: BfsSampler::new(config.policy, graph_size),
            seed: config.seed.unwrap_or_else(rand::random),
            graph_size,
            rounds: config.rounds,
            iterations_per_round: config.iterations.resolve(graph_size),
            max_root_attempts: config.max_root_attempts,
        })
    }

    /// RNG for one iteration, independent of scheduling order.
    pub fn iteration_rng(&self, round: usize, iteration: usize) -> StdRng {
        StdRng::seed_from_u64(iteration_seed(self.seed, round, iteration))
    }

    pub(crate) fn empty_report(&self) -> SearchReport {
        SearchReport {
            max_delta: Delta::ZERO,
            witness: None,
            seed: self.seed,
            graph_size: self.graph_size,
            iterations_per_round: self.iterations_per_round,
            rounds_completed: 0,
            iterations_completed: 0,
            samples_skipped: 0,
            iterations_abandoned: 0,
            quadruples_evaluated: 0,
            quadruples_disconnected: 0,
            stop_reason: StopReason::Completed,
        }
    }
}

/// SplitMix64 over the seed and the iteration coordinates.
fn iteration_seed(seed: u64, round: usize, iteration: usize) -> u64 {
    let mut z = seed
        ^ (round as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (iteration as u64).wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Counters from one or more iterations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct IterationStats {
    pub completed: usize,
    pub skipped: usize,
    pub abandoned: usize,
    pub evaluated: usize,
    pub disconnected: usize,
    pub stopped: Option<StopReason>,
}

impl IterationStats {
    pub fn merge(self, other: Self) -> Self {
        Self {
            completed: self.completed + other.completed,
            skipped: self.skipped + other.skipped,
            abandoned: self.abandoned + other.abandoned,
            evaluated: self.evaluated + other.evaluated,
            disconnected: self.disconnected + other.disconnected,
            stopped: self.stopped.or(other.stopped),
        }
    }

    pub fn apply_to(&self, report: &mut SearchReport) {
        report.iterations_completed += self.completed;
        report.samples_skipped += self.skipped;
        report.iterations_abandoned += self.abandoned;
        report.quadruples_evaluated += self.evaluated;
        report.quadruples_disconnected += self.disconnected;
    }
}

/// One iteration: draw roots until a sample is accepted, then evaluate it.
pub(crate) fn run_iteration<G: GraphView + ?Sized>(
    graph: &G,
    plan: &SearchPlan,
    round: usize,
    iteration: usize,
    max: &RunningMaximum,
    sink: &dyn ProgressSink,
    stop: &StopToken,
) -> IterationStats {
    let mut stats = IterationStats::default();
    let mut rng = plan.iteration_rng(round, iteration);
    let upper = u32::try_from(plan.graph_size).unwrap_or(u32::MAX).max(1);

    for _ in 0..plan.max_root_attempts {
        if let Some(reason) = stop.check() {
            stats.stopped = Some(reason);
            return stats;
        }
        let root = NodeId(rng.gen_range(1..=upper));
        let outcome = plan.sampler.sample(graph, root);
        enter_phase(SearchPhase::after(&outcome), round, iteration);
        match outcome {
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            SampleOutcome::Skipped { size, threshold } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(round, iteration, root = root.0, size, threshold, "sample skipped");
                stats.skipped += 1;
            }
            #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
            SampleOutcome::Accepted { sample, pools } => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    round,
                    iteration,
                    root = root.0,
                    size = sample.size(),
                    b_pool = pools.b.len(),
                    cd_pool = pools.cd.len(),
                    "sample accepted"
                );
                let (evaluated, disconnected) =
                    evaluate_pools(graph, plan, root, &pools, round, iteration, max, sink);
                stats.evaluated += evaluated;
                stats.disconnected += disconnected;
                stats.completed += 1;
                return stats;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(
        round,
        iteration,
        attempts = plan.max_root_attempts,
        "iteration abandoned: no root produced a usable sample"
    );
    stats.abandoned += 1;
    stats.completed += 1;
    stats
}

/// Evaluate every `(b, c, d)` of one sample with `a = root`, including `c == d`.
///
/// Returns `(evaluated, disconnected)` quadruple counts.
#[allow(clippy::too_many_arguments)]
fn evaluate_pools<G: GraphView + ?Sized>(
    graph: &G,
    plan: &SearchPlan,
    root: NodeId,
    pools: &CandidatePools,
    round: usize,
    iteration: usize,
    max: &RunningMaximum,
    sink: &dyn ProgressSink,
) -> (usize, usize) {
    let bfs = BfsOracle::with_bound(graph, plan.graph_size);
    let oracle = MemoOracle::new(&bfs);
    let mut evaluated = 0;
    let mut disconnected = 0;

    for &b in &pools.b {
        for &c in &pools.cd {
            for &d in &pools.cd {
                let quadruple = Quadruple::new(root, b, c, d);
                match evaluate(&oracle, &quadruple) {
                    Some(delta) => {
                        evaluated += 1;
                        max.offer(
                            Improvement {
                                round,
                                iteration,
                                quadruple,
                                delta,
                            },
                            sink,
                        );
                    }
                    None => disconnected += 1,
                }
            }
        }
    }
    (evaluated, disconnected)
}

/// Single-threaded search.
pub fn run_sequential<G: GraphView + ?Sized>(
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
    let max = RunningMaximum::new();
    let mut report = plan.empty_report();

    'rounds: for round in 0..plan.rounds {
        #[cfg(feature = "tracing")]
        tracing::info!(round, iterations = plan.iterations_per_round, "round started");
        for iteration in 0..plan.iterations_per_round {
            let stats = run_iteration(graph, &plan, round, iteration, &max, sink, &stop);
            stats.apply_to(&mut report);
            if let Some(reason) = stats.stopped {
                report.stop_reason = reason;
                break 'rounds;
            }
        }
        report.rounds_completed += 1;
        #[cfg(feature = "tracing")]
        tracing::info!(round, max_delta = %max.value(), "round finished");
    }

    Ok(finish(report, &max))
}

pub(crate) fn finish(mut report: SearchReport, max: &RunningMaximum) -> SearchReport {
    report.max_delta = max.value();
    report.witness = max.witness();
    enter_phase(SearchPhase::Done, report.rounds_completed, report.iterations_completed);
    #[cfg(feature = "tracing")]
    tracing::info!(
        max_delta = %report.max_delta,
        rounds = report.rounds_completed,
        iterations = report.iterations_completed,
        skipped = report.samples_skipped,
        quadruples = report.quadruples_evaluated,
        stop = ?report.stop_reason,
        "search finished"
    );
    report
}

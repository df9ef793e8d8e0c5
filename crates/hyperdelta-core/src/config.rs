//! Search configuration.
//!
//! Every knob of the sampler lives here as data, and the formulas that turn it
//! into concrete counts are small functions with their own tests.

use std::time::Duration;

use crate::engine::bfs_sampler::{log_floor, SamplingPolicy};
use crate::engine::errors::DeltaError;

/// Default multiplier for `LogScaled` iteration budgets.
pub const DEFAULT_ITERATION_FACTOR: usize = 500;

/// Default cap on consecutive skipped roots within one iteration.
pub const DEFAULT_MAX_ROOT_ATTEMPTS: usize = 1000;

/// Number of counted iterations per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IterationBudget {
    /// A literal count.
    Fixed(usize),
    /// `factor · ⌊ln N⌋`.
    LogScaled { factor: usize },
}

impl Default for IterationBudget {
    fn default() -> Self {
        IterationBudget::LogScaled {
            factor: DEFAULT_ITERATION_FACTOR,
        }
    }
}

impl IterationBudget {
    /// Iterations per round for a graph of declared size `graph_size`. Never zero.
    pub fn resolve(self, graph_size: usize) -> usize {
        match self {
            IterationBudget::Fixed(n) => n.max(1),
            IterationBudget::LogScaled { factor } => (factor * log_floor(graph_size)).max(1),
        }
    }
}

/// Parameters of one estimation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Declared node-count bound `N`; `None` uses the store's node count.
    pub graph_size: Option<usize>,
    /// Iterations per round.
    pub iterations: IterationBudget,
    /// Number of rounds.
    pub rounds: usize,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Candidate-selection heuristic.
    pub policy: SamplingPolicy,
    /// Consecutive skipped roots tolerated before an iteration is abandoned.
    pub max_root_attempts: usize,
    /// Worker-pool size for the parallel search; `None` lets rayon decide.
    pub workers: Option<usize>,
    /// Wall-clock budget in seconds.
    pub time_budget_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            graph_size: None,
            iterations: IterationBudget::default(),
            rounds: 1,
            seed: None,
            policy: SamplingPolicy::default(),
            max_root_attempts: DEFAULT_MAX_ROOT_ATTEMPTS,
            workers: None,
            time_budget_secs: None,
        }
    }
}

impl SearchConfig {
    /// Reject configurations that cannot run.
    pub fn validate(&self) -> Result<(), DeltaError> {
        if self.rounds == 0 {
            return Err(DeltaError::Config("rounds must be at least 1".into()));
        }
        if let IterationBudget::LogScaled { factor: 0 } = self.iterations {
            return Err(DeltaError::Config("iteration factor must be at least 1".into()));
        }
        if let IterationBudget::Fixed(0) = self.iterations {
            return Err(DeltaError::Config("iteration count must be at least 1".into()));
        }
        if self.max_root_attempts == 0 {
            return Err(DeltaError::Config(
                "max_root_attempts must be at least 1".into(),
            ));
        }
        if self.workers == Some(0) {
            return Err(DeltaError::Config("workers must be at least 1".into()));
        }
        if self.graph_size == Some(0) {
            return Err(DeltaError::Config("graph_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Declared size, falling back to the number of stored nodes.
    pub fn effective_graph_size(&self, stored_nodes: usize) -> usize {
        self.graph_size.unwrap_or(stored_nodes)
    }

    /// Iterations per round for the given stored node count.
    pub fn iterations_per_round(&self, stored_nodes: usize) -> usize {
        self.iterations
            .resolve(self.effective_graph_size(stored_nodes))
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_secs.map(Duration::from_secs)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_iterations(mut self, iterations: IterationBudget) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_policy(mut self, policy: SamplingPolicy) -> Self {
        self.policy = policy;
        self
    }
}

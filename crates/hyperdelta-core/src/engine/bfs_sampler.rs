//! Breadth-first candidate sampling.
//!
//! One BFS from a random root orders the root's component by discovery index.
//! Two candidate pools are cut from that order:
//!
//! - **CD pool**: a contiguous band of mid-depth indices, away from the root
//!   (likely collinear with it) and away from the frontier (likely leaves)
//! - **B pool**: sparse, evenly spaced indices from the frontier tail, where
//!   nodes tend to be far from the root and from each other
//!
//! The selection predicates are plain functions so the heuristic can be checked
//! without running the evaluator.
//!
//! ## Policies
//!
//! | Policy | CD window | B pool | Skip when |
//! |--------|-----------|--------|-----------|
//! | `LogBand` | `L < i < 2L`, `L = ⌊ln size⌋` | `i > size − L²` and `i mod L = 0` | `size ≤ ⌊ln N⌋` |
//! | `SqrtCentered` | `lo < i < hi` around `size/4` | `size−4`, `size−3`, `size−2` | `size < ⌊ln N⌋` |

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::graph::{GraphView, NodeId};

/// `⌊ln x⌋`, with `0` for `x ≤ 1`.
#[inline]
pub fn log_floor(x: usize) -> usize {
    if x <= 1 {
        0
    } else {
        (x as f64).ln().floor() as usize
    }
}

/// Minimum-size threshold for the log-band policy: samples must exceed `⌊ln N⌋`.
#[inline]
pub fn skip_threshold(graph_size: usize) -> usize {
    log_floor(graph_size)
}

/// `logSize = ⌊ln size⌋` for one BFS sample.
#[inline]
pub fn log_size(size: usize) -> usize {
    log_floor(size)
}

/// CD-window predicate for the log-band policy: `logSize < i < 2·logSize`.
#[inline]
pub fn in_cd_window(index: usize, size: usize) -> bool {
    let l = log_size(size);
    l < index && index < 2 * l
}

/// B-pool predicate for the log-band policy:
/// `i > size − logSize²` and `i mod logSize == 0`.
///
/// Empty when `logSize == 0` (samples of one or two nodes).
#[inline]
pub fn in_b_pool(index: usize, size: usize) -> bool {
    let l = log_size(size);
    if l == 0 {
        return false;
    }
    let tail_start = size as i64 - (l * l) as i64;
    index as i64 > tail_start && index % l == 0
}

/// Exclusive CD-window bounds for the sqrt-centered policy.
///
/// `lo = (size/2 − 4·⌊√size⌋)/2`, `hi = (size/2 + 4·⌊√size⌋)/2`, in truncating
/// integer arithmetic; `lo` may be negative for small samples.
#[inline]
pub fn sqrt_window_bounds(size: usize) -> (i64, i64) {
    let half = (size / 2) as i64;
    let spread = 4 * ((size as f64).sqrt() as i64);
    ((half - spread) / 2, (half + spread) / 2)
}

/// B-pool predicate for the sqrt-centered policy: the fixed tail indices
/// `size−4`, `size−3` and `size−2`, each only when it is a valid non-root index.
#[inline]
pub fn in_sqrt_b_tail(index: usize, size: usize) -> bool {
    (size > 4 && index == size - 4) || (size > 3 && index == size - 3) || (size > 2 && index == size - 2)
}

/// Candidate-selection heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SamplingPolicy {
    /// `⌊ln size⌋`-derived band and sparse frontier tail.
    #[default]
    LogBand,
    /// Window centered at a quarter of the sample with `√size` spread, fixed tail.
    SqrtCentered,
}

impl SamplingPolicy {
    /// Whether a sample of `size` discovered nodes is large enough to use.
    pub fn keeps(self, size: usize, graph_size: usize) -> bool {
        match self {
            SamplingPolicy::LogBand => size > skip_threshold(graph_size),
            SamplingPolicy::SqrtCentered => size >= log_floor(graph_size),
        }
    }

    pub fn in_cd_pool(self, index: usize, size: usize) -> bool {
        match self {
            SamplingPolicy::LogBand => in_cd_window(index, size),
            SamplingPolicy::SqrtCentered => {
                let (lo, hi) = sqrt_window_bounds(size);
                let i = index as i64;
                lo < i && i < hi
            }
        }
    }

    pub fn in_b_pool(self, index: usize, size: usize) -> bool {
        match self {
            SamplingPolicy::LogBand => in_b_pool(index, size),
            SamplingPolicy::SqrtCentered => in_sqrt_b_tail(index, size),
        }
    }
}

/// Discovery order of one BFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsSample {
    pub root: NodeId,
    /// Discovered nodes in visitation order, root first.
    pub order: Vec<NodeId>,
}

impl BfsSample {
    /// Number of discovered nodes.
    #[inline]
    pub fn size(&self) -> usize {
        self.order.len()
    }
}

/// Full BFS from `root`. Unknown roots produce an empty order.
pub fn bfs_order<G: GraphView + ?Sized>(graph: &G, root: NodeId) -> BfsSample {
    let mut order = Vec::new();
    if !graph.contains(root) {
        return BfsSample { root, order };
    }
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut queue = VecDeque::new();
    seen.insert(root);
    queue.push_back(root);
    while let Some(x) = queue.pop_front() {
        order.push(x);
        for &n in graph.neighbors(x) {
            if seen.insert(n) {
                queue.push_back(n);
            }
        }
    }
    BfsSample { root, order }
}

/// Candidate pools cut from one BFS sample. Ephemeral, one per iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePools {
    /// Candidates for the second anchor `b`.
    pub b: Vec<NodeId>,
    /// Candidates for `c` and `d`.
    pub cd: Vec<NodeId>,
}

impl CandidatePools {
    /// Partition a sample's discovery order under `policy`.
    pub fn select(sample: &BfsSample, policy: SamplingPolicy) -> Self {
        let size = sample.size();
        let mut pools = CandidatePools::default();
        for (i, &node) in sample.order.iter().enumerate() {
            if policy.in_cd_pool(i, size) {
                pools.cd.push(node);
            }
            if policy.in_b_pool(i, size) {
                pools.b.push(node);
            }
        }
        pools
    }

    /// Number of `(b, c, d)` combinations, counting `c == d` and both orders.
    pub fn quadruple_count(&self) -> usize {
        self.b.len() * self.cd.len() * self.cd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quadruple_count() == 0
    }
}

/// Result of sampling one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The component was large enough; pools are ready for evaluation.
    Accepted {
        sample: BfsSample,
        pools: CandidatePools,
    },
    /// The component was too small; draw another root.
    Skipped { size: usize, threshold: usize },
}

/// BFS sampler bound to a policy and a declared graph size.
#[derive(Debug, Clone, Copy)]
pub struct BfsSampler {
    pub policy: SamplingPolicy,
    pub graph_size: usize,
}

impl BfsSampler {
    pub fn new(policy: SamplingPolicy, graph_size: usize) -> Self {
        Self { policy, graph_size }
    }

    /// Run one BFS from `root` and select candidate pools, or report a skip.
    pub fn sample<G: GraphView + ?Sized>(&self, graph: &G, root: NodeId) -> SampleOutcome {
        let sample = bfs_order(graph, root);
        let size = sample.size();
        if !self.policy.keeps(size, self.graph_size) {
            return SampleOutcome::Skipped {
                size,
                threshold: log_floor(self.graph_size),
            };
        }
        let pools = CandidatePools::select(&sample, self.policy);
        SampleOutcome::Accepted { sample, pools }
    }
}

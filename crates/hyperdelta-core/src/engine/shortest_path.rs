//! Unweighted shortest-path distances.
//!
//! The oracle answers single-pair hop-count queries with a bounded BFS over the
//! undirected adjacency. Symmetry follows from the adjacency itself: every edge
//! is stored in both endpoint lists, so no direction-specific handling exists.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashMap;

use super::graph::{GraphView, NodeId};

/// Hop count between two nodes, or the unreachable sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distance {
    /// Length of a shortest path in edges.
    Hops(u32),
    /// No path within the search bound, or an endpoint is not in the graph.
    Unreachable,
}

impl Distance {
    /// The hop count, if reachable.
    #[inline]
    pub fn hops(self) -> Option<u32> {
        match self {
            Distance::Hops(h) => Some(h),
            Distance::Unreachable => None,
        }
    }

    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Hops(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Hops(h) => write!(f, "{}", h),
            Distance::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Source of pairwise distances for the four-point evaluator.
pub trait DistanceOracle {
    /// Distance between `u` and `v`. Never fails: unknown endpoints are unreachable.
    fn distance(&self, u: NodeId, v: NodeId) -> Distance;
}

/// Stateless BFS oracle.
///
/// Path length is bounded by `max_depth`, which defaults to the node count of
/// the graph (no simple path can be longer).
#[derive(Debug, Clone, Copy)]
pub struct BfsOracle<'g, G: GraphView + ?Sized> {
    graph: &'g G,
    max_depth: usize,
}

impl<'g, G: GraphView + ?Sized> BfsOracle<'g, G> {
    /// Oracle bounded by the graph's own node count.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_depth: graph.node_count(),
        }
    }

    /// Oracle with an explicit path-length bound (the declared graph size).
    pub fn with_bound(graph: &'g G, max_depth: usize) -> Self {
        Self { graph, max_depth }
    }
}

impl<G: GraphView + ?Sized> DistanceOracle for BfsOracle<'_, G> {
    fn distance(&self, u: NodeId, v: NodeId) -> Distance {
        if u == v {
            return Distance::Hops(0);
        }
        if !self.graph.contains(u) || !self.graph.contains(v) {
            return Distance::Unreachable;
        }

        let mut depth: FxHashMap<NodeId, u32> = FxHashMap::default();
        let mut queue = VecDeque::new();
        depth.insert(u, 0);
        queue.push_back(u);

        while let Some(x) = queue.pop_front() {
            let dx = depth[&x];
            if x == v {
                return Distance::Hops(dx);
            }
            if dx as usize >= self.max_depth {
                continue;
            }
            for &n in self.graph.neighbors(x) {
                if !depth.contains_key(&n) {
                    depth.insert(n, dx + 1);
                    queue.push_back(n);
                }
            }
        }
        Distance::Unreachable
    }
}

/// Pair cache in front of another oracle.
///
/// Scoped to a single BFS sample: the evaluator asks for the same `(a, b)`,
/// `(a, c)` and `(b, c)` pairs across many quadruples of one sample, and the
/// cache is dropped with the sample. Not `Sync`; each worker owns its own.
pub struct MemoOracle<'o, O: DistanceOracle + ?Sized> {
    inner: &'o O,
    cache: RefCell<FxHashMap<(NodeId, NodeId), Distance>>,
}

impl<'o, O: DistanceOracle + ?Sized> MemoOracle<'o, O> {
    pub fn new(inner: &'o O) -> Self {
        Self {
            inner,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Number of distinct pairs resolved so far.
    pub fn cached_pairs(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for MemoOracle<'_, O> {
    fn distance(&self, u: NodeId, v: NodeId) -> Distance {
        let key = if u <= v { (u, v) } else { (v, u) };
        if let Some(d) = self.cache.borrow().get(&key) {
            return *d;
        }
        let d = self.inner.distance(key.0, key.1);
        self.cache.borrow_mut().insert(key, d);
        d
    }
}

/// Single-source BFS: hop counts from `root` to every node, indexed by slot
/// (`NodeId(i)` at `i - 1`). `None` marks unreachable nodes.
pub fn single_source_distances<G: GraphView + ?Sized>(graph: &G, root: NodeId) -> Vec<Option<u32>> {
    let mut dist = vec![None; graph.node_count()];
    if !graph.contains(root) {
        return dist;
    }
    let mut queue = VecDeque::new();
    dist[root.0 as usize - 1] = Some(0);
    queue.push_back(root);
    while let Some(x) = queue.pop_front() {
        let dx = dist[x.0 as usize - 1].unwrap_or(0);
        for &n in graph.neighbors(x) {
            let Some(entry) = (n.0 as usize).checked_sub(1).and_then(|s| dist.get_mut(s)) else {
                continue;
            };
            if entry.is_none() {
                *entry = Some(dx + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

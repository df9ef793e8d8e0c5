//! # Undirected Graph Store
//!
//! In-memory store for the unweighted, undirected graphs the estimator samples.
//!
//! ## Key Components
//!
//! - **NodeId**: dense identifier assigned from 1 in first-seen order, so the
//!   random-root range `[1, N]` maps directly onto stored nodes
//! - **GraphView**: the read-only seam the oracle, sampler and search consume
//! - **AdjacencyGraph**: label index plus per-node neighbor lists, built once at
//!   ingestion and never mutated while sampling
//!
//! ## Design
//!
//! - Labels are interned as `Arc<str>` and looked up through an `FxHashMap`
//! - Neighbor lists are `SmallVec`s; most real-world nodes have a handful of edges
//! - Edge insertion is idempotent: a normalized `(min, max)` pair set rejects duplicates
//! - Self-loops create their endpoint but add no adjacency entry
//!
//! ## Example
//!
//! ```rust
//! use hyperdelta_core::engine::graph::{AdjacencyGraph, EdgeInsert, GraphView};
//!
//! let mut graph = AdjacencyGraph::new();
//! assert_eq!(graph.insert_edge("a", "b"), EdgeInsert::Inserted);
//! assert_eq!(graph.insert_edge("b", "a"), EdgeInsert::Duplicate);
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Maximum size for inline neighbor storage.
const INLINE_NEIGHBORS: usize = 8;

/// A unique identifier for a node in the graph.
///
/// Identifiers are dense and 1-based. NodeId implements Ord/PartialOrd for
/// stable, deterministic iteration.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Zero-based slot in the dense node tables.
    #[inline]
    fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of an undirected graph.
///
/// Everything downstream of ingestion works against this trait, so alternative
/// stores can be plugged in without touching the sampling code.
pub trait GraphView {
    /// Number of stored nodes.
    fn node_count(&self) -> usize;

    /// Number of distinct undirected edges (self-loops excluded).
    fn edge_count(&self) -> usize;

    /// Whether `id` names a stored node.
    fn contains(&self, id: NodeId) -> bool;

    /// Neighbors of `id`; empty for unknown ids.
    fn neighbors(&self, id: NodeId) -> &[NodeId];
}

/// Outcome of a single edge insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    /// A new undirected edge was recorded.
    Inserted,
    /// The pair was already connected; adjacency is unchanged.
    Duplicate,
    /// Both endpoints were the same label; the node exists but no edge was added.
    SelfLoop,
}

/// Adjacency-list graph with a label index.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    /// Labels by slot (`NodeId(i)` lives at slot `i - 1`)
    labels: Vec<Arc<str>>,
    /// Label -> id index
    index: FxHashMap<Arc<str>, NodeId>,
    /// Neighbor lists by slot
    adjacency: Vec<SmallVec<[NodeId; INLINE_NEIGHBORS]>>,
    /// Normalized (min, max) endpoint pairs for duplicate detection
    edges: FxHashSet<(NodeId, NodeId)>,
}

impl AdjacencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from label pairs, mostly for tests and fixtures.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.insert_edge(a, b);
        }
        graph
    }

    /// Builds a graph whose labels are the decimal forms of the given integers.
    pub fn from_numeric_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.insert_edge(&a.to_string(), &b.to_string());
        }
        graph
    }

    /// Looks up a node by label.
    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Returns the label of a stored node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        id.slot()
            .and_then(|slot| self.labels.get(slot))
            .map(|label| &**label)
    }

    /// Finds the node with `label`, creating it if it does not exist yet.
    pub fn find_or_create(&mut self, label: &str) -> NodeId {
        if let Some(id) = self.index.get(label) {
            return *id;
        }
        let id = NodeId(self.labels.len() as u32 + 1);
        let label: Arc<str> = Arc::from(label);
        self.labels.push(label.clone());
        self.adjacency.push(SmallVec::new());
        self.index.insert(label, id);
        id
    }

    /// Inserts an undirected edge, lazily creating both endpoints.
    pub fn insert_edge(&mut self, a: &str, b: &str) -> EdgeInsert {
        let u = self.find_or_create(a);
        let v = self.find_or_create(b);
        self.connect(u, v)
    }

    // Both ids come from find_or_create, so their slots exist.
    fn connect(&mut self, u: NodeId, v: NodeId) -> EdgeInsert {
        if u == v {
            return EdgeInsert::SelfLoop;
        }
        let key = if u < v { (u, v) } else { (v, u) };
        if !self.edges.insert(key) {
            return EdgeInsert::Duplicate;
        }
        self.adjacency[u.0 as usize - 1].push(v);
        self.adjacency[v.0 as usize - 1].push(u);
        EdgeInsert::Inserted
    }

    /// Iterates over all stored node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (1..=self.labels.len() as u32).map(NodeId)
    }

    /// Degree of a node (0 for unknown ids).
    pub fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    /// Human-readable adjacency dump, one line per node: `label -> n1 n2 ...`.
    pub fn adjacency_lines(&self) -> Vec<String> {
        self.node_ids()
            .map(|id| {
                let mut line = format!("{} ->", self.label(id).unwrap_or("?"));
                for n in self.neighbors(id) {
                    line.push(' ');
                    line.push_str(self.label(*n).unwrap_or("?"));
                }
                line
            })
            .collect()
    }
}

impl GraphView for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains(&self, id: NodeId) -> bool {
        id.slot().is_some_and(|slot| slot < self.labels.len())
    }

    fn neighbors(&self, id: NodeId) -> &[NodeId] {
        id.slot()
            .and_then(|slot| self.adjacency.get(slot))
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }
}

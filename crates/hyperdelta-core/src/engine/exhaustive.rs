//! Exhaustive four-point check for small graphs.
//!
//! Enumerates every quadruple `a < b < c < d` of stored nodes against an
//! all-pairs distance table. This is O(n⁴) and exists to validate the sampler
//! and to answer "is this small graph tree-like?" exactly; it refuses graphs
//! above a node cap.

use super::errors::DeltaError;
use super::four_point::{delta_from_sums, Delta, Quadruple};
use super::graph::{GraphView, NodeId};
use super::shortest_path::single_source_distances;

/// Default node cap for [`exhaustive_max_delta`].
pub const EXHAUSTIVE_NODE_LIMIT: usize = 200;

/// Result of an exhaustive check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExhaustiveResult {
    /// Maximum delta over all connected quadruples.
    pub max_delta: Delta,
    /// First quadruple (in enumeration order) reaching `max_delta`; `None` at zero.
    pub witness: Option<Quadruple>,
    /// Quadruples with all six distances known.
    pub quadruples_evaluated: u64,
    /// Quadruples spanning more than one component.
    pub quadruples_disconnected: u64,
}

/// Maximum four-point delta over all quadruples of distinct nodes.
pub fn exhaustive_max_delta<G: GraphView + ?Sized>(
    graph: &G,
    limit: usize,
) -> Result<ExhaustiveResult, DeltaError> {
    let n = graph.node_count();
    if n > limit {
        return Err(DeltaError::TooLarge { nodes: n, limit });
    }

    let table: Vec<Vec<Option<u32>>> = (1..=n as u32)
        .map(|i| single_source_distances(graph, NodeId(i)))
        .collect();
    let dist = |i: usize, j: usize| table[i][j];

    let mut result = ExhaustiveResult {
        max_delta: Delta::ZERO,
        witness: None,
        quadruples_evaluated: 0,
        quadruples_disconnected: 0,
    };

    for a in 0..n {
        for b in (a + 1)..n {
            let Some(ab) = dist(a, b) else {
                result.quadruples_disconnected += count_pairs_above(n, b);
                continue;
            };
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    let six = (
                        dist(c, d),
                        dist(a, c),
                        dist(b, d),
                        dist(a, d),
                        dist(b, c),
                    );
                    let (Some(cd), Some(ac), Some(bd), Some(ad), Some(bc)) = six else {
                        result.quadruples_disconnected += 1;
                        continue;
                    };
                    result.quadruples_evaluated += 1;
                    let delta = delta_from_sums(ab + cd, ac + bd, ad + bc);
                    if delta > result.max_delta {
                        result.max_delta = delta;
                        result.witness = Some(Quadruple::new(
                            NodeId(a as u32 + 1),
                            NodeId(b as u32 + 1),
                            NodeId(c as u32 + 1),
                            NodeId(d as u32 + 1),
                        ));
                    }
                }
            }
        }
    }
    Ok(result)
}

/// Number of `(c, d)` pairs with `b < c < d < n`.
fn count_pairs_above(n: usize, b: usize) -> u64 {
    let rest = (n - b - 1) as u64;
    rest * rest.saturating_sub(1) / 2
}

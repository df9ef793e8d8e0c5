use hyperdelta_core::engine::four_point::{evaluate, pairing_sums};
use hyperdelta_core::engine::shortest_path::MemoOracle;
use hyperdelta_core::{
    AdjacencyGraph, BfsOracle, Delta, Distance, DistanceOracle, GraphView, NodeId, Quadruple,
};

fn four_cycle() -> AdjacencyGraph {
    AdjacencyGraph::from_numeric_edges([(1, 2), (2, 3), (3, 4), (4, 1)])
}

#[test]
fn four_cycle_distances() {
    let g = four_cycle();
    let oracle = BfsOracle::new(&g);
    assert_eq!(oracle.distance(NodeId(1), NodeId(2)), Distance::Hops(1));
    assert_eq!(oracle.distance(NodeId(1), NodeId(3)), Distance::Hops(2));
    assert_eq!(oracle.distance(NodeId(2), NodeId(4)), Distance::Hops(2));
    assert_eq!(oracle.distance(NodeId(4), NodeId(4)), Distance::Hops(0));
}

#[test]
fn four_cycle_quadruple_has_delta_one() {
    let g = four_cycle();
    let oracle = BfsOracle::new(&g);
    let q = Quadruple::new(NodeId(1), NodeId(2), NodeId(3), NodeId(4));

    let sums = pairing_sums(&oracle, &q).unwrap();
    assert_eq!((sums.d1, sums.d2, sums.d3), (2, 4, 2));
    assert_eq!(evaluate(&oracle, &q), Some(Delta::from_twice(2)));
    assert_eq!(evaluate(&oracle, &q).unwrap().to_string(), "1");
}

#[test]
fn path_quadruple_has_delta_zero() {
    let g = AdjacencyGraph::from_numeric_edges([(1, 2), (2, 3), (3, 4)]);
    let oracle = BfsOracle::new(&g);
    let q = Quadruple::new(NodeId(1), NodeId(2), NodeId(3), NodeId(4));
    assert_eq!(evaluate(&oracle, &q), Some(Delta::ZERO));
}

#[test]
fn disconnected_pair_is_unreachable_and_not_scored() {
    let g = AdjacencyGraph::from_numeric_edges([(1, 2), (3, 4)]);
    let oracle = BfsOracle::new(&g);
    assert_eq!(oracle.distance(NodeId(1), NodeId(4)), Distance::Unreachable);
    assert!(!oracle.distance(NodeId(1), NodeId(4)).is_reachable());

    let q = Quadruple::new(NodeId(1), NodeId(2), NodeId(3), NodeId(4));
    assert_eq!(evaluate(&oracle, &q), None);
}

#[test]
fn unknown_nodes_are_unreachable_but_self_distance_is_zero() {
    let g = four_cycle();
    let oracle = BfsOracle::new(&g);
    assert!(!g.contains(NodeId(99)));
    assert_eq!(oracle.distance(NodeId(1), NodeId(99)), Distance::Unreachable);
    assert_eq!(oracle.distance(NodeId(99), NodeId(99)), Distance::Hops(0));
}

#[test]
fn depth_bound_cuts_long_paths() {
    let g = AdjacencyGraph::from_numeric_edges((1..10).map(|i| (i, i + 1)));
    assert_eq!(
        BfsOracle::new(&g).distance(NodeId(1), NodeId(10)),
        Distance::Hops(9)
    );
    assert_eq!(
        BfsOracle::with_bound(&g, 5).distance(NodeId(1), NodeId(10)),
        Distance::Unreachable
    );
}

#[test]
fn memo_oracle_agrees_and_caches_unordered_pairs() {
    let g = AdjacencyGraph::from_numeric_edges((1..20).map(|i| (i, i + 1)).chain([(20, 1)]));
    let bfs = BfsOracle::new(&g);
    let memo = MemoOracle::new(&bfs);
    for u in 1..=20 {
        for v in 1..=20 {
            assert_eq!(
                memo.distance(NodeId(u), NodeId(v)),
                bfs.distance(NodeId(u), NodeId(v))
            );
        }
    }
    // 190 unordered pairs of distinct nodes plus 20 self pairs.
    assert_eq!(memo.cached_pairs(), 210);
}

use hyperdelta_core::engine::four_point::evaluate;
use hyperdelta_core::{
    exhaustive_max_delta, run_sequential, AdjacencyGraph, BfsOracle, CollectProgress, Delta,
    DeltaError, IterationBudget, NoProgress, SearchConfig, StopReason, StopToken,
    EXHAUSTIVE_NODE_LIMIT,
};

/// Complete binary tree with `n` nodes, heap-numbered from 1.
fn binary_tree(n: u32) -> AdjacencyGraph {
    AdjacencyGraph::from_numeric_edges((2..=n).map(|i| (i / 2, i)))
}

fn grid(w: u32, h: u32) -> AdjacencyGraph {
    let id = |x: u32, y: u32| y * w + x + 1;
    let mut edges = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if x + 1 < w {
                edges.push((id(x, y), id(x + 1, y)));
            }
            if y + 1 < h {
                edges.push((id(x, y), id(x, y + 1)));
            }
        }
    }
    AdjacencyGraph::from_numeric_edges(edges)
}

fn fixed(iterations: usize, seed: u64) -> SearchConfig {
    SearchConfig::default()
        .with_seed(seed)
        .with_iterations(IterationBudget::Fixed(iterations))
}

#[test]
fn tree_estimate_is_zero() {
    let g = binary_tree(127);
    let report = run_sequential(&g, &fixed(20, 1), &NoProgress, &StopToken::new()).unwrap();
    assert_eq!(report.max_delta, Delta::ZERO);
    assert!(report.witness.is_none());
    assert_eq!(report.iterations_completed, 20);
    assert_eq!(report.samples_skipped, 0);
    assert!(report.quadruples_evaluated > 0);
    assert_eq!(report.stop_reason, StopReason::Completed);
}

#[test]
fn estimate_never_exceeds_exact_value() {
    let g = grid(6, 6);
    let exact = exhaustive_max_delta(&g, EXHAUSTIVE_NODE_LIMIT).unwrap();
    let report = run_sequential(&g, &fixed(200, 9), &NoProgress, &StopToken::new()).unwrap();
    assert!(report.max_delta <= exact.max_delta);
    // Opposite corners of a 6x6 grid already give delta 5.
    assert_eq!(exact.max_delta, Delta::from_twice(10));
}

#[test]
fn grid_search_finds_positive_delta_with_valid_witness() {
    let g = grid(10, 10);
    let report = run_sequential(&g, &fixed(100, 5), &NoProgress, &StopToken::new()).unwrap();
    assert!(report.max_delta > Delta::ZERO);
    assert!(report.quadruples_evaluated > 0);

    let witness = report.witness.expect("a positive maximum has a witness");
    assert_eq!(witness.delta, report.max_delta);
    assert_eq!(
        evaluate(&BfsOracle::new(&g), &witness.quadruple),
        Some(report.max_delta)
    );
}

#[test]
fn same_seed_same_report() {
    let g = grid(9, 7);
    let a = run_sequential(&g, &fixed(60, 1234), &NoProgress, &StopToken::new()).unwrap();
    let b = run_sequential(&g, &fixed(60, 1234), &NoProgress, &StopToken::new()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.seed, 1234);
}

#[test]
fn progress_events_strictly_increase_and_end_at_maximum() {
    let g = grid(10, 10);
    let sink = CollectProgress::new();
    let report = run_sequential(&g, &fixed(100, 5), &sink, &StopToken::new()).unwrap();
    let events = sink.events();
    assert!(events.iter().all(|e| e.delta > Delta::ZERO));
    assert!(events.windows(2).all(|w| w[0].delta < w[1].delta));
    match events.last() {
        Some(last) => {
            assert_eq!(last.delta, report.max_delta);
            assert_eq!(report.witness, Some(*last));
        }
        None => assert_eq!(report.max_delta, Delta::ZERO),
    }
}

#[test]
fn declared_size_above_store_skips_missing_roots() {
    let g = AdjacencyGraph::from_numeric_edges((1..40).map(|i| (i, i + 1)));
    let config = SearchConfig {
        graph_size: Some(4000),
        ..fixed(10, 77)
    };
    let report = run_sequential(&g, &config, &NoProgress, &StopToken::new()).unwrap();
    assert_eq!(report.graph_size, 4000);
    assert_eq!(report.iterations_completed, 10);
    // Only 1% of roots land in the store.
    assert!(report.samples_skipped > 0);
    assert_eq!(report.max_delta, Delta::ZERO);
}

#[test]
fn zero_time_budget_stops_before_sampling() {
    let g = grid(5, 5);
    let config = SearchConfig {
        time_budget_secs: Some(0),
        ..fixed(50, 3)
    };
    let report = run_sequential(&g, &config, &NoProgress, &StopToken::new()).unwrap();
    assert_eq!(report.stop_reason, StopReason::TimeBudget);
    assert_eq!(report.iterations_completed, 0);
    assert_eq!(report.max_delta, Delta::ZERO);
}

#[test]
fn multiple_rounds_accumulate() {
    let g = binary_tree(63);
    let config = fixed(8, 2).with_rounds(3);
    let report = run_sequential(&g, &config, &NoProgress, &StopToken::new()).unwrap();
    assert_eq!(report.rounds_completed, 3);
    assert_eq!(report.iterations_completed, 24);
    assert_eq!(report.iterations_per_round, 8);
}

#[test]
fn invalid_configuration_fails_fast() {
    let g = grid(3, 3);
    let err = run_sequential(&g, &fixed(5, 1).with_rounds(0), &NoProgress, &StopToken::new())
        .unwrap_err();
    assert!(matches!(err, DeltaError::Config(_)));
}

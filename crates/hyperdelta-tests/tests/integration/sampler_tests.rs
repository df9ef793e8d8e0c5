use hyperdelta_core::engine::bfs_sampler::{
    bfs_order, in_b_pool, in_cd_window, log_size, skip_threshold, CandidatePools, SampleOutcome,
};
use hyperdelta_core::{AdjacencyGraph, BfsSampler, NodeId, SamplingPolicy};

fn cycle(n: u32) -> AdjacencyGraph {
    AdjacencyGraph::from_numeric_edges((1..=n).map(|i| (i, i % n + 1)))
}

fn indices(sample: &[NodeId], pool: &[NodeId]) -> Vec<usize> {
    pool.iter()
        .map(|n| sample.iter().position(|m| m == n).unwrap())
        .collect()
}

#[test]
fn log_band_pools_on_hundred_cycle() {
    let g = cycle(100);
    let sampler = BfsSampler::new(SamplingPolicy::LogBand, 100);
    let SampleOutcome::Accepted { sample, pools } = sampler.sample(&g, NodeId(1)) else {
        panic!("a 100-node component must be accepted");
    };
    assert_eq!(sample.size(), 100);
    assert_eq!(sample.order[0], NodeId(1));

    // logSize = 4: CD band 4 < i < 8, B pool i > 84 with i % 4 == 0.
    assert_eq!(indices(&sample.order, &pools.cd), vec![5, 6, 7]);
    assert_eq!(indices(&sample.order, &pools.b), vec![88, 92, 96]);
    assert_eq!(pools.quadruple_count(), 27);
}

#[test]
fn sqrt_centered_pools_on_hundred_cycle() {
    let g = cycle(100);
    let sampler = BfsSampler::new(SamplingPolicy::SqrtCentered, 100);
    let SampleOutcome::Accepted { sample, pools } = sampler.sample(&g, NodeId(1)) else {
        panic!("a 100-node component must be accepted");
    };
    // Window (5, 45) exclusive; tail indices 96, 97, 98.
    assert_eq!(indices(&sample.order, &pools.cd), (6..45).collect::<Vec<_>>());
    assert_eq!(indices(&sample.order, &pools.b), vec![96, 97, 98]);
}

#[test]
fn small_component_is_skipped() {
    // Declared N = 1000 gives threshold ⌊ln 1000⌋ = 6.
    let g = AdjacencyGraph::from_numeric_edges([(1, 2), (2, 3), (3, 4), (4, 5)]);
    let sampler = BfsSampler::new(SamplingPolicy::LogBand, 1000);
    assert_eq!(skip_threshold(1000), 6);
    assert_eq!(
        sampler.sample(&g, NodeId(1)),
        SampleOutcome::Skipped {
            size: 5,
            threshold: 6
        }
    );
}

#[test]
fn threshold_boundary_differs_between_policies() {
    // Six-node path with N = 1000: size == ⌊ln N⌋.
    let g = AdjacencyGraph::from_numeric_edges((1..6).map(|i| (i, i + 1)));
    let log_band = BfsSampler::new(SamplingPolicy::LogBand, 1000);
    let sqrt = BfsSampler::new(SamplingPolicy::SqrtCentered, 1000);
    assert!(matches!(
        log_band.sample(&g, NodeId(1)),
        SampleOutcome::Skipped { size: 6, .. }
    ));
    assert!(matches!(
        sqrt.sample(&g, NodeId(1)),
        SampleOutcome::Accepted { .. }
    ));
}

#[test]
fn root_outside_store_is_skipped() {
    let g = cycle(50);
    let sampler = BfsSampler::new(SamplingPolicy::LogBand, 100);
    assert!(matches!(
        sampler.sample(&g, NodeId(77)),
        SampleOutcome::Skipped { size: 0, .. }
    ));
}

#[test]
fn bfs_order_covers_only_the_root_component() {
    let mut edges: Vec<(u32, u32)> = (1..30).map(|i| (i, i + 1)).collect();
    edges.extend([(31, 32), (32, 33)]);
    let g = AdjacencyGraph::from_numeric_edges(edges);
    assert_eq!(bfs_order(&g, NodeId(1)).size(), 30);
    assert_eq!(bfs_order(&g, NodeId(31)).size(), 3);
}

#[test]
fn tiny_samples_have_empty_pools() {
    // A four-cycle: logSize = 1, so the CD band 1 < i < 2 is empty.
    let g = cycle(4);
    let pools = CandidatePools::select(&bfs_order(&g, NodeId(1)), SamplingPolicy::LogBand);
    assert!(pools.cd.is_empty());
    assert!(pools.is_empty());
}

#[test]
fn log_band_predicates_at_boundaries() {
    assert_eq!(log_size(2), 0);
    assert!(!in_b_pool(1, 2));
    assert_eq!(log_size(8), 2);
    assert!(!in_cd_window(2, 8));
    assert!(in_cd_window(3, 8));
    assert!(!in_cd_window(4, 8));
    // size 8, logSize 2: tail starts after index 4.
    assert!(!in_b_pool(4, 8));
    assert!(in_b_pool(6, 8));
    assert!(!in_b_pool(7, 8));
}

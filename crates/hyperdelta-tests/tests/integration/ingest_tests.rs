use std::io::Write;
use std::path::PathBuf;

use hyperdelta_core::storage::parse_edge_list;
use hyperdelta_core::{
    exhaustive_max_delta, read_edge_list, Delta, DeltaError, GraphView, IngestOptions, NodeId,
    EXHAUSTIVE_NODE_LIMIT,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn four_cycle_fixture_loads_and_has_delta_one() {
    let (g, summary) = read_edge_list(fixture("four_cycle.tsv"), &IngestOptions::strict()).unwrap();
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 4);
    assert_eq!(summary.inserted, 4);

    let exact = exhaustive_max_delta(&g, EXHAUSTIVE_NODE_LIMIT).unwrap();
    assert_eq!(exact.max_delta, Delta::from_twice(2));
}

#[test]
fn path_fixture_has_delta_zero() {
    let (g, _) = read_edge_list(fixture("path5.tsv"), &IngestOptions::strict()).unwrap();
    let exact = exhaustive_max_delta(&g, EXHAUSTIVE_NODE_LIMIT).unwrap();
    assert_eq!(exact.max_delta, Delta::ZERO);
}

#[test]
fn malformed_fixture_reports_line_and_returns_no_graph() {
    let err = read_edge_list(fixture("malformed.tsv"), &IngestOptions::strict()).unwrap_err();
    assert!(err.is_ingest());
    match err {
        DeltaError::Ingest { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn snap_header_needs_comment_prefix() {
    let strict = read_edge_list(fixture("snap_header.tsv"), &IngestOptions::strict());
    // The first header line has no tab.
    assert!(matches!(strict, Err(DeltaError::Ingest { line: 1, .. })));

    let (g, summary) = read_edge_list(
        fixture("snap_header.tsv"),
        &IngestOptions::with_comment_prefix("#"),
    )
    .unwrap();
    assert_eq!(summary.comments, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 4);
    assert_eq!(g.node_id("alice"), Some(NodeId(1)));
    assert_eq!(g.label(NodeId(4)), Some("dave"));
}

#[test]
fn labels_get_dense_ids_in_first_seen_order() {
    let input = "10\t20\n20\t30\n5\t10\n";
    let (g, _) = parse_edge_list(input.as_bytes(), &IngestOptions::strict()).unwrap();
    assert_eq!(g.node_id("10"), Some(NodeId(1)));
    assert_eq!(g.node_id("20"), Some(NodeId(2)));
    assert_eq!(g.node_id("30"), Some(NodeId(3)));
    assert_eq!(g.node_id("5"), Some(NodeId(4)));
}

#[test]
fn crlf_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "a\tb\r\nb\tc\r\nc\ta\r\n").unwrap();
    file.flush().unwrap();

    let (g, summary) = read_edge_list(file.path(), &IngestOptions::strict()).unwrap();
    assert_eq!(summary.lines, 3);
    assert_eq!(g.edge_count(), 3);
    assert!(g.node_id("a").is_some());
}

#[test]
fn adjacency_dump_lists_every_node() {
    let (g, _) = read_edge_list(fixture("path5.tsv"), &IngestOptions::strict()).unwrap();
    let lines = g.adjacency_lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "1 -> 2");
    assert_eq!(lines[2], "3 -> 2 4");
}

#[test]
fn missing_file_is_io_error() {
    let err = read_edge_list(fixture("does_not_exist.tsv"), &IngestOptions::strict()).unwrap_err();
    assert!(matches!(err, DeltaError::Io { .. }));
}

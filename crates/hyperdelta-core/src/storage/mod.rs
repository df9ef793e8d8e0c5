//! Graph loading.
//!
//! This module builds the in-memory graph store from external data:
//! - **edge_list**: tab-separated edge lists (one undirected edge per line)
//!
//! Loading is all-or-nothing. A malformed line aborts ingestion and no graph is
//! returned, so sampling never runs on a partially loaded graph.

pub mod edge_list;

pub use edge_list::{parse_edge_list, read_edge_list, IngestOptions, IngestSummary};

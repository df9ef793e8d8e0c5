//! The delta-hyperbolicity estimation engine.
//!
//! This module provides:
//! - **errors**: Error types for ingestion, configuration and search failures
//! - **graph**: Undirected graph store with dense node ids
//! - **shortest_path**: Hop-count distance oracles
//! - **bfs_sampler**: BFS discovery order and candidate pool selection
//! - **four_point**: Four-point delta of a quadruple
//! - **running_max**: Shared running maximum and progress sinks
//! - **search**: Sequential search driver, stop token and report
//! - **parallel_search**: Worker-pool search driver
//! - **exhaustive**: Exact check for small graphs

pub mod bfs_sampler;
pub mod errors;
pub mod exhaustive;
pub mod four_point;
pub mod graph;
pub mod parallel_search;
pub mod running_max;
pub mod search;
pub mod shortest_path;

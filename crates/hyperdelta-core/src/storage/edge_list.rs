//! Tab-separated edge-list ingestion.
//!
//! Each line holds exactly two node labels separated by a single TAB and
//! denotes one undirected edge. Endpoints are created on first mention.
//! Any other field count is fatal and reported with its 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::engine::errors::DeltaError;
use crate::engine::graph::{AdjacencyGraph, EdgeInsert};
#[cfg(feature = "tracing")]
use crate::engine::graph::GraphView;

/// Parser options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Lines starting with this prefix are ignored (e.g. `#` for SNAP dumps).
    /// `None` keeps the parser strict: every line must be an edge.
    pub comment_prefix: Option<String>,
}

impl IngestOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn with_comment_prefix(prefix: impl Into<String>) -> Self {
        Self {
            comment_prefix: Some(prefix.into()),
        }
    }
}

/// Counters from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IngestSummary {
    /// Lines read, including skipped comments.
    pub lines: usize,
    /// Edges that changed the graph.
    pub inserted: usize,
    /// Edges already present.
    pub duplicates: usize,
    /// Lines whose two labels were equal.
    pub self_loops: usize,
    /// Comment lines ignored.
    pub comments: usize,
}

/// Parse an edge list from any buffered reader.
pub fn parse_edge_list<R: BufRead>(
    reader: R,
    options: &IngestOptions,
) -> Result<(AdjacencyGraph, IngestSummary), DeltaError> {
    let mut graph = AdjacencyGraph::new();
    let mut summary = IngestSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| DeltaError::ingest(line_no, format!("read failed: {}", e)))?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        summary.lines += 1;

        if let Some(prefix) = &options.comment_prefix {
            if line.starts_with(prefix.as_str()) {
                summary.comments += 1;
                continue;
            }
        }

        let (a, b) = split_edge(line).map_err(|message| DeltaError::ingest(line_no, message))?;

        match graph.insert_edge(a, b) {
            EdgeInsert::Inserted => summary.inserted += 1,
            EdgeInsert::Duplicate => summary.duplicates += 1,
            EdgeInsert::SelfLoop => summary.self_loops += 1,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        lines = summary.lines,
        duplicates = summary.duplicates,
        "edge list loaded"
    );

    Ok((graph, summary))
}

/// Open and parse an edge-list file.
pub fn read_edge_list(
    path: impl AsRef<Path>,
    options: &IngestOptions,
) -> Result<(AdjacencyGraph, IngestSummary), DeltaError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DeltaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_edge_list(BufReader::new(file), options)
}

/// Split a line into exactly two non-empty labels.
fn split_edge(line: &str) -> Result<(&str, &str), String> {
    let mut fields = line.split('\t');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
        (Some(_), Some(_), None) => Err("empty node label".to_string()),
        _ => Err(format!(
            "expected 2 tab-separated fields, found {}",
            line.split('\t').count()
        )),
    }
}

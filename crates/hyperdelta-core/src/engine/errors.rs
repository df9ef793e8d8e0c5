//! Error types for ingestion, configuration, and search.

use thiserror::Error;

/// Errors surfaced by the estimator.
///
/// Unreachable node pairs, undersized BFS samples and degenerate quadruples are
/// ordinary sampling outcomes and never show up here. Everything in this enum
/// is reported before any sampling state exists, or signals a programmer error.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DeltaError {
    /// The edge list could not be opened or read.
    #[error("io error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A malformed edge-list line (1-based line number).
    #[error("ingest error at line {line}: {message}")]
    Ingest { line: usize, message: String },

    /// Search configuration rejected by validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// Exhaustive enumeration requested on a graph above the node cap.
    #[error("graph too large for exhaustive search: {nodes} nodes (limit {limit})")]
    TooLarge { nodes: usize, limit: usize },

    /// Internal error (programmer error, not user error).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DeltaError {
    /// Build an ingestion error for a given 1-based line.
    pub fn ingest(line: usize, message: impl Into<String>) -> Self {
        Self::Ingest {
            line,
            message: message.into(),
        }
    }

    /// True for errors raised while loading the edge list.
    pub fn is_ingest(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Ingest { .. })
    }
}

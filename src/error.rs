use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Errors raised by structural graph operations and matrix parsing.
///
/// Edge-list text never produces an error: malformed lines are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} already exists")]
    DuplicateId(NodeId),

    /// An id was requested but the largest id in use is already `u32::MAX`.
    #[error("no node id is free after {0}")]
    IdsExhausted(NodeId),

    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error("edge {0} is not in the graph")]
    UnknownEdge(EdgeId),

    /// `row` is 1-based.
    #[error("malformed matrix at row {row}: {reason}")]
    MalformedMatrix { row: usize, reason: String },
}

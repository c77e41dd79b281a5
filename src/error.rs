//! Error types for precondition violations.
//!
//! Operations whose failure is an expected outcome (duplicate insertion, deleting something absent,
//! ...) return `bool` instead. Errors are only produced when a caller violates a precondition, and
//! they are always produced before the graph is touched.

use thiserror::Error;

/// Class of a precondition violation
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A node required by a mutating or testing operation is missing
    InvalidArgument,
    /// A node required by a listing operation is missing
    OutOfRange,
}

/// Errors that can occur when calling graph operations with missing nodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error)]
pub enum GraphError {
    #[error("Cannot call Graph::InsertEdge when either src or dst node does not exist")]
    InsertEdge,

    #[error("Cannot call Graph::Replace on a node that doesn't exist")]
    Replace,

    #[error("Cannot call Graph::MergeReplace on old or new data if they don't exist in the graph")]
    MergeReplace,

    #[error("Cannot call Graph::IsConnected if src or dst node don't exist in the graph")]
    IsConnected,

    #[error("Cannot call Graph::GetConnected if src doesn't exist in the graph")]
    GetConnected,

    #[error("Cannot call Graph::GetWeights if src or dst node don't exist in the graph")]
    GetWeights,
}

impl GraphError {
    /// Returns the class of the violated precondition
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::InsertEdge
            | GraphError::Replace
            | GraphError::MergeReplace
            | GraphError::IsConnected => ErrorKind::InvalidArgument,
            GraphError::GetConnected | GraphError::GetWeights => ErrorKind::OutOfRange,
        }
    }
}

/// Result type of all fallible graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

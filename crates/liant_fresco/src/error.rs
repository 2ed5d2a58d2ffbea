//! Error types for element tree manipulation.

use thiserror::Error;

use crate::render::NodeId;

/// Errors raised by checked tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no element with id {0}")]
    UnknownNode(NodeId),

    /// Only detached nodes can be attached
    #[error("element {0} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    /// An edit was applied to an element of the wrong control kind
    #[error("element {id} is not a {expected} control")]
    WrongControl { id: NodeId, expected: &'static str },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

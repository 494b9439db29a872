//! Error type of the fact tree engine.
//!
//! Lookup misses are not errors: [FactTree::find_by_name](crate::FactTree::find_by_name)
//! returns `None` for an unknown name.

use crate::model::NodeIndex;
use crate::parser::ParsingError;
use thiserror::Error;

/// Errors reported by [FactTree](crate::FactTree) operations.
#[derive(Debug, Error)]
pub enum FactTreeError {
    /// Handle does not refer to a node of this tree.
    #[error("Node handle {0} does not refer to a node of this tree")]
    InvalidHandle(NodeIndex),

    /// Operation requires an entity (leaf) but got a qualifier.
    #[error("Node {0} is a qualifier, not an entity")]
    NotALeaf(NodeIndex),

    /// Difference requested between a node and itself.
    #[error("Cannot compare node {0} with itself")]
    SameNode(NodeIndex),

    /// Text cannot be stored in the tree (empty or containing a quote).
    #[error("Invalid node text {0:?}: must be non-empty and must not contain '\"'")]
    InvalidText(String),

    /// Arena or buffer could not grow.
    #[error("Memory allocation failed")]
    AllocationFailure,

    /// Reading or writing a knowledge base file failed.
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),

    /// Knowledge base file is not well-formed.
    #[error(transparent)]
    Syntax(#[from] ParsingError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FactTreeError>;

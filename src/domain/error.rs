//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent structural violations of the tree or of the
/// data shape handed to it. None of them is transient: retrying with the
/// same arguments fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("cycle: cannot attach '{child}' below '{parent}'")]
    Cycle { child: String, parent: String },

    #[error("type mismatch at '{node}': expected {expected}, found {found}")]
    TypeMismatch {
        node: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("not a composite: {0}")]
    NotComposite(String),

    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("unknown key '{key}' for '{node}'")]
    UnknownKey { node: String, key: String },

    #[error("duplicate child name '{name}' in '{parent}'")]
    DuplicateName { parent: String, name: String },

    #[error("invalid node path: {0:?}")]
    InvalidPath(String),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;

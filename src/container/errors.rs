//! Container subsystem errors.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for container operations
pub type ContainerResult<T> = Result<T, ContainerError>;

/// Container errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Lookup by name failed and the caller supplied no default.
    #[error("child '{0}' not found")]
    ChildNotFound(String),

    /// Insertion collided with an existing child.
    #[error("child '{0}' already exists")]
    DuplicateChild(String),

    /// Reorder was attempted on an unordered container.
    #[error("container is not ordered")]
    Unordered,

    /// Reorder input was not a permutation of the current names.
    #[error("reorder names {got:?} are not a permutation of {have:?}")]
    ReorderMismatch {
        /// Names currently in the container
        have: Vec<String>,
        /// Names the caller supplied
        got: Vec<String>,
    },

    /// The storage collaborator failed while resolving a lazy child.
    #[error(transparent)]
    Store(#[from] StoreError),
}

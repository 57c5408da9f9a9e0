//! Document-type subsystem errors.

use thiserror::Error;

/// Result type for type registry operations
pub type TypeResult<T> = Result<T, TypeError>;

/// Type registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Lookup by name failed and the caller supplied no default.
    #[error("document type '{0}' not found")]
    TypeNotFound(String),

    /// A type with the same name is already registered.
    #[error("document type '{0}' already registered")]
    DuplicateType(String),
}

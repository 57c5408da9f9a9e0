//! Property subsystem errors.

use thiserror::Error;

use crate::container::ContainerError;

/// Result type for property operations
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Property and DTO marshalling errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// Lookup by name failed and the caller supplied no default.
    #[error("property '{0}' not found")]
    PropertyNotFound(String),

    /// A DTO's embedded name disagrees with the target property's name.
    #[error("DTO names '{got}' but the property is named '{expected}'")]
    MismatchedName {
        /// Actual property name
        expected: String,
        /// Name carried by the DTO
        got: String,
    },

    /// A list DTO entry was not a mapping.
    #[error("list entry {index} is not a mapping but {kind}")]
    InvalidEntry {
        /// Position of the offending entry
        index: usize,
        /// Kind of DTO actually found there
        kind: &'static str,
    },

    /// A DTO's shape does not fit the target property or field.
    #[error("field '{field}' expected {expected}, got {got}")]
    TypeMismatch {
        /// Field or property the DTO targeted
        field: String,
        /// What the target accepts
        expected: &'static str,
        /// What the DTO carried
        got: &'static str,
    },

    /// Positional access past the end of a list property.
    #[error("index {0} out of bounds")]
    IndexOutOfBounds(usize),

    /// Error from the backing item container of a list property.
    #[error(transparent)]
    Container(#[from] ContainerError),
}

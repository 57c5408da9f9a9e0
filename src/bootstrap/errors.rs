//! Bootstrap subsystem errors.

use thiserror::Error;

use crate::doctype::TypeError;
use crate::schema::SchemaError;

/// Result type for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Definition loading and registration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// A definition file could not be read.
    #[error("failed to read '{path}': {reason}")]
    Io {
        /// File the loader was reading
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// A definition file is not valid JSON of the expected shape.
    #[error("invalid definition file '{path}': {reason}")]
    Parse {
        /// File the loader was parsing
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Two definitions claim the same schema name.
    #[error("schema '{0}' defined more than once")]
    DuplicateDefinition(String),

    /// A definition references a schema that is neither defined nor
    /// already registered.
    #[error("schema '{missing}' referenced by '{referrer}' is not defined")]
    UnknownSchema {
        /// Definition holding the dangling reference
        referrer: String,
        /// Name that did not resolve
        missing: String,
    },

    /// Schema extension chains form a cycle.
    #[error("schema extension cycle through '{0}'")]
    Cycle(String),

    /// Registration was rejected by the schema registry.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Registration was rejected by the type registry.
    #[error(transparent)]
    Type(#[from] TypeError),
}

//! Schema subsystem errors.

use thiserror::Error;

/// Result type for schema registry operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Lookup by name failed and the caller supplied no default.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    /// A name is already bound to a different schema.
    #[error("schema '{0}' already registered with a different definition")]
    DuplicateSchema(String),

    /// No class is registered for the schema or any schema it extends.
    #[error("no class resolvable for schema '{0}'")]
    ClassNotFound(String),

    /// A class registration would replace a strictly more specific binding.
    #[error("class '{new}' for schema '{schema}' is an ancestor of registered class '{existing}'")]
    ClassRedefinition {
        /// Schema name the registration targeted
        schema: String,
        /// Class currently bound to the schema
        existing: String,
        /// Rejected class
        new: String,
    },
}

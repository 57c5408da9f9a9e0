//! Storage collaborator errors.

use thiserror::Error;

/// Result type for store consultations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by the external object store.
///
/// A store failure means "could not determine", never "absent": callers
/// must propagate it and leave their lazy-membership caches untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not answer the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}

//! Identifier-valued references to other documents.

use std::fmt;

use uuid::Uuid;

/// A pointer to another document by its stable identifier.
///
/// A reference owns nothing: it is only the identifier. Two references are
/// equal when their identifiers are equal, regardless of where they live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocRef(Uuid);

impl DocRef {
    /// Create a reference to the document with the given identifier
    pub fn new(target: Uuid) -> Self {
        Self(target)
    }

    /// Identifier of the referenced document
    pub fn target(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DocRef {
    fn from(target: Uuid) -> Self {
        Self(target)
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref:{}", self.0)
    }
}

//! Storage collaborator seams.
//!
//! The document model does not persist anything itself. An external object
//! store supplies identity, lazy child materialization, and change tracking
//! through the narrow traits defined here:
//!
//! - [`ChangeObserver`] is invoked on every mutating call routed through a
//!   workspace, so the store can queue the touched document for writing.
//! - [`ChildSource`] resolves children that were not loaded eagerly. A
//!   source must distinguish "definitely absent" from "could not determine":
//!   only an affirmative [`Lookup::Absent`] is cached, a [`StoreError`]
//!   propagates to the caller and nothing is remembered.

mod errors;

pub use errors::{StoreError, StoreResult};

use uuid::Uuid;

/// Dirty-marking hook invoked whenever mutable document state changes.
pub trait ChangeObserver {
    /// Called with the UUID of the document whose state changed.
    fn changed(&self, uuid: Uuid);
}

/// Description of a child resolved by the store, sufficient to materialize
/// a document node for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    /// Stable identity of the stored document.
    pub uuid: Uuid,
    /// Registered type name the document was stored with.
    pub type_name: String,
}

impl ChildRecord {
    /// Create a record for a stored child of the given type.
    pub fn new(uuid: Uuid, type_name: impl Into<String>) -> Self {
        Self {
            uuid,
            type_name: type_name.into(),
        }
    }
}

/// Outcome of consulting the store for a child by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The child exists; the record describes how to materialize it.
    Found(ChildRecord),
    /// The store affirms the child does not exist.
    Absent,
}

/// On-demand resolution of lazily loaded children.
pub trait ChildSource {
    /// Resolve `name` under the document identified by `parent`.
    fn load(&self, parent: Uuid, name: &str) -> StoreResult<Lookup>;
}

//! Document-type descriptors.

use std::sync::Arc;

use crate::schema::Schema;

/// A document type: name, schema, and container/ordering flags.
///
/// Immutable after creation and shared via `Arc` by the registry and by
/// every document node of the type.
#[derive(Debug, Clone, PartialEq)]
pub struct DocType {
    name: String,
    schema: Arc<Schema>,
    container: bool,
    ordered: bool,
}

impl DocType {
    /// Create a leaf type: documents of it hold no children.
    pub fn new(name: impl Into<String>, schema: Arc<Schema>) -> Self {
        Self {
            name: name.into(),
            schema,
            container: false,
            ordered: false,
        }
    }

    /// Create a container type, ordered or not.
    pub fn container(name: impl Into<String>, schema: Arc<Schema>, ordered: bool) -> Self {
        Self {
            name: name.into(),
            schema,
            container: true,
            ordered,
        }
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema documents of this type conform to
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// True when documents of this type hold children
    pub fn is_container(&self) -> bool {
        self.container
    }

    /// True when children of documents of this type are ordered
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }
}

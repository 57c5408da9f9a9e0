//! Document-type registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::errors::{TypeError, TypeResult};
use super::types::DocType;

/// Registry of document types, keyed by name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<DocType>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type; a taken name is rejected, never overwritten.
    pub fn add_type(&mut self, doc_type: Arc<DocType>) -> TypeResult<()> {
        let name = doc_type.name().to_string();
        if self.types.contains_key(&name) {
            return Err(TypeError::DuplicateType(name));
        }
        debug!(doc_type = %name, "registered document type");
        self.types.insert(name, doc_type);
        Ok(())
    }

    /// Look up a type by name, or `None` when absent.
    pub fn doc_type(&self, name: &str) -> Option<Arc<DocType>> {
        self.types.get(name).cloned()
    }

    /// Look up a type by name.
    pub fn get_type(&self, name: &str) -> TypeResult<Arc<DocType>> {
        self.doc_type(name)
            .ok_or_else(|| TypeError::TypeNotFound(name.to_string()))
    }

    /// Snapshot of every registered type.
    pub fn get_types(&self) -> BTreeMap<String, Arc<DocType>> {
        self.types.clone()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use std::collections::BTreeMap as Map;

    fn doc_type(name: &str) -> Arc<DocType> {
        let schema = Arc::new(Schema::new(name, Map::new()));
        Arc::new(DocType::new(name, schema))
    }

    #[test]
    fn test_add_and_get() {
        let mut registry = TypeRegistry::new();
        registry.add_type(doc_type("note")).unwrap();

        assert_eq!(registry.get_type("note").unwrap().name(), "note");
        assert_eq!(
            registry.get_type("ghost"),
            Err(TypeError::TypeNotFound("ghost".into()))
        );
        assert!(registry.doc_type("ghost").is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = TypeRegistry::new();
        registry.add_type(doc_type("note")).unwrap();
        assert_eq!(
            registry.add_type(doc_type("note")),
            Err(TypeError::DuplicateType("note".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = TypeRegistry::new();
        registry.add_type(doc_type("note")).unwrap();

        let mut snapshot = registry.get_types();
        snapshot.clear();
        assert_eq!(registry.len(), 1);
    }
}

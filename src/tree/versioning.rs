//! Versioning extension points.

use super::errors::{TreeError, TreeResult};
use super::node::NodeId;
use super::workspace::Workspace;

/// Versioning surface of a document tree.
///
/// This core does not version documents; the defaults make that explicit
/// so higher layers can detect unsupported operations. A versioning
/// component layered on top overrides the methods it supports.
pub trait Versioning {
    /// Make the document editable.
    fn checkout(&mut self, id: NodeId) -> TreeResult<()> {
        let _ = id;
        Err(TreeError::NotImplemented("checkout"))
    }

    /// Freeze the document into a new version.
    fn checkin(&mut self, id: NodeId) -> TreeResult<()> {
        let _ = id;
        Err(TreeError::NotImplemented("checkin"))
    }

    /// Whether the document is currently editable.
    fn is_checked_out(&self, id: NodeId) -> bool {
        let _ = id;
        true
    }

    /// Whether the document rejects mutation.
    fn is_read_only(&self, id: NodeId) -> bool {
        let _ = id;
        false
    }
}

impl Versioning for Workspace {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctype::{DocType, TypeRegistry};
    use crate::schema::{DocClass, Schema, SchemaRegistry};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn workspace() -> Workspace {
        let schema = Arc::new(Schema::new("root", BTreeMap::new()));
        let mut schemas = SchemaRegistry::new();
        schemas.add_schema("root", schema.clone()).unwrap();
        schemas.set_class("root", DocClass::new("Document")).unwrap();
        let mut types = TypeRegistry::new();
        types
            .add_type(Arc::new(DocType::container("root", schema, true)))
            .unwrap();
        Workspace::new(Arc::new(schemas), Arc::new(types), "root").unwrap()
    }

    #[test]
    fn test_defaults() {
        let mut ws = workspace();
        let root = ws.root();

        assert!(ws.is_checked_out(root));
        assert!(!ws.is_read_only(root));
        assert_eq!(
            ws.checkout(root),
            Err(TreeError::NotImplemented("checkout"))
        );
        assert_eq!(ws.checkin(root), Err(TreeError::NotImplemented("checkin")));
    }
}

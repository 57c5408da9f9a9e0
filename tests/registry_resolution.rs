//! Registry Resolution Tests
//!
//! Class resolution invariants of the schema registry:
//! - Exact-name bindings are never widened by resolution
//! - Ancestor rebinding is rejected, descendant rebinding wins
//! - Alias registration collides only when the schemas differ
//! - Resolution without a dominant candidate is deterministic

use std::collections::BTreeMap;
use std::sync::Arc;

use capsule::doctype::{DocType, TypeError, TypeRegistry};
use capsule::schema::{DocClass, Schema, SchemaError, SchemaRegistry};

// =============================================================================
// Helper Functions
// =============================================================================

fn schema(name: &str) -> Arc<Schema> {
    Arc::new(Schema::new(name, BTreeMap::new()))
}

fn extending(name: &str, parents: &[&Arc<Schema>]) -> Arc<Schema> {
    Arc::new(Schema::with_extends(
        name,
        BTreeMap::new(),
        parents.iter().map(|s| Arc::clone(s)).collect(),
    ))
}

// =============================================================================
// Alias Registration
// =============================================================================

/// Registering "B" whose canonical name is "A" collides with a different
/// schema already bound to "A".
#[test]
fn test_alias_collision_with_different_schema() {
    let mut registry = SchemaRegistry::new();
    registry.add_schema("A", schema("A")).unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("extra".into(), capsule::schema::FieldDef::string());
    let b = Arc::new(Schema::new("A", fields));

    assert_eq!(
        registry.add_schema("B", b),
        Err(SchemaError::DuplicateSchema("A".into()))
    );
}

/// The same registration is a no-op when the schemas are identical.
#[test]
fn test_alias_collision_with_identical_schema_is_noop() {
    let mut registry = SchemaRegistry::new();
    registry.add_schema("A", schema("A")).unwrap();
    registry.add_schema("B", schema("A")).unwrap();

    assert!(registry.schema("B").is_some());
    assert_eq!(registry.get_schemas().len(), 1);
}

// =============================================================================
// Class Specificity
// =============================================================================

/// An exact-name binding is returned as-is, never widened to an ancestor
/// registered elsewhere in the closure.
#[test]
fn test_exact_binding_never_widened() {
    let mut registry = SchemaRegistry::new();
    let base = schema("base");
    let leaf = extending("leaf", &[&base]);
    registry.add_schema("base", base).unwrap();
    registry.add_schema("leaf", leaf).unwrap();

    let doc = DocClass::new("Document");
    let leaf_class = doc.subclass("Leaf");
    registry.set_class("base", doc.clone()).unwrap();
    registry.set_class("leaf", leaf_class.clone()).unwrap();

    assert_eq!(registry.get_class("leaf").unwrap(), leaf_class);
    assert_eq!(registry.get_class("base").unwrap(), doc);
}

/// Rebinding with a strict ancestor is rejected; a strict descendant is
/// accepted and subsequently returned.
#[test]
fn test_rebinding_directions() {
    let mut registry = SchemaRegistry::new();
    registry.add_schema("doc", schema("doc")).unwrap();

    let doc = DocClass::new("Document");
    let folder = doc.subclass("Folder");
    let workspace = folder.subclass("Workspace");

    registry.set_class("doc", folder.clone()).unwrap();
    assert!(matches!(
        registry.set_class("doc", doc),
        Err(SchemaError::ClassRedefinition { .. })
    ));
    registry.set_class("doc", workspace.clone()).unwrap();
    assert_eq!(registry.get_class("doc").unwrap(), workspace);
}

/// With no dominant candidate (diamond extension, unrelated classes) the
/// resolution still answers, and always the same way.
#[test]
fn test_diamond_resolution_is_deterministic() {
    let mut registry = SchemaRegistry::new();
    let base = schema("base");
    let left = extending("left", &[&base]);
    let right = extending("right", &[&base]);
    let leaf = extending("leaf", &[&left, &right]);
    registry.add_schema("base", base).unwrap();
    registry.add_schema("left", left).unwrap();
    registry.add_schema("right", right).unwrap();
    registry.add_schema("leaf", leaf).unwrap();

    let left_class = DocClass::new("Left");
    let right_class = DocClass::new("Right");
    registry.set_class("left", left_class.clone()).unwrap();
    registry.set_class("right", right_class).unwrap();

    let first = registry.get_class("leaf").unwrap();
    for _ in 0..10 {
        assert_eq!(registry.get_class("leaf").unwrap(), first);
    }
    // Equal depth; the name tie-break picks "left".
    assert_eq!(first, left_class);
}

/// Resolution for a never-registered schema fails rather than guessing.
#[test]
fn test_unknown_schema_resolution_fails() {
    let registry = SchemaRegistry::new();
    assert_eq!(
        registry.get_class("ghost"),
        Err(SchemaError::SchemaNotFound("ghost".into()))
    );
    assert!(registry.class_of("ghost").is_none());
}

// =============================================================================
// Type Registry
// =============================================================================

#[test]
fn test_type_registration_and_snapshot() {
    let mut types = TypeRegistry::new();
    let common = schema("common");
    types
        .add_type(Arc::new(DocType::container("folder", common.clone(), true)))
        .unwrap();
    types
        .add_type(Arc::new(DocType::new("note", common.clone())))
        .unwrap();

    assert_eq!(
        types.add_type(Arc::new(DocType::new("note", common))),
        Err(TypeError::DuplicateType("note".into()))
    );

    let snapshot = types.get_types();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot["folder"].is_ordered());
}

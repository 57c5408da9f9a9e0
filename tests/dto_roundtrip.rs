//! DTO Round-Trip Tests
//!
//! The marshalling contract between the live property graph and plain
//! data:
//! - An object populated from a well-formed mapping marshals back to it
//! - A list applies the kept/removed/created algorithm and preserves order
//! - A resource marshals all-or-nothing
//! - References pass through as identifier values

use std::collections::BTreeMap;
use std::sync::Arc;

use capsule::property::{
    BinaryValue, DocRef, Dto, ListProperty, ObjectProperty, PropertyError, ResourceProperty,
    ResourceValue, Scalar, Value, NAME_KEY,
};
use capsule::schema::{FieldDef, Schema};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn item_schema() -> Arc<Schema> {
    let mut fields = BTreeMap::new();
    fields.insert("v".into(), FieldDef::int());
    fields.insert("label".into(), FieldDef::string());
    Arc::new(Schema::new("item", fields))
}

fn person_schema() -> Arc<Schema> {
    let mut address = BTreeMap::new();
    address.insert("city".into(), FieldDef::string());
    let address = Arc::new(Schema::new("address", address));

    let mut fields = BTreeMap::new();
    fields.insert("name".into(), FieldDef::string().required());
    fields.insert("age".into(), FieldDef::int());
    fields.insert("address".into(), FieldDef::object(address));
    fields.insert("entries".into(), FieldDef::list(item_schema()));
    fields.insert("photo".into(), FieldDef::resource());
    Arc::new(Schema::new("person", fields))
}

fn map(entries: Vec<(&str, Dto)>) -> Dto {
    Dto::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

// =============================================================================
// Object Round-Trip
// =============================================================================

/// Round-trip law: set_dto(M) then get_dto() == M for a well-formed M
/// carrying valid reserved-name entries at every level.
#[test]
fn test_object_roundtrip_with_nested_object() {
    let input = map(vec![
        (NAME_KEY, Dto::string("p")),
        ("name", Dto::string("Alice")),
        ("age", Dto::int(30)),
        (
            "address",
            map(vec![
                (NAME_KEY, Dto::string("address")),
                ("city", Dto::string("Lyon")),
            ]),
        ),
    ]);

    let mut object = ObjectProperty::new("p", person_schema());
    object.set_dto(&input).unwrap();
    assert_eq!(object.get_dto(), input);
}

/// Scalars pass through marshalling unchanged.
#[test]
fn test_scalar_passthrough() {
    let mut object = ObjectProperty::new("p", person_schema());
    object.set_property("age", 41i64);
    object.set_property("name", "Bob");

    let dto = object.get_dto();
    let entries = dto.as_map().unwrap();
    assert_eq!(entries.get("age"), Some(&Dto::Scalar(Scalar::Int(41))));
    assert_eq!(
        entries.get("name"),
        Some(&Dto::Scalar(Scalar::String("Bob".into())))
    );
}

/// A mismatching embedded name is rejected before any entry is applied.
#[test]
fn test_object_mismatched_name_rejected() {
    let input = map(vec![
        (NAME_KEY, Dto::string("somebody-else")),
        ("age", Dto::int(1)),
    ]);
    let mut object = ObjectProperty::new("p", person_schema());

    assert_eq!(
        object.set_dto(&input),
        Err(PropertyError::MismatchedName {
            expected: "p".into(),
            got: "somebody-else".into(),
        })
    );
    assert!(!object.has_property("age"));
}

// =============================================================================
// List Round-Trip
// =============================================================================

/// The documented scenario: one named entry, one nameless entry.
#[test]
fn test_list_scenario_named_and_fresh() {
    let mut list = ListProperty::new("entries", item_schema());
    let input = Dto::List(vec![
        map(vec![(NAME_KEY, Dto::string("x")), ("v", Dto::int(1))]),
        map(vec![("v", Dto::int(2))]),
    ]);
    list.set_dto(&input).unwrap();

    assert_eq!(list.len(), 2);
    let first = list.get(0).unwrap();
    assert_eq!(first.name(), "x");
    assert_eq!(
        first.property("v").and_then(Value::as_scalar),
        Some(&Scalar::Int(1))
    );
    let second = list.get(1).unwrap();
    assert!(!second.name().is_empty());
    assert_eq!(
        second.property("v").and_then(Value::as_scalar),
        Some(&Scalar::Int(2))
    );

    // Both entries come back in order, names resolved.
    let out = list.get_dto();
    let entries = out.as_list().unwrap();
    assert_eq!(entries[0].as_map().unwrap().get(NAME_KEY).and_then(Dto::as_str), Some("x"));
    assert_eq!(
        entries[1].as_map().unwrap().get(NAME_KEY).and_then(Dto::as_str),
        Some(second.name())
    );
}

/// Round-trip law for lists: applying the produced DTO again is stable.
#[test]
fn test_list_roundtrip_is_stable() {
    let mut list = ListProperty::new("entries", item_schema());
    list.set_dto(&Dto::List(vec![
        map(vec![("label", Dto::string("first"))]),
        map(vec![(NAME_KEY, Dto::string("n")), ("label", Dto::string("second"))]),
    ]))
    .unwrap();

    let produced = list.get_dto();
    list.set_dto(&produced).unwrap();
    assert_eq!(list.get_dto(), produced);
}

/// Unkept items are removed, kept items are updated in place, and the
/// final order follows the entry sequence.
#[test]
fn test_list_keeps_removes_and_reorders() {
    let mut list = ListProperty::new("entries", item_schema());
    list.set_dto(&Dto::List(vec![
        map(vec![(NAME_KEY, Dto::string("a")), ("v", Dto::int(1))]),
        map(vec![(NAME_KEY, Dto::string("b")), ("v", Dto::int(2))]),
        map(vec![(NAME_KEY, Dto::string("c")), ("v", Dto::int(3))]),
    ]))
    .unwrap();

    list.set_dto(&Dto::List(vec![
        map(vec![(NAME_KEY, Dto::string("c")), ("v", Dto::int(30))]),
        map(vec![(NAME_KEY, Dto::string("a"))]),
    ]))
    .unwrap();

    assert_eq!(list.names(), vec!["c", "a"]);
    assert!(!list.contains_name("b"));
    assert_eq!(
        list.child("c").unwrap().property("v").and_then(Value::as_scalar),
        Some(&Scalar::Int(30))
    );
    // "a" kept its previous properties.
    assert_eq!(
        list.child("a").unwrap().property("v").and_then(Value::as_scalar),
        Some(&Scalar::Int(1))
    );
}

/// Non-mapping entries are rejected with their position.
#[test]
fn test_list_rejects_non_mapping_entry() {
    let mut list = ListProperty::new("entries", item_schema());
    assert_eq!(
        list.set_dto(&Dto::List(vec![Dto::string("oops")])),
        Err(PropertyError::InvalidEntry {
            index: 0,
            kind: "string",
        })
    );
}

// =============================================================================
// Resource Round-Trip
// =============================================================================

/// A resource with no blob marshals to nothing; a set bundle comes back
/// whole.
#[test]
fn test_resource_all_or_nothing() {
    let mut resource = ResourceProperty::new("photo");
    assert_eq!(resource.get_dto(), None);

    let bundle = ResourceValue::new(&b"\x89PNG"[..])
        .with_mime_type("image/png")
        .with_encoding("binary")
        .with_last_modified(Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap());
    resource.set_dto(Some(&bundle)).unwrap();

    let out = resource.get_dto().unwrap();
    assert_eq!(out, bundle);
    assert_eq!(out.data.as_ref(), b"\x89PNG");
}

/// A resource field inside an object applies through the object DTO.
#[test]
fn test_resource_through_object_dto() {
    let bundle = ResourceValue::new(&b"bytes"[..]).with_mime_type("application/octet-stream");
    let input = map(vec![("photo", Dto::Resource(bundle.clone()))]);

    let mut object = ObjectProperty::new("p", person_schema());
    object.set_dto(&input).unwrap();

    let resource = object.property("photo").and_then(Value::as_resource).unwrap();
    assert_eq!(resource.get_dto(), Some(bundle));
}

// =============================================================================
// Binary and Reference Values
// =============================================================================

/// Binary values pass through object marshalling unchanged.
#[test]
fn test_binary_passthrough() {
    let blob = BinaryValue::new(&b"data"[..]).with_mime_type("text/plain");
    let mut object = ObjectProperty::new("p", person_schema());
    object.set_property("blob", Value::Binary(blob.clone()));

    let dto = object.get_dto();
    assert_eq!(dto.as_map().unwrap().get("blob"), Some(&Dto::Binary(blob)));
}

/// References are their identifier: no conversion, by-value equality.
#[test]
fn test_reference_identity() {
    let id = Uuid::new_v4();
    let a = DocRef::new(id);
    let b = DocRef::new(id);
    assert_eq!(a, b);

    let mut object = ObjectProperty::new("p", person_schema());
    object.set_property("link", Value::Reference(a));
    let dto = object.get_dto();
    assert_eq!(dto.as_map().unwrap().get("link"), Some(&Dto::Reference(b)));
}

//! Nested object properties.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::schema::{FieldKind, Schema};

use super::dto::{Dto, NAME_KEY};
use super::errors::{PropertyError, PropertyResult};
use super::list::ListProperty;
use super::resource::ResourceProperty;
use super::value::Value;

/// A complex property holding named values that conform to a schema.
///
/// This mirrors a document's property side without the children-as-
/// documents semantics: a name-to-value table plus the schema that types
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    name: String,
    schema: Arc<Schema>,
    props: BTreeMap<String, Value>,
}

impl ObjectProperty {
    /// Create an empty object property conforming to `schema`
    pub fn new(name: impl Into<String>, schema: Arc<Schema>) -> Self {
        Self {
            name: name.into(),
            schema,
            props: BTreeMap::new(),
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the schema this object conforms to
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// Schema this object conforms to
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Snapshot of every held property.
    pub fn properties(&self) -> BTreeMap<String, Value> {
        self.props.clone()
    }

    /// Look up a property by name, or `None` when absent.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Look up a property by name.
    pub fn get_property(&self, name: &str) -> PropertyResult<&Value> {
        self.props
            .get(name)
            .ok_or_else(|| PropertyError::PropertyNotFound(name.to_string()))
    }

    /// Mutable lookup by name.
    pub fn property_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.props.get_mut(name)
    }

    /// True when a property of that name is held
    pub fn has_property(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    /// Add a property or replace an existing one.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.props.insert(name.into(), value.into());
    }

    /// Remove a property, returning its previous value if any.
    pub fn remove_property(&mut self, name: &str) -> Option<Value> {
        self.props.remove(name)
    }

    /// Marshal the object into a mapping DTO.
    ///
    /// The mapping holds one entry per held property plus the reserved
    /// [`NAME_KEY`] entry carrying this property's name.
    pub fn get_dto(&self) -> Dto {
        Dto::Map(collect_dto_map(&self.name, &self.props))
    }

    /// Apply a mapping DTO onto the object.
    ///
    /// A [`NAME_KEY`] entry, when present, must match this property's name.
    /// Every other entry is applied through `set_property`; a `Null` entry
    /// removes the named property.
    pub fn set_dto(&mut self, dto: &Dto) -> PropertyResult<()> {
        apply_dto_map(&self.name, &self.schema, &mut self.props, dto)
    }
}

/// Marshal a property table into the mapping payload of an object DTO.
pub(crate) fn collect_dto_map(
    own_name: &str,
    props: &BTreeMap<String, Value>,
) -> BTreeMap<String, Dto> {
    let mut map = BTreeMap::new();
    map.insert(NAME_KEY.to_string(), Dto::string(own_name));
    for (name, value) in props {
        map.insert(name.clone(), value.to_dto());
    }
    map
}

/// Apply a mapping DTO onto a property table typed by `schema`.
pub(crate) fn apply_dto_map(
    own_name: &str,
    schema: &Schema,
    props: &mut BTreeMap<String, Value>,
    dto: &Dto,
) -> PropertyResult<()> {
    let map = dto.as_map().ok_or_else(|| PropertyError::TypeMismatch {
        field: own_name.to_string(),
        expected: "map",
        got: dto.kind_name(),
    })?;

    if let Some(entry) = map.get(NAME_KEY) {
        match entry.as_str() {
            Some(name) if name == own_name => {}
            Some(name) => {
                return Err(PropertyError::MismatchedName {
                    expected: own_name.to_string(),
                    got: name.to_string(),
                })
            }
            None => {
                return Err(PropertyError::TypeMismatch {
                    field: NAME_KEY.to_string(),
                    expected: "string",
                    got: entry.kind_name(),
                })
            }
        }
    }

    for (name, entry) in map {
        if name == NAME_KEY {
            continue;
        }
        apply_dto_entry(schema, props, name, entry)?;
    }
    Ok(())
}

/// Apply one DTO entry onto a property table.
///
/// Scalar-shaped entries store as-is; map, list and resource entries need
/// either an existing complex property of the right kind or a declared
/// field to build one from.
fn apply_dto_entry(
    schema: &Schema,
    props: &mut BTreeMap<String, Value>,
    name: &str,
    entry: &Dto,
) -> PropertyResult<()> {
    match entry {
        Dto::Null => {
            props.remove(name);
        }
        Dto::Scalar(scalar) => {
            props.insert(name.to_string(), Value::Scalar(scalar.clone()));
        }
        Dto::Binary(binary) => {
            props.insert(name.to_string(), Value::Binary(binary.clone()));
        }
        Dto::Reference(reference) => {
            props.insert(name.to_string(), Value::Reference(*reference));
        }
        Dto::Resource(bundle) => {
            if let Some(Value::Resource(resource)) = props.get_mut(name) {
                return resource.set_dto(Some(bundle));
            }
            match schema.field(name).map(|def| &def.kind) {
                Some(FieldKind::Resource) => {
                    let mut resource = ResourceProperty::new(name);
                    resource.set_dto(Some(bundle))?;
                    props.insert(name.to_string(), Value::Resource(resource));
                }
                other => {
                    return Err(PropertyError::TypeMismatch {
                        field: name.to_string(),
                        expected: "resource field",
                        got: other.map_or("no field", FieldKind::kind_name),
                    })
                }
            }
        }
        Dto::Map(_) => {
            if let Some(Value::Object(object)) = props.get_mut(name) {
                return object.set_dto(entry);
            }
            match schema.field(name).map(|def| &def.kind) {
                Some(FieldKind::Object { schema: nested }) => {
                    let mut object = ObjectProperty::new(name, nested.clone());
                    object.set_dto(entry)?;
                    props.insert(name.to_string(), Value::Object(object));
                }
                other => {
                    return Err(PropertyError::TypeMismatch {
                        field: name.to_string(),
                        expected: "object field",
                        got: other.map_or("no field", FieldKind::kind_name),
                    })
                }
            }
        }
        Dto::List(_) => {
            if let Some(Value::List(list)) = props.get_mut(name) {
                return list.set_dto(entry);
            }
            match schema.field(name).map(|def| &def.kind) {
                Some(FieldKind::List { item }) => {
                    let mut list = ListProperty::new(name, item.clone());
                    list.set_dto(entry)?;
                    props.insert(name.to_string(), Value::List(list));
                }
                other => {
                    return Err(PropertyError::TypeMismatch {
                        field: name.to_string(),
                        expected: "list field",
                        got: other.map_or("no field", FieldKind::kind_name),
                    })
                }
            }
        }
    }
    Ok(())
}

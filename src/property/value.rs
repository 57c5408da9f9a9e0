//! Scalar values and the tagged property-value variant.

use chrono::{DateTime, Utc};

use super::binary::BinaryValue;
use super::dto::Dto;
use super::list::ListProperty;
use super::object::ObjectProperty;
use super::reference::DocRef;
use super::resource::ResourceProperty;

/// Plain scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// UTF-8 string
    String(String),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
}

impl Scalar {
    /// Returns the scalar kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "bool",
            Scalar::DateTime(_) => "datetime",
        }
    }

    /// String content, when the scalar is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::DateTime(value)
    }
}

/// Kind discriminant of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Plain scalar
    Scalar,
    /// Binary blob
    Binary,
    /// Ordered list of objects
    List,
    /// Nested object
    Object,
    /// Blob-plus-metadata bundle
    Resource,
    /// Identifier-valued reference
    Reference,
}

/// A property value: a scalar, or one of the complex property variants.
///
/// The model dispatches on [`Value::kind`] instead of inspecting runtime
/// types; the set of variants is closed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain scalar value
    Scalar(Scalar),
    /// Binary blob
    Binary(BinaryValue),
    /// Ordered list of objects conforming to one value schema
    List(ListProperty),
    /// Nested object with its own schema and properties
    Object(ObjectProperty),
    /// Blob bundled with MIME type, encoding and timestamp
    Resource(ResourceProperty),
    /// Identifier-valued pointer to another document
    Reference(DocRef),
}

impl Value {
    /// Kind discriminant
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Binary(_) => ValueKind::Binary,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
            Value::Resource(_) => ValueKind::Resource,
            Value::Reference(_) => ValueKind::Reference,
        }
    }

    /// Scalar content, when the value is a scalar
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Binary content, when the value is a blob
    pub fn as_binary(&self) -> Option<&BinaryValue> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// List property, when the value is one
    pub fn as_list(&self) -> Option<&ListProperty> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Mutable list property, when the value is one
    pub fn as_list_mut(&mut self) -> Option<&mut ListProperty> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Object property, when the value is one
    pub fn as_object(&self) -> Option<&ObjectProperty> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable object property, when the value is one
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectProperty> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Resource property, when the value is one
    pub fn as_resource(&self) -> Option<&ResourceProperty> {
        match self {
            Value::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Mutable resource property, when the value is one
    pub fn as_resource_mut(&mut self) -> Option<&mut ResourceProperty> {
        match self {
            Value::Resource(r) => Some(r),
            _ => None,
        }
    }

    /// Reference content, when the value is one
    pub fn as_reference(&self) -> Option<&DocRef> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Marshal this value into plain data.
    ///
    /// Complex variants recurse; a resource without a data blob marshals
    /// to [`Dto::Null`].
    pub fn to_dto(&self) -> Dto {
        match self {
            Value::Scalar(s) => Dto::Scalar(s.clone()),
            Value::Binary(b) => Dto::Binary(b.clone()),
            Value::Reference(r) => Dto::Reference(r.clone()),
            Value::Object(o) => o.get_dto(),
            Value::List(l) => l.get_dto(),
            Value::Resource(r) => match r.get_dto() {
                Some(bundle) => Dto::Resource(bundle),
                None => Dto::Null,
            },
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<BinaryValue> for Value {
    fn from(value: BinaryValue) -> Self {
        Value::Binary(value)
    }
}

impl From<ListProperty> for Value {
    fn from(value: ListProperty) -> Self {
        Value::List(value)
    }
}

impl From<ObjectProperty> for Value {
    fn from(value: ObjectProperty) -> Self {
        Value::Object(value)
    }
}

impl From<ResourceProperty> for Value {
    fn from(value: ResourceProperty) -> Self {
        Value::Resource(value)
    }
}

impl From<DocRef> for Value {
    fn from(value: DocRef) -> Self {
        Value::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_discriminants() {
        assert_eq!(Value::from(1i64).kind(), ValueKind::Scalar);
        assert_eq!(
            Value::from(BinaryValue::new(&b"abc"[..])).kind(),
            ValueKind::Binary
        );
        assert_eq!(
            Value::from(DocRef::new(uuid::Uuid::new_v4())).kind(),
            ValueKind::Reference
        );
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Scalar::from("x"), Scalar::String("x".into()));
        assert_eq!(Scalar::from(3i64), Scalar::Int(3));
        assert_eq!(Scalar::from(true), Scalar::Bool(true));
        assert_eq!(Scalar::from(1.5), Scalar::Float(1.5));
    }

    #[test]
    fn test_scalar_dto_passthrough() {
        let value = Value::from("hello");
        assert_eq!(value.to_dto(), Dto::Scalar(Scalar::String("hello".into())));
    }
}

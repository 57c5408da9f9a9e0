//! Plain-data transfer values.

use std::collections::BTreeMap;

use super::binary::BinaryValue;
use super::reference::DocRef;
use super::resource::ResourceValue;
use super::value::Scalar;

/// Reserved mapping key carrying a property's own name in its DTO.
///
/// Object DTOs produced by `get_dto` always contain this entry, so a list
/// container can recognize and update existing items by name on a later
/// `set_dto`. On input the entry is optional; when present it must match
/// the target property's name.
pub const NAME_KEY: &str = "__name__";

/// A plain, storage-agnostic representation of a property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Dto {
    /// Absent value; applied to an object property it removes the entry
    Null,
    /// Plain scalar
    Scalar(Scalar),
    /// Binary blob
    Binary(BinaryValue),
    /// Complete resource bundle
    Resource(ResourceValue),
    /// Identifier-valued reference, passed through unconverted
    Reference(DocRef),
    /// Mapping of field names to nested DTOs
    Map(BTreeMap<String, Dto>),
    /// Ordered sequence of nested DTOs
    List(Vec<Dto>),
}

impl Dto {
    /// Shorthand for a string scalar
    pub fn string(value: impl Into<String>) -> Self {
        Dto::Scalar(Scalar::String(value.into()))
    }

    /// Shorthand for an int scalar
    pub fn int(value: i64) -> Self {
        Dto::Scalar(Scalar::Int(value))
    }

    /// Returns the DTO kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Dto::Null => "null",
            Dto::Scalar(s) => s.kind_name(),
            Dto::Binary(_) => "binary",
            Dto::Resource(_) => "resource",
            Dto::Reference(_) => "reference",
            Dto::Map(_) => "map",
            Dto::List(_) => "list",
        }
    }

    /// Mapping content, when the DTO is a map
    pub fn as_map(&self) -> Option<&BTreeMap<String, Dto>> {
        match self {
            Dto::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Sequence content, when the DTO is a list
    pub fn as_list(&self) -> Option<&[Dto]> {
        match self {
            Dto::List(entries) => Some(entries),
            _ => None,
        }
    }

    /// Scalar content, when the DTO is a scalar
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Dto::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// String content, when the DTO is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }
}

impl From<Scalar> for Dto {
    fn from(value: Scalar) -> Self {
        Dto::Scalar(value)
    }
}

impl From<&str> for Dto {
    fn from(value: &str) -> Self {
        Dto::string(value)
    }
}

impl From<i64> for Dto {
    fn from(value: i64) -> Self {
        Dto::int(value)
    }
}

impl From<bool> for Dto {
    fn from(value: bool) -> Self {
        Dto::Scalar(Scalar::Bool(value))
    }
}

impl From<BTreeMap<String, Dto>> for Dto {
    fn from(value: BTreeMap<String, Dto>) -> Self {
        Dto::Map(value)
    }
}

impl From<Vec<Dto>> for Dto {
    fn from(value: Vec<Dto>) -> Self {
        Dto::List(value)
    }
}

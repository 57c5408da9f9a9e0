//! Resource properties: a blob bundled with its metadata.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use super::binary::BinaryValue;
use super::errors::{PropertyError, PropertyResult};
use super::value::{Scalar, Value};

/// Name of the data-blob sub-property
pub const RESOURCE_DATA: &str = "data";
/// Name of the MIME-type sub-property
pub const RESOURCE_MIME_TYPE: &str = "mime-type";
/// Name of the encoding sub-property
pub const RESOURCE_ENCODING: &str = "encoding";
/// Name of the last-modified sub-property
pub const RESOURCE_LAST_MODIFIED: &str = "last-modified";

/// The transfer value of a resource property: the complete bundle.
///
/// A resource DTO is either absent or this whole value — never a partial
/// bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceValue {
    /// Blob payload
    pub data: Bytes,
    /// MIME type of the payload
    pub mime_type: Option<String>,
    /// Encoding of the payload
    pub encoding: Option<String>,
    /// When the payload last changed
    pub last_modified: Option<DateTime<Utc>>,
}

impl ResourceValue {
    /// Create a bundle around a payload
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
            encoding: None,
            last_modified: None,
        }
    }

    /// Attach a MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Attach an encoding
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Attach a last-modified timestamp
    pub fn with_last_modified(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }
}

/// A structured bundle of data blob, MIME type, encoding and last-modified
/// timestamp, stored as four named sub-properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceProperty {
    name: String,
    props: BTreeMap<String, Value>,
}

impl ResourceProperty {
    /// Create an empty resource property
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: BTreeMap::new(),
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sub-property by name, or `None` when absent.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// Snapshot of the held sub-properties.
    pub fn properties(&self) -> BTreeMap<String, Value> {
        self.props.clone()
    }

    /// The data blob, when set
    pub fn data(&self) -> Option<&BinaryValue> {
        self.props.get(RESOURCE_DATA).and_then(Value::as_binary)
    }

    /// MIME type, when set
    pub fn mime_type(&self) -> Option<&str> {
        self.scalar_str(RESOURCE_MIME_TYPE)
    }

    /// Encoding, when set
    pub fn encoding(&self) -> Option<&str> {
        self.scalar_str(RESOURCE_ENCODING)
    }

    /// Last-modified timestamp, when set
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        match self.props.get(RESOURCE_LAST_MODIFIED).and_then(Value::as_scalar) {
            Some(Scalar::DateTime(at)) => Some(*at),
            _ => None,
        }
    }

    /// Marshal the bundle, or `None` when no data blob is held.
    ///
    /// The result is always complete: metadata sub-properties without a
    /// blob never produce a partial bundle.
    pub fn get_dto(&self) -> Option<ResourceValue> {
        let data = self.data()?;
        Some(ResourceValue {
            data: data.bytes(),
            mime_type: self.mime_type().map(str::to_string),
            encoding: self.encoding().map(str::to_string),
            last_modified: self.last_modified(),
        })
    }

    /// Decompose a bundle into the four sub-properties.
    ///
    /// An absent bundle is rejected: clearing a resource is the owner's
    /// remove-property operation, not a `set_dto(None)`.
    pub fn set_dto(&mut self, value: Option<&ResourceValue>) -> PropertyResult<()> {
        let bundle = value.ok_or_else(|| PropertyError::TypeMismatch {
            field: self.name.clone(),
            expected: "resource value",
            got: "null",
        })?;

        self.props.insert(
            RESOURCE_DATA.to_string(),
            Value::Binary(BinaryValue::new(bundle.data.clone())),
        );
        Self::set_optional(
            &mut self.props,
            RESOURCE_MIME_TYPE,
            bundle.mime_type.clone().map(Scalar::String),
        );
        Self::set_optional(
            &mut self.props,
            RESOURCE_ENCODING,
            bundle.encoding.clone().map(Scalar::String),
        );
        Self::set_optional(
            &mut self.props,
            RESOURCE_LAST_MODIFIED,
            bundle.last_modified.map(Scalar::DateTime),
        );
        Ok(())
    }

    fn scalar_str(&self, name: &str) -> Option<&str> {
        self.props.get(name).and_then(Value::as_scalar).and_then(Scalar::as_str)
    }

    fn set_optional(props: &mut BTreeMap<String, Value>, name: &str, scalar: Option<Scalar>) {
        match scalar {
            Some(scalar) => {
                props.insert(name.to_string(), Value::Scalar(scalar));
            }
            None => {
                props.remove(name);
            }
        }
    }
}

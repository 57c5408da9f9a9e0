//! Binary blob values.

use std::io::Cursor;

use bytes::Bytes;

/// An immutable byte payload with optional MIME type and encoding.
///
/// The payload is shared, never copied: cloning a `BinaryValue` and
/// opening readers are both cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryValue {
    data: Bytes,
    mime_type: Option<String>,
    encoding: Option<String>,
}

impl BinaryValue {
    /// Create a blob from raw bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
            encoding: None,
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

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the payload
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Shared handle to the payload
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// MIME type, if recorded
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Encoding, if recorded
    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Open a fresh seekable reader over the payload.
    ///
    /// Every call returns an independent reader positioned at the start.
    pub fn reader(&self) -> Cursor<Bytes> {
        Cursor::new(self.data.clone())
    }
}

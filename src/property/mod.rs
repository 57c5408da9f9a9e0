//! Property subsystem for capsule
//!
//! Non-scalar property values are a closed set of variants with an explicit
//! kind discriminant: binary blobs, ordered lists of schema-conforming
//! objects, nested objects, resource bundles, and identifier-valued
//! references. Scalars are plain values and need no wrapper.
//!
//! Every complex property takes part in the DTO marshalling protocol:
//! `get_dto` walks the live graph into plain nested data, `set_dto` applies
//! plain data back onto it. Object DTOs always carry their property name
//! under the reserved [`NAME_KEY`] entry so list containers can recognize
//! existing items on the way back in.

mod binary;
mod dto;
mod errors;
mod list;
mod object;
mod reference;
mod resource;
mod value;

pub(crate) use object::{apply_dto_map, collect_dto_map};

pub use binary::BinaryValue;
pub use dto::{Dto, NAME_KEY};
pub use errors::{PropertyError, PropertyResult};
pub use list::ListProperty;
pub use object::ObjectProperty;
pub use reference::DocRef;
pub use resource::{
    ResourceProperty, ResourceValue, RESOURCE_DATA, RESOURCE_ENCODING, RESOURCE_LAST_MODIFIED,
    RESOURCE_MIME_TYPE,
};
pub use value::{Scalar, Value, ValueKind};

//! Schema subsystem for capsule
//!
//! Schemas are named, immutable descriptors of typed fields. A schema may
//! extend other schemas; the extension closure drives implementation-class
//! resolution.
//!
//! # Design Principles
//!
//! - Schemas are registered once and never mutated afterwards;
//!   re-registration of an identical schema is a no-op, a different schema
//!   under a taken name is rejected
//! - A schema may be registered under names other than its canonical one
//!   (aliases); enumeration lists canonical entries only
//! - Class resolution returns the most specific registered class for a
//!   schema, walking the extension closure, and is memoized until the next
//!   registration invalidates the cache

mod class;
mod errors;
mod registry;
mod types;

pub use class::DocClass;
pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{FieldDef, FieldKind, Schema};

//! Bootstrap subsystem for capsule
//!
//! Registries must be populated before any document exists. This module
//! loads schema and type definitions from JSON files, resolves the
//! references between them (extension chains, object and list item
//! schemas) in dependency order, and registers everything.
//!
//! Implementation classes are code, not configuration: consumers bind
//! them with [`SchemaRegistry::set_class`] and
//! [`SchemaRegistry::set_default_class`] after loading definitions.
//!
//! [`SchemaRegistry::set_class`]: crate::schema::SchemaRegistry::set_class
//! [`SchemaRegistry::set_default_class`]: crate::schema::SchemaRegistry::set_default_class

mod errors;
mod loader;

pub use errors::{BootstrapError, BootstrapResult};
pub use loader::{BootstrapLoader, BundleDef, FieldDefRaw, FieldKindDef, SchemaDef, TypeDef};

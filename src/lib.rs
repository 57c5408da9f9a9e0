//! capsule - a hierarchical, schema-typed document object model
//!
//! Documents are nodes in a tree held by a [`tree::Workspace`]. Each
//! document carries a type from the [`doctype::TypeRegistry`]; the type's
//! schema resolves to an implementation class through the
//! [`schema::SchemaRegistry`]. Properties are scalars or complex values
//! from the [`property`] model, children live in [`container`]
//! collections, and the whole graph marshals to and from plain data
//! through the DTO protocol. Persistence is an external collaborator
//! behind the [`store`] traits; [`bootstrap`] populates the registries
//! before anything else runs.

pub mod bootstrap;
pub mod container;
pub mod doctype;
pub mod property;
pub mod schema;
pub mod store;
pub mod tree;

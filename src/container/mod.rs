//! Container subsystem for capsule
//!
//! A [`Container`] holds uniquely-named children, optionally ordered. The
//! same structure backs both a document's child collection and the item
//! storage of list properties.
//!
//! # Invariants
//!
//! - Every name in the order sequence exists exactly once in the backing
//!   mapping, and vice versa
//! - `reorder` accepts only a permutation of the current names; anything
//!   else is rejected and the current order is left untouched
//! - Unordered containers may track lazy membership: each name is Unknown,
//!   Loaded, or ConfirmedAbsent, and only consulting the storage
//!   collaborator moves a name out of Unknown

mod errors;
mod holder;

pub use errors::{ContainerError, ContainerResult};
pub use holder::{Children, Container, LazyState};

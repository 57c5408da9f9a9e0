//! Document-tree errors.

use thiserror::Error;

use crate::container::ContainerError;
use crate::doctype::TypeError;
use crate::property::PropertyError;
use crate::schema::SchemaError;
use crate::store::StoreError;

use super::node::NodeId;

/// Result type for workspace operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Document-tree errors, composing the lower subsystem errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TreeError {
    /// The id addresses no live document in this workspace.
    #[error("no document at {0}")]
    NodeNotFound(NodeId),

    /// A child operation targeted a document of a leaf type.
    #[error("document '{0}' is not a container")]
    NotContainer(String),

    /// Subtree cleanup was attempted on a still-attached document.
    #[error("document '{0}' is still attached to a parent")]
    NotDetached(String),

    /// The operation belongs to a more specialized layer.
    #[error("operation '{0}' is not supported by this layer")]
    NotImplemented(&'static str),

    /// Schema registry failure
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Type registry failure
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Child container failure
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// Property or DTO failure
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Storage collaborator failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

//! Arena node types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::container::Container;
use crate::doctype::DocType;
use crate::property::Value;
use crate::schema::DocClass;

/// Reserved name of the internal children-holder node.
///
/// Holders never appear in paths and are skipped by parent resolution;
/// the name exists for diagnostics only.
pub const CHILDREN_NAME: &str = "caps:children";

/// Handle addressing a node in a workspace arena.
///
/// Ids are only meaningful within the workspace that issued them and may
/// be invalidated by `prune`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A node in the arena: a content document, or the internal holder a
/// folderish document keeps its children in.
#[derive(Debug)]
pub(crate) enum Node {
    Document(DocumentNode),
    Holder(HolderNode),
}

#[derive(Debug)]
pub(crate) struct DocumentNode {
    /// Name, unique among siblings; the root document's name is empty
    pub name: String,
    /// Stable identity, kept across moves by the persistence layer
    pub uuid: Uuid,
    /// Registered type of the document
    pub doc_type: Arc<DocType>,
    /// Implementation class resolved from the type's schema at creation
    pub class: DocClass,
    /// Property table: scalars and owned complex properties
    pub props: BTreeMap<String, Value>,
    /// Holder node carrying the children, once one exists
    pub children: Option<NodeId>,
    /// Back-reference to the holder containing this document; set at
    /// attach time, cleared at detach time, never owning
    pub parent: Option<NodeId>,
}

#[derive(Debug)]
pub(crate) struct HolderNode {
    /// The named child collection
    pub container: Container<NodeId>,
    /// The document this holder belongs to
    pub parent: NodeId,
}

impl Node {
    pub(crate) fn as_document(&self) -> Option<&DocumentNode> {
        match self {
            Node::Document(doc) => Some(doc),
            Node::Holder(_) => None,
        }
    }

    pub(crate) fn as_document_mut(&mut self) -> Option<&mut DocumentNode> {
        match self {
            Node::Document(doc) => Some(doc),
            Node::Holder(_) => None,
        }
    }

    pub(crate) fn as_holder(&self) -> Option<&HolderNode> {
        match self {
            Node::Document(_) => None,
            Node::Holder(holder) => Some(holder),
        }
    }

    pub(crate) fn as_holder_mut(&mut self) -> Option<&mut HolderNode> {
        match self {
            Node::Document(_) => None,
            Node::Holder(holder) => Some(holder),
        }
    }
}

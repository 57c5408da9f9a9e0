//! The document arena.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};
use uuid::Uuid;

use crate::container::{Container, ContainerError, LazyState};
use crate::doctype::{DocType, TypeRegistry};
use crate::property::{collect_dto_map, apply_dto_map};
use crate::property::{Dto, Value};
use crate::schema::{DocClass, Schema, SchemaRegistry};
use crate::store::{ChangeObserver, ChildRecord, ChildSource, Lookup};

use super::errors::{TreeError, TreeResult};
use super::node::{DocumentNode, HolderNode, Node, NodeId};

/// Root of a tree of documents.
///
/// The workspace owns every node of the tree in an arena and mediates all
/// access to it: navigation, property reads and writes, child management,
/// DTO marshalling, and the collaborator hooks. Both registries must be
/// fully populated before a workspace is created; resolving a type whose
/// schema or class was never registered fails fast.
pub struct Workspace {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
    schemas: Arc<SchemaRegistry>,
    types: Arc<TypeRegistry>,
    observer: Option<Box<dyn ChangeObserver>>,
    source: Option<Box<dyn ChildSource>>,
}

impl Workspace {
    /// Create a workspace whose root document has the given type.
    ///
    /// The root document gets the empty name and renders as `/`.
    pub fn new(
        schemas: Arc<SchemaRegistry>,
        types: Arc<TypeRegistry>,
        root_type: &str,
    ) -> TreeResult<Self> {
        let mut workspace = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId(0),
            schemas,
            types,
            observer: None,
            source: None,
        };
        let root = workspace.create_document("", root_type, None)?;
        workspace.root = root;
        Ok(workspace)
    }

    /// Attach the dirty-marking hook of the persistence collaborator.
    pub fn with_observer(mut self, observer: Box<dyn ChangeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Attach the lazy child resolver of the persistence collaborator.
    ///
    /// Unordered child collections created from now on track lazy
    /// membership and consult the source on lookup misses.
    pub fn with_source(mut self, source: Box<dyn ChildSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Schema registry this workspace resolves against
    pub fn schemas(&self) -> &Arc<SchemaRegistry> {
        &self.schemas
    }

    /// Type registry this workspace resolves against
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// Id of the root document
    pub fn root(&self) -> NodeId {
        self.root
    }

    // ===== Identity and navigation =====

    /// Name of a document, unique among its siblings
    pub fn name(&self, id: NodeId) -> TreeResult<&str> {
        Ok(&self.doc(id)?.name)
    }

    /// Stable identity of a document
    pub fn uuid(&self, id: NodeId) -> TreeResult<Uuid> {
        Ok(self.doc(id)?.uuid)
    }

    /// Type of a document
    pub fn doc_type(&self, id: NodeId) -> TreeResult<Arc<DocType>> {
        Ok(self.doc(id)?.doc_type.clone())
    }

    /// Name of a document's type
    pub fn type_name(&self, id: NodeId) -> TreeResult<&str> {
        Ok(self.doc(id)?.doc_type.name())
    }

    /// Schema of a document's type
    pub fn schema(&self, id: NodeId) -> TreeResult<Arc<Schema>> {
        Ok(self.doc(id)?.doc_type.schema().clone())
    }

    /// Implementation class resolved for the document at creation
    pub fn class(&self, id: NodeId) -> TreeResult<DocClass> {
        Ok(self.doc(id)?.class.clone())
    }

    /// Nearest ancestor that is a real content document.
    ///
    /// The internal children-holder between a document and its parent is
    /// skipped; the root and detached documents have no parent.
    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        match self.doc(id)?.parent {
            None => Ok(None),
            Some(holder_id) => Ok(Some(self.holder(holder_id)?.parent)),
        }
    }

    /// Path of a document: the `/`-joined names of its ancestor chain.
    pub fn path(&self, id: NodeId) -> TreeResult<String> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let doc = self.doc(node)?;
            names.push(doc.name.clone());
            current = match doc.parent {
                Some(holder_id) => Some(self.holder(holder_id)?.parent),
                None => None,
            };
        }
        names.reverse();
        let path = names.join("/");
        if path.is_empty() {
            Ok("/".to_string())
        } else {
            Ok(path)
        }
    }

    /// Diagnostic rendering of a document: class and path.
    pub fn describe(&self, id: NodeId) -> TreeResult<String> {
        Ok(format!("<{} at {}>", self.doc(id)?.class, self.path(id)?))
    }

    // ===== Properties =====

    /// Snapshot of every property of a document.
    pub fn properties(&self, id: NodeId) -> TreeResult<BTreeMap<String, Value>> {
        Ok(self.doc(id)?.props.clone())
    }

    /// Look up a property, or `None` when absent.
    pub fn property(&self, id: NodeId, name: &str) -> TreeResult<Option<&Value>> {
        Ok(self.doc(id)?.props.get(name))
    }

    /// Look up a property.
    pub fn get_property(&self, id: NodeId, name: &str) -> TreeResult<&Value> {
        self.doc(id)?
            .props
            .get(name)
            .ok_or_else(|| crate::property::PropertyError::PropertyNotFound(name.to_string()).into())
    }

    /// True when the document holds a property of that name
    pub fn has_property(&self, id: NodeId, name: &str) -> TreeResult<bool> {
        Ok(self.doc(id)?.props.contains_key(name))
    }

    /// Add a property or replace an existing one.
    pub fn set_property(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> TreeResult<()> {
        let uuid = {
            let doc = self.doc_mut(id)?;
            doc.props.insert(name.into(), value.into());
            doc.uuid
        };
        self.notify(uuid);
        Ok(())
    }

    /// Remove a property, returning its previous value if any.
    pub fn remove_property(&mut self, id: NodeId, name: &str) -> TreeResult<Option<Value>> {
        let (uuid, previous) = {
            let doc = self.doc_mut(id)?;
            (doc.uuid, doc.props.remove(name))
        };
        self.notify(uuid);
        Ok(previous)
    }

    /// Mutable access to a property.
    ///
    /// The document is marked dirty up front: the observer cannot see
    /// through the returned borrow.
    pub fn property_mut(&mut self, id: NodeId, name: &str) -> TreeResult<&mut Value> {
        let uuid = self.doc(id)?.uuid;
        self.notify(uuid);
        self.doc_mut(id)?
            .props
            .get_mut(name)
            .ok_or_else(|| crate::property::PropertyError::PropertyNotFound(name.to_string()).into())
    }

    /// Marshal a document's properties into a mapping DTO.
    pub fn get_dto(&self, id: NodeId) -> TreeResult<Dto> {
        let doc = self.doc(id)?;
        Ok(Dto::Map(collect_dto_map(&doc.name, &doc.props)))
    }

    /// Apply a mapping DTO onto a document's properties.
    pub fn set_dto(&mut self, id: NodeId, dto: &Dto) -> TreeResult<()> {
        let uuid = {
            let doc = self.doc_mut(id)?;
            let name = doc.name.clone();
            let schema = doc.doc_type.schema().clone();
            apply_dto_map(&name, &schema, &mut doc.props, dto)?;
            doc.uuid
        };
        self.notify(uuid);
        Ok(())
    }

    // ===== Children =====

    /// True when a child of that name is present in memory
    pub fn has_child(&self, id: NodeId, name: &str) -> TreeResult<bool> {
        match self.doc(id)?.children {
            Some(holder_id) => Ok(self.holder(holder_id)?.container.has_child(name)),
            None => Ok(false),
        }
    }

    /// True when the document holds any child in memory
    pub fn has_children(&self, id: NodeId) -> TreeResult<bool> {
        match self.doc(id)?.children {
            Some(holder_id) => Ok(self.holder(holder_id)?.container.has_children()),
            None => Ok(false),
        }
    }

    /// Number of children present in memory
    pub fn child_count(&self, id: NodeId) -> TreeResult<usize> {
        match self.doc(id)?.children {
            Some(holder_id) => Ok(self.holder(holder_id)?.container.len()),
            None => Ok(0),
        }
    }

    /// Child names in canonical order
    pub fn child_names(&self, id: NodeId) -> TreeResult<Vec<String>> {
        match self.doc(id)?.children {
            Some(holder_id) => Ok(self.holder(holder_id)?.container.keys()),
            None => Ok(Vec::new()),
        }
    }

    /// Children in canonical order. Each call takes a fresh snapshot.
    pub fn children(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        match self.doc(id)?.children {
            Some(holder_id) => Ok(self
                .holder(holder_id)?
                .container
                .children()
                .copied()
                .collect()),
            None => Ok(Vec::new()),
        }
    }

    /// Look up a child already present in memory, or `None`.
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let holder_id = self.doc(id).ok()?.children?;
        self.holder(holder_id).ok()?.container.get(name).copied()
    }

    /// Look up a child by name, consulting the storage collaborator on a
    /// miss in a lazily-populated collection.
    ///
    /// The consult outcome is cached: a found child is materialized into
    /// the tree, an affirmed absence is remembered, and a collaborator
    /// failure propagates without caching anything.
    pub fn get_child(&mut self, id: NodeId, name: &str) -> TreeResult<NodeId> {
        if let Some(child) = self.child(id, name) {
            return Ok(child);
        }
        let doc = self.doc(id)?;
        if !doc.doc_type.is_container() {
            return Err(ContainerError::ChildNotFound(name.to_string()).into());
        }
        let parent_uuid = doc.uuid;
        let holder_id = self.ensure_holder(id)?;
        if self.holder(holder_id)?.container.lazy_state(name) != LazyState::Unknown {
            return Err(ContainerError::ChildNotFound(name.to_string()).into());
        }
        let lookup = match &self.source {
            Some(source) => {
                trace!(parent = %parent_uuid, child = name, "consulting store for lazy child");
                source.load(parent_uuid, name)?
            }
            None => return Err(ContainerError::ChildNotFound(name.to_string()).into()),
        };
        match lookup {
            Lookup::Found(record) => {
                let child = self.materialize(name, &record)?;
                let holder = self.holder_mut(holder_id)?;
                holder.container.insert(name, child)?;
                self.doc_mut(child)?.parent = Some(holder_id);
                Ok(child)
            }
            Lookup::Absent => {
                self.holder_mut(holder_id)?.container.mark_missing(name);
                Err(ContainerError::ChildNotFound(name.to_string()).into())
            }
        }
    }

    /// Add a new empty child of a registered type.
    ///
    /// The child's implementation class is resolved from its type's schema
    /// before anything is created; an unregistered type, schema or class
    /// fails fast. A taken name is rejected.
    pub fn add_child(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        type_name: &str,
    ) -> TreeResult<NodeId> {
        let name = name.into();
        let doc = self.doc(id)?;
        if !doc.doc_type.is_container() {
            return Err(TreeError::NotContainer(self.path(id)?));
        }
        let parent_uuid = doc.uuid;
        let holder_id = self.ensure_holder(id)?;
        if self.holder(holder_id)?.container.has_child(&name) {
            return Err(ContainerError::DuplicateChild(name).into());
        }

        let child = self.create_document(&name, type_name, None)?;
        self.holder_mut(holder_id)?
            .container
            .insert(name.as_str(), child)?;
        self.doc_mut(child)?.parent = Some(holder_id);
        debug!(parent = %parent_uuid, child = %name, doc_type = type_name, "added child");
        self.notify(parent_uuid);
        Ok(child)
    }

    /// Remove a child, severing its parent back-reference.
    ///
    /// The removed subtree stays in the arena as an orphan, eligible for
    /// [`Workspace::prune`] or storage-layer cleanup; the returned id lets
    /// the caller complete the detach.
    pub fn remove_child(&mut self, id: NodeId, name: &str) -> TreeResult<NodeId> {
        let holder_id = self
            .doc(id)?
            .children
            .ok_or_else(|| ContainerError::ChildNotFound(name.to_string()))?;
        let parent_uuid = self.doc(id)?.uuid;
        let child = self.holder_mut(holder_id)?.container.remove(name)?;
        self.doc_mut(child)?.parent = None;
        self.notify(parent_uuid);
        Ok(child)
    }

    /// Remove every child, orphaning their subtrees.
    pub fn clear_children(&mut self, id: NodeId) -> TreeResult<()> {
        let holder_id = match self.doc(id)?.children {
            Some(holder_id) => holder_id,
            None => return Ok(()),
        };
        let parent_uuid = self.doc(id)?.uuid;
        let children: Vec<NodeId> = self
            .holder(holder_id)?
            .container
            .children()
            .copied()
            .collect();
        self.holder_mut(holder_id)?.container.clear();
        for child in children {
            self.doc_mut(child)?.parent = None;
        }
        self.notify(parent_uuid);
        Ok(())
    }

    /// Reorder the children to the given permutation of their names.
    pub fn reorder_children(&mut self, id: NodeId, names: &[String]) -> TreeResult<()> {
        let parent_uuid = self.doc(id)?.uuid;
        let holder_id = self.ensure_holder(id)?;
        self.holder_mut(holder_id)?.container.reorder(names)?;
        self.notify(parent_uuid);
        Ok(())
    }

    /// Free a detached subtree from the arena.
    ///
    /// Only orphans can be pruned; ids into the subtree are invalid
    /// afterwards.
    pub fn prune(&mut self, id: NodeId) -> TreeResult<()> {
        // The root anchors the tree and is never an orphan.
        if self.doc(id)?.parent.is_some() || id == self.root {
            return Err(TreeError::NotDetached(self.path(id)?));
        }
        let mut pending = vec![id];
        while let Some(node_id) = pending.pop() {
            let node = self
                .nodes
                .get_mut(node_id.0)
                .and_then(Option::take)
                .ok_or(TreeError::NodeNotFound(node_id))?;
            self.free.push(node_id.0);
            match node {
                Node::Document(doc) => {
                    if let Some(holder_id) = doc.children {
                        pending.push(holder_id);
                    }
                }
                Node::Holder(holder) => {
                    pending.extend(holder.container.children().copied());
                }
            }
        }
        Ok(())
    }

    // ===== Internal =====

    fn create_document(
        &mut self,
        name: &str,
        type_name: &str,
        uuid: Option<Uuid>,
    ) -> TreeResult<NodeId> {
        let doc_type = self.types.get_type(type_name)?;
        let schema_name = doc_type.schema().name().to_string();
        // Fail fast when the bootstrap step missed the schema or class.
        self.schemas.get_schema(&schema_name)?;
        let class = self.schemas.get_class(&schema_name)?;

        let node = Node::Document(DocumentNode {
            name: name.to_string(),
            uuid: uuid.unwrap_or_else(Uuid::new_v4),
            doc_type,
            class,
            props: BTreeMap::new(),
            children: None,
            parent: None,
        });
        Ok(self.alloc(node))
    }

    fn materialize(&mut self, name: &str, record: &ChildRecord) -> TreeResult<NodeId> {
        debug!(child = name, doc_type = %record.type_name, "materialized lazy child");
        self.create_document(name, &record.type_name, Some(record.uuid))
    }

    fn ensure_holder(&mut self, id: NodeId) -> TreeResult<NodeId> {
        let doc = self.doc(id)?;
        if let Some(holder_id) = doc.children {
            return Ok(holder_id);
        }
        if !doc.doc_type.is_container() {
            return Err(TreeError::NotContainer(self.path(id)?));
        }
        let container = if doc.doc_type.is_ordered() {
            Container::ordered()
        } else if self.source.is_some() {
            Container::unordered_lazy()
        } else {
            Container::unordered()
        };
        let holder_id = self.alloc(Node::Holder(HolderNode {
            container,
            parent: id,
        }));
        self.doc_mut(id)?.children = Some(holder_id);
        Ok(holder_id)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn node(&self, id: NodeId) -> TreeResult<&Node> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn doc(&self, id: NodeId) -> TreeResult<&DocumentNode> {
        self.node(id)?
            .as_document()
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn doc_mut(&mut self, id: NodeId) -> TreeResult<&mut DocumentNode> {
        self.node_mut(id)?
            .as_document_mut()
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn holder(&self, id: NodeId) -> TreeResult<&HolderNode> {
        self.node(id)?
            .as_holder()
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn holder_mut(&mut self, id: NodeId) -> TreeResult<&mut HolderNode> {
        self.node_mut(id)?
            .as_holder_mut()
            .ok_or(TreeError::NodeNotFound(id))
    }

    fn notify(&self, uuid: Uuid) {
        if let Some(observer) = &self.observer {
            observer.changed(uuid);
        }
    }
}

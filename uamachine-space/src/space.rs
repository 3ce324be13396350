//! The address space: namespace table, node store and type catalog.
//!
//! Lookups here are pure. They answer "not found" with `None` and leave it to
//! the caller to decide whether that is fatal.

use crate::error::{SpaceError, SpaceResult};
use crate::ids;
use crate::node::{Node, ReferenceKind};
use crate::template::ObjectTypeTemplate;
use std::collections::HashMap;
use tracing::debug;
use uamachine_types::{Identifier, NodeId, QualifiedName};

/// Owns every node, namespace and registered object type.
#[derive(Debug)]
pub struct AddressSpace {
    namespaces: Vec<String>,
    nodes: HashMap<NodeId, Node>,
    templates: HashMap<NodeId, ObjectTypeTemplate>,
    /// Next candidate numeric identifier per namespace index.
    next_numeric: HashMap<u16, u32>,
}

impl AddressSpace {
    /// Creates an address space holding namespace 0 with the root, objects,
    /// types and views folders plus `BaseObjectType` and `FolderType`.
    pub fn new() -> Self {
        let mut space = Self {
            namespaces: vec![ids::UA_NAMESPACE_URI.to_string()],
            nodes: HashMap::new(),
            templates: HashMap::new(),
            next_numeric: HashMap::new(),
        };

        let folder = |id: NodeId, name: &str, parent: Option<NodeId>| {
            Node::object(
                id,
                QualifiedName::new(0, name),
                parent.map(|p| (p, ReferenceKind::Organizes)),
                ids::FOLDER_TYPE,
            )
        };
        space.link(folder(ids::ROOT_FOLDER, "Root", None));
        space.link(folder(ids::OBJECTS_FOLDER, "Objects", Some(ids::ROOT_FOLDER)));
        space.link(folder(ids::TYPES_FOLDER, "Types", Some(ids::ROOT_FOLDER)));
        space.link(folder(ids::VIEWS_FOLDER, "Views", Some(ids::ROOT_FOLDER)));
        space.link(folder(ids::OBJECT_TYPES_FOLDER, "ObjectTypes", Some(ids::TYPES_FOLDER)));

        let mut base = Node::object_type(
            ids::BASE_OBJECT_TYPE,
            QualifiedName::new(0, "BaseObjectType"),
            None,
        );
        base.parent = Some((ids::OBJECT_TYPES_FOLDER, ReferenceKind::Organizes));
        space.link(base);
        space.link(Node::object_type(
            ids::FOLDER_TYPE,
            QualifiedName::new(0, "FolderType"),
            Some(ids::BASE_OBJECT_TYPE),
        ));
        for (id, name) in [
            (ids::BASE_OBJECT_TYPE, "BaseObjectType"),
            (ids::FOLDER_TYPE, "FolderType"),
        ] {
            space.templates.insert(id.clone(), ObjectTypeTemplate::new(id, name));
        }
        space
    }

    // ── Namespaces ───────────────────────────────────────────────

    /// Namespace URIs in index order.
    pub fn namespace_uris(&self) -> &[String] {
        &self.namespaces
    }

    /// Resolves a namespace URI to its runtime index.
    pub fn namespace_index(&self, uri: &str) -> Option<u16> {
        self.namespaces
            .iter()
            .position(|u| u == uri)
            .and_then(|i| u16::try_from(i).ok())
    }

    pub fn namespace_uri(&self, index: u16) -> Option<&str> {
        self.namespaces.get(usize::from(index)).map(String::as_str)
    }

    /// Registers a namespace and returns its index. Registering a known URI
    /// returns the existing index.
    pub fn register_namespace(&mut self, uri: &str) -> SpaceResult<u16> {
        if let Some(index) = self.namespace_index(uri) {
            return Ok(index);
        }
        let index =
            u16::try_from(self.namespaces.len()).map_err(|_| SpaceError::NamespaceTableFull)?;
        self.namespaces.push(uri.to_string());
        debug!("Registered namespace {} as ns={}", uri, index);
        Ok(index)
    }

    // ── Lookup ───────────────────────────────────────────────────

    pub fn find_node(&self, node_id: &NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Looks up a node by namespace index and numeric identifier.
    pub fn find_numeric(&self, namespace: u16, id: u32) -> Option<&Node> {
        self.nodes.get(&NodeId::numeric(namespace, id))
    }

    /// Looks up a registered object type.
    pub fn find_object_type(&self, node_id: &NodeId) -> Option<&ObjectTypeTemplate> {
        self.templates.get(node_id)
    }

    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Number of nodes, including the namespace 0 skeleton.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Internal insertion ───────────────────────────────────────

    pub(crate) fn node_mut(&mut self, node_id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub(crate) fn insert_template(&mut self, template: ObjectTypeTemplate) {
        self.templates.insert(template.node_id.clone(), template);
    }

    /// Picks the node id for a new node: the explicit identifier if given,
    /// otherwise the next free numeric id in the namespace.
    pub(crate) fn assign_id(
        &mut self,
        namespace: u16,
        explicit: Option<Identifier>,
    ) -> SpaceResult<NodeId> {
        if self.namespace_uri(namespace).is_none() {
            return Err(SpaceError::UnknownNamespace(namespace));
        }
        if let Some(identifier) = explicit {
            let node_id = NodeId::new(namespace, identifier);
            if self.nodes.contains_key(&node_id) {
                return Err(SpaceError::NodeIdExists(node_id));
            }
            return Ok(node_id);
        }
        let next = self
            .next_numeric
            .entry(namespace)
            .or_insert(ids::FIRST_ALLOCATED_ID);
        loop {
            let candidate = NodeId::numeric(namespace, *next);
            *next = next.wrapping_add(1);
            if !self.nodes.contains_key(&candidate) {
                return Ok(candidate);
            }
        }
    }

    /// Validates and inserts a node, linking it into its parent's children.
    pub(crate) fn insert(&mut self, node: Node) -> SpaceResult<NodeId> {
        if self.nodes.contains_key(&node.node_id) {
            return Err(SpaceError::NodeIdExists(node.node_id));
        }
        if let Some((parent_id, _)) = &node.parent {
            let parent = self
                .nodes
                .get(parent_id)
                .ok_or_else(|| SpaceError::ParentNotFound(parent_id.clone()))?;
            let taken = parent.children.iter().any(|c| {
                self.nodes
                    .get(c)
                    .is_some_and(|n| n.browse_name.name == node.browse_name.name)
            });
            if taken {
                return Err(SpaceError::DuplicateBrowseName {
                    parent: parent_id.clone(),
                    name: node.browse_name.name.clone(),
                });
            }
        }
        Ok(self.link(node))
    }

    /// Removes `node_id` and everything below it, unlinking it from its
    /// parent. Returns the number of nodes removed.
    pub(crate) fn remove_subtree(&mut self, node_id: &NodeId) -> usize {
        let Some(node) = self.nodes.remove(node_id) else {
            return 0;
        };
        if let Some((parent_id, _)) = &node.parent {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.retain(|c| c != node_id);
            }
        }
        let mut removed = 1;
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(child) = self.nodes.remove(&child) {
                removed += 1;
                pending.extend(child.children);
            }
        }
        removed
    }

    /// Inserts without validation. Callers guarantee the parent exists.
    fn link(&mut self, node: Node) -> NodeId {
        let node_id = node.node_id.clone();
        if let Some((parent_id, _)) = &node.parent {
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.children.push(node_id.clone());
            }
        }
        self.nodes.insert(node_id.clone(), node);
        node_id
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

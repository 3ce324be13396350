use crate::value::ValueSource;
use uamachine_types::{DataType, LocalizedText, NodeId, QualifiedName};

/// Class of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Object,
    Variable,
    ObjectType,
}

/// Kind of the reference from a node's parent to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Organizes,
    HasComponent,
    HasProperty,
    HasSubtype,
}

/// Attributes carried only by variables.
#[derive(Debug)]
pub struct VariableAttributes {
    pub data_type: DataType,
    pub source: ValueSource,
}

/// An addressable entity in the address space.
///
/// Every node except the root has exactly one parent reference; the graph
/// built by this crate is a tree.
#[derive(Debug)]
pub struct Node {
    pub(crate) node_id: NodeId,
    pub(crate) class: NodeClass,
    pub(crate) browse_name: QualifiedName,
    pub(crate) display_name: LocalizedText,
    pub(crate) parent: Option<(NodeId, ReferenceKind)>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) type_definition: Option<NodeId>,
    pub(crate) variable: Option<VariableAttributes>,
}

impl Node {
    pub(crate) fn object(
        node_id: NodeId,
        browse_name: QualifiedName,
        parent: Option<(NodeId, ReferenceKind)>,
        type_definition: NodeId,
    ) -> Self {
        Self::new(node_id, NodeClass::Object, browse_name, parent, Some(type_definition), None)
    }

    pub(crate) fn object_type(
        node_id: NodeId,
        browse_name: QualifiedName,
        supertype: Option<NodeId>,
    ) -> Self {
        let parent = supertype.map(|s| (s, ReferenceKind::HasSubtype));
        Self::new(node_id, NodeClass::ObjectType, browse_name, parent, None, None)
    }

    pub(crate) fn new_variable(
        node_id: NodeId,
        browse_name: QualifiedName,
        parent: (NodeId, ReferenceKind),
        data_type: DataType,
        source: ValueSource,
    ) -> Self {
        Self::new(
            node_id,
            NodeClass::Variable,
            browse_name,
            Some(parent),
            None,
            Some(VariableAttributes { data_type, source }),
        )
    }

    fn new(
        node_id: NodeId,
        class: NodeClass,
        browse_name: QualifiedName,
        parent: Option<(NodeId, ReferenceKind)>,
        type_definition: Option<NodeId>,
        variable: Option<VariableAttributes>,
    ) -> Self {
        let display_name = LocalizedText::plain(browse_name.name.clone());
        Self {
            node_id,
            class,
            browse_name,
            display_name,
            parent,
            children: Vec::new(),
            type_definition,
            variable,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn class(&self) -> NodeClass {
        self.class
    }

    pub fn browse_name(&self) -> &QualifiedName {
        &self.browse_name
    }

    pub fn display_name(&self) -> &LocalizedText {
        &self.display_name
    }

    /// Parent node and the reference kind linking it to this node.
    pub fn parent(&self) -> Option<(&NodeId, ReferenceKind)> {
        self.parent.as_ref().map(|(id, kind)| (id, *kind))
    }

    /// Direct children in creation order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn type_definition(&self) -> Option<&NodeId> {
        self.type_definition.as_ref()
    }

    pub fn variable(&self) -> Option<&VariableAttributes> {
        self.variable.as_ref()
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.variable.as_ref().map(|v| v.data_type)
    }

    pub fn is_variable(&self) -> bool {
        self.class == NodeClass::Variable
    }
}

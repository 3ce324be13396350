//! Object type templates.
//!
//! A template lists the children every instance gets (mandatory) and the ones
//! it gets only on request (optional). Instantiation lives in the builder.

use uamachine_types::{DataType, NodeId, QualifiedName, Variant};

/// Whether a declared child is always instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModellingRule {
    Mandatory,
    Optional,
}

/// What a declared child turns into when instantiated.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildKind {
    /// A variable with a static default value.
    Variable {
        data_type: DataType,
        default: Variant,
        /// Linked with `HasProperty` instead of `HasComponent`.
        property: bool,
    },
    /// A nested object, itself instantiated from `type_definition` when set.
    Object { type_definition: Option<NodeId> },
}

/// One child declaration of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildDecl {
    pub browse_name: QualifiedName,
    pub rule: ModellingRule,
    pub kind: ChildKind,
}

impl ChildDecl {
    pub fn is_mandatory(&self) -> bool {
        self.rule == ModellingRule::Mandatory
    }
}

/// A registered object type and the children its instances carry.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeTemplate {
    pub node_id: NodeId,
    pub browse_name: QualifiedName,
    pub children: Vec<ChildDecl>,
}

impl ObjectTypeTemplate {
    /// Creates a template without children. The browse name is qualified by
    /// the namespace of `node_id`.
    pub fn new(node_id: NodeId, name: &str) -> Self {
        let browse_name = QualifiedName::new(node_id.namespace(), name);
        Self {
            node_id,
            browse_name,
            children: Vec::new(),
        }
    }

    fn child(mut self, name: &str, rule: ModellingRule, kind: ChildKind) -> Self {
        self.children.push(ChildDecl {
            browse_name: QualifiedName::new(self.node_id.namespace(), name),
            rule,
            kind,
        });
        self
    }

    /// Declares a mandatory property with an empty default value.
    pub fn mandatory_property(self, name: &str, data_type: DataType) -> Self {
        self.child(name, ModellingRule::Mandatory, property(data_type))
    }

    /// Declares an optional property with an empty default value.
    pub fn optional_property(self, name: &str, data_type: DataType) -> Self {
        self.child(name, ModellingRule::Optional, property(data_type))
    }

    /// Declares a mandatory component variable with a default value.
    pub fn mandatory_variable(self, name: &str, data_type: DataType, default: Variant) -> Self {
        let kind = ChildKind::Variable {
            data_type,
            default,
            property: false,
        };
        self.child(name, ModellingRule::Mandatory, kind)
    }

    pub fn mandatory_object(self, name: &str, type_definition: Option<NodeId>) -> Self {
        self.child(name, ModellingRule::Mandatory, ChildKind::Object { type_definition })
    }

    pub fn optional_object(self, name: &str, type_definition: Option<NodeId>) -> Self {
        self.child(name, ModellingRule::Optional, ChildKind::Object { type_definition })
    }

    /// Looks up a child declaration by browse name.
    pub fn declaration(&self, name: &str) -> Option<&ChildDecl> {
        self.children.iter().find(|c| c.browse_name.name == name)
    }

    pub fn mandatory_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|c| c.is_mandatory())
            .map(|c| c.browse_name.name.as_str())
    }

    pub fn optional_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter(|c| !c.is_mandatory())
            .map(|c| c.browse_name.name.as_str())
    }
}

fn property(data_type: DataType) -> ChildKind {
    ChildKind::Variable {
        data_type,
        default: Variant::Empty,
        property: true,
    }
}

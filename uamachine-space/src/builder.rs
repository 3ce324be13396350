//! Node graph construction: objects, variables, type instantiation and
//! static value assignment.
//!
//! Building is top-down. Every operation requires its parent to exist
//! already and fails with [`SpaceError::ParentNotFound`] otherwise, so no
//! orphan can be created.

use crate::error::{SpaceError, SpaceResult};
use crate::ids;
use crate::node::{Node, NodeClass, ReferenceKind};
use crate::space::AddressSpace;
use crate::template::{ChildKind, ObjectTypeTemplate};
use crate::value::ValueSource;
use tracing::{debug, warn};
use uamachine_types::{DataType, Identifier, NodeId, QualifiedName, Variant};

/// Instantiation nesting limit, guarding against self-referencing types.
const MAX_INSTANCE_DEPTH: usize = 16;

/// Parameters for [`AddressSpace::add_object`].
#[derive(Debug, Clone)]
pub struct ObjectSpec {
    pub namespace: u16,
    pub browse_name: String,
    pub organized_by: NodeId,
    pub node_id: Option<Identifier>,
    pub type_definition: Option<NodeId>,
}

impl ObjectSpec {
    pub fn new(namespace: u16, browse_name: impl Into<String>, organized_by: NodeId) -> Self {
        Self {
            namespace,
            browse_name: browse_name.into(),
            organized_by,
            node_id: None,
            type_definition: None,
        }
    }

    #[must_use]
    pub fn with_node_id(mut self, id: Identifier) -> Self {
        self.node_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_type_definition(mut self, type_id: NodeId) -> Self {
        self.type_definition = Some(type_id);
        self
    }
}

/// Parameters for [`AddressSpace::instantiate`].
#[derive(Debug, Clone)]
pub struct InstantiateSpec {
    pub namespace: u16,
    pub browse_name: String,
    pub organized_by: NodeId,
    pub node_id: Option<Identifier>,
    /// Browse names of the optional children to materialize.
    pub optionals: Vec<String>,
}

impl InstantiateSpec {
    pub fn new(namespace: u16, browse_name: impl Into<String>, organized_by: NodeId) -> Self {
        Self {
            namespace,
            browse_name: browse_name.into(),
            organized_by,
            node_id: None,
            optionals: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_optionals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optionals = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_node_id(mut self, id: Identifier) -> Self {
        self.node_id = Some(id);
        self
    }
}

/// Parameters for [`AddressSpace::add_variable`].
#[derive(Debug)]
pub struct VariableSpec {
    pub namespace: u16,
    pub browse_name: String,
    pub component_of: NodeId,
    pub data_type: DataType,
    pub node_id: Option<Identifier>,
    pub source: ValueSource,
}

impl VariableSpec {
    pub fn new(
        namespace: u16,
        browse_name: impl Into<String>,
        component_of: NodeId,
        data_type: DataType,
    ) -> Self {
        Self {
            namespace,
            browse_name: browse_name.into(),
            component_of,
            data_type,
            node_id: None,
            source: ValueSource::default(),
        }
    }

    #[must_use]
    pub fn with_node_id(mut self, id: Identifier) -> Self {
        self.node_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: ValueSource) -> Self {
        self.source = source;
        self
    }
}

impl AddressSpace {
    /// Registers an object type under `supertype` so it can be instantiated.
    pub fn add_object_type(
        &mut self,
        template: ObjectTypeTemplate,
        supertype: &NodeId,
    ) -> SpaceResult<NodeId> {
        if self.find_object_type(supertype).is_none() {
            return Err(SpaceError::NotAnObjectType(supertype.clone()));
        }
        for (i, child) in template.children.iter().enumerate() {
            let name = &child.browse_name.name;
            if template.children[..i].iter().any(|c| &c.browse_name.name == name) {
                return Err(SpaceError::DuplicateBrowseName {
                    parent: template.node_id.clone(),
                    name: name.clone(),
                });
            }
            // Nested types must already be registered, or be this type itself.
            if let ChildKind::Object {
                type_definition: Some(nested),
            } = &child.kind
            {
                if nested != &template.node_id && self.find_object_type(nested).is_none() {
                    return Err(SpaceError::NotAnObjectType(nested.clone()));
                }
            }
        }
        let node = Node::object_type(
            template.node_id.clone(),
            template.browse_name.clone(),
            Some(supertype.clone()),
        );
        let node_id = self.insert(node)?;
        debug!("Registered object type {} ({})", template.browse_name, node_id);
        self.insert_template(template);
        Ok(node_id)
    }

    /// Creates a bare object organized by `spec.organized_by`.
    pub fn add_object(&mut self, spec: ObjectSpec) -> SpaceResult<NodeId> {
        if !self.contains(&spec.organized_by) {
            return Err(SpaceError::ParentNotFound(spec.organized_by));
        }
        let type_definition = spec.type_definition.unwrap_or(ids::BASE_OBJECT_TYPE);
        if self.find_object_type(&type_definition).is_none() {
            return Err(SpaceError::NotAnObjectType(type_definition));
        }
        let node_id = self.assign_id(spec.namespace, spec.node_id)?;
        let node = Node::object(
            node_id,
            QualifiedName::new(spec.namespace, spec.browse_name),
            Some((spec.organized_by, ReferenceKind::Organizes)),
            type_definition,
        );
        let node_id = self.insert(node)?;
        debug!("Added object {}", node_id);
        Ok(node_id)
    }

    /// Creates a variable as a component of `spec.component_of`.
    ///
    /// A static source must match the declared data type. Bound sources are
    /// checked on every read instead.
    pub fn add_variable(&mut self, spec: VariableSpec) -> SpaceResult<NodeId> {
        if !self.contains(&spec.component_of) {
            return Err(SpaceError::ParentNotFound(spec.component_of));
        }
        let node_id = self.assign_id(spec.namespace, spec.node_id)?;
        if let ValueSource::Static(value) = &spec.source {
            if !value.fits(spec.data_type) {
                return Err(SpaceError::TypeMismatch {
                    node_id,
                    expected: spec.data_type,
                    actual: value.data_type(),
                });
            }
        }
        let bound = spec.source.is_bound();
        let node = Node::new_variable(
            node_id,
            QualifiedName::new(spec.namespace, spec.browse_name),
            (spec.component_of, ReferenceKind::HasComponent),
            spec.data_type,
            spec.source,
        );
        let node_id = self.insert(node)?;
        debug!("Added variable {} (bound: {})", node_id, bound);
        Ok(node_id)
    }

    /// Instantiates object type `type_id` under `spec.organized_by`.
    ///
    /// The new object gets every mandatory child of the type plus exactly the
    /// optional children named in `spec.optionals`. Naming a child the type
    /// does not declare is an error; naming a mandatory child is a no-op.
    pub fn instantiate(&mut self, type_id: &NodeId, spec: InstantiateSpec) -> SpaceResult<NodeId> {
        let template = self
            .find_object_type(type_id)
            .ok_or_else(|| SpaceError::NotAnObjectType(type_id.clone()))?;
        if let Some(unknown) = spec
            .optionals
            .iter()
            .find(|name| template.declaration(name).is_none())
        {
            return Err(SpaceError::UnknownOptional {
                type_id: type_id.clone(),
                name: unknown.clone(),
            });
        }
        if !self.contains(&spec.organized_by) {
            return Err(SpaceError::ParentNotFound(spec.organized_by));
        }

        let mut created = None;
        let result = self.instantiate_under(
            type_id,
            spec.namespace,
            QualifiedName::new(spec.namespace, spec.browse_name),
            (spec.organized_by, ReferenceKind::Organizes),
            spec.node_id,
            &spec.optionals,
            0,
            &mut created,
        );
        match result {
            Ok(node_id) => {
                debug!("Instantiated {} as {}", type_id, node_id);
                Ok(node_id)
            }
            Err(e) => {
                // A failed instance never stays half-built.
                if let Some(root) = created {
                    let removed = self.remove_subtree(&root);
                    warn!("Instantiating {} failed ({}); removed {} nodes", type_id, e, removed);
                }
                Err(e)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn instantiate_under(
        &mut self,
        type_id: &NodeId,
        namespace: u16,
        browse_name: QualifiedName,
        parent: (NodeId, ReferenceKind),
        explicit_id: Option<Identifier>,
        optionals: &[String],
        depth: usize,
        created: &mut Option<NodeId>,
    ) -> SpaceResult<NodeId> {
        if depth >= MAX_INSTANCE_DEPTH {
            return Err(SpaceError::InstanceTooDeep(MAX_INSTANCE_DEPTH));
        }
        let template = self
            .find_object_type(type_id)
            .cloned()
            .ok_or_else(|| SpaceError::NotAnObjectType(type_id.clone()))?;

        let node_id = self.assign_id(namespace, explicit_id)?;
        let object = self.insert(Node::object(
            node_id,
            browse_name,
            Some(parent),
            type_id.clone(),
        ))?;
        created.get_or_insert_with(|| object.clone());

        let wanted = template
            .children
            .into_iter()
            .filter(|c| c.is_mandatory() || optionals.contains(&c.browse_name.name));
        for child in wanted {
            match child.kind {
                ChildKind::Variable {
                    data_type,
                    default,
                    property,
                } => {
                    let reference = if property {
                        ReferenceKind::HasProperty
                    } else {
                        ReferenceKind::HasComponent
                    };
                    let child_id = self.assign_id(namespace, None)?;
                    self.insert(Node::new_variable(
                        child_id,
                        child.browse_name,
                        (object.clone(), reference),
                        data_type,
                        ValueSource::Static(default),
                    ))?;
                }
                ChildKind::Object {
                    type_definition: Some(nested),
                } => {
                    self.instantiate_under(
                        &nested,
                        namespace,
                        child.browse_name,
                        (object.clone(), ReferenceKind::HasComponent),
                        None,
                        &[],
                        depth + 1,
                        created,
                    )?;
                }
                ChildKind::Object {
                    type_definition: None,
                } => {
                    let child_id = self.assign_id(namespace, None)?;
                    self.insert(Node::object(
                        child_id,
                        child.browse_name,
                        Some((object.clone(), ReferenceKind::HasComponent)),
                        ids::BASE_OBJECT_TYPE,
                    ))?;
                }
            }
        }
        Ok(object)
    }

    /// Finds a direct child of `node_id` by browse name. A missing child is
    /// `None`, not an error; optional children may legitimately be absent.
    pub fn child_by_name(&self, node_id: &NodeId, name: &str) -> Option<NodeId> {
        self.child_node(node_id, name).map(|n| n.node_id.clone())
    }

    /// Like [`Self::child_by_name`] but returns the node itself.
    pub fn child_node(&self, node_id: &NodeId, name: &str) -> Option<&Node> {
        self.find_node(node_id)?
            .children
            .iter()
            .filter_map(|c| self.find_node(c))
            .find(|n| n.browse_name.name == name)
    }

    /// Overwrites the static value of a variable.
    ///
    /// Fails for non-variables, for variables bound to a live accessor and
    /// for values whose type differs from the declared data type.
    pub fn set_value_from_source(&mut self, node_id: &NodeId, value: Variant) -> SpaceResult<()> {
        let node = self
            .node_mut(node_id)
            .ok_or_else(|| SpaceError::NodeNotFound(node_id.clone()))?;
        if node.class != NodeClass::Variable {
            return Err(SpaceError::NotAVariable(node_id.clone()));
        }
        let attrs = node
            .variable
            .as_mut()
            .ok_or_else(|| SpaceError::NotAVariable(node_id.clone()))?;
        if attrs.source.is_bound() {
            return Err(SpaceError::BoundValue(node_id.clone()));
        }
        if !value.fits(attrs.data_type) {
            return Err(SpaceError::TypeMismatch {
                node_id: node_id.clone(),
                expected: attrs.data_type,
                actual: value.data_type(),
            });
        }
        debug!("Set {} = {}", node_id, value);
        attrs.source = ValueSource::Static(value);
        Ok(())
    }
}

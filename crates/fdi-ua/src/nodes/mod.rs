// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed node states over a generic address-space node.
//!
//! # Architecture
//!
//! ```text
//! NodeState (closed enum)
//!   Object / Variable / Method            generic kinds
//!   Protocol, Device                      DI object types
//!   ServerCommunicationDevice             FDI7, wraps Device
//!   ServerCommunicationFfH1Device         FDI7, wraps ServerCommunicationDevice
//! ```
//!
//! Every state owns a [`BaseNode`] (ids, names, type definition and the
//! children that have no typed accessor). Subtypes wrap their parent type by
//! composition and bind extra children to typed `Option` fields, looked up by
//! browse name through [`HasChildren::find_child`].
//!
//! Typed object states carry an initialization string, the base64 form of a
//! binary [`NodeSnapshot`](crate::model::NodeSnapshot), applied once by
//! `initialize`.

mod context;
mod factory;
mod method;
mod object;
mod variable;

pub use context::SystemContext;
pub use factory::{NodeConstructor, NodeStateFactory};
pub use method::{
    argument_at, MethodArguments, MethodContext, MethodHandler, MethodState, TypedMethodState,
};
pub use object::ObjectState;
pub use variable::VariableState;

pub use crate::model::NodeClass;

use crate::error::{Error, Result};
use crate::model::{
    DeviceState, NodeDeclaration, NodeSnapshot, ProtocolState, ServerCommunicationDeviceState,
    ServerCommunicationFfH1DeviceState,
};
use crate::types::{ExpandedNodeId, LocalizedText, NamespaceTable, NodeId, QualifiedName};
use std::any::Any;
use std::fmt;

/// Well-known type definitions of namespace 0.
pub mod ua_types {
    use super::TypeDefinition;
    use crate::config::UA_NAMESPACE;

    pub const BASE_OBJECT_TYPE: TypeDefinition = TypeDefinition::new(UA_NAMESPACE, 58);
    pub const BASE_DATA_VARIABLE_TYPE: TypeDefinition = TypeDefinition::new(UA_NAMESPACE, 63);
    pub const PROPERTY_TYPE: TypeDefinition = TypeDefinition::new(UA_NAMESPACE, 68);
}

/// Constant identity of a type node, qualified by namespace URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDefinition {
    pub namespace_uri: &'static str,
    pub id: u32,
}

impl TypeDefinition {
    pub const fn new(namespace_uri: &'static str, id: u32) -> Self {
        Self { namespace_uri, id }
    }

    pub fn node_id(&self, namespaces: &NamespaceTable) -> Result<NodeId> {
        Ok(NodeId::numeric(namespaces.require(self.namespace_uri)?, self.id))
    }

    pub fn expanded(&self) -> ExpandedNodeId {
        ExpandedNodeId::with_namespace_uri(self.namespace_uri, self.id)
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nsu={};i={}", self.namespace_uri, self.id)
    }
}

// ============================================================================
// Base node
// ============================================================================

/// Attributes shared by every node, plus its untyped children.
#[derive(Debug, Clone, Default)]
pub struct BaseNode {
    pub node_id: NodeId,
    pub browse_name: QualifiedName,
    pub display_name: LocalizedText,
    pub description: LocalizedText,
    pub type_definition: NodeId,
    /// Children without a typed accessor, in insertion order.
    pub children: Vec<NodeState>,
    initialized: bool,
}

impl BaseNode {
    /// Node with `browse_name`, displayed under the same text.
    pub fn new(browse_name: QualifiedName) -> Self {
        Self {
            display_name: LocalizedText::text(browse_name.name.clone()),
            browse_name,
            ..Self::default()
        }
    }

    pub fn with_node_id(mut self, node_id: NodeId) -> Self {
        self.node_id = node_id;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn child(&self, browse_name: &QualifiedName) -> Option<&NodeState> {
        self.children
            .iter()
            .find(|child| child.base().browse_name == *browse_name)
    }

    /// Add an untyped child; a child with the same browse name is replaced.
    pub fn add_child(&mut self, child: NodeState) {
        let name = child.base().browse_name.clone();
        match self
            .children
            .iter_mut()
            .find(|existing| existing.base().browse_name == name)
        {
            Some(existing) => *existing = child,
            None => self.children.push(child),
        }
    }

    pub fn remove_child(&mut self, browse_name: &QualifiedName) -> Option<NodeState> {
        let index = self
            .children
            .iter()
            .position(|child| child.base().browse_name == *browse_name)?;
        Some(self.children.remove(index))
    }

    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        children.extend(self.children.iter().map(NodeState::as_instance));
    }

    fn find_child(&mut self, browse_name: &QualifiedName) -> Option<&mut dyn InstanceNode> {
        self.children
            .iter_mut()
            .find(|child| child.base().browse_name == *browse_name)
            .map(NodeState::as_instance_mut)
    }
}

// ============================================================================
// Capability traits
// ============================================================================

/// A node instance in the address space.
pub trait InstanceNode: HasChildren + Any + Send + Sync + fmt::Debug {
    fn base(&self) -> &BaseNode;
    fn base_mut(&mut self) -> &mut BaseNode;
    fn node_class(&self) -> NodeClass;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Child enumeration and lookup by browse name.
pub trait HasChildren {
    /// Append every present child: untyped children first, then typed
    /// children of the base type, then those of the subtype, each in declared
    /// order. Entries already in `children` are kept.
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>);

    /// Resolve `browse_name` to a child.
    ///
    /// A typed child that is absent is created as a placeholder when
    /// `create_or_replace` is set. Names with no typed binding fall back to
    /// the untyped children.
    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode>;
}

/// Lookup for a typed child slot.
pub(crate) fn bind_child<T, F>(
    slot: &mut Option<T>,
    create_or_replace: bool,
    create: F,
) -> Option<&mut dyn InstanceNode>
where
    T: InstanceNode,
    F: FnOnce() -> T,
{
    if slot.is_none() && create_or_replace {
        *slot = Some(create());
    }
    slot.as_mut().map(|child| child as &mut dyn InstanceNode)
}

/// Append a typed child slot if present.
pub(crate) fn push_child<'a, T: InstanceNode>(
    slot: &'a Option<T>,
    children: &mut Vec<&'a dyn InstanceNode>,
) {
    if let Some(child) = slot {
        children.push(child);
    }
}

/// Implements [`InstanceNode`] for a state owning its `base` field, or for a
/// subtype state delegating to the parent state at `$($path).+`.
macro_rules! impl_instance_node {
    (@impl $type:ty, $class:expr, |$r:ident| $get:expr, |$m:ident| $get_mut:expr) => {
        impl $crate::nodes::InstanceNode for $type {
            fn base(&self) -> &$crate::nodes::BaseNode {
                let $r = self;
                $get
            }

            fn base_mut(&mut self) -> &mut $crate::nodes::BaseNode {
                let $m = self;
                $get_mut
            }

            fn node_class(&self) -> $crate::nodes::NodeClass {
                $class
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
    ($type:ty, $class:expr) => {
        $crate::nodes::impl_instance_node!(@impl $type, $class, |node| &node.base, |node| &mut node.base);
    };
    ($type:ty, $class:expr, $($path:ident).+) => {
        $crate::nodes::impl_instance_node!(
            @impl $type,
            $class,
            |node| $crate::nodes::InstanceNode::base(&node.$($path).+),
            |node| $crate::nodes::InstanceNode::base_mut(&mut node.$($path).+)
        );
    };
}
pub(crate) use impl_instance_node;

// ============================================================================
// Initialization
// ============================================================================

/// Apply `initialization_string` to `node` once.
pub(crate) fn initialize_node(
    node: &mut dyn InstanceNode,
    context: &SystemContext,
    initialization_string: &str,
) -> Result<()> {
    if node.base().is_initialized() {
        log::debug!(
            "[nodes] {} already initialized, skipping",
            node.base().browse_name
        );
        return Ok(());
    }

    let snapshot = NodeSnapshot::from_initialization_string(initialization_string)?;
    for uri in &snapshot.namespace_uris {
        context.register_namespace(uri);
    }
    let mapping = snapshot.namespace_mapping(&context.namespaces())?;

    {
        let base = node.base_mut();
        base.type_definition = mapping.node_id(&snapshot.type_definition)?;
        if base.browse_name.is_null() {
            base.browse_name = mapping.qualified_name(&snapshot.browse_name)?;
        }
        if base.display_name.is_null() {
            base.display_name = LocalizedText::text(base.browse_name.name.clone());
        }
    }

    declare_children(node, context, &mapping, &snapshot.children)?;
    node.base_mut().initialized = true;
    log::debug!(
        "[nodes] initialized {} ({}) with {} declared children",
        node.base().browse_name,
        node.base().type_definition,
        snapshot.children.len()
    );
    Ok(())
}

fn declare_children(
    node: &mut dyn InstanceNode,
    context: &SystemContext,
    mapping: &crate::model::NamespaceMapping,
    declarations: &[NodeDeclaration],
) -> Result<()> {
    for declaration in declarations {
        let browse_name = mapping.qualified_name(&declaration.browse_name)?;
        let type_definition = mapping.node_id(&declaration.type_definition)?;
        let parent_id = node.base().node_id.clone();

        if node.find_child(context, &browse_name, true).is_none() {
            let base = BaseNode::new(browse_name.clone());
            node.base_mut()
                .add_child(NodeState::declared(declaration.node_class, base));
        }
        let child = node
            .find_child(context, &browse_name, false)
            .ok_or_else(|| {
                Error::InvalidState(format!("declared child {browse_name} could not be bound"))
            })?;

        {
            let base = child.base_mut();
            base.node_id = context.child_node_id(&parent_id, &browse_name);
            base.browse_name = browse_name.clone();
            if base.display_name.is_null() {
                base.display_name = LocalizedText::text(browse_name.name.clone());
            }
            base.type_definition = type_definition;
        }
        if let Some(variable) = child.as_any_mut().downcast_mut::<VariableState>() {
            variable.data_type = mapping.node_id(&declaration.data_type)?;
            variable.value_rank = declaration.value_rank;
        }
        log::trace!("[nodes] declared {} under {}", browse_name, parent_id);

        declare_children(child, context, mapping, &declaration.children)?;
    }
    Ok(())
}

// ============================================================================
// NodeState
// ============================================================================

/// Closed set of node kinds.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum NodeState {
    Object(ObjectState),
    Variable(VariableState),
    Method(MethodState),
    Protocol(ProtocolState),
    Device(DeviceState),
    ServerCommunicationDevice(ServerCommunicationDeviceState),
    ServerCommunicationFfH1Device(ServerCommunicationFfH1DeviceState),
}

impl NodeState {
    /// Generic node of `node_class`, as created for declared children with
    /// no typed binding.
    pub fn declared(node_class: NodeClass, base: BaseNode) -> Self {
        match node_class {
            NodeClass::Variable => NodeState::Variable(VariableState::new(base)),
            NodeClass::Method => NodeState::Method(MethodState::new(base)),
            _ => NodeState::Object(ObjectState::new(base)),
        }
    }

    pub fn as_instance(&self) -> &dyn InstanceNode {
        match self {
            NodeState::Object(node) => node,
            NodeState::Variable(node) => node,
            NodeState::Method(node) => node,
            NodeState::Protocol(node) => node,
            NodeState::Device(node) => node,
            NodeState::ServerCommunicationDevice(node) => node,
            NodeState::ServerCommunicationFfH1Device(node) => node,
        }
    }

    pub fn as_instance_mut(&mut self) -> &mut dyn InstanceNode {
        match self {
            NodeState::Object(node) => node,
            NodeState::Variable(node) => node,
            NodeState::Method(node) => node,
            NodeState::Protocol(node) => node,
            NodeState::Device(node) => node,
            NodeState::ServerCommunicationDevice(node) => node,
            NodeState::ServerCommunicationFfH1Device(node) => node,
        }
    }

    pub fn base(&self) -> &BaseNode {
        self.as_instance().base()
    }

    pub fn base_mut(&mut self) -> &mut BaseNode {
        self.as_instance_mut().base_mut()
    }

    pub fn node_class(&self) -> NodeClass {
        self.as_instance().node_class()
    }

    /// Apply the type's initialization string; generic kinds have none.
    pub fn initialize(&mut self, context: &SystemContext) -> Result<()> {
        match self {
            NodeState::Object(_) | NodeState::Variable(_) | NodeState::Method(_) => Ok(()),
            NodeState::Protocol(node) => node.initialize(context),
            NodeState::Device(node) => node.initialize(context),
            NodeState::ServerCommunicationDevice(node) => node.initialize(context),
            NodeState::ServerCommunicationFfH1Device(node) => node.initialize(context),
        }
    }

    pub fn downcast_ref<T: InstanceNode>(&self) -> Option<&T> {
        self.as_instance().as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: InstanceNode>(&mut self) -> Option<&mut T> {
        self.as_instance_mut().as_any_mut().downcast_mut::<T>()
    }
}

impl HasChildren for NodeState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.as_instance().get_children(children);
    }

    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        self.as_instance_mut()
            .find_child(context, browse_name, create_or_replace)
    }
}

macro_rules! impl_from_state {
    ($($variant:ident($type:ty)),* $(,)?) => {
        $(
            impl From<$type> for NodeState {
                fn from(node: $type) -> Self {
                    NodeState::$variant(node)
                }
            }
        )*
    };
}

impl_from_state!(
    Object(ObjectState),
    Variable(VariableState),
    Method(MethodState),
    Protocol(ProtocolState),
    Device(DeviceState),
    ServerCommunicationDevice(ServerCommunicationDeviceState),
    ServerCommunicationFfH1Device(ServerCommunicationFfH1DeviceState),
);

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> BaseNode {
        BaseNode::new(QualifiedName::new(1, name))
    }

    #[test]
    fn test_add_child_replaces_same_name() {
        let mut base = named("Parent");
        base.add_child(NodeState::Object(ObjectState::new(named("A"))));
        base.add_child(NodeState::Variable(VariableState::new(named("B"))));
        base.add_child(NodeState::Variable(VariableState::new(named("A"))));
        assert_eq!(base.children.len(), 2);
        assert_eq!(
            base.child(&QualifiedName::new(1, "A")).map(NodeState::node_class),
            Some(NodeClass::Variable)
        );
        assert!(base.remove_child(&QualifiedName::new(1, "B")).is_some());
        assert!(base.child(&QualifiedName::new(1, "B")).is_none());
    }

    #[test]
    fn test_generic_get_children_is_additive() {
        let context = SystemContext::new();
        let mut object = ObjectState::new(named("Parent"));
        object
            .base_mut()
            .add_child(NodeState::Object(ObjectState::new(named("A"))));
        object
            .base_mut()
            .add_child(NodeState::Method(MethodState::new(named("M"))));

        let sentinel = ObjectState::new(named("Sentinel"));
        let mut children: Vec<&dyn InstanceNode> = vec![&sentinel];
        object.get_children(&mut children);
        let names: Vec<_> = children
            .iter()
            .map(|c| c.base().browse_name.name.as_str())
            .collect();
        assert_eq!(names, ["Sentinel", "A", "M"]);

        assert!(object
            .find_child(&context, &QualifiedName::new(1, "M"), false)
            .is_some());
        assert!(object
            .find_child(&context, &QualifiedName::new(1, "Unknown"), true)
            .is_none());
    }

    #[test]
    fn test_declared_kinds() {
        let variable = NodeState::declared(NodeClass::Variable, named("V"));
        assert!(variable.downcast_ref::<VariableState>().is_some());
        let method = NodeState::declared(NodeClass::Method, named("M"));
        assert_eq!(method.node_class(), NodeClass::Method);
        let object = NodeState::declared(NodeClass::Object, named("O"));
        assert_eq!(object.node_class(), NodeClass::Object);
    }

    #[test]
    fn test_type_definition_resolution() {
        let context = SystemContext::new();
        let id = ua_types::PROPERTY_TYPE
            .node_id(&context.namespaces())
            .expect("UA namespace");
        assert_eq!(id, NodeId::numeric(0, 68));
        assert!(TypeDefinition::new("urn:missing", 1)
            .node_id(&context.namespaces())
            .is_err());
    }
}

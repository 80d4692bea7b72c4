// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry of typed node states keyed by type definition.

use super::{BaseNode, NodeState, SystemContext, TypeDefinition};
use crate::error::Result;
use crate::types::NodeId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// Builds a typed state around `base`.
pub type NodeConstructor = fn(&SystemContext, BaseNode) -> Result<NodeState>;

/// Maps `(namespace URI, id)` of an object type to the constructor of its state.
#[derive(Default)]
pub struct NodeStateFactory {
    constructors: RwLock<HashMap<(String, u32), NodeConstructor>>,
}

impl NodeStateFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory holding the DI and FDI7 object types.
    pub fn with_model_types() -> Self {
        let factory = Self::new();
        crate::model::register_node_types(&factory);
        factory
    }

    pub fn register(&self, type_definition: TypeDefinition, constructor: NodeConstructor) {
        log::debug!("[nodes] register node state for {}", type_definition);
        self.constructors.write().insert(
            (type_definition.namespace_uri.to_string(), type_definition.id),
            constructor,
        );
    }

    /// Initialized typed state for `type_definition`, or `None` if the type
    /// is not registered.
    pub fn create(
        &self,
        context: &SystemContext,
        type_definition: &NodeId,
        base: BaseNode,
    ) -> Result<Option<NodeState>> {
        let Some(id) = type_definition.as_numeric() else {
            return Ok(None);
        };
        let namespaces = context.namespaces();
        let Some(uri) = namespaces.uri_of(type_definition.namespace) else {
            return Ok(None);
        };
        let constructor = self.constructors.read().get(&(uri.to_string(), id)).copied();
        let Some(constructor) = constructor else {
            log::trace!("[nodes] no node state registered for {}", type_definition);
            return Ok(None);
        };

        let mut node = constructor(context, base)?;
        node.initialize(context)?;
        Ok(Some(node))
    }

    pub fn contains(&self, type_definition: TypeDefinition) -> bool {
        self.constructors
            .read()
            .contains_key(&(type_definition.namespace_uri.to_string(), type_definition.id))
    }

    pub fn len(&self) -> usize {
        self.constructors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.read().is_empty()
    }
}

impl fmt::Debug for NodeStateFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStateFactory")
            .field("types", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceState, ServerCommunicationFfH1DeviceState};
    use crate::nodes::InstanceNode;
    use crate::types::QualifiedName;

    #[test]
    fn test_model_types_registered() {
        let factory = NodeStateFactory::with_model_types();
        assert_eq!(factory.len(), 4);
        assert!(factory.contains(DeviceState::TYPE_DEFINITION));
        assert!(factory.contains(ServerCommunicationFfH1DeviceState::TYPE_DEFINITION));
    }

    #[test]
    fn test_create_initializes_state() {
        let context = SystemContext::new();
        let type_id = DeviceState::TYPE_DEFINITION
            .node_id(&context.namespaces())
            .expect("DI namespace");
        let base = BaseNode::new(QualifiedName::new(3, "Dev1")).with_node_id(NodeId::string(3, "Dev1"));
        let node = context
            .node_state_factory()
            .create(&context, &type_id, base)
            .expect("created")
            .expect("registered");
        let device = node.downcast_ref::<DeviceState>().expect("device state");
        assert!(device.base().is_initialized());
        assert!(device.serial_number.is_some());
    }

    #[test]
    fn test_unknown_type_is_none() {
        let context = SystemContext::new();
        let factory = NodeStateFactory::new();
        let created = factory
            .create(&context, &NodeId::numeric(0, 58), BaseNode::default())
            .expect("no error");
        assert!(created.is_none());
        assert!(factory.is_empty());
    }
}

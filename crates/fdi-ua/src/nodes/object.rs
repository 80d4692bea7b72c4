// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{impl_instance_node, ua_types, BaseNode, HasChildren, InstanceNode, NodeClass, SystemContext};
use crate::types::{NodeId, QualifiedName};

/// Object with no typed children.
#[derive(Debug, Clone, Default)]
pub struct ObjectState {
    base: BaseNode,
}

impl ObjectState {
    pub fn new(base: BaseNode) -> Self {
        Self { base }
    }

    /// `BaseObjectType` instance named `browse_name`.
    pub fn base_object(browse_name: QualifiedName) -> Self {
        let mut base = BaseNode::new(browse_name);
        base.type_definition = NodeId::numeric(0, ua_types::BASE_OBJECT_TYPE.id);
        Self { base }
    }

    pub fn base(&self) -> &BaseNode {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseNode {
        &mut self.base
    }
}

impl_instance_node!(ObjectState, NodeClass::Object);

impl HasChildren for ObjectState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.base.get_children(children);
    }

    fn find_child(
        &mut self,
        _context: &SystemContext,
        browse_name: &QualifiedName,
        _create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        self.base.find_child(browse_name)
    }
}

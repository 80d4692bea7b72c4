// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{impl_instance_node, ua_types, BaseNode, HasChildren, InstanceNode, NodeClass, SystemContext};
use crate::types::{DateTime, NodeId, QualifiedName, StatusCode, Variant, VariantValue};

/// Variable node holding a [`Variant`] value.
#[derive(Debug, Clone, Default)]
pub struct VariableState {
    base: BaseNode,
    pub value: Variant,
    pub data_type: NodeId,
    /// -1 scalar, 1 one-dimensional array, 0 one or more dimensions.
    pub value_rank: i32,
    pub status_code: StatusCode,
    pub source_timestamp: DateTime,
}

impl VariableState {
    pub fn new(base: BaseNode) -> Self {
        Self {
            base,
            value_rank: -1,
            ..Self::default()
        }
    }

    /// Scalar `PropertyType` variable of `data_type`.
    pub fn property(browse_name: QualifiedName, data_type: NodeId) -> Self {
        Self::typed(browse_name, ua_types::PROPERTY_TYPE.id, data_type)
    }

    /// Scalar `BaseDataVariableType` variable of `data_type`.
    pub fn data_variable(browse_name: QualifiedName, data_type: NodeId) -> Self {
        Self::typed(browse_name, ua_types::BASE_DATA_VARIABLE_TYPE.id, data_type)
    }

    fn typed(browse_name: QualifiedName, type_definition: u32, data_type: NodeId) -> Self {
        let mut base = BaseNode::new(browse_name);
        base.type_definition = NodeId::numeric(0, type_definition);
        Self {
            data_type,
            ..Self::new(base)
        }
    }

    pub fn base(&self) -> &BaseNode {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseNode {
        &mut self.base
    }

    /// Typed value; `None` when empty or of another type.
    pub fn value<T: VariantValue>(&self) -> Option<T> {
        self.value.get()
    }

    /// Store `value` and stamp it good at the current time.
    pub fn set_value<T: VariantValue>(&mut self, value: T) {
        self.value = value.into_variant();
        self.status_code = StatusCode::GOOD;
        self.source_timestamp = DateTime::now();
    }
}

impl_instance_node!(VariableState, NodeClass::Variable);

impl HasChildren for VariableState {
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

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DI object types: `ProtocolType` and `DeviceType`.

use crate::config::DI_NAMESPACE;
use crate::error::Result;
use crate::nodes::{
    bind_child, impl_instance_node, initialize_node, push_child, BaseNode, HasChildren,
    InstanceNode, NodeClass, ObjectState, SystemContext, TypeDefinition, VariableState,
};
use crate::types::{BuiltinType, NodeId, QualifiedName};

/// Communication protocol used by a device or network.
#[derive(Debug, Clone, Default)]
pub struct ProtocolState {
    object: ObjectState,
}

impl ProtocolState {
    pub const TYPE_DEFINITION: TypeDefinition = TypeDefinition::new(DI_NAMESPACE, 1006);

    pub const INITIALIZATION_STRING: &'static str = "\
        AgAAABwAAABodHRwOi8vb3BjZm91bmRhdGlvbi5vcmcvVUEvHwAAAGh0dHA6Ly9vcGNmb3VuZGF0\
        aW9uLm9yZy9VQS9ESS8BAAwAAABQcm90b2NvbFR5cGUBAe4DAAAAAA==";

    pub fn new(base: BaseNode) -> Self {
        Self {
            object: ObjectState::new(base),
        }
    }

    pub fn initialize(&mut self, context: &SystemContext) -> Result<()> {
        initialize_node(self, context, Self::INITIALIZATION_STRING)
    }
}

impl_instance_node!(ProtocolState, NodeClass::Object, object);

impl HasChildren for ProtocolState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.object.get_children(children);
    }

    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        self.object.find_child(context, browse_name, create_or_replace)
    }
}

/// Typed variables of `DeviceType`, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceChild {
    SerialNumber,
    RevisionCounter,
    Manufacturer,
    Model,
    DeviceManual,
    DeviceRevision,
    SoftwareRevision,
    HardwareRevision,
    DeviceClass,
    DeviceHealth,
}

impl DeviceChild {
    const ALL: [DeviceChild; 10] = [
        DeviceChild::SerialNumber,
        DeviceChild::RevisionCounter,
        DeviceChild::Manufacturer,
        DeviceChild::Model,
        DeviceChild::DeviceManual,
        DeviceChild::DeviceRevision,
        DeviceChild::SoftwareRevision,
        DeviceChild::HardwareRevision,
        DeviceChild::DeviceClass,
        DeviceChild::DeviceHealth,
    ];

    fn browse_name(self) -> &'static str {
        match self {
            DeviceChild::SerialNumber => "SerialNumber",
            DeviceChild::RevisionCounter => "RevisionCounter",
            DeviceChild::Manufacturer => "Manufacturer",
            DeviceChild::Model => "Model",
            DeviceChild::DeviceManual => "DeviceManual",
            DeviceChild::DeviceRevision => "DeviceRevision",
            DeviceChild::SoftwareRevision => "SoftwareRevision",
            DeviceChild::HardwareRevision => "HardwareRevision",
            DeviceChild::DeviceClass => "DeviceClass",
            DeviceChild::DeviceHealth => "DeviceHealth",
        }
    }

    fn resolve(context: &SystemContext, browse_name: &QualifiedName) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|child| context.is_browse_name(browse_name, DI_NAMESPACE, child.browse_name()))
    }

    fn placeholder(self, context: &SystemContext, browse_name: QualifiedName) -> VariableState {
        match self {
            DeviceChild::RevisionCounter => {
                VariableState::property(browse_name, BuiltinType::Int32.data_type_id())
            }
            DeviceChild::Manufacturer | DeviceChild::Model => {
                VariableState::property(browse_name, BuiltinType::LocalizedText.data_type_id())
            }
            DeviceChild::DeviceHealth => {
                let data_type = context
                    .namespace_index(DI_NAMESPACE)
                    .map(|ns| NodeId::numeric(ns, super::DeviceHealthEnum::DATA_TYPE))
                    .unwrap_or_else(|_| BuiltinType::Int32.data_type_id());
                VariableState::data_variable(browse_name, data_type)
            }
            _ => VariableState::property(browse_name, BuiltinType::String.data_type_id()),
        }
    }
}

/// A field device, with its identification properties.
///
/// The eight identification properties are declared by the type and exist
/// after `initialize`. `device_class` and `device_health` are optional and
/// appear on first `find_child` with `create_or_replace` or on assignment.
#[derive(Debug, Clone, Default)]
pub struct DeviceState {
    object: ObjectState,
    pub serial_number: Option<VariableState>,
    pub revision_counter: Option<VariableState>,
    pub manufacturer: Option<VariableState>,
    pub model: Option<VariableState>,
    pub device_manual: Option<VariableState>,
    pub device_revision: Option<VariableState>,
    pub software_revision: Option<VariableState>,
    pub hardware_revision: Option<VariableState>,
    pub device_class: Option<VariableState>,
    pub device_health: Option<VariableState>,
}

impl DeviceState {
    pub const TYPE_DEFINITION: TypeDefinition = TypeDefinition::new(DI_NAMESPACE, 1002);

    pub const INITIALIZATION_STRING: &'static str = "\
        AgAAABwAAABodHRwOi8vb3BjZm91bmRhdGlvbi5vcmcvVUEvHwAAAGh0dHA6Ly9vcGNmb3VuZGF0\
        aW9uLm9yZy9VQS9ESS8BAAoAAABEZXZpY2VUeXBlAQHqAwgAAAACAAAAAQAMAAAAU2VyaWFsTnVt\
        YmVyAEQADP////8AAAAAAgAAAAEADwAAAFJldmlzaW9uQ291bnRlcgBEAAb/////AAAAAAIAAAAB\
        AAwAAABNYW51ZmFjdHVyZXIARAAV/////wAAAAACAAAAAQAFAAAATW9kZWwARAAV/////wAAAAAC\
        AAAAAQAMAAAARGV2aWNlTWFudWFsAEQADP////8AAAAAAgAAAAEADgAAAERldmljZVJldmlzaW9u\
        AEQADP////8AAAAAAgAAAAEAEAAAAFNvZnR3YXJlUmV2aXNpb24ARAAM/////wAAAAACAAAAAQAQ\
        AAAASGFyZHdhcmVSZXZpc2lvbgBEAAz/////AAAAAA==";

    pub fn new(base: BaseNode) -> Self {
        Self {
            object: ObjectState::new(base),
            ..Self::default()
        }
    }

    pub fn initialize(&mut self, context: &SystemContext) -> Result<()> {
        initialize_node(self, context, Self::INITIALIZATION_STRING)
    }

    fn slot(&self, child: DeviceChild) -> &Option<VariableState> {
        match child {
            DeviceChild::SerialNumber => &self.serial_number,
            DeviceChild::RevisionCounter => &self.revision_counter,
            DeviceChild::Manufacturer => &self.manufacturer,
            DeviceChild::Model => &self.model,
            DeviceChild::DeviceManual => &self.device_manual,
            DeviceChild::DeviceRevision => &self.device_revision,
            DeviceChild::SoftwareRevision => &self.software_revision,
            DeviceChild::HardwareRevision => &self.hardware_revision,
            DeviceChild::DeviceClass => &self.device_class,
            DeviceChild::DeviceHealth => &self.device_health,
        }
    }

    fn slot_mut(&mut self, child: DeviceChild) -> &mut Option<VariableState> {
        match child {
            DeviceChild::SerialNumber => &mut self.serial_number,
            DeviceChild::RevisionCounter => &mut self.revision_counter,
            DeviceChild::Manufacturer => &mut self.manufacturer,
            DeviceChild::Model => &mut self.model,
            DeviceChild::DeviceManual => &mut self.device_manual,
            DeviceChild::DeviceRevision => &mut self.device_revision,
            DeviceChild::SoftwareRevision => &mut self.software_revision,
            DeviceChild::HardwareRevision => &mut self.hardware_revision,
            DeviceChild::DeviceClass => &mut self.device_class,
            DeviceChild::DeviceHealth => &mut self.device_health,
        }
    }
}

impl_instance_node!(DeviceState, NodeClass::Object, object);

impl HasChildren for DeviceState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.object.get_children(children);
        for child in DeviceChild::ALL {
            push_child(self.slot(child), children);
        }
    }

    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        let Some(child) = DeviceChild::resolve(context, browse_name) else {
            return self.object.find_child(context, browse_name, create_or_replace);
        };
        bind_child(self.slot_mut(child), create_or_replace, || {
            child.placeholder(context, browse_name.clone())
        })
    }
}

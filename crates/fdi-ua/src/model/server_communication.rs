// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! FDI communication server device types.
//!
//! `ServerCommunicationFFH1DeviceType` extends `ServerCommunicationDeviceType`,
//! which extends DI `DeviceType`. Each level wraps its parent state and adds
//! its own typed children; lookups fall through to the parent.

use super::devices::DeviceState;
use super::enums::{AddressStateEnum, ConnectionStateEnum};
use super::fdi7::RegisteredNode;
use super::methods::{ScanMethodState, SetAddressMethodState, TransferMethodState};
use crate::config::FDI7_NAMESPACE;
use crate::encodeable::Encodeable;
use crate::error::Result;
use crate::nodes::{
    bind_child, impl_instance_node, initialize_node, push_child, BaseNode, HasChildren,
    InstanceNode, NodeClass, SystemContext, TypedMethodState, TypeDefinition, VariableState,
};
use crate::types::{BuiltinType, NodeId, QualifiedName};

/// FDI7 data type `id`, or `fallback` when the namespace is not registered.
fn fdi7_data_type(context: &SystemContext, id: u32, fallback: BuiltinType) -> NodeId {
    context
        .namespace_index(FDI7_NAMESPACE)
        .map(|ns| NodeId::numeric(ns, id))
        .unwrap_or_else(|_| fallback.data_type_id())
}

// ============================================================================
// ServerCommunicationDeviceType
// ============================================================================

/// Device reached through an FDI communication server.
#[derive(Debug, Clone, Default)]
pub struct ServerCommunicationDeviceState {
    device: DeviceState,
    pub connection_state: Option<VariableState>,
    /// Nodes registered with the server, as `RegisteredNode[]`.
    pub registered_nodes: Option<VariableState>,
}

impl ServerCommunicationDeviceState {
    pub const TYPE_DEFINITION: TypeDefinition = TypeDefinition::new(FDI7_NAMESPACE, 1001);

    pub const INITIALIZATION_STRING: &'static str = "\
        AwAAABwAAABodHRwOi8vb3BjZm91bmRhdGlvbi5vcmcvVUEvHwAAAGh0dHA6Ly9vcGNmb3VuZGF0\
        aW9uLm9yZy9VQS9ESS8mAAAAaHR0cDovL2ZkaS1jb29wZXJhdGlvbi5jb20vT1BDVUEvRkRJNy8C\
        AB0AAABTZXJ2ZXJDb21tdW5pY2F0aW9uRGV2aWNlVHlwZQEC6QMKAAAAAgAAAAEADAAAAFNlcmlh\
        bE51bWJlcgBEAAz/////AAAAAAIAAAABAA8AAABSZXZpc2lvbkNvdW50ZXIARAAG/////wAAAAAC\
        AAAAAQAMAAAATWFudWZhY3R1cmVyAEQAFf////8AAAAAAgAAAAEABQAAAE1vZGVsAEQAFf////8A\
        AAAAAgAAAAEADAAAAERldmljZU1hbnVhbABEAAz/////AAAAAAIAAAABAA4AAABEZXZpY2VSZXZp\
        c2lvbgBEAAz/////AAAAAAIAAAABABAAAABTb2Z0d2FyZVJldmlzaW9uAEQADP////8AAAAAAgAA\
        AAEAEAAAAEhhcmR3YXJlUmV2aXNpb24ARAAM/////wAAAAACAAAAAgAPAAAAQ29ubmVjdGlvblN0\
        YXRlAD8BAnoX/////wAAAAACAAAAAgAPAAAAUmVnaXN0ZXJlZE5vZGVzAD8BAnEXAQAAAAAAAAA=";

    pub fn new(base: BaseNode) -> Self {
        Self {
            device: DeviceState::new(base),
            ..Self::default()
        }
    }

    pub fn initialize(&mut self, context: &SystemContext) -> Result<()> {
        initialize_node(self, context, Self::INITIALIZATION_STRING)
    }

    pub fn device(&self) -> &DeviceState {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut DeviceState {
        &mut self.device
    }

    /// Current value of `ConnectionState`; `None` when absent or unset.
    pub fn connection(&self) -> Option<ConnectionStateEnum> {
        self.connection_state.as_ref()?.value()
    }

    /// Registered nodes held by `RegisteredNodes`; empty when absent.
    pub fn registered(&self) -> Vec<RegisteredNode> {
        self.registered_nodes
            .as_ref()
            .and_then(|variable| variable.value())
            .unwrap_or_default()
    }
}

impl_instance_node!(ServerCommunicationDeviceState, NodeClass::Object, device);

impl HasChildren for ServerCommunicationDeviceState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.device.get_children(children);
        push_child(&self.connection_state, children);
        push_child(&self.registered_nodes, children);
    }

    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        if context.is_browse_name(browse_name, FDI7_NAMESPACE, "ConnectionState") {
            return bind_child(&mut self.connection_state, create_or_replace, || {
                VariableState::data_variable(
                    browse_name.clone(),
                    fdi7_data_type(context, ConnectionStateEnum::DATA_TYPE, BuiltinType::Int32),
                )
            });
        }
        if context.is_browse_name(browse_name, FDI7_NAMESPACE, "RegisteredNodes") {
            return bind_child(&mut self.registered_nodes, create_or_replace, || {
                let mut variable = VariableState::data_variable(
                    browse_name.clone(),
                    fdi7_data_type(
                        context,
                        RegisteredNode::TYPE_IDS.data_type,
                        BuiltinType::ExtensionObject,
                    ),
                );
                variable.value_rank = 1;
                variable
            });
        }
        self.device.find_child(context, browse_name, create_or_replace)
    }
}

// ============================================================================
// ServerCommunicationFFH1DeviceType
// ============================================================================

/// Typed children added by the FF H1 device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FfH1Child {
    Address,
    AddressState,
    Scan,
    SetAddress,
    Transfer,
}

impl FfH1Child {
    const ALL: [FfH1Child; 5] = [
        FfH1Child::Address,
        FfH1Child::AddressState,
        FfH1Child::Scan,
        FfH1Child::SetAddress,
        FfH1Child::Transfer,
    ];

    fn browse_name(self) -> &'static str {
        match self {
            FfH1Child::Address => "Address",
            FfH1Child::AddressState => "AddressState",
            FfH1Child::Scan => "Scan",
            FfH1Child::SetAddress => "SetAddress",
            FfH1Child::Transfer => "Transfer",
        }
    }

    fn resolve(context: &SystemContext, browse_name: &QualifiedName) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|child| context.is_browse_name(browse_name, FDI7_NAMESPACE, child.browse_name()))
    }
}

/// Foundation Fieldbus H1 device behind an FDI communication server.
#[derive(Debug, Clone, Default)]
pub struct ServerCommunicationFfH1DeviceState {
    server: ServerCommunicationDeviceState,
    /// Node address on the H1 segment.
    pub address: Option<VariableState>,
    pub address_state: Option<VariableState>,
    pub scan: Option<ScanMethodState>,
    pub set_address: Option<SetAddressMethodState>,
    pub transfer: Option<TransferMethodState>,
}

impl ServerCommunicationFfH1DeviceState {
    pub const TYPE_DEFINITION: TypeDefinition = TypeDefinition::new(FDI7_NAMESPACE, 1002);

    pub const INITIALIZATION_STRING: &'static str = "\
        AwAAABwAAABodHRwOi8vb3BjZm91bmRhdGlvbi5vcmcvVUEvHwAAAGh0dHA6Ly9vcGNmb3VuZGF0\
        aW9uLm9yZy9VQS9ESS8mAAAAaHR0cDovL2ZkaS1jb29wZXJhdGlvbi5jb20vT1BDVUEvRkRJNy8C\
        ACEAAABTZXJ2ZXJDb21tdW5pY2F0aW9uRkZIMURldmljZVR5cGUBAuoDDwAAAAIAAAABAAwAAABT\
        ZXJpYWxOdW1iZXIARAAM/////wAAAAACAAAAAQAPAAAAUmV2aXNpb25Db3VudGVyAEQABv////8A\
        AAAAAgAAAAEADAAAAE1hbnVmYWN0dXJlcgBEABX/////AAAAAAIAAAABAAUAAABNb2RlbABEABX/\
        ////AAAAAAIAAAABAAwAAABEZXZpY2VNYW51YWwARAAM/////wAAAAACAAAAAQAOAAAARGV2aWNl\
        UmV2aXNpb24ARAAM/////wAAAAACAAAAAQAQAAAAU29mdHdhcmVSZXZpc2lvbgBEAAz/////AAAA\
        AAIAAAABABAAAABIYXJkd2FyZVJldmlzaW9uAEQADP////8AAAAAAgAAAAIADwAAAENvbm5lY3Rp\
        b25TdGF0ZQA/AQJ6F/////8AAAAAAgAAAAIADwAAAFJlZ2lzdGVyZWROb2RlcwA/AQJxFwEAAAAA\
        AAAAAgAAAAIABwAAAEFkZHJlc3MARAAD/////wAAAAACAAAAAgAMAAAAQWRkcmVzc1N0YXRlAD8B\
        AnsX/////wAAAAAEAAAAAgAEAAAAU2NhbgAAAAD/////AAAAAAQAAAACAAoAAABTZXRBZGRyZXNz\
        AAAAAP////8AAAAABAAAAAIACAAAAFRyYW5zZmVyAAAAAP////8AAAAA";

    pub fn new(base: BaseNode) -> Self {
        Self {
            server: ServerCommunicationDeviceState::new(base),
            ..Self::default()
        }
    }

    pub fn initialize(&mut self, context: &SystemContext) -> Result<()> {
        initialize_node(self, context, Self::INITIALIZATION_STRING)
    }

    pub fn server(&self) -> &ServerCommunicationDeviceState {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut ServerCommunicationDeviceState {
        &mut self.server
    }

    pub fn device(&self) -> &DeviceState {
        self.server.device()
    }

    pub fn device_mut(&mut self) -> &mut DeviceState {
        self.server.device_mut()
    }

    /// Current value of `AddressState`; `None` when absent or unset.
    pub fn address_assignment(&self) -> Option<AddressStateEnum> {
        self.address_state.as_ref()?.value()
    }
}

impl_instance_node!(ServerCommunicationFfH1DeviceState, NodeClass::Object, server);

impl HasChildren for ServerCommunicationFfH1DeviceState {
    fn get_children<'a>(&'a self, children: &mut Vec<&'a dyn InstanceNode>) {
        self.server.get_children(children);
        push_child(&self.address, children);
        push_child(&self.address_state, children);
        push_child(&self.scan, children);
        push_child(&self.set_address, children);
        push_child(&self.transfer, children);
    }

    fn find_child(
        &mut self,
        context: &SystemContext,
        browse_name: &QualifiedName,
        create_or_replace: bool,
    ) -> Option<&mut dyn InstanceNode> {
        let Some(child) = FfH1Child::resolve(context, browse_name) else {
            return self.server.find_child(context, browse_name, create_or_replace);
        };
        let name = browse_name.clone();
        match child {
            FfH1Child::Address => bind_child(&mut self.address, create_or_replace, || {
                VariableState::property(name, BuiltinType::Byte.data_type_id())
            }),
            FfH1Child::AddressState => bind_child(&mut self.address_state, create_or_replace, || {
                VariableState::data_variable(
                    name,
                    fdi7_data_type(context, AddressStateEnum::DATA_TYPE, BuiltinType::Int32),
                )
            }),
            FfH1Child::Scan => bind_child(&mut self.scan, create_or_replace, || {
                TypedMethodState::new(context, BaseNode::new(name))
            }),
            FfH1Child::SetAddress => bind_child(&mut self.set_address, create_or_replace, || {
                TypedMethodState::new(context, BaseNode::new(name))
            }),
            FfH1Child::Transfer => bind_child(&mut self.transfer, create_or_replace, || {
                TypedMethodState::new(context, BaseNode::new(name))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DI_NAMESPACE;
    use crate::model::{FfH1ScanResult, ScanOutputs, SetAddressInputs, SetAddressOutputs};
    use crate::nodes::{MethodState, NodeState};
    use crate::types::Variant;

    fn ffh1(context: &SystemContext) -> ServerCommunicationFfH1DeviceState {
        let base = BaseNode::new(QualifiedName::new(2, "Segment1_Dev20"))
            .with_node_id(NodeId::string(2, "Dev20"));
        let mut device = ServerCommunicationFfH1DeviceState::new(base);
        device.initialize(context).expect("initialize");
        device
    }

    #[test]
    fn test_initialize_declares_every_level() {
        let context = SystemContext::new();
        let device = ffh1(&context);
        assert_eq!(device.base().type_definition, NodeId::numeric(2, 1002));

        // DeviceType level
        let serial = device.device().serial_number.as_ref().expect("declared");
        assert_eq!(serial.base().node_id, NodeId::string(2, "Dev20_SerialNumber"));
        // ServerCommunicationDeviceType level
        let connection = device.server().connection_state.as_ref().expect("declared");
        assert_eq!(connection.data_type, NodeId::numeric(2, 6010));
        let registered = device.server().registered_nodes.as_ref().expect("declared");
        assert_eq!(registered.value_rank, 1);
        // FF H1 level
        assert_eq!(
            device.address.as_ref().map(|a| a.data_type.clone()),
            Some(NodeId::numeric(0, 3))
        );
        let set_address = device.set_address.as_ref().expect("declared");
        assert_eq!(set_address.method().input_arguments.len(), 3);
        assert_eq!(
            set_address.base().node_id,
            NodeId::string(2, "Dev20_SetAddress")
        );

        let mut children = Vec::new();
        device.get_children(&mut children);
        let names: Vec<_> = children
            .iter()
            .map(|c| c.base().browse_name.name.as_str())
            .collect();
        assert_eq!(names.len(), 15);
        assert_eq!(names[0], "SerialNumber");
        assert_eq!(names[8], "ConnectionState");
        assert_eq!(&names[10..], ["Address", "AddressState", "Scan", "SetAddress", "Transfer"]);
    }

    #[test]
    fn test_find_child_falls_through_levels() {
        let context = SystemContext::new();
        let mut device = ServerCommunicationFfH1DeviceState::new(BaseNode::default());

        let class = context.qualified_name(DI_NAMESPACE, "DeviceClass").expect("DI");
        assert!(device.find_child(&context, &class, true).is_some());
        assert!(device.device().device_class.is_some());

        let state = context.qualified_name(FDI7_NAMESPACE, "ConnectionState").expect("FDI7");
        assert!(device.find_child(&context, &state, true).is_some());

        let missing = context.qualified_name(FDI7_NAMESPACE, "Unknown").expect("FDI7");
        assert!(device.find_child(&context, &missing, true).is_none());
    }

    #[test]
    fn test_state_accessors() {
        let context = SystemContext::new();
        let mut device = ffh1(&context);
        assert_eq!(device.server().connection(), None);
        if let Some(state) = device.server_mut().connection_state.as_mut() {
            state.set_value(ConnectionStateEnum::Connected);
        }
        assert_eq!(device.server().connection(), Some(ConnectionStateEnum::Connected));

        if let Some(nodes) = device.server_mut().registered_nodes.as_mut() {
            nodes.set_value(vec![RegisteredNode {
                node_status: 1,
                ..RegisteredNode::default()
            }]);
        }
        assert_eq!(device.server().registered().len(), 1);

        if let Some(state) = device.address_state.as_mut() {
            state.set_value(AddressStateEnum::Temporary);
        }
        assert_eq!(device.address_assignment(), Some(AddressStateEnum::Temporary));
    }

    #[test]
    fn test_method_handlers_through_node_tree() {
        let context = SystemContext::new();
        let mut device = ffh1(&context);
        let object_id = device.base().node_id.clone();

        let set_address = device.set_address.as_mut().expect("declared");
        set_address.set_handler(|_, inputs: SetAddressInputs| {
            Ok(SetAddressOutputs {
                service_error: i32::from(inputs.new_address == 0),
                address_state: AddressStateEnum::Permanent,
            })
        });
        let outputs = set_address
            .call(
                &context,
                &object_id,
                &SetAddressInputs {
                    old_address: 248,
                    new_address: 21,
                    pd_tag: "FT-201".to_string(),
                },
            )
            .expect("call");
        assert_eq!(outputs.service_error, 0);

        let scan = device.scan.as_mut().expect("declared");
        scan.set_handler(|_, ()| {
            Ok(ScanOutputs {
                results: vec![FfH1ScanResult::default(); 2].into(),
            })
        });

        // untyped call path, as a server dispatching by browse name would
        let name = context.qualified_name(FDI7_NAMESPACE, "Scan").expect("FDI7");
        let node = device.find_child(&context, &name, false).expect("bound");
        let method = node
            .as_any()
            .downcast_ref::<ScanMethodState>()
            .map(ScanMethodState::method)
            .expect("scan method");
        let raw: Vec<Variant> = method.call(&context, &object_id, &[]).expect("raw call");
        assert_eq!(raw.len(), 1);
        assert!(raw[0].is_array());
    }

    #[test]
    fn test_wrapped_in_node_state() {
        let context = SystemContext::new();
        let mut node = NodeState::from(ServerCommunicationFfH1DeviceState::new(BaseNode::default()));
        node.initialize(&context).expect("initialize");
        assert!(node.base().is_initialized());
        assert_eq!(node.node_class(), NodeClass::Object);
        let typed = node
            .downcast_ref::<ServerCommunicationFfH1DeviceState>()
            .expect("typed");
        assert!(typed.transfer.is_some());
        assert!(node.downcast_ref::<MethodState>().is_none());
    }
}

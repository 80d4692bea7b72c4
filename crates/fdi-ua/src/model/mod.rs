// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The FDI information model: enumerations, records and typed node states.
//!
//! | Namespace | Content |
//! |-----------|---------|
//! | UA        | `NodeClass`, `Argument`, `RelativePath` |
//! | DI        | `DeviceHealthEnum`, parameter transfer results, `ProtocolState`, `DeviceState` |
//! | FDI7      | registrations, FF H1 scan/transfer/address records, server communication devices |

mod devices;
mod di;
mod enums;
mod fdi7;
mod methods;
mod server_communication;
mod snapshot;
mod ua;

pub use devices::{DeviceState, ProtocolState};
pub use di::{
    ParameterResultDataType, ParameterResultDataTypeCollection, TransferResultDataDataType,
    TransferResultDataDataTypeCollection, TransferResultErrorDataType,
    TransferResultErrorDataTypeCollection,
};
pub use enums::{AddressStateEnum, ConnectionStateEnum, DeviceHealthEnum};
pub use fdi7::{
    FfH1ScanResult, FfH1ScanResultCollection, FfH1TransferRequest, FfH1TransferRequestCollection,
    FfH1TransferResult, FfH1TransferResultCollection, NodeRegistration,
    NodeRegistrationCollection, RegisteredNode, RegisteredNodeCollection, SetAddressInputs,
    SetAddressInputsCollection, SetAddressOutputs, SetAddressOutputsCollection,
};
pub use methods::{ScanMethodState, ScanOutputs, SetAddressMethodState, TransferMethodState};
pub use server_communication::{
    ServerCommunicationDeviceState, ServerCommunicationFfH1DeviceState,
};
pub use snapshot::{
    NamespaceMapping, NodeDeclaration, NodeDeclarationCollection, NodeSnapshot,
    NodeSnapshotCollection,
};
pub use ua::{
    Argument, ArgumentCollection, NodeClass, RelativePath, RelativePathCollection,
    RelativePathElement, RelativePathElementCollection,
};

use crate::factory::EncodeableFactory;
use crate::nodes::{NodeState, NodeStateFactory};

/// Register every record of the model with `factory`.
pub fn register_types(factory: &EncodeableFactory) {
    factory.register::<Argument>();
    factory.register::<RelativePathElement>();
    factory.register::<RelativePath>();

    factory.register::<ParameterResultDataType>();
    factory.register::<TransferResultDataDataType>();
    factory.register::<TransferResultErrorDataType>();

    factory.register::<RegisteredNode>();
    factory.register::<NodeRegistration>();
    factory.register::<FfH1ScanResult>();
    factory.register::<FfH1TransferRequest>();
    factory.register::<FfH1TransferResult>();
    factory.register::<SetAddressInputs>();
    factory.register::<SetAddressOutputs>();

    factory.register::<NodeDeclaration>();
    factory.register::<NodeSnapshot>();
}

/// Register the DI and FDI7 object types with `factory`.
pub fn register_node_types(factory: &NodeStateFactory) {
    factory.register(ProtocolState::TYPE_DEFINITION, |_, base| {
        Ok(NodeState::Protocol(ProtocolState::new(base)))
    });
    factory.register(DeviceState::TYPE_DEFINITION, |_, base| {
        Ok(NodeState::Device(DeviceState::new(base)))
    });
    factory.register(ServerCommunicationDeviceState::TYPE_DEFINITION, |_, base| {
        Ok(NodeState::ServerCommunicationDevice(
            ServerCommunicationDeviceState::new(base),
        ))
    });
    factory.register(ServerCommunicationFfH1DeviceState::TYPE_DEFINITION, |_, base| {
        Ok(NodeState::ServerCommunicationFfH1Device(
            ServerCommunicationFfH1DeviceState::new(base),
        ))
    });
}

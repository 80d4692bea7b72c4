// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Argument bindings of the FF H1 communication server methods.
//!
//! | Method     | Inputs                        | Outputs                      |
//! |------------|-------------------------------|------------------------------|
//! | Scan       | none                          | `ScanResults: FfH1ScanResult[]` |
//! | SetAddress | `OldAddress`, `NewAddress`, `PDTag` | `ServiceError`, `AddressState` |
//! | Transfer   | `TransferRequest`             | `TransferResult`             |

use super::enums::AddressStateEnum;
use super::fdi7::{
    FfH1ScanResult, FfH1ScanResultCollection, FfH1TransferRequest, FfH1TransferResult,
    SetAddressInputs, SetAddressOutputs,
};
use super::ua::Argument;
use crate::encodeable::Encodeable;
use crate::error::Result;
use crate::nodes::{argument_at, MethodArguments, TypedMethodState};
use crate::types::{BuiltinType, NamespaceTable, NodeId, Variant, VariantValue};

pub type SetAddressMethodState = TypedMethodState<SetAddressInputs, SetAddressOutputs>;
pub type ScanMethodState = TypedMethodState<(), ScanOutputs>;
pub type TransferMethodState = TypedMethodState<FfH1TransferRequest, FfH1TransferResult>;

/// Data type of a model record, or `BaseDataType` when its namespace is missing.
fn record_data_type<T: Encodeable>(namespaces: &NamespaceTable) -> NodeId {
    T::TYPE_IDS
        .data_type_id(namespaces)
        .unwrap_or(NodeId::numeric(0, 24))
}

fn address_state_data_type(namespaces: &NamespaceTable) -> NodeId {
    namespaces
        .index_of(AddressStateEnum::NAMESPACE_URI)
        .map(|ns| NodeId::numeric(ns, AddressStateEnum::DATA_TYPE))
        .unwrap_or_else(|| BuiltinType::Int32.data_type_id())
}

impl MethodArguments for SetAddressInputs {
    fn arguments(_namespaces: &NamespaceTable) -> Vec<Argument> {
        vec![
            Argument::scalar("OldAddress", BuiltinType::Byte.data_type_id()),
            Argument::scalar("NewAddress", BuiltinType::Byte.data_type_id()),
            Argument::scalar("PDTag", BuiltinType::String.data_type_id()),
        ]
    }

    fn to_variants(&self) -> Vec<Variant> {
        vec![
            Variant::Byte(self.old_address),
            Variant::Byte(self.new_address),
            Variant::String(self.pd_tag.clone()),
        ]
    }

    fn from_variants(values: &[Variant]) -> Result<Self> {
        Ok(Self {
            old_address: argument_at(values, 0, "OldAddress")?,
            new_address: argument_at(values, 1, "NewAddress")?,
            pd_tag: argument_at(values, 2, "PDTag")?,
        })
    }
}

impl MethodArguments for SetAddressOutputs {
    fn arguments(namespaces: &NamespaceTable) -> Vec<Argument> {
        vec![
            Argument::scalar("ServiceError", BuiltinType::Int32.data_type_id()),
            Argument::scalar("AddressState", address_state_data_type(namespaces)),
        ]
    }

    fn to_variants(&self) -> Vec<Variant> {
        vec![
            Variant::Int32(self.service_error),
            self.address_state.into_variant(),
        ]
    }

    fn from_variants(values: &[Variant]) -> Result<Self> {
        Ok(Self {
            service_error: argument_at(values, 0, "ServiceError")?,
            address_state: argument_at(values, 1, "AddressState")?,
        })
    }
}

impl MethodArguments for FfH1TransferRequest {
    fn arguments(namespaces: &NamespaceTable) -> Vec<Argument> {
        vec![Argument::scalar(
            "TransferRequest",
            record_data_type::<Self>(namespaces),
        )]
    }

    fn to_variants(&self) -> Vec<Variant> {
        vec![self.clone().into_variant()]
    }

    fn from_variants(values: &[Variant]) -> Result<Self> {
        argument_at(values, 0, "TransferRequest")
    }
}

impl MethodArguments for FfH1TransferResult {
    fn arguments(namespaces: &NamespaceTable) -> Vec<Argument> {
        vec![Argument::scalar(
            "TransferResult",
            record_data_type::<Self>(namespaces),
        )]
    }

    fn to_variants(&self) -> Vec<Variant> {
        vec![self.clone().into_variant()]
    }

    fn from_variants(values: &[Variant]) -> Result<Self> {
        argument_at(values, 0, "TransferResult")
    }
}

/// Outputs of the Scan method: every device found on the segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanOutputs {
    pub results: FfH1ScanResultCollection,
}

impl MethodArguments for ScanOutputs {
    fn arguments(namespaces: &NamespaceTable) -> Vec<Argument> {
        vec![Argument::array(
            "ScanResults",
            record_data_type::<FfH1ScanResult>(namespaces),
        )]
    }

    fn to_variants(&self) -> Vec<Variant> {
        vec![self.results.clone().into_variant()]
    }

    fn from_variants(values: &[Variant]) -> Result<Self> {
        Ok(Self {
            results: argument_at(values, 0, "ScanResults")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::nodes::{BaseNode, SystemContext};
    use crate::types::QualifiedName;

    fn method<I: MethodArguments, O: MethodArguments>(
        context: &SystemContext,
        name: &str,
    ) -> TypedMethodState<I, O> {
        TypedMethodState::new(context, BaseNode::new(QualifiedName::new(2, name)))
    }

    #[test]
    fn test_set_address_declared_arguments() {
        let context = SystemContext::new();
        let method: SetAddressMethodState = method(&context, "SetAddress");
        let inputs: Vec<_> = method
            .method()
            .input_arguments
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(inputs, ["OldAddress", "NewAddress", "PDTag"]);
        assert_eq!(
            method.method().output_arguments[1].data_type,
            NodeId::numeric(2, 6011)
        );
    }

    #[test]
    fn test_set_address_typed_call() {
        let context = SystemContext::new();
        let mut method: SetAddressMethodState = method(&context, "SetAddress");
        method.set_handler(|_, inputs| {
            Ok(SetAddressOutputs {
                service_error: if inputs.old_address == inputs.new_address { -1 } else { 0 },
                address_state: AddressStateEnum::Permanent,
            })
        });
        let outputs = method
            .call(
                &context,
                &NodeId::string(2, "Segment1"),
                &SetAddressInputs {
                    old_address: 248,
                    new_address: 20,
                    pd_tag: "PT-101".to_string(),
                },
            )
            .expect("call");
        assert_eq!(outputs.service_error, 0);
        assert_eq!(outputs.address_state, AddressStateEnum::Permanent);
    }

    #[test]
    fn test_raw_call_with_wrong_types() {
        let context = SystemContext::new();
        let mut method: SetAddressMethodState = method(&context, "SetAddress");
        method.set_handler(|_, _| Ok(SetAddressOutputs::default()));
        let err = method
            .method()
            .call(
                &context,
                &NodeId::NULL,
                &[Variant::Byte(1), Variant::String("x".into()), Variant::Byte(2)],
            )
            .expect_err("mistyped");
        assert!(matches!(err, Error::BadArguments(_)));
    }

    #[test]
    fn test_scan_and_transfer() {
        let context = SystemContext::new();
        let mut scan: ScanMethodState = method(&context, "Scan");
        scan.set_handler(|_, ()| {
            Ok(ScanOutputs {
                results: [FfH1ScanResult {
                    address: 20,
                    pd_tag: "PT-101".to_string(),
                    ..FfH1ScanResult::default()
                }]
                .into(),
            })
        });
        let found = scan.call(&context, &NodeId::NULL, &()).expect("scan");
        assert_eq!(found.results.len(), 1);
        assert_eq!(found.results[0].pd_tag, "PT-101");

        let mut transfer: TransferMethodState = method(&context, "Transfer");
        transfer.set_handler(|_, request| {
            Ok(FfH1TransferResult {
                service_error: 0,
                data: request.data,
            })
        });
        let request = FfH1TransferRequest {
            address: 20,
            block_index: 1000,
            data: vec![1, 2, 3].into(),
            ..FfH1TransferRequest::default()
        };
        let result = transfer.call(&context, &NodeId::NULL, &request).expect("transfer");
        assert_eq!(result.data, request.data);
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! FDI communication server (FDI7) structures.

use super::enums::AddressStateEnum;
use crate::config::{FDI7_NAMESPACE, FDI7_TYPES_XSD};
use crate::types::{ByteString, NodeId};
use crate::Encodeable;

/// A node registered with the communication server.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6001, binary_encoding = 6251, xml_encoding = 6275)]
pub struct RegisteredNode {
    pub node_status: i32,
    pub node_id: NodeId,
    pub registered_node_id: NodeId,
    pub parent_node_id: NodeId,
    pub type_definition_id: NodeId,
}

/// A batch of node registrations for one server.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6002, binary_encoding = 6252, xml_encoding = 6276)]
pub struct NodeRegistration {
    pub server_node_id: NodeId,
    pub registered_nodes: RegisteredNodeCollection,
}

/// One device answering a FF H1 live-list scan.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6003, binary_encoding = 6253, xml_encoding = 6277)]
pub struct FfH1ScanResult {
    pub address: u8,
    #[encodeable(rename = "PDTag")]
    pub pd_tag: String,
    #[encodeable(rename = "DeviceID")]
    pub device_id: String,
    #[encodeable(rename = "ManufacturerID")]
    pub manufacturer_id: u32,
    pub device_type: u16,
    pub device_revision: u8,
    pub address_state: AddressStateEnum,
}

/// FF H1 read/write request addressed by block index.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6004, binary_encoding = 6254, xml_encoding = 6278)]
pub struct FfH1TransferRequest {
    pub address: u8,
    /// 0 read, 1 write.
    pub operation: i32,
    pub block_index: u16,
    pub sub_index: u8,
    pub data: ByteString,
}

/// Reply to an [`FfH1TransferRequest`].
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6005, binary_encoding = 6255, xml_encoding = 6279)]
pub struct FfH1TransferResult {
    pub service_error: i32,
    pub data: ByteString,
}

/// Inputs of the FF H1 SetAddress method.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6006, binary_encoding = 6256, xml_encoding = 6280)]
pub struct SetAddressInputs {
    pub old_address: u8,
    pub new_address: u8,
    #[encodeable(rename = "PDTag")]
    pub pd_tag: String,
}

/// Outputs of the FF H1 SetAddress method.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6007, binary_encoding = 6257, xml_encoding = 6281)]
pub struct SetAddressOutputs {
    pub service_error: i32,
    pub address_state: AddressStateEnum,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodeable::{DynEncodeable, Encodeable};
    use crate::encoding::{decode_binary, decode_xml, encode_binary, encode_xml, EncodingContext};
    use crate::types::Identifier;

    #[test]
    fn test_registered_node_defaults_roundtrip() {
        let context = EncodingContext::default();
        let node = RegisteredNode {
            node_status: 0,
            ..RegisteredNode::default()
        };
        let bytes = encode_binary(&node, &context).expect("encode");
        // Int32 status plus four two-byte null NodeIds
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let decoded: RegisteredNode = decode_binary(&bytes, &context).expect("decode");
        assert!(decoded.is_equal(&node));
        for id in [
            &decoded.node_id,
            &decoded.registered_node_id,
            &decoded.parent_node_id,
            &decoded.type_definition_id,
        ] {
            assert!(id.is_null());
            assert_eq!(id.identifier, Identifier::Numeric(0));
        }
    }

    #[test]
    fn test_set_null_stores_default() {
        let mut node = RegisteredNode {
            node_id: NodeId::string(2, "Device1"),
            ..RegisteredNode::default()
        };
        node.set_node_id(None);
        assert_eq!(node.node_id, NodeId::NULL);
        node.set_parent_node_id(Some(NodeId::numeric(2, 9)));
        assert_eq!(node.parent_node_id, NodeId::numeric(2, 9));
    }

    #[test]
    fn test_is_equal_rejects_other_type() {
        let node = RegisteredNode::default();
        let other = SetAddressOutputs::default();
        assert!(!node.is_equal(&other as &dyn DynEncodeable));
        assert!(node.is_equal(&node as &dyn DynEncodeable));
    }

    #[test]
    fn test_clone_independence() {
        let original = NodeRegistration {
            server_node_id: NodeId::numeric(2, 1),
            registered_nodes: [RegisteredNode {
                node_status: 1,
                ..RegisteredNode::default()
            }]
            .into(),
        };
        let mut copy = original.clone();
        assert!(copy.is_equal(&original));
        copy.registered_nodes[0].node_status = 5;
        copy.server_node_id = NodeId::numeric(2, 2);
        assert_eq!(original.registered_nodes[0].node_status, 1);
        assert_eq!(original.server_node_id, NodeId::numeric(2, 1));
        assert!(!copy.is_equal(&original));
    }

    #[test]
    fn test_scan_result_xml_names() {
        let context = EncodingContext::default();
        let scan = FfH1ScanResult {
            address: 20,
            pd_tag: "PT-101".to_string(),
            device_id: "0011223344".to_string(),
            manufacturer_id: 0x0048_5252,
            device_type: 0x0007,
            device_revision: 3,
            address_state: AddressStateEnum::Permanent,
        };
        let xml = encode_xml(&scan, &context).expect("encode");
        assert!(xml.contains("<Address>20</Address><PDTag>PT-101</PDTag><DeviceID>"), "{xml}");
        assert!(xml.contains("<AddressState>Permanent_2</AddressState>"), "{xml}");
        assert_eq!(decode_xml::<FfH1ScanResult>(&xml, &context).expect("decode"), scan);
    }

    #[test]
    fn test_type_ids_resolve_in_fdi_table() {
        let context = EncodingContext::default();
        let id = RegisteredNode::TYPE_IDS
            .binary_encoding_id(&context.namespaces)
            .expect("FDI7 namespace present");
        assert_eq!(id, NodeId::numeric(2, 6251));
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Binary golden vectors: byte-exact layouts of FDI records per OPC UA Part 6.
//
// Each test encodes a known value, compares against the reference bytes,
// then decodes the reference bytes and re-encodes them.

#![allow(clippy::unreadable_literal)]

use fdi_ua::config::EncodingLimits;
use fdi_ua::encoding::{decode_binary, encode_binary, EncodingContext};
use fdi_ua::model::{
    AddressStateEnum, FfH1TransferRequest, NodeDeclaration, NodeSnapshot, RegisteredNode,
    SetAddressOutputs,
};
use fdi_ua::types::{ExtensionObject, NodeId, QualifiedName};
use fdi_ua::{Encodeable, Error};

fn check_golden<T: Encodeable>(value: &T, expected: &[u8]) {
    let context = EncodingContext::default();
    let bytes = encode_binary(value, &context).expect("encode");
    assert_eq!(bytes, expected, "{} layout", T::TYPE_NAME);

    let decoded: T = decode_binary(expected, &context).expect("decode");
    assert!(decoded.is_equal(value), "{} decode", T::TYPE_NAME);
    assert_eq!(encode_binary(&decoded, &context).expect("re-encode"), expected);
}

#[test]
fn golden_registered_node_node_id_forms() {
    let node = RegisteredNode {
        node_status: 1,
        // two-byte form
        node_id: NodeId::numeric(0, 85),
        // four-byte form
        registered_node_id: NodeId::numeric(2, 6251),
        // full numeric form
        parent_node_id: NodeId::numeric(3, 70000),
        // string form
        type_definition_id: NodeId::string(2, "Dev"),
    };
    #[rustfmt::skip]
    let expected = [
        0x01, 0x00, 0x00, 0x00,
        0x00, 0x55,
        0x01, 0x02, 0x6B, 0x18,
        0x02, 0x03, 0x00, 0x70, 0x11, 0x01, 0x00,
        0x03, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00, b'D', b'e', b'v',
    ];
    check_golden(&node, &expected);
}

#[test]
fn golden_registered_node_defaults() {
    check_golden(&RegisteredNode::default(), &[0u8; 12]);
}

#[test]
fn golden_transfer_request() {
    let request = FfH1TransferRequest {
        address: 20,
        operation: 1,
        block_index: 1000,
        sub_index: 2,
        data: vec![0xDE, 0xAD].into(),
    };
    #[rustfmt::skip]
    let expected = [
        0x14,
        0x01, 0x00, 0x00, 0x00,
        0xE8, 0x03,
        0x02,
        0x02, 0x00, 0x00, 0x00, 0xDE, 0xAD,
    ];
    check_golden(&request, &expected);
}

#[test]
fn golden_enumeration_is_int32() {
    let outputs = SetAddressOutputs {
        service_error: -1,
        address_state: AddressStateEnum::Permanent,
    };
    check_golden(&outputs, &[0xFF, 0xFF, 0xFF, 0xFF, 0x02, 0x00, 0x00, 0x00]);
}

#[test]
fn golden_extension_object_envelope() {
    let context = EncodingContext::default();
    let object = ExtensionObject::from_encodeable(RegisteredNode::default());
    let bytes = object.to_binary(&context).expect("encode");

    // TypeId ns=2;i=6251 in four-byte form, binary body flag, body length 12
    let mut expected = vec![0x01, 0x02, 0x6B, 0x18, 0x01, 0x0C, 0x00, 0x00, 0x00];
    expected.extend_from_slice(&[0u8; 12]);
    assert_eq!(bytes, expected);

    let decoded = ExtensionObject::from_binary(&expected, &context).expect("decode");
    assert_eq!(decoded.type_name(), Some("RegisteredNode"));
}

#[test]
fn decode_truncated_input_fails() {
    let context = EncodingContext::default();
    let err = decode_binary::<RegisteredNode>(&[0x01, 0x00, 0x00], &context).unwrap_err();
    assert!(matches!(err, Error::EndOfInput { .. }), "{err}");
    assert!(err.is_decode_failure());
}

#[test]
fn decode_enforces_string_limit() {
    let mut context = EncodingContext::default();
    context.config.limits = EncodingLimits {
        max_string_length: 4,
        ..EncodingLimits::default()
    };
    let outputs = fdi_ua::model::SetAddressInputs {
        old_address: 1,
        new_address: 2,
        pd_tag: "TOO-LONG".to_string(),
    };
    let bytes = encode_binary(&outputs, &EncodingContext::default()).expect("encode");
    let err = decode_binary::<fdi_ua::model::SetAddressInputs>(&bytes, &context).unwrap_err();
    assert!(
        matches!(err, Error::LimitExceeded { actual: 8, limit: 4, .. }),
        "{err}"
    );
}

#[test]
fn decode_enforces_nesting_limit() {
    fn nested(depth: usize) -> NodeDeclaration {
        NodeDeclaration {
            browse_name: QualifiedName::new(1, format!("Level{depth}")),
            value_rank: -1,
            children: if depth == 0 {
                Vec::new()
            } else {
                vec![nested(depth - 1)]
            },
            ..NodeDeclaration::default()
        }
    }
    let snapshot = NodeSnapshot {
        children: [nested(4)].into(),
        ..NodeSnapshot::default()
    };
    let bytes = encode_binary(&snapshot, &EncodingContext::default()).expect("encode");

    let mut context = EncodingContext::default();
    context.config.limits.max_nesting_depth = 2;
    let err = decode_binary::<NodeSnapshot>(&bytes, &context).unwrap_err();
    assert!(matches!(err, Error::LimitExceeded { what: "nesting depth", .. }), "{err}");

    let decoded: NodeSnapshot =
        decode_binary(&bytes, &EncodingContext::default()).expect("default limits");
    assert_eq!(decoded, snapshot);
}

#[test]
fn decode_negative_array_length_fails() {
    let context = EncodingContext::default();
    // NodeRegistration: null server id, then a registered-nodes length of -2
    let bytes = [0x00, 0x00, 0xFE, 0xFF, 0xFF, 0xFF];
    let err = decode_binary::<fdi_ua::model::NodeRegistration>(&bytes, &context).unwrap_err();
    assert!(matches!(err, Error::Decoding { .. }), "{err}");
}

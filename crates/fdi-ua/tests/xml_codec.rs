// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML encoding of FDI records: element layout, enumeration symbols, strict
//! and lenient decoding, and extension object bodies.

use fdi_ua::config::{FDI7_TYPES_XSD, UA_TYPES_XSD};
use fdi_ua::encoding::{decode_xml, encode_xml, EncodingContext};
use fdi_ua::model::{AddressStateEnum, FfH1ScanResult, NodeRegistration, RegisteredNode};
use fdi_ua::types::{ExtensionObject, NodeId};
use fdi_ua::{Encodeable, Error};

fn scan_result() -> FfH1ScanResult {
    FfH1ScanResult {
        address: 30,
        pd_tag: "TT-7 <inlet>".to_string(),
        device_id: "0x1E".to_string(),
        manufacturer_id: 0x00_01_02,
        device_type: 7,
        device_revision: 3,
        address_state: AddressStateEnum::Permanent,
    }
}

#[test]
fn record_elements_follow_field_order() {
    let context = EncodingContext::default();
    let xml = encode_xml(&scan_result(), &context).expect("encode");

    assert!(
        xml.starts_with(&format!("<FfH1ScanResult xmlns=\"{FDI7_TYPES_XSD}\"><Address>30</Address>")),
        "{xml}"
    );
    assert!(xml.contains("<PDTag>TT-7 &lt;inlet&gt;</PDTag>"), "{xml}");
    assert!(xml.contains("<ManufacturerID>258</ManufacturerID>"), "{xml}");
    assert!(xml.ends_with("<AddressState>Permanent_2</AddressState></FfH1ScanResult>"), "{xml}");

    let order = ["<Address>", "<PDTag>", "<DeviceID>", "<ManufacturerID>", "<DeviceType>"];
    let positions: Vec<usize> = order.iter().filter_map(|tag| xml.find(tag)).collect();
    assert_eq!(positions.len(), order.len());
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn builtin_fields_use_ua_types_namespace() {
    let context = EncodingContext::default();
    let node = RegisteredNode {
        node_id: NodeId::string(2, "Dev"),
        ..RegisteredNode::default()
    };
    let xml = encode_xml(&node, &context).expect("encode");
    assert!(
        xml.contains(&format!(
            "<NodeId><Identifier xmlns=\"{UA_TYPES_XSD}\">ns=2;s=Dev</Identifier></NodeId>"
        )),
        "{xml}"
    );

    let decoded: RegisteredNode = decode_xml(&xml, &context).expect("decode");
    assert!(decoded.is_equal(&node));
}

#[test]
fn enumeration_accepts_symbol_or_number() {
    let context = EncodingContext::default();
    let xml = encode_xml(&scan_result(), &context).expect("encode");

    let numeric = xml.replace("Permanent_2", "1");
    let decoded: FfH1ScanResult = decode_xml(&numeric, &context).expect("bare number");
    assert_eq!(decoded.address_state, AddressStateEnum::Temporary);

    let unknown = xml.replace("Permanent_2", "Bogus");
    assert!(decode_xml::<FfH1ScanResult>(&unknown, &context).is_err());
}

#[test]
fn collections_nest_item_elements() {
    let context = EncodingContext::default();
    let registration = NodeRegistration {
        server_node_id: NodeId::numeric(2, 5001),
        registered_nodes: [
            RegisteredNode {
                node_status: 1,
                ..RegisteredNode::default()
            },
            RegisteredNode::default(),
        ]
        .into(),
    };
    let xml = encode_xml(&registration, &context).expect("encode");
    assert_eq!(xml.matches("<RegisteredNode>").count(), 2, "{xml}");
    assert!(xml.contains("<RegisteredNodes><RegisteredNode><NodeStatus>1</NodeStatus>"), "{xml}");

    let decoded: NodeRegistration = decode_xml(&xml, &context).expect("decode");
    assert_eq!(decoded, registration);

    let empty = NodeRegistration::default();
    let xml = encode_xml(&empty, &context).expect("encode");
    let decoded: NodeRegistration = decode_xml(&xml, &context).expect("decode empty");
    assert!(decoded.registered_nodes.is_empty());
}

#[test]
fn strict_decoding_rejects_missing_fields() {
    let context = EncodingContext::default();
    let xml = format!("<FfH1ScanResult xmlns=\"{FDI7_TYPES_XSD}\"><PDTag>TT-7</PDTag></FfH1ScanResult>");
    let err = decode_xml::<FfH1ScanResult>(&xml, &context).unwrap_err();
    assert!(err.is_decode_failure(), "{err}");
}

#[test]
fn lenient_decoding_defaults_and_skips() {
    let mut context = EncodingContext::default();
    context.config.strict_fields = false;
    let xml = format!(
        "<FfH1ScanResult xmlns=\"{FDI7_TYPES_XSD}\">\
         <Vendor>acme</Vendor><PDTag>TT-7</PDTag><DeviceType>9</DeviceType>\
         </FfH1ScanResult>"
    );
    let decoded: FfH1ScanResult = decode_xml(&xml, &context).expect("lenient");
    assert_eq!(decoded.address, 0);
    assert_eq!(decoded.pd_tag, "TT-7");
    assert_eq!(decoded.device_type, 9);
    assert_eq!(decoded.address_state, AddressStateEnum::Unassigned);
}

#[test]
fn namespace_mismatch_is_rejected() {
    let context = EncodingContext::default();
    let xml = encode_xml(&scan_result(), &context)
        .expect("encode")
        .replace(FDI7_TYPES_XSD, "urn:vendor:Types.xsd");
    assert!(decode_xml::<FfH1ScanResult>(&xml, &context).is_err());
}

#[test]
fn malformed_document_is_rejected() {
    let context = EncodingContext::default();
    let err = decode_xml::<FfH1ScanResult>("<FfH1ScanResult><Address>", &context).unwrap_err();
    assert!(err.is_decode_failure(), "{err}");
}

#[test]
fn extension_object_xml_body() {
    let context = EncodingContext::default();
    let object = ExtensionObject::from_encodeable(scan_result());
    let xml = object.to_xml(&context).expect("encode");
    assert!(xml.starts_with(&format!("<ExtensionObject xmlns=\"{UA_TYPES_XSD}\">")), "{xml}");
    assert!(xml.contains("<Identifier>ns=2;i=6277</Identifier>"), "{xml}");

    let decoded = ExtensionObject::from_xml(&xml, &context).expect("decode");
    let body = decoded.downcast_ref::<FfH1ScanResult>().expect("registered type");
    assert!(body.is_equal(&scan_result()));
}

#[test]
fn extension_object_unknown_xml_type() {
    let context = EncodingContext::default();
    let xml = ExtensionObject::from_encodeable(scan_result())
        .to_xml(&context)
        .expect("encode")
        .replace("ns=2;i=6277", "ns=2;i=9999");

    let kept = ExtensionObject::from_xml(&xml, &context).expect("kept raw");
    match kept {
        ExtensionObject::Xml { type_id, body } => {
            assert_eq!(type_id, NodeId::numeric(2, 9999));
            assert!(body.contains("PDTag"), "{body}");
        }
        other => panic!("expected raw body, got {other:?}"),
    }

    let mut strict = EncodingContext::default();
    strict.config.reject_unknown_encodings = true;
    let err = ExtensionObject::from_xml(&xml, &strict).unwrap_err();
    assert!(matches!(err, Error::UnknownEncoding(_)), "{err}");
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration loaded from YAML files and applied to decoding.

use std::io::Write;

use fdi_ua::encoding::{decode_binary, decode_xml, encode_binary, encode_xml, EncodingContext};
use fdi_ua::model::{NodeRegistration, RegisteredNode};
use fdi_ua::types::NodeId;
use fdi_ua::{CodecConfig, Error, SystemContext};

const PLANT_CONFIG: &str = "\
limits:
  max_array_length: 2
  max_string_length: 64
strict_fields: false
namespaces:
  - urn:plant:devices
  - urn:plant:vendor
";

fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(yaml.as_bytes()).expect("write");
    file
}

fn registration(count: usize) -> NodeRegistration {
    NodeRegistration {
        server_node_id: NodeId::numeric(2, 5001),
        registered_nodes: (0..count)
            .map(|i| RegisteredNode {
                node_status: i as i32,
                ..RegisteredNode::default()
            })
            .collect(),
    }
}

#[test]
fn load_from_file() {
    let file = write_config(PLANT_CONFIG);
    let config = CodecConfig::load(file.path()).expect("load");
    assert_eq!(config.limits.max_array_length, 2);
    assert_eq!(config.limits.max_string_length, 64);
    // keys left out keep their defaults
    assert_eq!(config.limits.max_nesting_depth, 64);
    assert!(!config.strict_fields);
    assert!(!config.reject_unknown_encodings);
    assert_eq!(config.namespaces.len(), 2);
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = CodecConfig::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err}");
}

#[test]
fn load_rejects_invalid_limits() {
    let file = write_config("limits:\n  max_array_length: 4294967296\n");
    let err = CodecConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("max_array_length"), "{err}");

    let file = write_config("namespaces:\n  - \"\"\n");
    assert!(matches!(CodecConfig::load(file.path()), Err(Error::Config(_))));
}

#[test]
fn array_limit_applies_to_both_codecs() {
    let config = CodecConfig::from_yaml(PLANT_CONFIG).expect("parse");
    let limited = EncodingContext::new(config);
    let unlimited = EncodingContext::default();

    let bytes = encode_binary(&registration(3), &unlimited).expect("encode");
    let err = decode_binary::<NodeRegistration>(&bytes, &limited).unwrap_err();
    assert!(
        matches!(err, Error::LimitExceeded { actual: 3, limit: 2, .. }),
        "{err}"
    );

    let xml = encode_xml(&registration(3), &unlimited).expect("encode");
    assert!(decode_xml::<NodeRegistration>(&xml, &limited).is_err());

    let bytes = encode_binary(&registration(2), &unlimited).expect("encode");
    let decoded: NodeRegistration = decode_binary(&bytes, &limited).expect("within limit");
    assert_eq!(decoded.registered_nodes.len(), 2);
}

#[test]
fn configured_namespaces_extend_the_context() {
    let config = CodecConfig::from_yaml(PLANT_CONFIG).expect("parse");
    let context = SystemContext::with_config(config);
    assert_eq!(context.namespace_index("urn:plant:devices").expect("first"), 3);
    assert_eq!(context.namespace_index("urn:plant:vendor").expect("second"), 4);
    assert!(!context.config().strict_fields);
    assert!(!context.encoding_context().config.strict_fields);
    assert!(matches!(
        context.namespace_index("urn:unknown"),
        Err(Error::UnknownNamespace(_))
    ));
}

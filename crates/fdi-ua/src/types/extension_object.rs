// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Extension objects: encodeable values tagged with their encoding id.
//!
//! # Binary Layout
//!
//! ```text
//! +--------+----------+---------------------------+
//! | TypeId | Encoding | Body                      |
//! | NodeId | u8       | 0: none                   |
//! |        |          | 1: ByteString (binary)    |
//! |        |          | 2: String (XmlElement)    |
//! +--------+----------+---------------------------+
//! ```
//!
//! # XML Layout
//!
//! ```xml
//! <Field>
//!   <TypeId><Identifier>ns=2;i=6275</Identifier></TypeId>
//!   <Body><RegisteredNode xmlns="...">...</RegisteredNode></Body>
//! </Field>
//! ```
//!
//! A body whose encoding id is registered in the context's factory is decoded
//! into its concrete type. Any other body is kept opaque, or rejected with
//! `Error::UnknownEncoding` when `reject_unknown_encodings` is set.

use super::{ByteString, NodeId};
use crate::config::UA_TYPES_XSD;
use crate::encodeable::{encode_body, DynEncodeable, Encodeable};
use crate::encoding::{
    scoped_decode, scoped_encode, xml, BinaryDecoder, BinaryEncoder, Decoder, Encoder,
    EncodingContext, EncodingKind, FieldCodec, XmlDecoder, XmlEncoder,
};
use crate::error::{Error, Result};
use crate::factory::Registration;
use std::fmt;

const ENCODING_NONE: u8 = 0x00;
const ENCODING_BINARY: u8 = 0x01;
const ENCODING_XML: u8 = 0x02;

/// Root element name of a standalone extension object document.
const ROOT_ELEMENT: &str = "ExtensionObject";

/// Container for a structured value whose type is known only at runtime.
#[derive(Debug, Clone, Default)]
pub enum ExtensionObject {
    #[default]
    Null,
    /// Decoded body.
    Encodeable(Box<dyn DynEncodeable>),
    /// Binary body of an unregistered type.
    Binary { type_id: NodeId, body: ByteString },
    /// XML body of an unregistered type.
    Xml { type_id: NodeId, body: String },
}

impl ExtensionObject {
    pub fn from_encodeable<T: Encodeable>(value: T) -> Self {
        ExtensionObject::Encodeable(Box::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ExtensionObject::Null)
    }

    pub fn body(&self) -> Option<&dyn DynEncodeable> {
        match self {
            ExtensionObject::Encodeable(body) => Some(body.as_ref()),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Encodeable>(&self) -> Option<&T> {
        self.body()?.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Encodeable>(&mut self) -> Option<&mut T> {
        match self {
            ExtensionObject::Encodeable(body) => body.as_any_mut().downcast_mut::<T>(),
            _ => None,
        }
    }

    /// Type name of a decoded body.
    pub fn type_name(&self) -> Option<&'static str> {
        self.body().map(DynEncodeable::type_name)
    }

    /// Standalone binary encoding.
    pub fn to_binary(&self, context: &EncodingContext) -> Result<Vec<u8>> {
        let mut encoder = BinaryEncoder::new(context);
        self.write_field(ROOT_ELEMENT, &mut encoder)?;
        Ok(encoder.into_bytes())
    }

    pub fn from_binary(bytes: &[u8], context: &EncodingContext) -> Result<Self> {
        let mut decoder = BinaryDecoder::new(bytes, context);
        Self::read_field(ROOT_ELEMENT, &mut decoder)
    }

    /// Standalone XML document with an `<ExtensionObject>` root.
    pub fn to_xml(&self, context: &EncodingContext) -> Result<String> {
        let mut encoder = XmlEncoder::new(context);
        scoped_encode(&mut encoder, UA_TYPES_XSD, |encoder| {
            self.write_field(ROOT_ELEMENT, encoder)
        })?;
        encoder.finish()
    }

    pub fn from_xml(text: &str, context: &EncodingContext) -> Result<Self> {
        let document = xml::parse_document(text)?;
        let mut decoder = XmlDecoder::new(&document, text, context);
        scoped_decode(&mut decoder, UA_TYPES_XSD, |decoder| {
            Self::read_field(ROOT_ELEMENT, decoder)
        })
    }

    fn lookup(context: &EncodingContext, type_id: &NodeId, xml: bool) -> Option<Registration> {
        let uri = context.namespaces.uri_of(type_id.namespace)?;
        let id = type_id.as_numeric()?;
        if xml {
            context.factory.lookup_xml(uri, id)
        } else {
            context.factory.lookup_binary(uri, id)
        }
    }

    fn unknown(context: &EncodingContext, type_id: &NodeId) -> Result<()> {
        if context.config.reject_unknown_encodings {
            return Err(Error::UnknownEncoding(type_id.to_string()));
        }
        log::warn!("[extension_object] no type registered for {type_id}, keeping raw body");
        Ok(())
    }

    /// Decode a binary body, or keep it opaque.
    fn from_binary_body(
        context: &EncodingContext,
        depth: usize,
        type_id: NodeId,
        body: ByteString,
    ) -> Result<Self> {
        match Self::lookup(context, &type_id, false) {
            Some(registration) => {
                let mut decoder = BinaryDecoder::nested(&body, context, depth);
                let value = registration.decode(&mut decoder)?;
                if decoder.remaining() != 0 {
                    return Err(Error::decoding(
                        "Body",
                        format!(
                            "{} trailing byte(s) after {}",
                            decoder.remaining(),
                            registration.type_name
                        ),
                    ));
                }
                Ok(ExtensionObject::Encodeable(value))
            }
            None => {
                Self::unknown(context, &type_id)?;
                Ok(ExtensionObject::Binary { type_id, body })
            }
        }
    }

    /// Decode an XML body carried as a string, or keep it opaque.
    fn from_xml_body(context: &EncodingContext, type_id: NodeId, body: String) -> Result<Self> {
        match Self::lookup(context, &type_id, true) {
            Some(registration) => {
                let document = xml::parse_document(&body)?;
                let mut decoder = XmlDecoder::new(&document, &body, context);
                Ok(ExtensionObject::Encodeable(registration.decode(&mut decoder)?))
            }
            None => {
                Self::unknown(context, &type_id)?;
                Ok(ExtensionObject::Xml { type_id, body })
            }
        }
    }

    fn write_binary(&self, encoder: &mut dyn Encoder) -> Result<()> {
        match self {
            ExtensionObject::Null => {
                encoder.write_node_id("TypeId", &NodeId::NULL)?;
                encoder.write_byte("Encoding", ENCODING_NONE)
            }
            ExtensionObject::Encodeable(value) => {
                let type_id = value
                    .type_ids()
                    .binary_encoding_id(&encoder.context().namespaces)?;
                let body = {
                    let mut nested = BinaryEncoder::nested(encoder.context(), encoder.depth());
                    value.encode_dyn(&mut nested)?;
                    nested.into_bytes()
                };
                encoder.write_node_id("TypeId", &type_id)?;
                encoder.write_byte("Encoding", ENCODING_BINARY)?;
                encoder.write_byte_string("Body", &body)
            }
            ExtensionObject::Binary { type_id, body } => {
                encoder.write_node_id("TypeId", type_id)?;
                encoder.write_byte("Encoding", ENCODING_BINARY)?;
                encoder.write_byte_string("Body", body)
            }
            ExtensionObject::Xml { type_id, body } => {
                encoder.write_node_id("TypeId", type_id)?;
                encoder.write_byte("Encoding", ENCODING_XML)?;
                encoder.write_string("Body", body)
            }
        }
    }

    fn read_binary(decoder: &mut dyn Decoder) -> Result<Self> {
        let type_id = decoder.read_node_id("TypeId")?;
        match decoder.read_byte("Encoding")? {
            ENCODING_NONE => Ok(ExtensionObject::Null),
            ENCODING_BINARY => {
                let body = decoder.read_byte_string("Body")?;
                Self::from_binary_body(decoder.context(), decoder.depth(), type_id, body)
            }
            ENCODING_XML => {
                let body = decoder.read_string("Body")?;
                Self::from_xml_body(decoder.context(), type_id, body)
            }
            other => Err(Error::decoding(
                "Encoding",
                format!("unknown extension object encoding 0x{other:02X}"),
            )),
        }
    }

    fn write_xml(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        encoder.begin_structure(name)?;
        scoped_encode(encoder, UA_TYPES_XSD, |encoder| {
            let type_id = match self {
                ExtensionObject::Null => return Ok(()),
                ExtensionObject::Encodeable(value) => value
                    .type_ids()
                    .xml_encoding_id(&encoder.context().namespaces)?,
                ExtensionObject::Binary { type_id, .. } | ExtensionObject::Xml { type_id, .. } => {
                    type_id.clone()
                }
            };
            encoder.write_node_id("TypeId", &type_id)?;
            encoder.begin_structure("Body")?;
            match self {
                ExtensionObject::Encodeable(value) => encode_body(value.as_ref(), encoder)?,
                ExtensionObject::Binary { body, .. } => encoder.write_byte_string("ByteString", body)?,
                ExtensionObject::Xml { body, .. } => encoder.write_raw_xml(body)?,
                ExtensionObject::Null => {}
            }
            encoder.end_structure("Body")
        })?;
        encoder.end_structure(name)
    }

    fn read_xml(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        if !decoder.begin_structure(name)? {
            return Ok(ExtensionObject::Null);
        }
        let value = scoped_decode(decoder, UA_TYPES_XSD, |decoder| {
            if decoder.next_element_name().as_deref() != Some("TypeId") {
                return Ok(ExtensionObject::Null);
            }
            let type_id = decoder.read_node_id("TypeId")?;
            if decoder.next_element_name().as_deref() != Some("Body") {
                return Ok(ExtensionObject::Null);
            }
            decoder.begin_structure("Body")?;
            let value = match decoder.next_element_name().as_deref() {
                None => ExtensionObject::Null,
                Some("ByteString") => {
                    let body = decoder.read_byte_string("ByteString")?;
                    Self::from_binary_body(decoder.context(), decoder.depth(), type_id, body)?
                }
                Some(_) => match Self::lookup(decoder.context(), &type_id, true) {
                    Some(registration) => ExtensionObject::Encodeable(registration.decode(decoder)?),
                    None => {
                        Self::unknown(decoder.context(), &type_id)?;
                        ExtensionObject::Xml {
                            type_id,
                            body: decoder.read_raw_xml()?,
                        }
                    }
                },
            };
            decoder.end_structure("Body")?;
            Ok(value)
        })?;
        decoder.end_structure(name)?;
        Ok(value)
    }
}

impl FieldCodec for ExtensionObject {
    const ELEMENT_NAME: &'static str = "ExtensionObject";
    const ITEM_NAMESPACE: Option<&'static str> = Some(UA_TYPES_XSD);
    // two-byte NodeId and the encoding byte
    const MIN_BINARY_SIZE: usize = 3;

    fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        match encoder.kind() {
            EncodingKind::Binary => self.write_binary(encoder),
            EncodingKind::Xml => self.write_xml(name, encoder),
        }
    }

    fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        match decoder.kind() {
            EncodingKind::Binary => Self::read_binary(decoder),
            EncodingKind::Xml => Self::read_xml(name, decoder),
        }
    }
}

impl PartialEq for ExtensionObject {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExtensionObject::Null, ExtensionObject::Null) => true,
            (ExtensionObject::Encodeable(a), ExtensionObject::Encodeable(b)) => {
                a.is_equal_dyn(b.as_ref())
            }
            (
                ExtensionObject::Binary { type_id, body },
                ExtensionObject::Binary {
                    type_id: other_id,
                    body: other_body,
                },
            ) => type_id == other_id && body == other_body,
            (
                ExtensionObject::Xml { type_id, body },
                ExtensionObject::Xml {
                    type_id: other_id,
                    body: other_body,
                },
            ) => type_id == other_id && body == other_body,
            _ => false,
        }
    }
}

impl fmt::Display for ExtensionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionObject::Null => f.write_str("null"),
            ExtensionObject::Encodeable(value) => write!(f, "{value:?}"),
            ExtensionObject::Binary { type_id, body } => {
                write!(f, "binary body of {type_id} ({} bytes)", body.len())
            }
            ExtensionObject::Xml { type_id, body } => {
                write!(f, "xml body of {type_id} ({} chars)", body.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegisteredNode;

    fn sample() -> RegisteredNode {
        RegisteredNode {
            node_status: 1,
            node_id: NodeId::numeric(2, 5001),
            ..RegisteredNode::default()
        }
    }

    #[test]
    fn test_binary_roundtrip_decodes_registered_type() {
        let context = EncodingContext::default();
        let object = ExtensionObject::from_encodeable(sample());
        let bytes = object.to_binary(&context).expect("encode");
        let decoded = ExtensionObject::from_binary(&bytes, &context).expect("decode");
        assert_eq!(decoded.downcast_ref::<RegisteredNode>(), Some(&sample()));
        assert_eq!(decoded, object);
    }

    #[test]
    fn test_xml_roundtrip_decodes_registered_type() {
        let context = EncodingContext::default();
        let object = ExtensionObject::from_encodeable(sample());
        let text = object.to_xml(&context).expect("encode");
        assert!(text.starts_with(&format!("<ExtensionObject xmlns=\"{UA_TYPES_XSD}\"><TypeId>")));
        assert!(text.contains("<Body><RegisteredNode xmlns="), "{text}");
        let decoded = ExtensionObject::from_xml(&text, &context).expect("decode");
        assert_eq!(decoded, object);
    }

    #[test]
    fn test_null_binary_layout() {
        let context = EncodingContext::default();
        let bytes = ExtensionObject::Null.to_binary(&context).expect("encode");
        assert_eq!(bytes, vec![0x00, 0x00, 0x00]);
        assert!(ExtensionObject::from_binary(&bytes, &context)
            .expect("decode")
            .is_null());
    }

    #[test]
    fn test_unknown_binary_body_kept_or_rejected() {
        let mut context = EncodingContext::default();
        let bytes = [0x01u8, 0x02, 0x39, 0x30, 0x01, 0x02, 0x00, 0x00, 0x00, 0xAA, 0xBB];
        let decoded = ExtensionObject::from_binary(&bytes, &context).expect("decode");
        assert_eq!(
            decoded,
            ExtensionObject::Binary {
                type_id: NodeId::numeric(2, 12345),
                body: ByteString::from(vec![0xAA, 0xBB]),
            }
        );
        assert_eq!(decoded.to_binary(&context).expect("re-encode"), bytes.to_vec());

        context.config.reject_unknown_encodings = true;
        let err = ExtensionObject::from_binary(&bytes, &context).unwrap_err();
        assert!(matches!(err, Error::UnknownEncoding(_)));
    }

    #[test]
    fn test_unknown_xml_body_kept_verbatim() {
        let context = EncodingContext::default();
        let text = format!(
            "<ExtensionObject xmlns=\"{UA_TYPES_XSD}\"><TypeId><Identifier>ns=1;i=77</Identifier></TypeId>\
             <Body><Custom xmlns=\"urn:x\"><A>1</A></Custom></Body></ExtensionObject>"
        );
        let decoded = ExtensionObject::from_xml(&text, &context).expect("decode");
        match &decoded {
            ExtensionObject::Xml { type_id, body } => {
                assert_eq!(*type_id, NodeId::numeric(1, 77));
                assert_eq!(body, "<Custom xmlns=\"urn:x\"><A>1</A></Custom>");
            }
            other => panic!("expected raw XML body, got {other:?}"),
        }
        let again = ExtensionObject::from_xml(&decoded.to_xml(&context).expect("encode"), &context)
            .expect("decode again");
        assert_eq!(again, decoded);
    }

    #[test]
    fn test_unknown_xml_body_keeps_inherited_namespaces() {
        let context = EncodingContext::default();
        let text = format!(
            "<ExtensionObject xmlns=\"{UA_TYPES_XSD}\" xmlns:v=\"urn:vendor\">\
             <TypeId><Identifier>ns=1;i=78</Identifier></TypeId>\
             <Body><v:Custom v:unit=\"bar\"><v:A>1</v:A></v:Custom></Body></ExtensionObject>"
        );
        let decoded = ExtensionObject::from_xml(&text, &context).expect("decode");
        let ExtensionObject::Xml { body, .. } = &decoded else {
            panic!("expected raw XML body, got {decoded:?}");
        };
        assert!(body.starts_with("<v:Custom "), "{body}");
        assert!(body.contains(" xmlns:v=\"urn:vendor\""), "{body}");
        assert!(body.contains(&format!(" xmlns=\"{UA_TYPES_XSD}\"")), "{body}");
        assert!(body.ends_with("v:unit=\"bar\"><v:A>1</v:A></v:Custom>"), "{body}");

        // the captured body parses on its own and stays stable
        let standalone = xml::parse_document(body).expect("standalone body");
        assert_eq!(
            standalone.root_element().tag_name().namespace(),
            Some("urn:vendor")
        );
        let again = ExtensionObject::from_xml(&decoded.to_xml(&context).expect("encode"), &context)
            .expect("decode again");
        assert_eq!(again, decoded);
    }

    #[test]
    fn test_binary_body_must_be_consumed() {
        let context = EncodingContext::default();
        // ns=1;i=15891, TransferResultErrorDataType, binary body
        let envelope = |body: &[u8]| {
            let mut bytes = vec![0x01, 0x01, 0x13, 0x3E, 0x01];
            bytes.extend_from_slice(&(body.len() as i32).to_le_bytes());
            bytes.extend_from_slice(body);
            bytes
        };

        let bytes = envelope(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
        let decoded = ExtensionObject::from_binary(&bytes, &context).expect("decode");
        assert_eq!(decoded.type_name(), Some("TransferResultErrorDataType"));

        let bytes = envelope(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0xAA]);
        let err = ExtensionObject::from_binary(&bytes, &context).unwrap_err();
        assert!(err.to_string().contains("1 trailing byte(s)"), "{err}");

        // a body without the diagnostics member is truncated
        let bytes = envelope(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(ExtensionObject::from_binary(&bytes, &context).is_err());
    }

    #[test]
    fn test_equality_by_value() {
        let a = ExtensionObject::from_encodeable(sample());
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ExtensionObject::Null);
        assert_ne!(a, ExtensionObject::from_encodeable(RegisteredNode::default()));
    }
}

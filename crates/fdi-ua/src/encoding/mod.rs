// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Namespace-scoped encoder/decoder abstraction.
//!
//! Records never talk to a wire format directly. They push their XML
//! namespace, write or read every field by name through an [`Encoder`] or
//! [`Decoder`], and pop the namespace. The binary codec ignores names and
//! namespaces; the XML codec turns them into elements.
//!
//! # Layout
//!
//! - [`cursor`]: little-endian byte cursors
//! - [`binary`]: OPC UA Part 6 binary encoding
//! - [`xml`]: OPC UA Part 6 XML encoding (roxmltree on the read side)
//! - [`FieldCodec`]: per-type dispatch from a field value to the right
//!   `write_*`/`read_*` call

pub mod binary;
pub mod cursor;
pub mod xml;

pub use binary::{BinaryDecoder, BinaryEncoder};
pub use xml::{XmlDecoder, XmlEncoder};

use crate::config::{CodecConfig, EncodingLimits, UA_TYPES_XSD};
use crate::encodeable::Encodeable;
use crate::error::{Error, Result};
use crate::factory::{default_factory, EncodeableFactory};
use crate::types::{
    ByteString, DateTime, ExpandedNodeId, Guid, LocalizedText, NamespaceTable, NodeId,
    QualifiedName, StatusCode,
};
use std::sync::Arc;

/// Which wire format an encoder/decoder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    Binary,
    Xml,
}

/// Everything a codec needs besides the payload: namespace table, limits and
/// the registry used to decode extension object bodies.
#[derive(Debug, Clone)]
pub struct EncodingContext {
    pub namespaces: NamespaceTable,
    pub config: CodecConfig,
    pub factory: Arc<EncodeableFactory>,
}

impl Default for EncodingContext {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl EncodingContext {
    /// `[UA, DI, FDI7]` plus the configured namespaces, with the default factory.
    pub fn new(config: CodecConfig) -> Self {
        let mut namespaces = NamespaceTable::with_fdi_namespaces();
        for uri in &config.namespaces {
            namespaces.get_or_add(uri.clone());
        }
        Self {
            namespaces,
            config,
            factory: default_factory(),
        }
    }

    pub fn with_factory(mut self, factory: Arc<EncodeableFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_namespaces(mut self, namespaces: NamespaceTable) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn limits(&self) -> &EncodingLimits {
        &self.config.limits
    }
}

/// Writing side of the codec abstraction.
///
/// `name` is the field name; the binary encoder ignores it.
pub trait Encoder {
    fn kind(&self) -> EncodingKind;
    fn context(&self) -> &EncodingContext;
    /// Current structure/array nesting depth.
    fn depth(&self) -> usize;

    fn push_namespace(&mut self, namespace_uri: &str);
    fn pop_namespace(&mut self);

    fn write_boolean(&mut self, name: &str, value: bool) -> Result<()>;
    fn write_sbyte(&mut self, name: &str, value: i8) -> Result<()>;
    fn write_byte(&mut self, name: &str, value: u8) -> Result<()>;
    fn write_int16(&mut self, name: &str, value: i16) -> Result<()>;
    fn write_uint16(&mut self, name: &str, value: u16) -> Result<()>;
    fn write_int32(&mut self, name: &str, value: i32) -> Result<()>;
    fn write_uint32(&mut self, name: &str, value: u32) -> Result<()>;
    fn write_int64(&mut self, name: &str, value: i64) -> Result<()>;
    fn write_uint64(&mut self, name: &str, value: u64) -> Result<()>;
    fn write_float(&mut self, name: &str, value: f32) -> Result<()>;
    fn write_double(&mut self, name: &str, value: f64) -> Result<()>;
    fn write_string(&mut self, name: &str, value: &str) -> Result<()>;
    fn write_date_time(&mut self, name: &str, value: DateTime) -> Result<()>;
    fn write_guid(&mut self, name: &str, value: &Guid) -> Result<()>;
    fn write_byte_string(&mut self, name: &str, value: &[u8]) -> Result<()>;
    fn write_node_id(&mut self, name: &str, value: &NodeId) -> Result<()>;
    fn write_expanded_node_id(&mut self, name: &str, value: &ExpandedNodeId) -> Result<()>;
    fn write_status_code(&mut self, name: &str, value: StatusCode) -> Result<()>;
    fn write_qualified_name(&mut self, name: &str, value: &QualifiedName) -> Result<()>;
    fn write_localized_text(&mut self, name: &str, value: &LocalizedText) -> Result<()>;
    /// Enumeration value; `symbol` is the `Name_Value` text used by XML.
    fn write_enumerated(&mut self, name: &str, symbol: &str, value: i32) -> Result<()>;

    fn begin_structure(&mut self, name: &str) -> Result<()>;
    fn end_structure(&mut self, name: &str) -> Result<()>;
    /// Start an array of `len` items; items follow as individual writes.
    fn begin_array(&mut self, name: &str, len: usize) -> Result<()>;
    fn end_array(&mut self, name: &str) -> Result<()>;

    /// Insert a pre-encoded XML element (opaque extension object bodies).
    fn write_raw_xml(&mut self, _xml: &str) -> Result<()> {
        Err(Error::Encoding(format!(
            "{:?} encoder cannot embed raw XML",
            self.kind()
        )))
    }
}

/// Reading side of the codec abstraction.
pub trait Decoder {
    fn kind(&self) -> EncodingKind;
    fn context(&self) -> &EncodingContext;
    fn depth(&self) -> usize;

    fn push_namespace(&mut self, namespace_uri: &str);
    fn pop_namespace(&mut self);

    fn read_boolean(&mut self, name: &str) -> Result<bool>;
    fn read_sbyte(&mut self, name: &str) -> Result<i8>;
    fn read_byte(&mut self, name: &str) -> Result<u8>;
    fn read_int16(&mut self, name: &str) -> Result<i16>;
    fn read_uint16(&mut self, name: &str) -> Result<u16>;
    fn read_int32(&mut self, name: &str) -> Result<i32>;
    fn read_uint32(&mut self, name: &str) -> Result<u32>;
    fn read_int64(&mut self, name: &str) -> Result<i64>;
    fn read_uint64(&mut self, name: &str) -> Result<u64>;
    fn read_float(&mut self, name: &str) -> Result<f32>;
    fn read_double(&mut self, name: &str) -> Result<f64>;
    fn read_string(&mut self, name: &str) -> Result<String>;
    fn read_date_time(&mut self, name: &str) -> Result<DateTime>;
    fn read_guid(&mut self, name: &str) -> Result<Guid>;
    fn read_byte_string(&mut self, name: &str) -> Result<ByteString>;
    fn read_node_id(&mut self, name: &str) -> Result<NodeId>;
    fn read_expanded_node_id(&mut self, name: &str) -> Result<ExpandedNodeId>;
    fn read_status_code(&mut self, name: &str) -> Result<StatusCode>;
    fn read_qualified_name(&mut self, name: &str) -> Result<QualifiedName>;
    fn read_localized_text(&mut self, name: &str) -> Result<LocalizedText>;
    fn read_enumerated(&mut self, name: &str) -> Result<i32>;

    /// Enter a structure. `false` means the field is absent and the caller
    /// should use the default value (lenient XML only).
    fn begin_structure(&mut self, name: &str) -> Result<bool>;
    fn end_structure(&mut self, name: &str) -> Result<()>;
    /// Enter an array. `None` means null or absent; both decode to empty.
    ///
    /// `min_item_size` is the smallest binary encoding of one item, used to
    /// reject lengths the remaining input cannot hold.
    fn begin_array(&mut self, name: &str, min_item_size: usize) -> Result<Option<usize>>;
    fn end_array(&mut self, name: &str) -> Result<()>;

    /// Local name of the next unread element (XML only).
    fn next_element_name(&self) -> Option<String> {
        None
    }

    /// Take the next element verbatim (XML only).
    fn read_raw_xml(&mut self) -> Result<String> {
        Err(Error::decoding(
            "Body",
            format!("{:?} decoder cannot capture raw XML", self.kind()),
        ))
    }
}

/// Run `body` with `namespace` pushed on the encoder.
pub fn scoped_encode<F>(encoder: &mut dyn Encoder, namespace: &str, body: F) -> Result<()>
where
    F: FnOnce(&mut dyn Encoder) -> Result<()>,
{
    encoder.push_namespace(namespace);
    let result = body(&mut *encoder);
    encoder.pop_namespace();
    result
}

/// Run `body` with `namespace` pushed on the decoder.
pub fn scoped_decode<T, F>(decoder: &mut dyn Decoder, namespace: &str, body: F) -> Result<T>
where
    F: FnOnce(&mut dyn Decoder) -> Result<T>,
{
    decoder.push_namespace(namespace);
    let result = body(&mut *decoder);
    decoder.pop_namespace();
    result
}

// ============================================================================
// Field dispatch
// ============================================================================

/// Maps a field's Rust type to the matching encoder/decoder calls.
///
/// Implemented here for the built-in types and arrays, by `#[derive(Encodeable)]`
/// for records and by `#[derive(Enumeration)]` for enumerations.
pub trait FieldCodec: Sized {
    /// Element name of one item: `Int32`, `NodeId`, `RelativePathElement`, ...
    const ELEMENT_NAME: &'static str;
    /// True for one-dimensional arrays.
    const IS_ARRAY: bool = false;
    /// XML namespace of array items; `None` keeps the enclosing namespace.
    const ITEM_NAMESPACE: Option<&'static str> = None;
    /// Fewest bytes one value takes in the binary encoding.
    const MIN_BINARY_SIZE: usize = 1;

    fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()>;
    fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self>;
}

macro_rules! impl_field_codec_copy {
    ($type:ty, $element:literal, $size:literal, $write:ident, $read:ident) => {
        impl FieldCodec for $type {
            const ELEMENT_NAME: &'static str = $element;
            const ITEM_NAMESPACE: Option<&'static str> = Some(UA_TYPES_XSD);
            const MIN_BINARY_SIZE: usize = $size;

            fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
                encoder.$write(name, *self)
            }

            fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
                decoder.$read(name)
            }
        }
    };
}

macro_rules! impl_field_codec_ref {
    ($type:ty, $element:literal, $size:literal, $write:ident, $read:ident) => {
        impl FieldCodec for $type {
            const ELEMENT_NAME: &'static str = $element;
            const ITEM_NAMESPACE: Option<&'static str> = Some(UA_TYPES_XSD);
            const MIN_BINARY_SIZE: usize = $size;

            fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
                encoder.$write(name, self)
            }

            fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
                decoder.$read(name)
            }
        }
    };
}

impl_field_codec_copy!(bool, "Boolean", 1, write_boolean, read_boolean);
impl_field_codec_copy!(i8, "SByte", 1, write_sbyte, read_sbyte);
impl_field_codec_copy!(u8, "Byte", 1, write_byte, read_byte);
impl_field_codec_copy!(i16, "Int16", 2, write_int16, read_int16);
impl_field_codec_copy!(u16, "UInt16", 2, write_uint16, read_uint16);
impl_field_codec_copy!(i32, "Int32", 4, write_int32, read_int32);
impl_field_codec_copy!(u32, "UInt32", 4, write_uint32, read_uint32);
impl_field_codec_copy!(i64, "Int64", 8, write_int64, read_int64);
impl_field_codec_copy!(u64, "UInt64", 8, write_uint64, read_uint64);
impl_field_codec_copy!(f32, "Float", 4, write_float, read_float);
impl_field_codec_copy!(f64, "Double", 8, write_double, read_double);
impl_field_codec_copy!(DateTime, "DateTime", 8, write_date_time, read_date_time);
impl_field_codec_copy!(StatusCode, "StatusCode", 4, write_status_code, read_status_code);
impl_field_codec_ref!(String, "String", 4, write_string, read_string);
impl_field_codec_ref!(Guid, "Guid", 16, write_guid, read_guid);
impl_field_codec_ref!(ByteString, "ByteString", 4, write_byte_string, read_byte_string);
impl_field_codec_ref!(NodeId, "NodeId", 2, write_node_id, read_node_id);
impl_field_codec_ref!(
    ExpandedNodeId,
    "ExpandedNodeId",
    2,
    write_expanded_node_id,
    read_expanded_node_id
);
impl_field_codec_ref!(
    QualifiedName,
    "QualifiedName",
    6,
    write_qualified_name,
    read_qualified_name
);
impl_field_codec_ref!(
    LocalizedText,
    "LocalizedText",
    1,
    write_localized_text,
    read_localized_text
);

impl<T: FieldCodec> FieldCodec for Vec<T> {
    const ELEMENT_NAME: &'static str = T::ELEMENT_NAME;
    const IS_ARRAY: bool = true;
    const MIN_BINARY_SIZE: usize = 4;

    fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        write_array(self, name, encoder)
    }

    fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        read_array(name, decoder)
    }
}

/// Write `items` as a one-dimensional array field.
pub fn write_array<T: FieldCodec>(items: &[T], name: &str, encoder: &mut dyn Encoder) -> Result<()> {
    encoder.begin_array(name, items.len())?;
    let write_items = |encoder: &mut dyn Encoder| {
        items
            .iter()
            .try_for_each(|item| item.write_field(T::ELEMENT_NAME, encoder))
    };
    match T::ITEM_NAMESPACE {
        Some(namespace) => scoped_encode(encoder, namespace, write_items)?,
        None => write_items(&mut *encoder)?,
    }
    encoder.end_array(name)
}

/// Read a one-dimensional array field; null and absent arrays are empty.
pub fn read_array<T: FieldCodec>(name: &str, decoder: &mut dyn Decoder) -> Result<Vec<T>> {
    let Some(len) = decoder.begin_array(name, T::MIN_BINARY_SIZE)? else {
        return Ok(Vec::new());
    };
    let read_items = |decoder: &mut dyn Decoder| -> Result<Vec<T>> {
        // length already checked against the limits; cap the upfront allocation anyway
        let mut items = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            items.push(T::read_field(T::ELEMENT_NAME, decoder)?);
        }
        Ok(items)
    };
    let items = match T::ITEM_NAMESPACE {
        Some(namespace) => scoped_decode(decoder, namespace, read_items)?,
        None => read_items(&mut *decoder)?,
    };
    decoder.end_array(name)?;
    Ok(items)
}

// ============================================================================
// Whole-document helpers
// ============================================================================

/// Binary encoding of a record (no extension object envelope).
pub fn encode_binary<T: Encodeable>(value: &T, context: &EncodingContext) -> Result<Vec<u8>> {
    let mut encoder = BinaryEncoder::new(context);
    value.encode(&mut encoder)?;
    Ok(encoder.into_bytes())
}

/// Inverse of [`encode_binary`].
pub fn decode_binary<T: Encodeable>(bytes: &[u8], context: &EncodingContext) -> Result<T> {
    let mut decoder = BinaryDecoder::new(bytes, context);
    let value = T::decode(&mut decoder)?;
    if decoder.remaining() != 0 {
        log::debug!(
            "[encoding] {} trailing byte(s) after {}",
            decoder.remaining(),
            T::TYPE_NAME
        );
    }
    Ok(value)
}

/// XML document whose root element is the record's type name in its namespace.
pub fn encode_xml<T: Encodeable>(value: &T, context: &EncodingContext) -> Result<String> {
    let mut encoder = XmlEncoder::new(context);
    crate::encodeable::encode_body(value, &mut encoder)?;
    encoder.finish()
}

/// Inverse of [`encode_xml`].
pub fn decode_xml<T: Encodeable>(xml: &str, context: &EncodingContext) -> Result<T> {
    let document = xml::parse_document(xml)?;
    let mut decoder = XmlDecoder::new(&document, xml, context);
    crate::encodeable::decode_body::<T>(&mut decoder)
}

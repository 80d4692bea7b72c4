// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Variant: a self-describing value of any built-in type.
//!
//! # Binary Layout
//!
//! ```text
//! +------+-----------------------------+
//! | mask | value | length + values     |
//! +------+-----------------------------+
//!   bits 0..5  built-in type id
//!   bit 7      array of that type
//!   bit 6      array dimensions follow (read and discarded)
//! ```
//!
//! # XML Layout
//!
//! ```xml
//! <Field><Value><Int32>5</Int32></Value></Field>
//! <Field><Value><ListOfInt32><Int32>1</Int32><Int32>2</Int32></ListOfInt32></Value></Field>
//! ```

use super::{
    ByteString, DateTime, ExpandedNodeId, ExtensionObject, Guid, LocalizedText, NodeId,
    QualifiedName, StatusCode,
};
use crate::config::UA_TYPES_XSD;
use crate::encoding::{scoped_decode, scoped_encode, Decoder, Encoder, EncodingKind, FieldCodec};
use crate::error::{Error, Result};
use std::fmt;

const ARRAY_FLAG: u8 = 0x80;
const DIMENSIONS_FLAG: u8 = 0x40;
const TYPE_MASK: u8 = 0x3F;

/// OPC UA built-in type ids (Part 6 Table 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BuiltinType {
    Null = 0,
    Boolean = 1,
    SByte = 2,
    Byte = 3,
    Int16 = 4,
    UInt16 = 5,
    Int32 = 6,
    UInt32 = 7,
    Int64 = 8,
    UInt64 = 9,
    Float = 10,
    Double = 11,
    String = 12,
    DateTime = 13,
    Guid = 14,
    ByteString = 15,
    NodeId = 17,
    ExpandedNodeId = 18,
    StatusCode = 19,
    QualifiedName = 20,
    LocalizedText = 21,
    ExtensionObject = 22,
}

impl BuiltinType {
    const ALL: [BuiltinType; 21] = [
        BuiltinType::Null,
        BuiltinType::Boolean,
        BuiltinType::SByte,
        BuiltinType::Byte,
        BuiltinType::Int16,
        BuiltinType::UInt16,
        BuiltinType::Int32,
        BuiltinType::UInt32,
        BuiltinType::Int64,
        BuiltinType::UInt64,
        BuiltinType::Float,
        BuiltinType::Double,
        BuiltinType::String,
        BuiltinType::DateTime,
        BuiltinType::Guid,
        BuiltinType::ByteString,
        BuiltinType::NodeId,
        BuiltinType::ExpandedNodeId,
        BuiltinType::StatusCode,
        BuiltinType::QualifiedName,
        BuiltinType::LocalizedText,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Supported type for a wire id; XmlElement, DataValue, Variant and
    /// DiagnosticInfo bodies are not.
    pub fn from_id(id: u8) -> Option<Self> {
        if id == BuiltinType::ExtensionObject as u8 {
            return Some(BuiltinType::ExtensionObject);
        }
        Self::ALL.iter().copied().find(|ty| *ty as u8 == id)
    }

    /// XML element name.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinType::Null => "Null",
            BuiltinType::Boolean => "Boolean",
            BuiltinType::SByte => "SByte",
            BuiltinType::Byte => "Byte",
            BuiltinType::Int16 => "Int16",
            BuiltinType::UInt16 => "UInt16",
            BuiltinType::Int32 => "Int32",
            BuiltinType::UInt32 => "UInt32",
            BuiltinType::Int64 => "Int64",
            BuiltinType::UInt64 => "UInt64",
            BuiltinType::Float => "Float",
            BuiltinType::Double => "Double",
            BuiltinType::String => "String",
            BuiltinType::DateTime => "DateTime",
            BuiltinType::Guid => "Guid",
            BuiltinType::ByteString => "ByteString",
            BuiltinType::NodeId => "NodeId",
            BuiltinType::ExpandedNodeId => "ExpandedNodeId",
            BuiltinType::StatusCode => "StatusCode",
            BuiltinType::QualifiedName => "QualifiedName",
            BuiltinType::LocalizedText => "LocalizedText",
            BuiltinType::ExtensionObject => "ExtensionObject",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name == "ExtensionObject" {
            return Some(BuiltinType::ExtensionObject);
        }
        Self::ALL.iter().copied().find(|ty| ty.name() == name)
    }

    /// NodeId of the DataType node in namespace 0.
    pub fn data_type_id(self) -> NodeId {
        NodeId::numeric(0, u32::from(self as u8))
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Homogeneous one-dimensional array held by a [`Variant`].
#[derive(Debug, Clone, PartialEq)]
pub struct VariantArray {
    pub element_type: BuiltinType,
    /// Scalars of `element_type`.
    pub values: Vec<Variant>,
}

impl VariantArray {
    /// Fails when a value is not a scalar of `element_type`.
    pub fn new(element_type: BuiltinType, values: Vec<Variant>) -> Result<Self> {
        let array = Self {
            element_type,
            values,
        };
        array.validate()?;
        Ok(array)
    }

    fn validate(&self) -> Result<()> {
        match self
            .values
            .iter()
            .find(|value| value.builtin_type() != self.element_type || value.is_array())
        {
            Some(bad) => Err(Error::Encoding(format!(
                "{} value in a {} array",
                bad.builtin_type(),
                self.element_type
            ))),
            None => Ok(()),
        }
    }
}

/// Value of any supported built-in type, or an array of one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    #[default]
    Empty,
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    DateTime(DateTime),
    Guid(Guid),
    ByteString(ByteString),
    NodeId(NodeId),
    ExpandedNodeId(ExpandedNodeId),
    StatusCode(StatusCode),
    QualifiedName(QualifiedName),
    LocalizedText(LocalizedText),
    ExtensionObject(ExtensionObject),
    Array(VariantArray),
}

impl Variant {
    /// Array variant from typed values.
    pub fn array<T: VariantValue + VariantScalar>(values: Vec<T>) -> Self {
        values.into_variant()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Variant::Array(_))
    }

    /// Built-in type of the value, or of the elements for arrays.
    pub fn builtin_type(&self) -> BuiltinType {
        match self {
            Variant::Empty => BuiltinType::Null,
            Variant::Boolean(_) => BuiltinType::Boolean,
            Variant::SByte(_) => BuiltinType::SByte,
            Variant::Byte(_) => BuiltinType::Byte,
            Variant::Int16(_) => BuiltinType::Int16,
            Variant::UInt16(_) => BuiltinType::UInt16,
            Variant::Int32(_) => BuiltinType::Int32,
            Variant::UInt32(_) => BuiltinType::UInt32,
            Variant::Int64(_) => BuiltinType::Int64,
            Variant::UInt64(_) => BuiltinType::UInt64,
            Variant::Float(_) => BuiltinType::Float,
            Variant::Double(_) => BuiltinType::Double,
            Variant::String(_) => BuiltinType::String,
            Variant::DateTime(_) => BuiltinType::DateTime,
            Variant::Guid(_) => BuiltinType::Guid,
            Variant::ByteString(_) => BuiltinType::ByteString,
            Variant::NodeId(_) => BuiltinType::NodeId,
            Variant::ExpandedNodeId(_) => BuiltinType::ExpandedNodeId,
            Variant::StatusCode(_) => BuiltinType::StatusCode,
            Variant::QualifiedName(_) => BuiltinType::QualifiedName,
            Variant::LocalizedText(_) => BuiltinType::LocalizedText,
            Variant::ExtensionObject(_) => BuiltinType::ExtensionObject,
            Variant::Array(array) => array.element_type,
        }
    }

    /// Typed view of the value.
    pub fn get<T: VariantValue>(&self) -> Option<T> {
        T::from_variant(self)
    }

    fn write_scalar(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        match self {
            Variant::Empty => Ok(()),
            Variant::Boolean(v) => encoder.write_boolean(name, *v),
            Variant::SByte(v) => encoder.write_sbyte(name, *v),
            Variant::Byte(v) => encoder.write_byte(name, *v),
            Variant::Int16(v) => encoder.write_int16(name, *v),
            Variant::UInt16(v) => encoder.write_uint16(name, *v),
            Variant::Int32(v) => encoder.write_int32(name, *v),
            Variant::UInt32(v) => encoder.write_uint32(name, *v),
            Variant::Int64(v) => encoder.write_int64(name, *v),
            Variant::UInt64(v) => encoder.write_uint64(name, *v),
            Variant::Float(v) => encoder.write_float(name, *v),
            Variant::Double(v) => encoder.write_double(name, *v),
            Variant::String(v) => encoder.write_string(name, v),
            Variant::DateTime(v) => encoder.write_date_time(name, *v),
            Variant::Guid(v) => encoder.write_guid(name, v),
            Variant::ByteString(v) => encoder.write_byte_string(name, v),
            Variant::NodeId(v) => encoder.write_node_id(name, v),
            Variant::ExpandedNodeId(v) => encoder.write_expanded_node_id(name, v),
            Variant::StatusCode(v) => encoder.write_status_code(name, *v),
            Variant::QualifiedName(v) => encoder.write_qualified_name(name, v),
            Variant::LocalizedText(v) => encoder.write_localized_text(name, v),
            Variant::ExtensionObject(v) => v.write_field(name, encoder),
            Variant::Array(_) => Err(Error::Encoding(
                "nested arrays are not supported in a Variant".into(),
            )),
        }
    }

    fn read_scalar(ty: BuiltinType, name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        Ok(match ty {
            BuiltinType::Null => Variant::Empty,
            BuiltinType::Boolean => Variant::Boolean(decoder.read_boolean(name)?),
            BuiltinType::SByte => Variant::SByte(decoder.read_sbyte(name)?),
            BuiltinType::Byte => Variant::Byte(decoder.read_byte(name)?),
            BuiltinType::Int16 => Variant::Int16(decoder.read_int16(name)?),
            BuiltinType::UInt16 => Variant::UInt16(decoder.read_uint16(name)?),
            BuiltinType::Int32 => Variant::Int32(decoder.read_int32(name)?),
            BuiltinType::UInt32 => Variant::UInt32(decoder.read_uint32(name)?),
            BuiltinType::Int64 => Variant::Int64(decoder.read_int64(name)?),
            BuiltinType::UInt64 => Variant::UInt64(decoder.read_uint64(name)?),
            BuiltinType::Float => Variant::Float(decoder.read_float(name)?),
            BuiltinType::Double => Variant::Double(decoder.read_double(name)?),
            BuiltinType::String => Variant::String(decoder.read_string(name)?),
            BuiltinType::DateTime => Variant::DateTime(decoder.read_date_time(name)?),
            BuiltinType::Guid => Variant::Guid(decoder.read_guid(name)?),
            BuiltinType::ByteString => Variant::ByteString(decoder.read_byte_string(name)?),
            BuiltinType::NodeId => Variant::NodeId(decoder.read_node_id(name)?),
            BuiltinType::ExpandedNodeId => {
                Variant::ExpandedNodeId(decoder.read_expanded_node_id(name)?)
            }
            BuiltinType::StatusCode => Variant::StatusCode(decoder.read_status_code(name)?),
            BuiltinType::QualifiedName => {
                Variant::QualifiedName(decoder.read_qualified_name(name)?)
            }
            BuiltinType::LocalizedText => {
                Variant::LocalizedText(decoder.read_localized_text(name)?)
            }
            BuiltinType::ExtensionObject => {
                Variant::ExtensionObject(ExtensionObject::read_field(name, decoder)?)
            }
        })
    }

    fn read_items(
        ty: BuiltinType,
        name: &str,
        item_name: &str,
        decoder: &mut dyn Decoder,
    ) -> Result<Variant> {
        let len = decoder.begin_array(name, 1)?;
        let mut values = Vec::with_capacity(len.unwrap_or(0).min(1024));
        for _ in 0..len.unwrap_or(0) {
            values.push(Self::read_scalar(ty, item_name, decoder)?);
        }
        if len.is_some() {
            decoder.end_array(name)?;
        }
        Ok(Variant::Array(VariantArray {
            element_type: ty,
            values,
        }))
    }

    fn write_binary(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        match self {
            Variant::Array(array) => {
                array.validate()?;
                encoder.write_byte(name, array.element_type.id() | ARRAY_FLAG)?;
                encoder.begin_array(name, array.values.len())?;
                for value in &array.values {
                    value.write_scalar(name, encoder)?;
                }
                encoder.end_array(name)
            }
            scalar => {
                encoder.write_byte(name, scalar.builtin_type().id())?;
                scalar.write_scalar(name, encoder)
            }
        }
    }

    fn read_binary(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        let mask = decoder.read_byte(name)?;
        let ty = BuiltinType::from_id(mask & TYPE_MASK).ok_or_else(|| {
            Error::decoding(
                name,
                format!("unsupported Variant type id {}", mask & TYPE_MASK),
            )
        })?;
        if mask & ARRAY_FLAG == 0 {
            return Self::read_scalar(ty, name, decoder);
        }
        let value = Self::read_items(ty, name, name, decoder)?;
        if mask & DIMENSIONS_FLAG != 0 {
            let dimensions: Vec<i32> = FieldCodec::read_field("ArrayDimensions", decoder)?;
            log::debug!("[variant] ignoring array dimensions {dimensions:?}");
        }
        Ok(value)
    }

    fn write_xml(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        encoder.begin_structure(name)?;
        scoped_encode(encoder, UA_TYPES_XSD, |encoder| {
            if self.is_empty() {
                return Ok(());
            }
            encoder.begin_structure("Value")?;
            match self {
                Variant::Array(array) => {
                    array.validate()?;
                    let item = array.element_type.name();
                    let list = format!("ListOf{item}");
                    encoder.begin_array(&list, array.values.len())?;
                    for value in &array.values {
                        value.write_scalar(item, encoder)?;
                    }
                    encoder.end_array(&list)?;
                }
                scalar => scalar.write_scalar(scalar.builtin_type().name(), encoder)?,
            }
            encoder.end_structure("Value")
        })?;
        encoder.end_structure(name)
    }

    fn read_xml(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        if !decoder.begin_structure(name)? {
            return Ok(Variant::Empty);
        }
        let value = scoped_decode(decoder, UA_TYPES_XSD, |decoder| {
            if decoder.next_element_name().as_deref() != Some("Value") {
                return Ok(Variant::Empty);
            }
            decoder.begin_structure("Value")?;
            let Some(element) = decoder.next_element_name() else {
                decoder.end_structure("Value")?;
                return Ok(Variant::Empty);
            };
            let (type_name, is_array) = match element.strip_prefix("ListOf") {
                Some(item) => (item, true),
                None => (element.as_str(), false),
            };
            let ty = BuiltinType::from_name(type_name).ok_or_else(|| {
                Error::decoding(name, format!("unsupported Variant element <{element}>"))
            })?;
            let value = if is_array {
                Self::read_items(ty, &element, type_name, decoder)?
            } else {
                Self::read_scalar(ty, &element, decoder)?
            };
            decoder.end_structure("Value")?;
            Ok(value)
        })?;
        decoder.end_structure(name)?;
        Ok(value)
    }
}

impl FieldCodec for Variant {
    const ELEMENT_NAME: &'static str = "Variant";
    const ITEM_NAMESPACE: Option<&'static str> = Some(UA_TYPES_XSD);

    fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        match encoder.kind() {
            EncodingKind::Binary => self.write_binary(name, encoder),
            EncodingKind::Xml => self.write_xml(name, encoder),
        }
    }

    fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        match decoder.kind() {
            EncodingKind::Binary => Self::read_binary(name, decoder),
            EncodingKind::Xml => Self::read_xml(name, decoder),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Empty => f.write_str("(empty)"),
            Variant::Boolean(v) => write!(f, "{v}"),
            Variant::SByte(v) => write!(f, "{v}"),
            Variant::Byte(v) => write!(f, "{v}"),
            Variant::Int16(v) => write!(f, "{v}"),
            Variant::UInt16(v) => write!(f, "{v}"),
            Variant::Int32(v) => write!(f, "{v}"),
            Variant::UInt32(v) => write!(f, "{v}"),
            Variant::Int64(v) => write!(f, "{v}"),
            Variant::UInt64(v) => write!(f, "{v}"),
            Variant::Float(v) => write!(f, "{v}"),
            Variant::Double(v) => write!(f, "{v}"),
            Variant::String(v) => write!(f, "{v:?}"),
            Variant::DateTime(v) => write!(f, "{v}"),
            Variant::Guid(v) => write!(f, "{v}"),
            Variant::ByteString(v) => write!(f, "{}", v.to_base64()),
            Variant::NodeId(v) => write!(f, "{v}"),
            Variant::ExpandedNodeId(v) => write!(f, "{v}"),
            Variant::StatusCode(v) => write!(f, "{v}"),
            Variant::QualifiedName(v) => write!(f, "{v}"),
            Variant::LocalizedText(v) => write!(f, "{v:?}"),
            Variant::ExtensionObject(v) => write!(f, "{v}"),
            Variant::Array(array) => {
                write!(f, "{}[", array.element_type)?;
                for (i, value) in array.values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// ============================================================================
// Typed conversion
// ============================================================================

/// Conversion between a Rust value and a [`Variant`].
pub trait VariantValue: Sized {
    fn into_variant(self) -> Variant;
    fn from_variant(value: &Variant) -> Option<Self>;
}

/// Types that can be elements of a Variant array.
pub trait VariantScalar {
    const BUILTIN_TYPE: BuiltinType;
}

macro_rules! impl_variant_value {
    ($type:ty, $variant:ident) => {
        impl VariantValue for $type {
            fn into_variant(self) -> Variant {
                Variant::$variant(self)
            }

            fn from_variant(value: &Variant) -> Option<Self> {
                match value {
                    Variant::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }

        impl VariantScalar for $type {
            const BUILTIN_TYPE: BuiltinType = BuiltinType::$variant;
        }
    };
}

impl_variant_value!(bool, Boolean);
impl_variant_value!(i8, SByte);
impl_variant_value!(u8, Byte);
impl_variant_value!(i16, Int16);
impl_variant_value!(u16, UInt16);
impl_variant_value!(i32, Int32);
impl_variant_value!(u32, UInt32);
impl_variant_value!(i64, Int64);
impl_variant_value!(u64, UInt64);
impl_variant_value!(f32, Float);
impl_variant_value!(f64, Double);
impl_variant_value!(String, String);
impl_variant_value!(DateTime, DateTime);
impl_variant_value!(Guid, Guid);
impl_variant_value!(ByteString, ByteString);
impl_variant_value!(NodeId, NodeId);
impl_variant_value!(ExpandedNodeId, ExpandedNodeId);
impl_variant_value!(StatusCode, StatusCode);
impl_variant_value!(QualifiedName, QualifiedName);
impl_variant_value!(LocalizedText, LocalizedText);
impl_variant_value!(ExtensionObject, ExtensionObject);

impl<T: VariantValue + VariantScalar> VariantValue for Vec<T> {
    fn into_variant(self) -> Variant {
        Variant::Array(VariantArray {
            element_type: T::BUILTIN_TYPE,
            values: self.into_iter().map(VariantValue::into_variant).collect(),
        })
    }

    fn from_variant(value: &Variant) -> Option<Self> {
        match value {
            Variant::Array(array) if array.element_type == T::BUILTIN_TYPE => {
                array.values.iter().map(T::from_variant).collect()
            }
            _ => None,
        }
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{BinaryDecoder, BinaryEncoder, EncodingContext, XmlDecoder, XmlEncoder};

    fn binary_roundtrip(value: &Variant) -> (Vec<u8>, Variant) {
        let context = EncodingContext::default();
        let mut encoder = BinaryEncoder::new(&context);
        value.write_field("Value", &mut encoder).expect("encode");
        let bytes = encoder.into_bytes();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        let decoded = Variant::read_field("Value", &mut decoder).expect("decode");
        (bytes, decoded)
    }

    fn xml_roundtrip(value: &Variant) -> (String, Variant) {
        let context = EncodingContext::default();
        let mut encoder = XmlEncoder::new(&context);
        scoped_encode(&mut encoder, "urn:test", |e| value.write_field("Field", e))
            .expect("encode");
        let xml = encoder.finish().expect("finish");
        let document = crate::encoding::xml::parse_document(&xml).expect("parse");
        let mut decoder = XmlDecoder::new(&document, &xml, &context);
        let decoded = scoped_decode(&mut decoder, "urn:test", |d| Variant::read_field("Field", d))
            .expect("decode");
        (xml, decoded)
    }

    #[test]
    fn test_scalar_binary_layout() {
        let (bytes, decoded) = binary_roundtrip(&Variant::Int32(5));
        assert_eq!(bytes, vec![6, 5, 0, 0, 0]);
        assert_eq!(decoded, Variant::Int32(5));

        let (bytes, decoded) = binary_roundtrip(&Variant::Empty);
        assert_eq!(bytes, vec![0]);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_array_binary_layout() {
        let value = Variant::array(vec![1u16, 2]);
        let (bytes, decoded) = binary_roundtrip(&value);
        assert_eq!(bytes, vec![0x85, 2, 0, 0, 0, 1, 0, 2, 0]);
        assert_eq!(decoded, value);
        assert_eq!(decoded.get::<Vec<u16>>(), Some(vec![1, 2]));
    }

    #[test]
    fn test_array_dimensions_are_skipped() {
        let bytes = [0xC3u8, 2, 0, 0, 0, 7, 8, 1, 0, 0, 0, 2, 0, 0, 0];
        let context = EncodingContext::default();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        let value = Variant::read_field("Value", &mut decoder).expect("decode");
        assert_eq!(value, Variant::array(vec![7u8, 8]));
        assert_eq!(decoder.remaining(), 0);
    }

    #[test]
    fn test_unsupported_type_id() {
        let bytes = [16u8, 0, 0, 0, 0];
        let context = EncodingContext::default();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert!(Variant::read_field("Value", &mut decoder).is_err());
    }

    #[test]
    fn test_xml_forms() {
        let (xml, decoded) = xml_roundtrip(&Variant::String("FF".into()));
        assert!(xml.contains("<String>FF</String></Value></Field>"), "{xml}");
        assert_eq!(decoded, Variant::String("FF".into()));

        let value = Variant::array(vec![true, false]);
        let (xml, decoded) = xml_roundtrip(&value);
        assert!(
            xml.contains("<ListOfBoolean><Boolean>true</Boolean><Boolean>false</Boolean></ListOfBoolean>"),
            "{xml}"
        );
        assert_eq!(decoded, value);

        let (xml, decoded) = xml_roundtrip(&Variant::Empty);
        assert_eq!(xml, "<Field xmlns=\"urn:test\"></Field>");
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_mixed_array_rejected() {
        let array = VariantArray {
            element_type: BuiltinType::Int32,
            values: vec![Variant::Int32(1), Variant::Boolean(true)],
        };
        let context = EncodingContext::default();
        let mut encoder = BinaryEncoder::new(&context);
        assert!(Variant::Array(array)
            .write_field("Value", &mut encoder)
            .is_err());
        assert!(VariantArray::new(BuiltinType::Byte, vec![Variant::Byte(1)]).is_ok());
    }

    #[test]
    fn test_builtin_type_names() {
        for id in 0..=22u8 {
            if let Some(ty) = BuiltinType::from_id(id) {
                assert_eq!(ty.id(), id);
                assert_eq!(BuiltinType::from_name(ty.name()), Some(ty));
            }
        }
        assert!(BuiltinType::from_id(16).is_none());
        assert_eq!(BuiltinType::Int32.data_type_id(), NodeId::numeric(0, 6));
    }
}

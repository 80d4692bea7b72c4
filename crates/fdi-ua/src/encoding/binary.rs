// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA Part 6 binary encoding.
//!
//! # Wire Format
//!
//! ```text
//! Boolean..Double   little-endian, fixed width
//! String/ByteString Int32 length (-1 = null) + bytes
//! Array             Int32 length (-1 = null) + items
//! NodeId            encoding byte + compact body:
//!                     0x00 two-byte   [id:u8]              ns == 0, id <= 255
//!                     0x01 four-byte  [ns:u8][id:u16]      ns <= 255, id <= 65535
//!                     0x02 numeric    [ns:u16][id:u32]
//!                     0x03 string     [ns:u16][String]
//!                     0x04 guid       [ns:u16][Guid]
//!                     0x05 opaque     [ns:u16][ByteString]
//! ExpandedNodeId    NodeId with flags 0x80 (namespace URI follows)
//!                   and 0x40 (server index follows)
//! LocalizedText     mask (0x01 locale, 0x02 text) + present strings
//! ```
//!
//! Field names and namespaces do not appear on the wire.

use super::cursor::{ReadCursor, WriteCursor};
use super::{Decoder, Encoder, EncodingContext, EncodingKind};
use crate::config::{EncodingLimits, NULL_LENGTH};
use crate::error::{Error, Result};
use crate::types::{
    ByteString, DateTime, ExpandedNodeId, Guid, Identifier, LocalizedText, NodeId,
    QualifiedName, StatusCode,
};

const NODE_ID_TWO_BYTE: u8 = 0x00;
const NODE_ID_FOUR_BYTE: u8 = 0x01;
const NODE_ID_NUMERIC: u8 = 0x02;
const NODE_ID_STRING: u8 = 0x03;
const NODE_ID_GUID: u8 = 0x04;
const NODE_ID_OPAQUE: u8 = 0x05;
const NODE_ID_TYPE_MASK: u8 = 0x3F;

const EXPANDED_NAMESPACE_URI_FLAG: u8 = 0x80;
const EXPANDED_SERVER_INDEX_FLAG: u8 = 0x40;

const LOCALIZED_TEXT_LOCALE: u8 = 0x01;
const LOCALIZED_TEXT_TEXT: u8 = 0x02;

fn length_prefix(len: usize) -> Result<i32> {
    i32::try_from(len)
        .map_err(|_| Error::Encoding(format!("length {len} does not fit an Int32 prefix")))
}

// ============================================================================
// Encoder
// ============================================================================

/// Appends the binary encoding to an owned buffer.
pub struct BinaryEncoder<'a> {
    context: &'a EncodingContext,
    cursor: WriteCursor,
    depth: usize,
}

impl<'a> BinaryEncoder<'a> {
    pub fn new(context: &'a EncodingContext) -> Self {
        Self::nested(context, 0)
    }

    /// Encoder for an extension object body, continuing the parent's depth.
    pub fn nested(context: &'a EncodingContext, depth: usize) -> Self {
        Self {
            context,
            cursor: WriteCursor::with_capacity(64),
            depth,
        }
    }

    pub fn len(&self) -> usize {
        self.cursor.offset()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.offset() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    fn put_length(&mut self, len: usize) -> Result<()> {
        self.cursor.write_i32_le(length_prefix(len)?);
        Ok(())
    }

    fn put_string(&mut self, value: &str) -> Result<()> {
        self.put_length(value.len())?;
        self.cursor.write_bytes(value.as_bytes());
        Ok(())
    }

    fn put_byte_string(&mut self, value: &[u8]) -> Result<()> {
        self.put_length(value.len())?;
        self.cursor.write_bytes(value);
        Ok(())
    }

    fn put_guid(&mut self, value: &Guid) {
        self.cursor.write_u32_le(value.data1);
        self.cursor.write_u16_le(value.data2);
        self.cursor.write_u16_le(value.data3);
        self.cursor.write_bytes(&value.data4);
    }

    /// NodeId body with the smallest encoding that fits; `flags` are OR-ed
    /// into the encoding byte.
    fn put_node_id(&mut self, value: &NodeId, flags: u8) -> Result<()> {
        let ns = value.namespace;
        match &value.identifier {
            Identifier::Numeric(id) => match (u8::try_from(ns), u8::try_from(*id), u16::try_from(*id)) {
                (Ok(0), Ok(id), _) => {
                    self.cursor.write_u8(NODE_ID_TWO_BYTE | flags);
                    self.cursor.write_u8(id);
                }
                (Ok(ns), _, Ok(id)) => {
                    self.cursor.write_u8(NODE_ID_FOUR_BYTE | flags);
                    self.cursor.write_u8(ns);
                    self.cursor.write_u16_le(id);
                }
                _ => {
                    self.cursor.write_u8(NODE_ID_NUMERIC | flags);
                    self.cursor.write_u16_le(ns);
                    self.cursor.write_u32_le(*id);
                }
            },
            Identifier::String(id) => {
                self.cursor.write_u8(NODE_ID_STRING | flags);
                self.cursor.write_u16_le(ns);
                self.put_string(id)?;
            }
            Identifier::Guid(id) => {
                self.cursor.write_u8(NODE_ID_GUID | flags);
                self.cursor.write_u16_le(ns);
                self.put_guid(id);
            }
            Identifier::Opaque(id) => {
                self.cursor.write_u8(NODE_ID_OPAQUE | flags);
                self.cursor.write_u16_le(ns);
                self.put_byte_string(id)?;
            }
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        EncodingLimits::check(
            "nesting depth",
            self.depth,
            self.context.limits().max_nesting_depth,
        )
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Encoder for BinaryEncoder<'_> {
    fn kind(&self) -> EncodingKind {
        EncodingKind::Binary
    }

    fn context(&self) -> &EncodingContext {
        self.context
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn push_namespace(&mut self, _namespace_uri: &str) {}

    fn pop_namespace(&mut self) {}

    fn write_boolean(&mut self, _name: &str, value: bool) -> Result<()> {
        self.cursor.write_u8(u8::from(value));
        Ok(())
    }

    fn write_sbyte(&mut self, _name: &str, value: i8) -> Result<()> {
        self.cursor.write_i8(value);
        Ok(())
    }

    fn write_byte(&mut self, _name: &str, value: u8) -> Result<()> {
        self.cursor.write_u8(value);
        Ok(())
    }

    fn write_int16(&mut self, _name: &str, value: i16) -> Result<()> {
        self.cursor.write_i16_le(value);
        Ok(())
    }

    fn write_uint16(&mut self, _name: &str, value: u16) -> Result<()> {
        self.cursor.write_u16_le(value);
        Ok(())
    }

    fn write_int32(&mut self, _name: &str, value: i32) -> Result<()> {
        self.cursor.write_i32_le(value);
        Ok(())
    }

    fn write_uint32(&mut self, _name: &str, value: u32) -> Result<()> {
        self.cursor.write_u32_le(value);
        Ok(())
    }

    fn write_int64(&mut self, _name: &str, value: i64) -> Result<()> {
        self.cursor.write_i64_le(value);
        Ok(())
    }

    fn write_uint64(&mut self, _name: &str, value: u64) -> Result<()> {
        self.cursor.write_u64_le(value);
        Ok(())
    }

    fn write_float(&mut self, _name: &str, value: f32) -> Result<()> {
        self.cursor.write_f32_le(value);
        Ok(())
    }

    fn write_double(&mut self, _name: &str, value: f64) -> Result<()> {
        self.cursor.write_f64_le(value);
        Ok(())
    }

    fn write_string(&mut self, _name: &str, value: &str) -> Result<()> {
        self.put_string(value)
    }

    fn write_date_time(&mut self, _name: &str, value: DateTime) -> Result<()> {
        self.cursor.write_i64_le(value.ticks());
        Ok(())
    }

    fn write_guid(&mut self, _name: &str, value: &Guid) -> Result<()> {
        self.put_guid(value);
        Ok(())
    }

    fn write_byte_string(&mut self, _name: &str, value: &[u8]) -> Result<()> {
        self.put_byte_string(value)
    }

    fn write_node_id(&mut self, _name: &str, value: &NodeId) -> Result<()> {
        self.put_node_id(value, 0)
    }

    fn write_expanded_node_id(&mut self, _name: &str, value: &ExpandedNodeId) -> Result<()> {
        let mut flags = 0;
        if !value.namespace_uri.is_empty() {
            flags |= EXPANDED_NAMESPACE_URI_FLAG;
        }
        if value.server_index != 0 {
            flags |= EXPANDED_SERVER_INDEX_FLAG;
        }
        self.put_node_id(&value.node_id, flags)?;
        if !value.namespace_uri.is_empty() {
            self.put_string(&value.namespace_uri)?;
        }
        if value.server_index != 0 {
            self.cursor.write_u32_le(value.server_index);
        }
        Ok(())
    }

    fn write_status_code(&mut self, _name: &str, value: StatusCode) -> Result<()> {
        self.cursor.write_u32_le(value.bits());
        Ok(())
    }

    fn write_qualified_name(&mut self, _name: &str, value: &QualifiedName) -> Result<()> {
        self.cursor.write_u16_le(value.namespace);
        self.put_string(&value.name)
    }

    fn write_localized_text(&mut self, _name: &str, value: &LocalizedText) -> Result<()> {
        let mut mask = 0;
        if !value.locale.is_empty() {
            mask |= LOCALIZED_TEXT_LOCALE;
        }
        if !value.text.is_empty() {
            mask |= LOCALIZED_TEXT_TEXT;
        }
        self.cursor.write_u8(mask);
        if mask & LOCALIZED_TEXT_LOCALE != 0 {
            self.put_string(&value.locale)?;
        }
        if mask & LOCALIZED_TEXT_TEXT != 0 {
            self.put_string(&value.text)?;
        }
        Ok(())
    }

    fn write_enumerated(&mut self, _name: &str, _symbol: &str, value: i32) -> Result<()> {
        self.cursor.write_i32_le(value);
        Ok(())
    }

    fn begin_structure(&mut self, _name: &str) -> Result<()> {
        self.enter()
    }

    fn end_structure(&mut self, _name: &str) -> Result<()> {
        self.leave();
        Ok(())
    }

    fn begin_array(&mut self, _name: &str, len: usize) -> Result<()> {
        self.enter()?;
        self.put_length(len)
    }

    fn end_array(&mut self, _name: &str) -> Result<()> {
        self.leave();
        Ok(())
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Reads the binary encoding from a borrowed buffer.
pub struct BinaryDecoder<'a> {
    context: &'a EncodingContext,
    cursor: ReadCursor<'a>,
    depth: usize,
}

impl<'a> BinaryDecoder<'a> {
    pub fn new(bytes: &'a [u8], context: &'a EncodingContext) -> Self {
        Self::nested(bytes, context, 0)
    }

    /// Decoder for an extension object body, continuing the parent's depth.
    pub fn nested(bytes: &'a [u8], context: &'a EncodingContext, depth: usize) -> Self {
        Self {
            context,
            cursor: ReadCursor::new(bytes),
            depth,
        }
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Int32 length prefix; `None` for the null length.
    fn take_length(&mut self, name: &str, what: &'static str, limit: usize) -> Result<Option<usize>> {
        let raw = self.cursor.read_i32_le()?;
        if raw == NULL_LENGTH {
            return Ok(None);
        }
        let len = usize::try_from(raw)
            .map_err(|_| Error::decoding(name, format!("negative length {raw}")))?;
        EncodingLimits::check(what, len, limit)?;
        Ok(Some(len))
    }

    fn take_string(&mut self, name: &str) -> Result<String> {
        let limit = self.context.limits().max_string_length;
        let Some(len) = self.take_length(name, "string length", limit)? else {
            return Ok(String::new());
        };
        let bytes = self.cursor.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::decoding(name, format!("invalid UTF-8: {e}")))
    }

    fn take_byte_string(&mut self, name: &str) -> Result<ByteString> {
        let limit = self.context.limits().max_byte_string_length;
        let Some(len) = self.take_length(name, "byte string length", limit)? else {
            return Ok(ByteString::new());
        };
        Ok(ByteString::from(self.cursor.read_bytes(len)?))
    }

    fn take_guid(&mut self) -> Result<Guid> {
        let data1 = self.cursor.read_u32_le()?;
        let data2 = self.cursor.read_u16_le()?;
        let data3 = self.cursor.read_u16_le()?;
        let mut data4 = [0u8; 8];
        data4.copy_from_slice(self.cursor.read_bytes(8)?);
        Ok(Guid::new(data1, data2, data3, data4))
    }

    /// NodeId body; returns the node id and the flag bits of the encoding byte.
    fn take_node_id(&mut self, name: &str) -> Result<(NodeId, u8)> {
        let encoding = self.cursor.read_u8()?;
        let flags = encoding & !NODE_ID_TYPE_MASK;
        let node_id = match encoding & NODE_ID_TYPE_MASK {
            NODE_ID_TWO_BYTE => NodeId::numeric(0, u32::from(self.cursor.read_u8()?)),
            NODE_ID_FOUR_BYTE => {
                let ns = u16::from(self.cursor.read_u8()?);
                NodeId::numeric(ns, u32::from(self.cursor.read_u16_le()?))
            }
            NODE_ID_NUMERIC => {
                let ns = self.cursor.read_u16_le()?;
                NodeId::numeric(ns, self.cursor.read_u32_le()?)
            }
            NODE_ID_STRING => {
                let ns = self.cursor.read_u16_le()?;
                NodeId::new(ns, self.take_string(name)?)
            }
            NODE_ID_GUID => {
                let ns = self.cursor.read_u16_le()?;
                NodeId::new(ns, self.take_guid()?)
            }
            NODE_ID_OPAQUE => {
                let ns = self.cursor.read_u16_le()?;
                NodeId::new(ns, self.take_byte_string(name)?)
            }
            other => {
                return Err(Error::decoding(
                    name,
                    format!("unknown NodeId encoding 0x{other:02X}"),
                ))
            }
        };
        Ok((node_id, flags))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        EncodingLimits::check(
            "nesting depth",
            self.depth,
            self.context.limits().max_nesting_depth,
        )
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Decoder for BinaryDecoder<'_> {
    fn kind(&self) -> EncodingKind {
        EncodingKind::Binary
    }

    fn context(&self) -> &EncodingContext {
        self.context
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn push_namespace(&mut self, _namespace_uri: &str) {}

    fn pop_namespace(&mut self) {}

    fn read_boolean(&mut self, _name: &str) -> Result<bool> {
        Ok(self.cursor.read_u8()? != 0)
    }

    fn read_sbyte(&mut self, _name: &str) -> Result<i8> {
        self.cursor.read_i8()
    }

    fn read_byte(&mut self, _name: &str) -> Result<u8> {
        self.cursor.read_u8()
    }

    fn read_int16(&mut self, _name: &str) -> Result<i16> {
        self.cursor.read_i16_le()
    }

    fn read_uint16(&mut self, _name: &str) -> Result<u16> {
        self.cursor.read_u16_le()
    }

    fn read_int32(&mut self, _name: &str) -> Result<i32> {
        self.cursor.read_i32_le()
    }

    fn read_uint32(&mut self, _name: &str) -> Result<u32> {
        self.cursor.read_u32_le()
    }

    fn read_int64(&mut self, _name: &str) -> Result<i64> {
        self.cursor.read_i64_le()
    }

    fn read_uint64(&mut self, _name: &str) -> Result<u64> {
        self.cursor.read_u64_le()
    }

    fn read_float(&mut self, _name: &str) -> Result<f32> {
        self.cursor.read_f32_le()
    }

    fn read_double(&mut self, _name: &str) -> Result<f64> {
        self.cursor.read_f64_le()
    }

    fn read_string(&mut self, name: &str) -> Result<String> {
        self.take_string(name)
    }

    fn read_date_time(&mut self, _name: &str) -> Result<DateTime> {
        Ok(DateTime::from_ticks(self.cursor.read_i64_le()?))
    }

    fn read_guid(&mut self, _name: &str) -> Result<Guid> {
        self.take_guid()
    }

    fn read_byte_string(&mut self, name: &str) -> Result<ByteString> {
        self.take_byte_string(name)
    }

    fn read_node_id(&mut self, name: &str) -> Result<NodeId> {
        let (node_id, flags) = self.take_node_id(name)?;
        if flags != 0 {
            return Err(Error::decoding(
                name,
                format!("ExpandedNodeId flags 0x{flags:02X} in a NodeId"),
            ));
        }
        Ok(node_id)
    }

    fn read_expanded_node_id(&mut self, name: &str) -> Result<ExpandedNodeId> {
        let (node_id, flags) = self.take_node_id(name)?;
        let namespace_uri = if flags & EXPANDED_NAMESPACE_URI_FLAG != 0 {
            self.take_string(name)?
        } else {
            String::new()
        };
        let server_index = if flags & EXPANDED_SERVER_INDEX_FLAG != 0 {
            self.cursor.read_u32_le()?
        } else {
            0
        };
        Ok(ExpandedNodeId {
            node_id,
            namespace_uri,
            server_index,
        })
    }

    fn read_status_code(&mut self, _name: &str) -> Result<StatusCode> {
        Ok(StatusCode(self.cursor.read_u32_le()?))
    }

    fn read_qualified_name(&mut self, name: &str) -> Result<QualifiedName> {
        let namespace = self.cursor.read_u16_le()?;
        Ok(QualifiedName::new(namespace, self.take_string(name)?))
    }

    fn read_localized_text(&mut self, name: &str) -> Result<LocalizedText> {
        let mask = self.cursor.read_u8()?;
        let locale = if mask & LOCALIZED_TEXT_LOCALE != 0 {
            self.take_string(name)?
        } else {
            String::new()
        };
        let text = if mask & LOCALIZED_TEXT_TEXT != 0 {
            self.take_string(name)?
        } else {
            String::new()
        };
        Ok(LocalizedText::new(locale, text))
    }

    fn read_enumerated(&mut self, _name: &str) -> Result<i32> {
        self.cursor.read_i32_le()
    }

    fn begin_structure(&mut self, _name: &str) -> Result<bool> {
        self.enter()?;
        Ok(true)
    }

    fn end_structure(&mut self, _name: &str) -> Result<()> {
        self.leave();
        Ok(())
    }

    fn begin_array(&mut self, name: &str, min_item_size: usize) -> Result<Option<usize>> {
        let limit = self.context.limits().max_array_length;
        let Some(len) = self.take_length(name, "array length", limit)? else {
            return Ok(None);
        };
        // zero-sized items (empty records) are bounded by the length limit only
        if len.saturating_mul(min_item_size) > self.cursor.remaining() {
            return Err(Error::decoding(
                name,
                format!(
                    "array of {len} items of at least {min_item_size} byte(s) exceeds the {} remaining bytes",
                    self.cursor.remaining()
                ),
            ));
        }
        self.enter()?;
        Ok(Some(len))
    }

    fn end_array(&mut self, _name: &str) -> Result<()> {
        self.leave();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with(f: impl FnOnce(&mut BinaryEncoder<'_>) -> Result<()>) -> Vec<u8> {
        let context = EncodingContext::default();
        let mut encoder = BinaryEncoder::new(&context);
        f(&mut encoder).expect("encode");
        encoder.into_bytes()
    }

    #[test]
    fn test_node_id_compact_forms() {
        let bytes = encode_with(|e| e.write_node_id("Id", &NodeId::numeric(0, 72)));
        assert_eq!(bytes, vec![0x00, 0x48]);

        let bytes = encode_with(|e| e.write_node_id("Id", &NodeId::numeric(5, 1025)));
        assert_eq!(bytes, vec![0x01, 0x05, 0x01, 0x04]);

        let bytes = encode_with(|e| e.write_node_id("Id", &NodeId::numeric(300, 7)));
        assert_eq!(bytes, vec![0x02, 0x2C, 0x01, 0x07, 0x00, 0x00, 0x00]);

        let bytes = encode_with(|e| e.write_node_id("Id", &NodeId::string(1, "Hot")));
        assert_eq!(
            bytes,
            vec![0x03, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, b'H', b'o', b't']
        );
    }

    #[test]
    fn test_expanded_node_id_flags() {
        let id = ExpandedNodeId {
            node_id: NodeId::numeric(0, 1),
            namespace_uri: "u".into(),
            server_index: 2,
        };
        let bytes = encode_with(|e| e.write_expanded_node_id("Id", &id));
        assert_eq!(
            bytes,
            vec![0xC0, 0x01, 0x01, 0x00, 0x00, 0x00, b'u', 0x02, 0x00, 0x00, 0x00]
        );

        let context = EncodingContext::default();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert_eq!(decoder.read_expanded_node_id("Id").expect("decode"), id);
    }

    #[test]
    fn test_flags_rejected_in_plain_node_id() {
        let context = EncodingContext::default();
        let bytes = [0x80u8, 0x01, 0x00, 0x00, 0x00, 0x00];
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert!(decoder.read_node_id("Id").is_err());
    }

    #[test]
    fn test_null_string_decodes_empty() {
        let context = EncodingContext::default();
        let bytes = NULL_LENGTH.to_le_bytes();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert_eq!(decoder.read_string("Name").expect("decode"), "");
    }

    #[test]
    fn test_string_limit() {
        let mut context = EncodingContext::default();
        context.config.limits.max_string_length = 2;
        let bytes = encode_with(|e| e.write_string("Name", "abc"));
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        let err = decoder.read_string("Name").unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { actual: 3, limit: 2, .. }));
    }

    #[test]
    fn test_localized_text_mask() {
        let bytes = encode_with(|e| e.write_localized_text("Text", &LocalizedText::text("A")));
        assert_eq!(bytes, vec![0x02, 0x01, 0x00, 0x00, 0x00, b'A']);

        let bytes = encode_with(|e| e.write_localized_text("Text", &LocalizedText::default()));
        assert_eq!(bytes, vec![0x00]);
    }

    #[test]
    fn test_nesting_depth_limit() {
        let mut context = EncodingContext::default();
        context.config.limits.max_nesting_depth = 2;
        let mut encoder = BinaryEncoder::new(&context);
        encoder.begin_structure("A").expect("depth 1");
        encoder.begin_structure("B").expect("depth 2");
        let err = encoder.begin_structure("C").unwrap_err();
        assert!(matches!(err, Error::LimitExceeded { what: "nesting depth", .. }));
    }

    #[test]
    fn test_array_longer_than_input() {
        let context = EncodingContext::default();
        let bytes = 1000i32.to_le_bytes();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert!(decoder.begin_array("Values", 1).is_err());
    }

    #[test]
    fn test_array_of_zero_sized_items() {
        let context = EncodingContext::default();
        let bytes = 3i32.to_le_bytes();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert_eq!(decoder.begin_array("Markers", 0).expect("length"), Some(3));

        let mut bytes = 2i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0; 7]);
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert!(decoder.begin_array("Values", 4).is_err());
    }

    #[test]
    fn test_negative_length_rejected() {
        let context = EncodingContext::default();
        let bytes = (-2i32).to_le_bytes();
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        assert!(decoder.read_byte_string("Body").unwrap_err().is_decode_failure());
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Vendor diagnostics attached to a status.
//!
//! # Binary Layout
//!
//! ```text
//! +------+------------+--------------+--------+---------------+----------------+-----------------+---------------------+
//! | Mask | SymbolicId | NamespaceUri | Locale | LocalizedText | AdditionalInfo | InnerStatusCode | InnerDiagnosticInfo |
//! | u8   | 0x01 Int32 | 0x02 Int32   | 0x08   | 0x04 Int32    | 0x10 String    | 0x20 StatusCode | 0x40 (recursive)    |
//! +------+------------+--------------+--------+---------------+----------------+-----------------+---------------------+
//! ```
//!
//! Only the fields whose mask bit is set follow the mask. The Int32 fields
//! are indices into the string table of the enclosing response. In XML every
//! present field is a `Types.xsd` child element in the same order.

use super::StatusCode;
use crate::config::UA_TYPES_XSD;
use crate::encoding::{scoped_decode, scoped_encode, Decoder, Encoder, EncodingKind, FieldCodec};
use crate::error::{Error, Result};

const SYMBOLIC_ID: u8 = 0x01;
const NAMESPACE_URI: u8 = 0x02;
const LOCALIZED_TEXT: u8 = 0x04;
const LOCALE: u8 = 0x08;
const ADDITIONAL_INFO: u8 = 0x10;
const INNER_STATUS_CODE: u8 = 0x20;
const INNER_DIAGNOSTIC_INFO: u8 = 0x40;

/// Diagnostic details; the default value (no field set) is the null info.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub locale: Option<i32>,
    pub localized_text: Option<i32>,
    pub additional_info: Option<String>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

impl DiagnosticInfo {
    pub fn is_null(&self) -> bool {
        self.encoding_mask() == 0
    }

    fn encoding_mask(&self) -> u8 {
        let mut mask = 0;
        let mut set = |present: bool, bit: u8| {
            if present {
                mask |= bit;
            }
        };
        set(self.symbolic_id.is_some(), SYMBOLIC_ID);
        set(self.namespace_uri.is_some(), NAMESPACE_URI);
        set(self.localized_text.is_some(), LOCALIZED_TEXT);
        set(self.locale.is_some(), LOCALE);
        set(self.additional_info.is_some(), ADDITIONAL_INFO);
        set(self.inner_status_code.is_some(), INNER_STATUS_CODE);
        set(self.inner_diagnostic_info.is_some(), INNER_DIAGNOSTIC_INFO);
        mask
    }

    fn write_binary(&self, encoder: &mut dyn Encoder) -> Result<()> {
        encoder.write_byte("EncodingMask", self.encoding_mask())?;
        self.write_fields(encoder)
    }

    fn read_binary(decoder: &mut dyn Decoder) -> Result<Self> {
        let mask = decoder.read_byte("EncodingMask")?;
        if mask & 0x80 != 0 {
            return Err(Error::decoding(
                "EncodingMask",
                format!("reserved bit set in 0x{mask:02X}"),
            ));
        }
        let symbolic_id = read_masked_int32(decoder, mask, SYMBOLIC_ID, "SymbolicId")?;
        let namespace_uri = read_masked_int32(decoder, mask, NAMESPACE_URI, "NamespaceUri")?;
        let locale = read_masked_int32(decoder, mask, LOCALE, "Locale")?;
        let localized_text = read_masked_int32(decoder, mask, LOCALIZED_TEXT, "LocalizedText")?;
        let additional_info = if mask & ADDITIONAL_INFO != 0 {
            Some(decoder.read_string("AdditionalInfo")?)
        } else {
            None
        };
        let inner_status_code = if mask & INNER_STATUS_CODE != 0 {
            Some(decoder.read_status_code("InnerStatusCode")?)
        } else {
            None
        };
        let inner_diagnostic_info = if mask & INNER_DIAGNOSTIC_INFO != 0 {
            Some(Box::new(Self::read_field("InnerDiagnosticInfo", decoder)?))
        } else {
            None
        };
        Ok(Self {
            symbolic_id,
            namespace_uri,
            locale,
            localized_text,
            additional_info,
            inner_status_code,
            inner_diagnostic_info,
        })
    }

    /// Present fields in wire order; shared by both encodings.
    fn write_fields(&self, encoder: &mut dyn Encoder) -> Result<()> {
        for (name, value) in [
            ("SymbolicId", self.symbolic_id),
            ("NamespaceUri", self.namespace_uri),
            ("Locale", self.locale),
            ("LocalizedText", self.localized_text),
        ] {
            if let Some(value) = value {
                encoder.write_int32(name, value)?;
            }
        }
        if let Some(info) = &self.additional_info {
            encoder.write_string("AdditionalInfo", info)?;
        }
        if let Some(code) = self.inner_status_code {
            encoder.write_status_code("InnerStatusCode", code)?;
        }
        if let Some(inner) = &self.inner_diagnostic_info {
            inner.write_field("InnerDiagnosticInfo", encoder)?;
        }
        Ok(())
    }

    fn read_xml_fields(decoder: &mut dyn Decoder) -> Result<Self> {
        let mut value = Self::default();
        if next_is(decoder, "SymbolicId") {
            value.symbolic_id = Some(decoder.read_int32("SymbolicId")?);
        }
        if next_is(decoder, "NamespaceUri") {
            value.namespace_uri = Some(decoder.read_int32("NamespaceUri")?);
        }
        if next_is(decoder, "Locale") {
            value.locale = Some(decoder.read_int32("Locale")?);
        }
        if next_is(decoder, "LocalizedText") {
            value.localized_text = Some(decoder.read_int32("LocalizedText")?);
        }
        if next_is(decoder, "AdditionalInfo") {
            value.additional_info = Some(decoder.read_string("AdditionalInfo")?);
        }
        if next_is(decoder, "InnerStatusCode") {
            value.inner_status_code = Some(decoder.read_status_code("InnerStatusCode")?);
        }
        if next_is(decoder, "InnerDiagnosticInfo") {
            value.inner_diagnostic_info =
                Some(Box::new(Self::read_field("InnerDiagnosticInfo", decoder)?));
        }
        Ok(value)
    }
}

fn read_masked_int32(
    decoder: &mut dyn Decoder,
    mask: u8,
    bit: u8,
    name: &str,
) -> Result<Option<i32>> {
    if mask & bit == 0 {
        return Ok(None);
    }
    decoder.read_int32(name).map(Some)
}

fn next_is(decoder: &dyn Decoder, name: &str) -> bool {
    decoder.next_element_name().as_deref() == Some(name)
}

impl FieldCodec for DiagnosticInfo {
    const ELEMENT_NAME: &'static str = "DiagnosticInfo";
    const ITEM_NAMESPACE: Option<&'static str> = Some(UA_TYPES_XSD);

    fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        // a structure level per info bounds the inner recursion
        encoder.begin_structure(name)?;
        match encoder.kind() {
            EncodingKind::Binary => self.write_binary(encoder)?,
            EncodingKind::Xml => {
                scoped_encode(encoder, UA_TYPES_XSD, |encoder| self.write_fields(encoder))?
            }
        }
        encoder.end_structure(name)
    }

    fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        if !decoder.begin_structure(name)? {
            return Ok(Self::default());
        }
        let value = match decoder.kind() {
            EncodingKind::Binary => Self::read_binary(decoder)?,
            EncodingKind::Xml => scoped_decode(decoder, UA_TYPES_XSD, Self::read_xml_fields)?,
        };
        decoder.end_structure(name)?;
        Ok(value)
    }
}

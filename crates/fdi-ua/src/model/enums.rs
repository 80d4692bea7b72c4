// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DI and FDI7 enumerations.

use crate::config::{DI_NAMESPACE, FDI7_NAMESPACE};
use crate::Enumeration;

/// Health of a device (NAMUR NE 107 categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[repr(i32)]
#[enumeration(namespace = DI_NAMESPACE, data_type = 6244, name = "DeviceHealthEnumeration")]
pub enum DeviceHealthEnum {
    #[default]
    #[enumeration(rename = "NORMAL")]
    Normal = 0,
    #[enumeration(rename = "FAILURE")]
    Failure = 1,
    #[enumeration(rename = "CHECK_FUNCTION")]
    CheckFunction = 2,
    #[enumeration(rename = "OFF_SPEC")]
    OffSpec = 3,
    #[enumeration(rename = "MAINTENANCE_REQUIRED")]
    MaintenanceRequired = 4,
}

/// Connection state of a communication device towards its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[repr(i32)]
#[enumeration(namespace = FDI7_NAMESPACE, data_type = 6010)]
pub enum ConnectionStateEnum {
    #[default]
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
    Failed = 3,
}

/// Address assignment state of a fieldbus device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[repr(i32)]
#[enumeration(namespace = FDI7_NAMESPACE, data_type = 6011)]
pub enum AddressStateEnum {
    #[default]
    Unassigned = 0,
    Temporary = 1,
    Permanent = 2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::xml::parse_document;
    use crate::encoding::{
        BinaryDecoder, BinaryEncoder, Decoder, Encoder, EncodingContext, FieldCodec, XmlDecoder,
        XmlEncoder,
    };
    use crate::error::Error;

    #[test]
    fn test_symbols_and_display() {
        assert_eq!(DeviceHealthEnum::OffSpec.symbol(), "OFF_SPEC");
        assert_eq!(DeviceHealthEnum::OffSpec.to_string(), "OFF_SPEC_3");
        assert_eq!(ConnectionStateEnum::Connected.to_string(), "Connected_2");
        assert_eq!(
            AddressStateEnum::from_symbol("Permanent"),
            Some(AddressStateEnum::Permanent)
        );
        assert_eq!(DeviceHealthEnum::TYPE_NAME, "DeviceHealthEnumeration");
        assert_eq!(DeviceHealthEnum::VARIANTS.len(), 5);
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(i32::from(DeviceHealthEnum::MaintenanceRequired), 4);
        assert_eq!(
            DeviceHealthEnum::try_from(1),
            Ok(DeviceHealthEnum::Failure)
        );
        assert_eq!(AddressStateEnum::try_from(9), Err(9));
    }

    #[test]
    fn test_binary_field_is_int32() {
        let context = EncodingContext::default();
        let mut encoder = BinaryEncoder::new(&context);
        ConnectionStateEnum::Failed
            .write_field("State", &mut encoder)
            .expect("encode");
        let bytes = encoder.into_bytes();
        assert_eq!(bytes, vec![3, 0, 0, 0]);

        let mut decoder = BinaryDecoder::new(&bytes, &context);
        let state = ConnectionStateEnum::read_field("State", &mut decoder).expect("decode");
        assert_eq!(state, ConnectionStateEnum::Failed);
    }

    #[test]
    fn test_out_of_range_value_is_decode_error() {
        let context = EncodingContext::default();
        let bytes = [7u8, 0, 0, 0];
        let mut decoder = BinaryDecoder::new(&bytes, &context);
        let err = AddressStateEnum::read_field("State", &mut decoder).unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }));
    }

    #[test]
    fn test_xml_field_uses_name_value() {
        let context = EncodingContext::default();
        let mut encoder = XmlEncoder::new(&context);
        encoder.push_namespace("urn:test");
        DeviceHealthEnum::CheckFunction
            .write_field("Health", &mut encoder)
            .expect("encode");
        encoder.pop_namespace();
        let xml = encoder.finish().expect("finish");
        assert_eq!(xml, "<Health xmlns=\"urn:test\">CHECK_FUNCTION_2</Health>");

        let document = parse_document(&xml).expect("parse");
        let mut decoder = XmlDecoder::new(&document, &xml, &context);
        decoder.push_namespace("urn:test");
        let health = DeviceHealthEnum::read_field("Health", &mut decoder).expect("decode");
        assert_eq!(health, DeviceHealthEnum::CheckFunction);
    }
}

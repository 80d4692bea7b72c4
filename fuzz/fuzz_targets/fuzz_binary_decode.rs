// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use fdi_ua::encoding::{decode_binary, EncodingContext};
use fdi_ua::model::{NodeRegistration, NodeSnapshot, TransferResultDataDataType};
use fdi_ua::ExtensionObject;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let context = EncodingContext::default();

    // Factory dispatch over every registered type
    if let Ok(object) = ExtensionObject::from_binary(data, &context) {
        let _ = object.to_binary(&context);
        let _ = object.to_xml(&context);
    }

    // Records with nested arrays and structures
    let _ = decode_binary::<NodeRegistration>(data, &context);
    let _ = decode_binary::<TransferResultDataDataType>(data, &context);
    let _ = decode_binary::<NodeSnapshot>(data, &context);
});

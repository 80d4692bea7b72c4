// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use fdi_ua::encoding::{decode_xml, EncodingContext};
use fdi_ua::model::{FfH1ScanResult, NodeRegistration};
use fdi_ua::ExtensionObject;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (XML is text-based)
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    let strict = EncodingContext::default();
    let mut lenient = EncodingContext::default();
    lenient.config.strict_fields = false;

    for context in [&strict, &lenient] {
        let _ = ExtensionObject::from_xml(xml, context);
        let _ = decode_xml::<NodeRegistration>(xml, context);
        let _ = decode_xml::<FfH1ScanResult>(xml, context);
    }
});

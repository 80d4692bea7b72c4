// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use fdi_ua::model::NodeSnapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(snapshot) = NodeSnapshot::from_initialization_string(text) {
            // Mapping against the default table must not panic on foreign URIs
            let _ = snapshot.namespace_mapping(&fdi_ua::NamespaceTable::with_fdi_namespaces());
        }
    }
});

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Global configuration: well-known namespace URIs, built-in type ids and the
//! runtime codec configuration.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: namespace URIs and OPC UA Part 6 constants. Never
//!   hardcode these elsewhere.
//! - **Level 2 (Dynamic)**: [`CodecConfig`], loaded from YAML or built in code,
//!   carried by every encoder/decoder through the `EncodingContext`.
//!
//! # Example YAML
//!
//! ```yaml
//! strict_fields: true
//! reject_unknown_encodings: false
//! limits:
//!   max_string_length: 65536
//!   max_byte_string_length: 1048576
//!   max_array_length: 100000
//!   max_nesting_depth: 64
//! namespaces:
//!   - "urn:vendor:device-model"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// =======================================================================
// Namespaces
// =======================================================================

/// OPC UA base namespace (always index 0 of a namespace table).
pub const UA_NAMESPACE: &str = "http://opcfoundation.org/UA/";

/// XML schema namespace used for the elements of built-in types.
pub const UA_TYPES_XSD: &str = "http://opcfoundation.org/UA/2008/02/Types.xsd";

/// OPC UA for Devices (DI) companion namespace.
pub const DI_NAMESPACE: &str = "http://opcfoundation.org/UA/DI/";

/// XML schema namespace of DI structures.
pub const DI_TYPES_XSD: &str = "http://opcfoundation.org/UA/DI/Types.xsd";

/// FDI communication server (FDI7) namespace.
pub const FDI7_NAMESPACE: &str = "http://fdi-cooperation.com/OPCUA/FDI7/";

/// XML schema namespace of FDI7 structures.
pub const FDI7_TYPES_XSD: &str = "http://fdi-cooperation.com/OPCUA/FDI7/Types.xsd";

// =======================================================================
// Binary encoding constants (OPC UA Part 6 Sec.5.2)
// =======================================================================

/// Length prefix that marks a null string, byte string or array.
pub const NULL_LENGTH: i32 = -1;

/// Default cap for decoded array lengths.
///
/// Far beyond any legitimate information-model payload while still catching
/// allocation bombs from malformed input.
pub const MAX_ARRAY_LENGTH: usize = 1_000_000;

/// Default cap for decoded UTF-8 string lengths in bytes.
pub const MAX_STRING_LENGTH: usize = 1 << 20;

/// Default cap for decoded byte string lengths.
pub const MAX_BYTE_STRING_LENGTH: usize = 16 << 20;

/// Default cap for structure/variant/extension-object nesting.
pub const MAX_NESTING_DEPTH: usize = 64;

// =======================================================================
// Runtime configuration
// =======================================================================

/// Size and depth limits applied while decoding untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingLimits {
    /// Maximum UTF-8 string length in bytes.
    pub max_string_length: usize,
    /// Maximum byte string length.
    pub max_byte_string_length: usize,
    /// Maximum number of array elements.
    pub max_array_length: usize,
    /// Maximum structure nesting depth.
    pub max_nesting_depth: usize,
}

impl Default for EncodingLimits {
    fn default() -> Self {
        Self {
            max_string_length: MAX_STRING_LENGTH,
            max_byte_string_length: MAX_BYTE_STRING_LENGTH,
            max_array_length: MAX_ARRAY_LENGTH,
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl EncodingLimits {
    /// Fail with `LimitExceeded` when `actual` is above `limit`.
    pub(crate) fn check(what: &'static str, actual: usize, limit: usize) -> Result<()> {
        if actual > limit {
            return Err(Error::LimitExceeded {
                what,
                actual,
                limit,
            });
        }
        Ok(())
    }
}

/// Codec behaviour shared by every encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Decode limits.
    pub limits: EncodingLimits,
    /// When set, an XML field that is missing or out of order fails the decode.
    /// When cleared, the field takes its default value.
    pub strict_fields: bool,
    /// When set, an extension object whose encoding id is not registered fails
    /// the decode instead of being kept as an opaque body.
    pub reject_unknown_encodings: bool,
    /// Extra namespace URIs appended to the default namespace table.
    pub namespaces: Vec<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            limits: EncodingLimits::default(),
            strict_fields: true,
            reject_unknown_encodings: false,
            namespaces: Vec::new(),
        }
    }
}

impl CodecConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        log::debug!("[config] loading codec config from {}", path.display());
        Self::from_yaml(&yaml)
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reject limits that would make every decode fail.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_nesting_depth == 0 {
            return Err(Error::Config("max_nesting_depth must be at least 1".into()));
        }
        if self.limits.max_array_length > i32::MAX as usize {
            return Err(Error::Config(format!(
                "max_array_length {} exceeds the Int32 length prefix",
                self.limits.max_array_length
            )));
        }
        if let Some(uri) = self.namespaces.iter().find(|uri| uri.is_empty()) {
            return Err(Error::Config(format!("empty namespace URI {uri:?}")));
        }
        Ok(())
    }
}

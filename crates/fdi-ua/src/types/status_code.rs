// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA status codes.

use std::fmt;

/// 32-bit status code; the top two bits carry the severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);
    pub const UNCERTAIN: StatusCode = StatusCode(0x4000_0000);
    pub const BAD: StatusCode = StatusCode(0x8000_0000);
    pub const BAD_DECODING_ERROR: StatusCode = StatusCode(0x8007_0000);
    pub const BAD_ENCODING_LIMITS_EXCEEDED: StatusCode = StatusCode(0x8008_0000);
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);
    pub const BAD_NOT_IMPLEMENTED: StatusCode = StatusCode(0x8040_0000);
    pub const BAD_INVALID_ARGUMENT: StatusCode = StatusCode(0x80AB_0000);
    pub const BAD_ARGUMENTS_MISSING: StatusCode = StatusCode(0x80DC_0000);
    pub const BAD_TYPE_MISMATCH: StatusCode = StatusCode(0x8074_0000);
    pub const BAD_COMMUNICATION_ERROR: StatusCode = StatusCode(0x8005_0000);

    const SEVERITY_MASK: u32 = 0xC000_0000;

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_good(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0
    }

    pub const fn is_uncertain(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0x4000_0000
    }

    pub const fn is_bad(self) -> bool {
        self.0 & 0x8000_0000 != 0
    }
}

impl From<u32> for StatusCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<StatusCode> for u32 {
    fn from(value: StatusCode) -> Self {
        value.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert!(StatusCode::GOOD.is_good());
        assert!(StatusCode::UNCERTAIN.is_uncertain());
        assert!(StatusCode::BAD_DECODING_ERROR.is_bad());
        assert!(!StatusCode::BAD_DECODING_ERROR.is_good());
        assert_eq!(StatusCode::BAD_DECODING_ERROR.to_string(), "0x80070000");
    }
}

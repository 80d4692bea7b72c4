// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA `DateTime`: 100 ns ticks since 1601-01-01T00:00:00Z.

use crate::error::{Error, Result};
use chrono::{SecondsFormat, TimeZone, Utc};
use std::fmt;

/// Ticks between 1601-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;
const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;

/// Timestamp in 100 ns ticks. The default (0) is the OPC UA "null" DateTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DateTime(pub i64);

impl DateTime {
    pub const MIN: DateTime = DateTime(0);

    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(self) -> i64 {
        self.0
    }

    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Convert to chrono; `None` when outside chrono's range.
    pub fn to_chrono(self) -> Option<chrono::DateTime<Utc>> {
        let unix_ticks = self.0.checked_sub(UNIX_EPOCH_TICKS)?;
        let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
        let nanos = unix_ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK;
        Utc.timestamp_opt(secs, u32::try_from(nanos).ok()?).single()
    }

    /// RFC 3339 text used by the XML encoding.
    pub fn to_rfc3339(self) -> Result<String> {
        self.to_chrono()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            .ok_or_else(|| Error::Encoding(format!("DateTime ticks {} out of range", self.0)))
    }

    pub fn parse_rfc3339(text: &str) -> Result<Self> {
        let parsed = chrono::DateTime::parse_from_rfc3339(text.trim())
            .map_err(|e| Error::decoding("DateTime", format!("'{text}': {e}")))?;
        Ok(Self::from(parsed.with_timezone(&Utc)))
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        let ticks = value
            .timestamp()
            .saturating_mul(TICKS_PER_SECOND)
            .saturating_add(i64::from(value.timestamp_subsec_nanos()) / NANOS_PER_TICK)
            .saturating_add(UNIX_EPOCH_TICKS);
        Self(ticks)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "ticks:{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_1601() {
        assert_eq!(
            DateTime::MIN.to_rfc3339().expect("format"),
            "1601-01-01T00:00:00Z"
        );
        assert_eq!(
            DateTime::parse_rfc3339("1601-01-01T00:00:00Z").expect("parse"),
            DateTime::MIN
        );
    }

    #[test]
    fn test_unix_epoch() {
        let epoch = DateTime::parse_rfc3339("1970-01-01T00:00:00Z").expect("parse");
        assert_eq!(epoch.ticks(), UNIX_EPOCH_TICKS);
    }

    #[test]
    fn test_sub_second_roundtrip() {
        let dt = DateTime::from_ticks(UNIX_EPOCH_TICKS + 1_234_567);
        let text = dt.to_rfc3339().expect("format");
        assert_eq!(text, "1970-01-01T00:00:00.123456700Z");
        assert_eq!(DateTime::parse_rfc3339(&text).expect("parse"), dt);
    }

    #[test]
    fn test_offset_is_normalized() {
        let dt = DateTime::parse_rfc3339("2024-05-01T12:00:00+02:00").expect("parse");
        assert_eq!(dt.to_rfc3339().expect("format"), "2024-05-01T10:00:00Z");
    }
}

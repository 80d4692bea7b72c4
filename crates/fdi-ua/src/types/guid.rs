// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 16-byte globally unique identifier.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Guid laid out as in OPC UA Part 6 (Data1..Data4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    /// The all-zero Guid.
    pub const NULL: Guid = Guid {
        data1: 0,
        data2: 0,
        data3: 0,
        data4: [0; 8],
    };

    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidIdentifier(format!("malformed guid '{s}'"));
        let s = s.trim().trim_start_matches('{').trim_end_matches('}');
        if !s.is_ascii() {
            return Err(invalid());
        }
        let groups: Vec<&str> = s.split('-').collect();
        if groups.len() != 5
            || groups[0].len() != 8
            || groups[1].len() != 4
            || groups[2].len() != 4
            || groups[3].len() != 4
            || groups[4].len() != 12
        {
            return Err(invalid());
        }

        let data1 = u32::from_str_radix(groups[0], 16).map_err(|_| invalid())?;
        let data2 = u16::from_str_radix(groups[1], 16).map_err(|_| invalid())?;
        let data3 = u16::from_str_radix(groups[2], 16).map_err(|_| invalid())?;

        let tail = format!("{}{}", groups[3], groups[4]);
        let mut data4 = [0u8; 8];
        for (i, byte) in data4.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&tail[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }

        Ok(Self::new(data1, data2, data3, data4))
    }
}

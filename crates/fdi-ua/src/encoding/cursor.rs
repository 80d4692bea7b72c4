// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Little-endian byte cursors for the binary encoding.
//!
//! The write side grows a `Vec<u8>`; the read side borrows the input and
//! reports the offset of every short read.

use crate::error::{Error, Result};

/// Generate little-endian append methods.
macro_rules! impl_write_le {
    ($name:ident, $type:ty) => {
        pub fn $name(&mut self, value: $type) {
            self.buffer.extend_from_slice(&value.to_le_bytes());
        }
    };
}

/// Generate bounds-checked little-endian read methods.
macro_rules! impl_read_le {
    ($name:ident, $type:ty, $size:expr) => {
        pub fn $name(&mut self) -> Result<$type> {
            let mut bytes = [0u8; $size];
            bytes.copy_from_slice(self.read_bytes($size)?);
            Ok(<$type>::from_le_bytes(bytes))
        }
    };
}

/// Growable output buffer.
#[derive(Debug, Default)]
pub struct WriteCursor {
    buffer: Vec<u8>,
}

impl WriteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    impl_write_le!(write_u8, u8);
    impl_write_le!(write_i8, i8);
    impl_write_le!(write_u16_le, u16);
    impl_write_le!(write_i16_le, i16);
    impl_write_le!(write_u32_le, u32);
    impl_write_le!(write_i32_le, i32);
    impl_write_le!(write_u64_le, u64);
    impl_write_le!(write_i64_le, i64);
    impl_write_le!(write_f32_le, f32);
    impl_write_le!(write_f64_le, f64);

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn offset(&self) -> usize {
        self.buffer.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

/// Borrowing input cursor.
#[derive(Debug, Clone)]
pub struct ReadCursor<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    impl_read_le!(read_u8, u8, 1);
    impl_read_le!(read_i8, i8, 1);
    impl_read_le!(read_u16_le, u16, 2);
    impl_read_le!(read_i16_le, i16, 2);
    impl_read_le!(read_u32_le, u32, 4);
    impl_read_le!(read_i32_le, i32, 4);
    impl_read_le!(read_u64_le, u64, 8);
    impl_read_le!(read_i64_le, i64, 8);
    impl_read_le!(read_f32_le, f32, 4);
    impl_read_le!(read_f64_le, f64, 8);

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.buffer.len())
            .ok_or(Error::EndOfInput {
                offset: self.offset,
            })?;
        let slice = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reading and writing payload files: raw bytes, base64 text or XML.

use anyhow::Context;
use base64::Engine;
use std::io::{Read, Write};
use std::path::Path;

/// How a binary payload is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BinaryFormat {
    /// Bytes as-is.
    Raw,
    /// Standard base64, whitespace ignored.
    Base64,
}

/// Read `path`, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    let mut data = Vec::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_end(&mut data)
            .context("failed to read stdin")?;
    } else {
        data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(data)
}

/// Write to `path`, or stdout when absent.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(data)?;
            if !data.ends_with(b"\n") {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

pub fn decode_binary_payload(data: &[u8], format: BinaryFormat) -> anyhow::Result<Vec<u8>> {
    match format {
        BinaryFormat::Raw => Ok(data.to_vec()),
        BinaryFormat::Base64 => {
            let text: Vec<u8> = data
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            base64::engine::general_purpose::STANDARD
                .decode(text)
                .context("payload is not valid base64")
        }
    }
}

pub fn encode_binary_payload(bytes: &[u8], format: BinaryFormat) -> Vec<u8> {
    match format {
        BinaryFormat::Raw => bytes.to_vec(),
        BinaryFormat::Base64 => base64::engine::general_purpose::STANDARD
            .encode(bytes)
            .into_bytes(),
    }
}

/// Heuristic: XML documents start with `<` after optional whitespace or BOM.
pub fn looks_like_xml(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'<')
}

/// Space-separated hex, 16 bytes per line.
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(line, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
            format!("{:08X}  {}", line * 16, hex.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

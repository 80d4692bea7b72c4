// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Browse names and human-readable text.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Namespace-qualified name, used as browse name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct QualifiedName {
    pub namespace: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: u16, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace, self.name)
        }
    }
}

impl FromStr for QualifiedName {
    type Err = Error;

    /// `2:SerialNumber` or `SerialNumber` (namespace 0).
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((ns, name)) if !ns.is_empty() && ns.bytes().all(|b| b.is_ascii_digit()) => {
                let namespace = ns
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidIdentifier(format!("bad namespace index '{ns}'")))?;
                Ok(Self::new(namespace, name))
            }
            _ => Ok(Self::new(0, s)),
        }
    }
}

/// Text with an optional locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalizedText {
    pub locale: String,
    pub text: String,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }

    /// Invariant-locale text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new("", text)
    }

    pub fn is_null(&self) -> bool {
        self.locale.is_empty() && self.text.is_empty()
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

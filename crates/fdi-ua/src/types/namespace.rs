// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Namespace table: maps namespace URIs to the indices carried by NodeIds.

use crate::config::{DI_NAMESPACE, FDI7_NAMESPACE, UA_NAMESPACE};
use crate::error::{Error, Result};

/// Ordered list of namespace URIs. Index 0 is always the OPC UA namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceTable {
    uris: Vec<String>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTable {
    /// Table containing only the OPC UA namespace.
    pub fn new() -> Self {
        Self {
            uris: vec![UA_NAMESPACE.to_string()],
        }
    }

    /// `[UA, DI, FDI7]`, the layout used by an FDI communication server.
    pub fn with_fdi_namespaces() -> Self {
        let mut table = Self::new();
        table.get_or_add(DI_NAMESPACE);
        table.get_or_add(FDI7_NAMESPACE);
        table
    }

    /// Build from a URI list. Index 0 is forced to the OPC UA namespace.
    pub fn from_uris<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for uri in uris {
            table.get_or_add(uri);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    pub fn index_of(&self, uri: &str) -> Option<u16> {
        self.uris
            .iter()
            .position(|u| u == uri)
            .and_then(|i| u16::try_from(i).ok())
    }

    pub fn uri_of(&self, index: u16) -> Option<&str> {
        self.uris.get(usize::from(index)).map(String::as_str)
    }

    /// Index of `uri`, failing with `UnknownNamespace` when absent.
    pub fn require(&self, uri: &str) -> Result<u16> {
        self.index_of(uri)
            .ok_or_else(|| Error::UnknownNamespace(uri.to_string()))
    }

    /// Index of `uri`, appending it when not yet present.
    ///
    /// Saturates at `u16::MAX`; a table that large is not a realistic model.
    pub fn get_or_add(&mut self, uri: impl Into<String>) -> u16 {
        let uri = uri.into();
        if let Some(index) = self.index_of(&uri) {
            return index;
        }
        self.uris.push(uri);
        u16::try_from(self.uris.len() - 1).unwrap_or(u16::MAX)
    }

    /// Translate `index` from `other`'s numbering into this table's numbering,
    /// adding the URI when missing.
    pub fn remap_from(&mut self, other: &NamespaceTable, index: u16) -> Result<u16> {
        let uri = other
            .uri_of(index)
            .ok_or_else(|| Error::UnknownNamespace(format!("index {index}")))?;
        Ok(self.get_or_add(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ua_is_index_zero() {
        let table = NamespaceTable::from_uris(["urn:a", UA_NAMESPACE, "urn:b"]);
        assert_eq!(table.index_of(UA_NAMESPACE), Some(0));
        assert_eq!(table.index_of("urn:a"), Some(1));
        assert_eq!(table.index_of("urn:b"), Some(2));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_fdi_layout() {
        let table = NamespaceTable::with_fdi_namespaces();
        assert_eq!(table.uri_of(1), Some(DI_NAMESPACE));
        assert_eq!(table.uri_of(2), Some(FDI7_NAMESPACE));
        assert!(table.uri_of(3).is_none());
        assert!(matches!(
            table.require("urn:missing"),
            Err(Error::UnknownNamespace(_))
        ));
    }

    #[test]
    fn test_remap() {
        let source = NamespaceTable::from_uris([FDI7_NAMESPACE, DI_NAMESPACE]);
        let mut target = NamespaceTable::with_fdi_namespaces();
        assert_eq!(target.remap_from(&source, 1).expect("remap"), 2);
        assert_eq!(target.remap_from(&source, 2).expect("remap"), 1);
        assert_eq!(target.remap_from(&source, 0).expect("remap"), 0);
        assert!(target.remap_from(&source, 9).is_err());
    }
}

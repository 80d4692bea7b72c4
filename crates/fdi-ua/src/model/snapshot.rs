// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static structure of a node type, as carried by initialization strings.
//!
//! An initialization string is the base64 text of a binary-encoded
//! [`NodeSnapshot`]. NodeIds and browse names inside the snapshot use indices
//! into the snapshot's own `namespace_uris`, which are remapped into the
//! context's table when the snapshot is applied.

use super::ua::NodeClass;
use crate::config::{FDI7_NAMESPACE, FDI7_TYPES_XSD};
use crate::encoding::{decode_binary, encode_binary, EncodingContext};
use crate::error::{Error, Result};
use crate::types::{ByteString, NamespaceTable, NodeId, QualifiedName};
use crate::Encodeable;

/// One declared child and its own declared children.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6009, binary_encoding = 6259, xml_encoding = 6283)]
pub struct NodeDeclaration {
    pub node_class: NodeClass,
    pub browse_name: QualifiedName,
    pub type_definition: NodeId,
    /// Variables only.
    pub data_type: NodeId,
    pub value_rank: i32,
    pub children: Vec<NodeDeclaration>,
}

/// Declared structure of one object type.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
             data_type = 6008, binary_encoding = 6258, xml_encoding = 6282)]
pub struct NodeSnapshot {
    /// Namespace table of the snapshot, OPC UA first.
    pub namespace_uris: Vec<String>,
    pub browse_name: QualifiedName,
    pub type_definition: NodeId,
    pub children: NodeDeclarationCollection,
}

impl NodeSnapshot {
    /// Decode a base64 initialization string.
    pub fn from_initialization_string(text: &str) -> Result<Self> {
        let bytes = ByteString::from_base64(text.trim())?;
        decode_binary(&bytes, &EncodingContext::default())
    }

    pub fn to_initialization_string(&self) -> Result<String> {
        let bytes = encode_binary(self, &EncodingContext::default())?;
        Ok(ByteString::from(bytes).to_base64())
    }

    /// Maps snapshot namespace indices to indices of `target`.
    pub fn namespace_mapping(&self, target: &NamespaceTable) -> Result<NamespaceMapping> {
        let indices = self
            .namespace_uris
            .iter()
            .map(|uri| target.require(uri))
            .collect::<Result<Vec<_>>>()?;
        Ok(NamespaceMapping { indices })
    }
}

/// Snapshot-to-context namespace index translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMapping {
    indices: Vec<u16>,
}

impl NamespaceMapping {
    pub fn index(&self, snapshot_index: u16) -> Result<u16> {
        if snapshot_index == 0 && self.indices.is_empty() {
            return Ok(0);
        }
        self.indices
            .get(usize::from(snapshot_index))
            .copied()
            .ok_or_else(|| {
                Error::InvalidState(format!(
                    "snapshot namespace index {snapshot_index} outside its table"
                ))
            })
    }

    pub fn node_id(&self, id: &NodeId) -> Result<NodeId> {
        if id.is_null() {
            return Ok(NodeId::NULL);
        }
        Ok(NodeId {
            namespace: self.index(id.namespace)?,
            identifier: id.identifier.clone(),
        })
    }

    pub fn qualified_name(&self, name: &QualifiedName) -> Result<QualifiedName> {
        Ok(QualifiedName::new(self.index(name.namespace)?, name.name.clone()))
    }
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Base OPC UA types used by the FDI model.

use crate::config::{UA_NAMESPACE, UA_TYPES_XSD};
use crate::types::{LocalizedText, NodeId, QualifiedName};
use crate::{Encodeable, Enumeration};

/// Class of an address-space node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enumeration)]
#[repr(i32)]
#[enumeration(namespace = UA_NAMESPACE, data_type = 257)]
pub enum NodeClass {
    #[default]
    Unspecified = 0,
    Object = 1,
    Variable = 2,
    Method = 4,
    ObjectType = 8,
    VariableType = 16,
    ReferenceType = 32,
    DataType = 64,
    View = 128,
}

/// Declaration of one method argument.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = UA_NAMESPACE, xml_namespace = UA_TYPES_XSD,
             data_type = 296, binary_encoding = 298, xml_encoding = 297)]
pub struct Argument {
    pub name: String,
    pub data_type: NodeId,
    /// -1 scalar, 1 one-dimensional array.
    pub value_rank: i32,
    pub array_dimensions: Vec<u32>,
    pub description: LocalizedText,
}

impl Argument {
    pub fn scalar(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            data_type,
            value_rank: -1,
            ..Self::default()
        }
    }

    pub fn array(name: impl Into<String>, data_type: NodeId) -> Self {
        Self {
            name: name.into(),
            data_type,
            value_rank: 1,
            array_dimensions: vec![0],
            ..Self::default()
        }
    }
}

/// One hop of a relative path.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = UA_NAMESPACE, xml_namespace = UA_TYPES_XSD,
             data_type = 537, binary_encoding = 539, xml_encoding = 538)]
pub struct RelativePathElement {
    pub reference_type_id: NodeId,
    pub is_inverse: bool,
    pub include_subtypes: bool,
    pub target_name: QualifiedName,
}

/// Browse path from a starting node.
#[derive(Debug, Clone, PartialEq, Default, Encodeable)]
#[encodeable(namespace = UA_NAMESPACE, xml_namespace = UA_TYPES_XSD,
             data_type = 540, binary_encoding = 542, xml_encoding = 541)]
pub struct RelativePath {
    pub elements: RelativePathElementCollection,
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA built-in types.

mod byte_string;
mod date_time;
mod diagnostic_info;
mod extension_object;
mod guid;
mod namespace;
mod node_id;
mod qualified_name;
mod status_code;
mod variant;

pub use byte_string::ByteString;
pub use date_time::DateTime;
pub use diagnostic_info::DiagnosticInfo;
pub use extension_object::ExtensionObject;
pub use guid::Guid;
pub use namespace::NamespaceTable;
pub use node_id::{ExpandedNodeId, Identifier, NodeId};
pub use qualified_name::{LocalizedText, QualifiedName};
pub use status_code::StatusCode;
pub use variant::{BuiltinType, Variant, VariantArray, VariantScalar, VariantValue};

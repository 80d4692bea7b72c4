// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # fdi-ua - OPC UA FDI information model
//!
//! Strongly typed records, enumerations and node states of the OPC UA Field
//! Device Integration (FDI) model, with the OPC UA Part 6 binary and XML
//! encodings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fdi_ua::encoding::{decode_binary, encode_binary, EncodingContext};
//! use fdi_ua::model::RegisteredNode;
//! use fdi_ua::types::NodeId;
//! use fdi_ua::Result;
//!
//! fn main() -> Result<()> {
//!     let context = EncodingContext::default();
//!     let node = RegisteredNode {
//!         node_id: NodeId::string(2, "Dev20"),
//!         ..RegisteredNode::default()
//!     };
//!
//!     let bytes = encode_binary(&node, &context)?;
//!     let decoded: RegisteredNode = decode_binary(&bytes, &context)?;
//!     assert_eq!(decoded, node);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                            Model Layer                              |
//! |   Records | Enumerations | Collections | Node states (DI, FDI7)     |
//! +---------------------------------------------------------------------+
//! |                          Contract Layer                             |
//! |   Encodeable (derive) | EncodeableFactory | NodeStateFactory        |
//! +---------------------------------------------------------------------+
//! |                          Encoding Layer                             |
//! |   Encoder/Decoder traits | Binary codec | XML codec (roxmltree)     |
//! +---------------------------------------------------------------------+
//! |                         Built-in Types                              |
//! |   NodeId | QualifiedName | Variant | ExtensionObject | DateTime     |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Encodeable`] | Contract of every record: ids, encode, decode, equality |
//! | [`Collection`] | Ordered list of records, encoded as an array |
//! | [`ExtensionObject`] | Type-tagged body, decoded through the factory |
//! | [`NodeState`] | Closed set of typed node kinds |
//! | [`CodecConfig`] | Limits and decode policy, loadable from YAML |
//!
//! ## Modules Overview
//!
//! - [`types`] - built-in OPC UA types
//! - [`encoding`] - binary and XML codecs
//! - [`model`] - FDI records, enumerations and node types (start here)
//! - [`nodes`] - node-state framework

// Allow the derive macros to work inside this crate
extern crate self as fdi_ua;

/// Typed `Vec` wrapper used for record arrays.
pub mod collection;
/// Namespace URIs, limits and codec configuration.
pub mod config;
/// The encodeable contract and derive-macro glue.
pub mod encodeable;
/// Encoder/decoder abstraction with binary and XML implementations.
pub mod encoding;
/// Crate error type.
pub mod error;
/// Registry of encodeable types by encoding id.
pub mod factory;
/// The FDI information model.
pub mod model;
/// Node states: typed views over address-space nodes.
pub mod nodes;
/// Built-in OPC UA types.
pub mod types;

pub use collection::Collection;
pub use config::CodecConfig;
pub use encodeable::{DynEncodeable, Encodeable};
pub use encoding::{decode_binary, decode_xml, encode_binary, encode_xml, EncodingContext};
pub use error::{Error, Result};
pub use factory::{default_factory, EncodeableFactory};
pub use nodes::{NodeState, NodeStateFactory, SystemContext};
pub use types::{ExtensionObject, NamespaceTable, NodeId, QualifiedName, Variant};

/// Derive macros; share their names with the traits they implement.
pub use fdi_ua_codegen::{Encodeable, Enumeration};

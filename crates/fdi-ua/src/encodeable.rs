// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The encodeable contract shared by every structured data type of the model.
//!
//! A record derives [`Encodeable`] with `#[derive(Encodeable)]`:
//!
//! ```ignore
//! #[derive(Debug, Clone, PartialEq, Default, Encodeable)]
//! #[encodeable(namespace = FDI7_NAMESPACE, xml_namespace = FDI7_TYPES_XSD,
//!              data_type = 6001, binary_encoding = 6251, xml_encoding = 6275)]
//! pub struct RegisteredNode {
//!     pub node_status: i32,
//!     pub node_id: NodeId,
//! }
//! ```
//!
//! The derive writes fields in declaration order under their PascalCase names,
//! inside the type's XML namespace.

use crate::encoding::{scoped_decode, Decoder, Encoder, EncodingKind, FieldCodec};
use crate::error::{Error, Result};
use crate::types::{ExpandedNodeId, NamespaceTable, NodeId};
use std::any::Any;
use std::fmt;

/// Constant identity of an encodeable type: its data type node and the two
/// encoding nodes used to tag extension object bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeIds {
    /// Namespace owning the numeric ids.
    pub namespace_uri: &'static str,
    /// XML namespace of the type's elements.
    pub xml_namespace: &'static str,
    pub data_type: u32,
    pub binary_encoding: u32,
    pub xml_encoding: u32,
}

impl TypeIds {
    fn resolve(&self, namespaces: &NamespaceTable, id: u32) -> Result<NodeId> {
        Ok(NodeId::numeric(namespaces.require(self.namespace_uri)?, id))
    }

    pub fn data_type_id(&self, namespaces: &NamespaceTable) -> Result<NodeId> {
        self.resolve(namespaces, self.data_type)
    }

    pub fn binary_encoding_id(&self, namespaces: &NamespaceTable) -> Result<NodeId> {
        self.resolve(namespaces, self.binary_encoding)
    }

    pub fn xml_encoding_id(&self, namespaces: &NamespaceTable) -> Result<NodeId> {
        self.resolve(namespaces, self.xml_encoding)
    }

    /// Data type id qualified by namespace URI; needs no table.
    pub fn expanded_data_type_id(&self) -> ExpandedNodeId {
        ExpandedNodeId::with_namespace_uri(self.namespace_uri, self.data_type)
    }
}

/// One field of a structure, for reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Wire name (`NodeStatus`).
    pub name: &'static str,
    /// Element name of the field type (`Int32`, `RelativePathElement`).
    pub type_name: &'static str,
    pub is_array: bool,
}

/// Field layout of a structure, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureDefinition {
    pub name: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl StructureDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl fmt::Display for StructureDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.name)?;
        for field in self.fields {
            let suffix = if field.is_array { "[]" } else { "" };
            writeln!(f, "    {}: {}{}", field.name, field.type_name, suffix)?;
        }
        write!(f, "}}")
    }
}

/// A structured value with binary and XML encodings and a stable type identity.
///
/// `Clone` is a deep copy and `PartialEq` is structural; together with
/// `Default` they carry the value-object semantics of a record.
pub trait Encodeable:
    FieldCodec + Clone + PartialEq + fmt::Debug + Default + Send + Sync + 'static
{
    const TYPE_NAME: &'static str;
    const TYPE_IDS: TypeIds;

    fn structure_definition() -> &'static StructureDefinition;

    /// Push the XML namespace, write every field in order, pop the namespace.
    fn encode(&self, encoder: &mut dyn Encoder) -> Result<()>;

    /// Symmetric to [`Encodeable::encode`].
    fn decode(decoder: &mut dyn Decoder) -> Result<Self>;

    /// Structural equality against a type-erased value.
    ///
    /// Reference identity is equal; a different concrete type is not.
    fn is_equal(&self, other: &dyn DynEncodeable) -> bool {
        let this = (self as *const Self).cast::<()>();
        let that = (other as *const dyn DynEncodeable).cast::<()>();
        if std::ptr::eq(this, that) {
            return true;
        }
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }
}

/// Object-safe view of an [`Encodeable`], used for extension object bodies.
pub trait DynEncodeable: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn type_ids(&self) -> TypeIds;
    fn definition(&self) -> &'static StructureDefinition;
    fn encode_dyn(&self, encoder: &mut dyn Encoder) -> Result<()>;
    fn clone_boxed(&self) -> Box<dyn DynEncodeable>;
    fn is_equal_dyn(&self, other: &dyn DynEncodeable) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Encodeable> DynEncodeable for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn type_ids(&self) -> TypeIds {
        T::TYPE_IDS
    }

    fn definition(&self) -> &'static StructureDefinition {
        T::structure_definition()
    }

    fn encode_dyn(&self, encoder: &mut dyn Encoder) -> Result<()> {
        self.encode(encoder)
    }

    fn clone_boxed(&self) -> Box<dyn DynEncodeable> {
        Box::new(self.clone())
    }

    fn is_equal_dyn(&self, other: &dyn DynEncodeable) -> bool {
        Encodeable::is_equal(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Clone for Box<dyn DynEncodeable> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

// ============================================================================
// Glue used by the derive macros
// ============================================================================

/// `FieldCodec::write_field` for a nested record.
pub fn write_structure_field<T: Encodeable>(
    value: &T,
    name: &str,
    encoder: &mut dyn Encoder,
) -> Result<()> {
    encoder.begin_structure(name)?;
    value.encode(encoder)?;
    encoder.end_structure(name)
}

/// `FieldCodec::read_field` for a nested record; an absent field is the default.
pub fn read_structure_field<T: Encodeable>(name: &str, decoder: &mut dyn Decoder) -> Result<T> {
    if !decoder.begin_structure(name)? {
        return Ok(T::default());
    }
    let value = T::decode(decoder)?;
    decoder.end_structure(name)?;
    Ok(value)
}

/// Extension object body: the bare fields in binary, a root element named
/// after the type in XML.
pub fn encode_body(value: &dyn DynEncodeable, encoder: &mut dyn Encoder) -> Result<()> {
    match encoder.kind() {
        EncodingKind::Binary => value.encode_dyn(encoder),
        EncodingKind::Xml => {
            let ids = value.type_ids();
            crate::encoding::scoped_encode(encoder, ids.xml_namespace, |encoder| {
                encoder.begin_structure(value.type_name())?;
                value.encode_dyn(encoder)?;
                encoder.end_structure(value.type_name())
            })
        }
    }
}

/// Inverse of [`encode_body`].
pub fn decode_body<T: Encodeable>(decoder: &mut dyn Decoder) -> Result<T> {
    match decoder.kind() {
        EncodingKind::Binary => T::decode(decoder),
        EncodingKind::Xml => scoped_decode(decoder, T::TYPE_IDS.xml_namespace, |decoder| {
            if !decoder.begin_structure(T::TYPE_NAME)? {
                return Err(Error::decoding(
                    T::TYPE_NAME,
                    format!("body is not a <{}> element", T::TYPE_NAME),
                ));
            }
            let value = T::decode(decoder)?;
            decoder.end_structure(T::TYPE_NAME)?;
            Ok(value)
        }),
    }
}

/// Convert a symbolic enumeration value to its integer, or fail with the
/// field name for context.
pub fn enumeration_from_i32<E>(name: &str, value: i32) -> Result<E>
where
    E: TryFrom<i32>,
{
    E::try_from(value).map_err(|_| {
        Error::decoding(
            name,
            format!("{value} is not a valid {}", std::any::type_name::<E>()),
        )
    })
}

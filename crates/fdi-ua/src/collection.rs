// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordered, typed collections of encodeable records.
//!
//! A `Collection<T>` is what an array-valued field of a record or a variable
//! holds. It keeps insertion order, allows duplicates and clones deeply.
//! Reads go through the slice view; growth goes through `push`, `insert`,
//! `remove`, `clear` and `Extend`.

use crate::encodeable::Encodeable;
use crate::encoding::{read_array, write_array, Decoder, Encoder, FieldCodec};
use crate::error::Result;
use crate::types::{Variant, VariantScalar, VariantValue};
use std::ops::{Deref, DerefMut};

/// Growable sequence of one encodeable type.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: Encodeable> Collection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Native array of the items.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Deep copy into a native array.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Collection<T> {
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Panics if `index > len`, like `Vec::insert`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    /// Remove and return the item at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for Collection<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone> From<&[T]> for Collection<T> {
    fn from(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Collection<T> {
    fn from(items: [T; N]) -> Self {
        Self {
            items: Vec::from(items),
        }
    }
}

impl<T> From<Collection<T>> for Vec<T> {
    fn from(collection: Collection<T>) -> Self {
        collection.items
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: FieldCodec> FieldCodec for Collection<T> {
    const ELEMENT_NAME: &'static str = T::ELEMENT_NAME;
    const IS_ARRAY: bool = true;
    const MIN_BINARY_SIZE: usize = 4;

    fn write_field(&self, name: &str, encoder: &mut dyn Encoder) -> Result<()> {
        write_array(&self.items, name, encoder)
    }

    fn read_field(name: &str, decoder: &mut dyn Decoder) -> Result<Self> {
        read_array(name, decoder).map(Self::from)
    }
}

impl<T: VariantValue + VariantScalar> VariantValue for Collection<T> {
    fn into_variant(self) -> Variant {
        self.items.into_variant()
    }

    fn from_variant(value: &Variant) -> Option<Self> {
        Vec::<T>::from_variant(value).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{BinaryDecoder, BinaryEncoder, EncodingContext};
    use crate::model::{RegisteredNode, RegisteredNodeCollection};
    use crate::types::NodeId;

    fn node(status: i32) -> RegisteredNode {
        RegisteredNode {
            node_status: status,
            node_id: NodeId::numeric(2, status as u32),
            ..RegisteredNode::default()
        }
    }

    #[test]
    fn test_from_slice_copies() {
        let source = vec![node(1), node(2), node(1)];
        let mut collection = RegisteredNodeCollection::from(source.as_slice());
        collection[0].node_status = 99;
        assert_eq!(source[0].node_status, 1);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection[2], source[2]);
    }

    #[test]
    fn test_empty_array_converts_to_empty_collection() {
        let collection = RegisteredNodeCollection::from(Vec::new());
        assert!(collection.is_empty());
        assert_eq!(collection, Collection::new());
        assert!(collection.into_vec().is_empty());
    }

    #[test]
    fn test_slice_view_and_growth() {
        let mut collection: Collection<RegisteredNode> = Collection::new();
        collection.push(node(1));
        collection.insert(0, node(0));
        collection.extend([node(2), node(2)]);
        let view: &[RegisteredNode] = &collection;
        assert_eq!(view.len(), 4);
        assert_eq!(collection.first(), Some(&node(0)));

        collection.sort_by_key(|n| -n.node_status);
        assert_eq!(collection[0].node_status, 2);
        assert_eq!(collection.remove(3), Some(node(0)));
        assert_eq!(collection.remove(3), None);
        collection.clear();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let original: Collection<RegisteredNode> = (1..=3).map(node).collect();
        let mut copy = original.clone();
        copy[1].node_id = NodeId::string(3, "changed");
        assert_eq!(original[1].node_id, NodeId::numeric(2, 2));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_field_codec_roundtrip() {
        let context = EncodingContext::default();
        let collection = Collection::from([node(4), node(5)]);
        let mut encoder = BinaryEncoder::new(&context);
        collection.write_field("Nodes", &mut encoder).expect("encode");
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..4], &[2, 0, 0, 0]);

        let mut decoder = BinaryDecoder::new(&bytes, &context);
        let decoded =
            Collection::<RegisteredNode>::read_field("Nodes", &mut decoder).expect("decode");
        assert_eq!(decoded, collection);
    }

    #[test]
    fn test_variant_conversion() {
        let collection = Collection::from([node(7)]);
        let variant = collection.clone().into_variant();
        assert!(variant.is_array());
        assert_eq!(
            Collection::<RegisteredNode>::from_variant(&variant),
            Some(collection)
        );
    }
}

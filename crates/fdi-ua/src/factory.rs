// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry of encodeable types keyed by encoding id.
//!
//! Decoding an extension object only yields a node id; the factory maps that
//! id back to the concrete type and its decode function.
//!
//! # Usage Pattern
//!
//! ```ignore
//! let factory = EncodeableFactory::new();
//! factory.register::<RegisteredNode>();
//!
//! let registration = factory.lookup_binary(FDI7_NAMESPACE, 6251)?;
//! let body = registration.decode(&mut decoder)?;
//! ```
//!
//! Lookups are `DashMap` reads, so a single `Arc<EncodeableFactory>` is shared
//! by every codec context.

use crate::encodeable::{decode_body, DynEncodeable, Encodeable, StructureDefinition, TypeIds};
use crate::encoding::Decoder;
use crate::error::Result;
use dashmap::DashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

type DecodeFn = fn(&mut dyn Decoder) -> Result<Box<dyn DynEncodeable>>;
type DefaultFn = fn() -> Box<dyn DynEncodeable>;

fn decode_boxed<T: Encodeable>(decoder: &mut dyn Decoder) -> Result<Box<dyn DynEncodeable>> {
    Ok(Box::new(decode_body::<T>(decoder)?))
}

fn default_boxed<T: Encodeable>() -> Box<dyn DynEncodeable> {
    Box::new(T::default())
}

/// Everything needed to decode or describe one registered type.
#[derive(Clone, Copy)]
pub struct Registration {
    pub type_name: &'static str,
    pub type_ids: TypeIds,
    definition: fn() -> &'static StructureDefinition,
    decode: DecodeFn,
    default: DefaultFn,
}

impl Registration {
    pub fn of<T: Encodeable>() -> Self {
        Self {
            type_name: T::TYPE_NAME,
            type_ids: T::TYPE_IDS,
            definition: T::structure_definition,
            decode: decode_boxed::<T>,
            default: default_boxed::<T>,
        }
    }

    /// Decode an extension object body of this type.
    pub fn decode(&self, decoder: &mut dyn Decoder) -> Result<Box<dyn DynEncodeable>> {
        (self.decode)(decoder)
    }

    pub fn default_value(&self) -> Box<dyn DynEncodeable> {
        (self.default)()
    }

    pub fn definition(&self) -> &'static StructureDefinition {
        (self.definition)()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("type_name", &self.type_name)
            .field("type_ids", &self.type_ids)
            .finish()
    }
}

/// Thread-safe map from encoding ids and type names to [`Registration`]s.
#[derive(Debug, Default)]
pub struct EncodeableFactory {
    by_binary: DashMap<(String, u32), Registration>,
    by_xml: DashMap<(String, u32), Registration>,
    by_name: DashMap<String, Registration>,
}

impl EncodeableFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory pre-loaded with every type of the FDI model.
    pub fn with_model_types() -> Self {
        let factory = Self::new();
        crate::model::register_types(&factory);
        factory
    }

    /// Register `T`; a later registration of the same ids replaces the earlier one.
    pub fn register<T: Encodeable>(&self) {
        self.insert(Registration::of::<T>());
    }

    pub fn insert(&self, registration: Registration) {
        let ids = registration.type_ids;
        log::debug!(
            "[factory] register {} (binary {}, xml {}) in {}",
            registration.type_name,
            ids.binary_encoding,
            ids.xml_encoding,
            ids.namespace_uri
        );
        let previous = self
            .by_binary
            .insert((ids.namespace_uri.to_string(), ids.binary_encoding), registration);
        if let Some(previous) = previous {
            if previous.type_name != registration.type_name {
                log::warn!(
                    "[factory] binary encoding {} of {} now maps to {}",
                    ids.binary_encoding,
                    previous.type_name,
                    registration.type_name
                );
            }
        }
        self.by_xml
            .insert((ids.namespace_uri.to_string(), ids.xml_encoding), registration);
        self.by_name
            .insert(registration.type_name.to_string(), registration);
    }

    pub fn lookup_binary(&self, namespace_uri: &str, id: u32) -> Option<Registration> {
        self.by_binary
            .get(&(namespace_uri.to_string(), id))
            .map(|entry| *entry)
    }

    pub fn lookup_xml(&self, namespace_uri: &str, id: u32) -> Option<Registration> {
        self.by_xml
            .get(&(namespace_uri.to_string(), id))
            .map(|entry| *entry)
    }

    pub fn lookup_name(&self, type_name: &str) -> Option<Registration> {
        self.by_name.get(type_name).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// All registrations sorted by type name.
    pub fn registrations(&self) -> Vec<Registration> {
        let mut all: Vec<Registration> = self.by_name.iter().map(|entry| *entry.value()).collect();
        all.sort_by_key(|registration| registration.type_name);
        all
    }
}

static DEFAULT_FACTORY: OnceLock<Arc<EncodeableFactory>> = OnceLock::new();

/// Process-wide factory holding the FDI model types.
pub fn default_factory() -> Arc<EncodeableFactory> {
    DEFAULT_FACTORY
        .get_or_init(|| Arc::new(EncodeableFactory::with_model_types()))
        .clone()
}

// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared state for node construction: the namespace table and both factories.

use super::factory::NodeStateFactory;
use crate::config::CodecConfig;
use crate::encoding::EncodingContext;
use crate::error::Result;
use crate::factory::{default_factory, EncodeableFactory};
use crate::types::{Identifier, NamespaceTable, NodeId, QualifiedName};
use parking_lot::RwLock;
use std::sync::Arc;

/// Context passed to node initialization and method calls.
///
/// The namespace table grows as initialization strings register their
/// namespaces; reads take a snapshot clone so callers never hold the lock.
#[derive(Debug)]
pub struct SystemContext {
    namespaces: RwLock<NamespaceTable>,
    encodeables: Arc<EncodeableFactory>,
    node_states: Arc<NodeStateFactory>,
    config: CodecConfig,
}

impl Default for SystemContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemContext {
    /// `[UA, DI, FDI7]` with every model type registered.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    pub fn with_config(config: CodecConfig) -> Self {
        let mut namespaces = NamespaceTable::with_fdi_namespaces();
        for uri in &config.namespaces {
            namespaces.get_or_add(uri.clone());
        }
        Self {
            namespaces: RwLock::new(namespaces),
            encodeables: default_factory(),
            node_states: Arc::new(NodeStateFactory::with_model_types()),
            config,
        }
    }

    pub fn with_node_state_factory(mut self, factory: Arc<NodeStateFactory>) -> Self {
        self.node_states = factory;
        self
    }

    /// Copy of the current namespace table.
    pub fn namespaces(&self) -> NamespaceTable {
        self.namespaces.read().clone()
    }

    pub fn namespace_index(&self, uri: &str) -> Result<u16> {
        self.namespaces.read().require(uri)
    }

    /// Index of `uri`, appending it if unknown.
    pub fn register_namespace(&self, uri: &str) -> u16 {
        if let Some(index) = self.namespaces.read().index_of(uri) {
            return index;
        }
        let index = self.namespaces.write().get_or_add(uri.to_string());
        log::debug!("[context] namespace {} registered at {}", uri, index);
        index
    }

    pub fn encodeable_factory(&self) -> &Arc<EncodeableFactory> {
        &self.encodeables
    }

    pub fn node_state_factory(&self) -> &Arc<NodeStateFactory> {
        &self.node_states
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Codec context over the current namespace table.
    pub fn encoding_context(&self) -> EncodingContext {
        EncodingContext::new(self.config.clone())
            .with_namespaces(self.namespaces())
            .with_factory(self.encodeables.clone())
    }

    /// `name` qualified by the index of `namespace_uri`.
    pub fn qualified_name(&self, namespace_uri: &str, name: &str) -> Result<QualifiedName> {
        Ok(QualifiedName::new(self.namespace_index(namespace_uri)?, name))
    }

    /// Whether `browse_name` is `name` in `namespace_uri`.
    ///
    /// False when the namespace is not in the table.
    pub fn is_browse_name(&self, browse_name: &QualifiedName, namespace_uri: &str, name: &str) -> bool {
        browse_name.name == name
            && self.namespaces.read().index_of(namespace_uri) == Some(browse_name.namespace)
    }

    /// Node id of a declared child: `<parent>_<name>` in the parent's namespace.
    pub fn child_node_id(&self, parent: &NodeId, browse_name: &QualifiedName) -> NodeId {
        if parent.is_null() {
            return NodeId::string(0, browse_name.name.clone());
        }
        let prefix = match &parent.identifier {
            Identifier::String(value) => value.clone(),
            Identifier::Numeric(value) => value.to_string(),
            other => other.to_string(),
        };
        NodeId::string(parent.namespace, format!("{prefix}_{}", browse_name.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DI_NAMESPACE, FDI7_NAMESPACE};

    #[test]
    fn test_default_table_and_registration() {
        let context = SystemContext::new();
        assert_eq!(context.namespace_index(DI_NAMESPACE).expect("DI"), 1);
        assert_eq!(context.namespace_index(FDI7_NAMESPACE).expect("FDI7"), 2);
        assert_eq!(context.register_namespace("urn:vendor"), 3);
        assert_eq!(context.register_namespace("urn:vendor"), 3);
        assert_eq!(context.encoding_context().namespaces.len(), 4);
    }

    #[test]
    fn test_configured_namespaces_appended() {
        let config = CodecConfig {
            namespaces: vec!["urn:plant".to_string()],
            ..CodecConfig::default()
        };
        let context = SystemContext::with_config(config);
        assert_eq!(context.namespace_index("urn:plant").expect("configured"), 3);
    }

    #[test]
    fn test_is_browse_name() {
        let context = SystemContext::new();
        let name = QualifiedName::new(1, "SerialNumber");
        assert!(context.is_browse_name(&name, DI_NAMESPACE, "SerialNumber"));
        assert!(!context.is_browse_name(&name, FDI7_NAMESPACE, "SerialNumber"));
        assert!(!context.is_browse_name(&name, "urn:missing", "SerialNumber"));
    }

    #[test]
    fn test_child_node_ids() {
        let context = SystemContext::new();
        let name = QualifiedName::new(1, "SerialNumber");
        assert_eq!(
            context.child_node_id(&NodeId::string(3, "Dev1"), &name),
            NodeId::string(3, "Dev1_SerialNumber")
        );
        assert_eq!(
            context.child_node_id(&NodeId::numeric(2, 5000), &name),
            NodeId::string(2, "5000_SerialNumber")
        );
        assert_eq!(
            context.child_node_id(&NodeId::NULL, &name),
            NodeId::string(0, "SerialNumber")
        );
    }
}

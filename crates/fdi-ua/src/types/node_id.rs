// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Node identifiers.
//!
//! Text forms follow OPC UA Part 6 Sec.5.3.1.10:
//!
//! ```text
//! i=85             numeric, namespace 0
//! ns=2;s=Device1   string
//! ns=1;g=72962b91-fa75-4ae6-8d28-b404dc7daf63
//! ns=3;b=3q2+7w==  opaque (base64)
//! svr=1;nsu=http://fdi-cooperation.com/OPCUA/FDI7/;i=5001   expanded
//! ```
//!
//! Leading whitespace is ignored. Everything after `s=` is the identifier,
//! trailing whitespace included.

use super::{ByteString, Guid};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Identifier part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Guid),
    Opaque(ByteString),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Numeric(0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(v) => write!(f, "i={v}"),
            Identifier::String(v) => write!(f, "s={v}"),
            Identifier::Guid(v) => write!(f, "g={v}"),
            Identifier::Opaque(v) => write!(f, "b={}", v.to_base64()),
        }
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidIdentifier(format!("missing '=' in '{s}'")))?;
        match kind {
            "i" => value
                .trim_end()
                .parse::<u32>()
                .map(Identifier::Numeric)
                .map_err(|_| Error::InvalidIdentifier(format!("bad numeric id '{value}'"))),
            "s" => Ok(Identifier::String(value.to_string())),
            "g" => value.trim_end().parse::<Guid>().map(Identifier::Guid),
            "b" => ByteString::from_base64(value.trim_end()).map(Identifier::Opaque),
            other => Err(Error::InvalidIdentifier(format!(
                "unknown identifier type '{other}'"
            ))),
        }
    }
}

/// Namespace-qualified node identifier.
///
/// The default value is the null NodeId `i=0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    /// The null NodeId (`i=0`).
    pub const NULL: NodeId = NodeId {
        namespace: 0,
        identifier: Identifier::Numeric(0),
    };

    pub fn new(namespace: u16, identifier: impl Into<Identifier>) -> Self {
        Self {
            namespace,
            identifier: identifier.into(),
        }
    }

    pub const fn numeric(namespace: u16, value: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(value),
        }
    }

    pub fn string(namespace: u16, value: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(value.into()),
        }
    }

    /// Null means namespace 0 and an empty/zero identifier of any kind.
    pub fn is_null(&self) -> bool {
        if self.namespace != 0 {
            return false;
        }
        match &self.identifier {
            Identifier::Numeric(v) => *v == 0,
            Identifier::String(v) => v.is_empty(),
            Identifier::Guid(v) => v.is_null(),
            Identifier::Opaque(v) => v.is_empty(),
        }
    }

    pub fn as_numeric(&self) -> Option<u32> {
        match self.identifier {
            Identifier::Numeric(v) => Some(v),
            _ => None,
        }
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Identifier::Numeric(value)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::String(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::String(value)
    }
}

impl From<Guid> for Identifier {
    fn from(value: Guid) -> Self {
        Identifier::Guid(value)
    }
}

impl From<ByteString> for Identifier {
    fn from(value: ByteString) -> Self {
        Identifier::Opaque(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        write!(f, "{}", self.identifier)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim_start();
        match s.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, id) = rest.split_once(';').ok_or_else(|| {
                    Error::InvalidIdentifier(format!("missing ';' after namespace in '{s}'"))
                })?;
                let namespace = ns
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidIdentifier(format!("bad namespace index '{ns}'")))?;
                Ok(Self {
                    namespace,
                    identifier: id.parse()?,
                })
            }
            None => Ok(Self {
                namespace: 0,
                identifier: s.parse()?,
            }),
        }
    }
}

/// NodeId that may name its namespace by URI and live on another server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    /// When non-empty, takes precedence over `node_id.namespace`.
    pub namespace_uri: String,
    pub server_index: u32,
}

impl ExpandedNodeId {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: String::new(),
            server_index: 0,
        }
    }

    pub fn with_namespace_uri(namespace_uri: impl Into<String>, identifier: impl Into<Identifier>) -> Self {
        Self {
            node_id: NodeId::new(0, identifier),
            namespace_uri: namespace_uri.into(),
            server_index: 0,
        }
    }

    pub fn is_null(&self) -> bool {
        self.node_id.is_null() && self.namespace_uri.is_empty() && self.server_index == 0
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(value: NodeId) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        if self.namespace_uri.is_empty() {
            write!(f, "{}", self.node_id)
        } else {
            // ';' inside a URI would break the grammar
            write!(
                f,
                "nsu={};{}",
                self.namespace_uri.replace(';', "%3B"),
                self.node_id.identifier
            )
        }
    }
}

impl FromStr for ExpandedNodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut rest = s.trim_start();
        let mut server_index = 0;
        if let Some(tail) = rest.strip_prefix("svr=") {
            let (svr, remainder) = tail.split_once(';').ok_or_else(|| {
                Error::InvalidIdentifier(format!("missing ';' after server index in '{s}'"))
            })?;
            server_index = svr
                .parse::<u32>()
                .map_err(|_| Error::InvalidIdentifier(format!("bad server index '{svr}'")))?;
            rest = remainder;
        }

        if let Some(tail) = rest.strip_prefix("nsu=") {
            let (uri, id) = tail.split_once(';').ok_or_else(|| {
                Error::InvalidIdentifier(format!("missing ';' after namespace URI in '{s}'"))
            })?;
            return Ok(Self {
                node_id: NodeId {
                    namespace: 0,
                    identifier: id.parse()?,
                },
                namespace_uri: uri.replace("%3B", ";"),
                server_index,
            });
        }

        Ok(Self {
            node_id: rest.parse()?,
            namespace_uri: String::new(),
            server_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        let id = NodeId::default();
        assert!(id.is_null());
        assert_eq!(id, NodeId::NULL);
        assert_eq!(id.to_string(), "i=0");
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(NodeId::numeric(0, 85).to_string(), "i=85");
        assert_eq!(NodeId::string(2, "Device1").to_string(), "ns=2;s=Device1");
        assert_eq!(
            NodeId::new(3, ByteString::from(vec![0xDE, 0xAD])).to_string(),
            "ns=3;b=3q0="
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        for text in [
            "i=85",
            "ns=2;s=Device1",
            "ns=1;g=72962b91-fa75-4ae6-8d28-b404dc7daf63",
            "ns=3;b=3q2+7w==",
            "ns=65535;i=4294967295",
        ] {
            let id: NodeId = text.parse().expect("parse");
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn test_string_identifier_keeps_semicolons() {
        let id: NodeId = "ns=2;s=a;b=c".parse().expect("parse");
        assert_eq!(id.identifier, Identifier::String("a;b=c".into()));
    }

    #[test]
    fn test_string_identifier_keeps_whitespace() {
        let id: NodeId = "  ns=2;s= Dev \n".parse().expect("parse");
        assert_eq!(id, NodeId::string(2, " Dev \n"));
        assert_eq!(id.to_string().parse::<NodeId>().expect("reparse"), id);

        let id: NodeId = "\n  ns=2;i=7 \n".parse().expect("parse");
        assert_eq!(id, NodeId::numeric(2, 7));
    }

    #[test]
    fn test_parse_errors() {
        assert!("ns=x;i=1".parse::<NodeId>().is_err());
        assert!("ns=1".parse::<NodeId>().is_err());
        assert!("q=1".parse::<NodeId>().is_err());
        assert!("i=-1".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_null_variants() {
        assert!(NodeId::string(0, "").is_null());
        assert!(!NodeId::string(1, "").is_null());
        assert!(!NodeId::numeric(0, 1).is_null());
    }

    #[test]
    fn test_expanded_roundtrip() {
        let id = ExpandedNodeId {
            node_id: NodeId::numeric(0, 5001),
            namespace_uri: "http://fdi-cooperation.com/OPCUA/FDI7/".into(),
            server_index: 1,
        };
        let text = id.to_string();
        assert_eq!(
            text,
            "svr=1;nsu=http://fdi-cooperation.com/OPCUA/FDI7/;i=5001"
        );
        assert_eq!(text.parse::<ExpandedNodeId>().expect("parse"), id);

        let plain: ExpandedNodeId = "ns=2;i=7".parse().expect("parse");
        assert_eq!(plain.node_id, NodeId::numeric(2, 7));
        assert!(plain.namespace_uri.is_empty());
    }
}

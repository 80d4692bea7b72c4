// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA Part 6 XML encoding.
//!
//! Every field is an element named after the field, in the namespace that was
//! pushed by the enclosing type. Built-in types with inner structure use child
//! elements from `Types.xsd`:
//!
//! ```xml
//! <RegisteredNode xmlns="http://fdi-cooperation.com/OPCUA/FDI7/Types.xsd">
//!   <NodeStatus>0</NodeStatus>
//!   <NodeId><Identifier xmlns="http://opcfoundation.org/UA/2008/02/Types.xsd">i=0</Identifier></NodeId>
//!   ...
//! </RegisteredNode>
//! ```
//!
//! The decoder walks a `roxmltree` document with one frame per open element.
//! With `strict_fields` a missing, misplaced or foreign-namespace element
//! fails the decode; without it the field takes its default value and
//! unexpected elements are skipped.

use super::{Decoder, Encoder, EncodingContext, EncodingKind};
use crate::config::{EncodingLimits, UA_TYPES_XSD};
use crate::error::{Error, Result};
use crate::types::{
    ByteString, DateTime, ExpandedNodeId, Guid, LocalizedText, NodeId, QualifiedName, StatusCode,
};
use roxmltree::{Document, Node};
use std::fmt::Display;
use std::str::FromStr;

/// Parse `xml` into a document for [`XmlDecoder`].
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    Document::parse(xml).map_err(|e| Error::decoding("document", e.to_string()))
}

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escape markup characters and `\r`, which parsers would otherwise
/// normalize away. Characters XML 1.0 cannot carry are an error.
fn escape_into(out: &mut String, text: &str) -> Result<()> {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\r' => out.push_str("&#13;"),
            c if !is_xml_char(c) => {
                return Err(Error::Encoding(format!(
                    "character U+{:04X} cannot be written as XML",
                    u32::from(c)
                )))
            }
            _ => out.push(c),
        }
    }
    Ok(())
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

fn parse_float(name: &str, text: &str) -> Result<f64> {
    match text {
        "NaN" => Ok(f64::NAN),
        "INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        _ => text
            .parse::<f64>()
            .map_err(|e| Error::decoding(name, format!("'{text}': {e}"))),
    }
}

// ============================================================================
// Encoder
// ============================================================================

/// Writes an XML document into a `String`.
pub struct XmlEncoder<'a> {
    context: &'a EncodingContext,
    out: String,
    namespaces: Vec<String>,
    /// Default namespace in effect for each open element.
    open: Vec<String>,
    depth: usize,
}

impl<'a> XmlEncoder<'a> {
    pub fn new(context: &'a EncodingContext) -> Self {
        Self {
            context,
            out: String::with_capacity(256),
            namespaces: Vec::new(),
            open: Vec::new(),
            depth: 0,
        }
    }

    /// The document text; fails if an element is still open.
    pub fn finish(self) -> Result<String> {
        if !self.open.is_empty() {
            return Err(Error::Encoding(format!(
                "{} element(s) left open",
                self.open.len()
            )));
        }
        Ok(self.out)
    }

    fn start_element(&mut self, name: &str) -> Result<()> {
        let namespace = self.namespaces.last().cloned().unwrap_or_default();
        let inherited = self.open.last().map(String::as_str).unwrap_or("");
        self.out.push('<');
        self.out.push_str(name);
        if inherited != namespace {
            self.out.push_str(" xmlns=\"");
            escape_into(&mut self.out, &namespace)?;
            self.out.push('"');
        }
        self.out.push('>');
        self.open.push(namespace);
        Ok(())
    }

    fn end_element(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        self.open.pop();
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start_element(name)?;
        escape_into(&mut self.out, text)?;
        self.end_element(name);
        Ok(())
    }

    /// `<name>` with `Types.xsd` children, skipping `None` values.
    fn builtin_element(&mut self, name: &str, children: &[(&str, Option<String>)]) -> Result<()> {
        self.start_element(name)?;
        self.namespaces.push(UA_TYPES_XSD.to_string());
        for (child, value) in children {
            if let Some(value) = value {
                self.text_element(child, value)?;
            }
        }
        self.namespaces.pop();
        self.end_element(name);
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        EncodingLimits::check(
            "nesting depth",
            self.depth,
            self.context.limits().max_nesting_depth,
        )
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl Encoder for XmlEncoder<'_> {
    fn kind(&self) -> EncodingKind {
        EncodingKind::Xml
    }

    fn context(&self) -> &EncodingContext {
        self.context
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn push_namespace(&mut self, namespace_uri: &str) {
        self.namespaces.push(namespace_uri.to_string());
    }

    fn pop_namespace(&mut self) {
        self.namespaces.pop();
    }

    fn write_boolean(&mut self, name: &str, value: bool) -> Result<()> {
        self.text_element(name, if value { "true" } else { "false" })
    }

    fn write_sbyte(&mut self, name: &str, value: i8) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_byte(&mut self, name: &str, value: u8) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_int16(&mut self, name: &str, value: i16) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_uint16(&mut self, name: &str, value: u16) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_int32(&mut self, name: &str, value: i32) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_uint32(&mut self, name: &str, value: u32) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_int64(&mut self, name: &str, value: i64) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_uint64(&mut self, name: &str, value: u64) -> Result<()> {
        self.text_element(name, &value.to_string())
    }

    fn write_float(&mut self, name: &str, value: f32) -> Result<()> {
        let text = if value.is_finite() {
            value.to_string()
        } else {
            format_float(f64::from(value))
        };
        self.text_element(name, &text)
    }

    fn write_double(&mut self, name: &str, value: f64) -> Result<()> {
        self.text_element(name, &format_float(value))
    }

    fn write_string(&mut self, name: &str, value: &str) -> Result<()> {
        self.text_element(name, value)
    }

    fn write_date_time(&mut self, name: &str, value: DateTime) -> Result<()> {
        self.text_element(name, &value.to_rfc3339()?)
    }

    fn write_guid(&mut self, name: &str, value: &Guid) -> Result<()> {
        self.builtin_element(name, &[("String", Some(value.to_string()))])
    }

    fn write_byte_string(&mut self, name: &str, value: &[u8]) -> Result<()> {
        self.text_element(name, &ByteString::from(value).to_base64())
    }

    fn write_node_id(&mut self, name: &str, value: &NodeId) -> Result<()> {
        self.builtin_element(name, &[("Identifier", Some(value.to_string()))])
    }

    fn write_expanded_node_id(&mut self, name: &str, value: &ExpandedNodeId) -> Result<()> {
        self.builtin_element(name, &[("Identifier", Some(value.to_string()))])
    }

    fn write_status_code(&mut self, name: &str, value: StatusCode) -> Result<()> {
        self.builtin_element(name, &[("Code", Some(value.bits().to_string()))])
    }

    fn write_qualified_name(&mut self, name: &str, value: &QualifiedName) -> Result<()> {
        self.builtin_element(
            name,
            &[
                ("NamespaceIndex", Some(value.namespace.to_string())),
                ("Name", Some(value.name.clone())),
            ],
        )
    }

    fn write_localized_text(&mut self, name: &str, value: &LocalizedText) -> Result<()> {
        let locale = (!value.locale.is_empty()).then(|| value.locale.clone());
        self.builtin_element(name, &[("Locale", locale), ("Text", Some(value.text.clone()))])
    }

    fn write_enumerated(&mut self, name: &str, symbol: &str, _value: i32) -> Result<()> {
        self.text_element(name, symbol)
    }

    fn begin_structure(&mut self, name: &str) -> Result<()> {
        self.enter()?;
        self.start_element(name)
    }

    fn end_structure(&mut self, name: &str) -> Result<()> {
        self.end_element(name);
        self.leave();
        Ok(())
    }

    fn begin_array(&mut self, name: &str, _len: usize) -> Result<()> {
        self.begin_structure(name)
    }

    fn end_array(&mut self, name: &str) -> Result<()> {
        self.end_structure(name)
    }

    fn write_raw_xml(&mut self, xml: &str) -> Result<()> {
        self.out.push_str(xml);
        Ok(())
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Element children of one open element and the next one to read.
struct Frame<'a, 'input> {
    name: String,
    children: Vec<Node<'a, 'input>>,
    pos: usize,
}

impl<'a, 'input> Frame<'a, 'input> {
    fn of(node: Node<'a, 'input>) -> Self {
        Self {
            name: node.tag_name().name().to_string(),
            children: node.children().filter(Node::is_element).collect(),
            pos: 0,
        }
    }
}

fn matches(node: &Node<'_, '_>, name: &str, namespace: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace().unwrap_or("") == namespace
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|child| child.is_element() && matches(child, name, UA_TYPES_XSD))
        .map(|child| child.text().unwrap_or(""))
}

/// Reads fields from a parsed XML document.
pub struct XmlDecoder<'a, 'input> {
    context: &'a EncodingContext,
    input: &'input str,
    frames: Vec<Frame<'a, 'input>>,
    namespaces: Vec<String>,
    depth: usize,
}

impl<'a, 'input> XmlDecoder<'a, 'input> {
    /// `input` must be the text `document` was parsed from.
    pub fn new(
        document: &'a Document<'input>,
        input: &'input str,
        context: &'a EncodingContext,
    ) -> Self {
        Self {
            context,
            input,
            frames: vec![Frame {
                name: "#document".to_string(),
                children: vec![document.root_element()],
                pos: 0,
            }],
            namespaces: Vec::new(),
            depth: 0,
        }
    }

    /// Next element if it is `name` in the current namespace.
    ///
    /// Strict mode fails on anything else; lenient mode looks further ahead
    /// and returns `None` when the field is absent.
    fn take_element(&mut self, name: &str) -> Result<Option<Node<'a, 'input>>> {
        let strict = self.context.config.strict_fields;
        let namespace = self.namespaces.last().map(String::as_str).unwrap_or("");
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| Error::decoding(name, "no open element"))?;

        if let Some(node) = frame.children.get(frame.pos).copied() {
            if matches(&node, name, namespace) {
                frame.pos += 1;
                return Ok(Some(node));
            }
        }

        if strict {
            let found = match frame.children.get(frame.pos) {
                Some(node) => format!(
                    "<{}> in '{}'",
                    node.tag_name().name(),
                    node.tag_name().namespace().unwrap_or("")
                ),
                None => format!("end of <{}>", frame.name),
            };
            return Err(Error::decoding(
                name,
                format!("expected <{name}> in '{namespace}', found {found}"),
            ));
        }

        let ahead = frame.children[frame.pos.min(frame.children.len())..]
            .iter()
            .position(|node| matches(node, name, namespace));
        match ahead {
            Some(offset) => {
                let index = frame.pos + offset;
                log::trace!(
                    "[xml] skipping {offset} element(s) before <{name}> in <{}>",
                    frame.name
                );
                frame.pos = index + 1;
                Ok(Some(frame.children[index]))
            }
            None => {
                log::trace!("[xml] <{name}> absent in <{}>, using default", frame.name);
                Ok(None)
            }
        }
    }

    fn take_text(&mut self, name: &str) -> Result<Option<&'a str>> {
        Ok(self
            .take_element(name)?
            .map(|node| node.text().unwrap_or("")))
    }

    fn take_parsed<T>(&mut self, name: &str) -> Result<T>
    where
        T: FromStr + Default,
        T::Err: Display,
    {
        match self.take_text(name)? {
            Some(text) => text
                .trim()
                .parse::<T>()
                .map_err(|e| Error::decoding(name, format!("'{}': {e}", text.trim()))),
            None => Ok(T::default()),
        }
    }

    fn enter(&mut self, node: Node<'a, 'input>) -> Result<()> {
        self.depth += 1;
        EncodingLimits::check(
            "nesting depth",
            self.depth,
            self.context.limits().max_nesting_depth,
        )?;
        self.frames.push(Frame::of(node));
        Ok(())
    }

    fn leave(&mut self, name: &str) -> Result<()> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| Error::decoding(name, "no open element"))?;
        self.depth = self.depth.saturating_sub(1);
        if let Some(extra) = frame.children.get(frame.pos) {
            if self.context.config.strict_fields {
                return Err(Error::decoding(
                    name,
                    format!("unexpected element <{}>", extra.tag_name().name()),
                ));
            }
            log::trace!(
                "[xml] ignoring {} trailing element(s) in <{name}>",
                frame.children.len() - frame.pos
            );
        }
        Ok(())
    }
}

impl Decoder for XmlDecoder<'_, '_> {
    fn kind(&self) -> EncodingKind {
        EncodingKind::Xml
    }

    fn context(&self) -> &EncodingContext {
        self.context
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn push_namespace(&mut self, namespace_uri: &str) {
        self.namespaces.push(namespace_uri.to_string());
    }

    fn pop_namespace(&mut self) {
        self.namespaces.pop();
    }

    fn read_boolean(&mut self, name: &str) -> Result<bool> {
        match self.take_text(name)?.map(str::trim) {
            None => Ok(false),
            Some("true" | "1") => Ok(true),
            Some("false" | "0") => Ok(false),
            Some(other) => Err(Error::decoding(name, format!("'{other}' is not a boolean"))),
        }
    }

    fn read_sbyte(&mut self, name: &str) -> Result<i8> {
        self.take_parsed(name)
    }

    fn read_byte(&mut self, name: &str) -> Result<u8> {
        self.take_parsed(name)
    }

    fn read_int16(&mut self, name: &str) -> Result<i16> {
        self.take_parsed(name)
    }

    fn read_uint16(&mut self, name: &str) -> Result<u16> {
        self.take_parsed(name)
    }

    fn read_int32(&mut self, name: &str) -> Result<i32> {
        self.take_parsed(name)
    }

    fn read_uint32(&mut self, name: &str) -> Result<u32> {
        self.take_parsed(name)
    }

    fn read_int64(&mut self, name: &str) -> Result<i64> {
        self.take_parsed(name)
    }

    fn read_uint64(&mut self, name: &str) -> Result<u64> {
        self.take_parsed(name)
    }

    fn read_float(&mut self, name: &str) -> Result<f32> {
        match self.take_text(name)? {
            Some(text) => parse_float(name, text.trim()).map(|v| v as f32),
            None => Ok(0.0),
        }
    }

    fn read_double(&mut self, name: &str) -> Result<f64> {
        match self.take_text(name)? {
            Some(text) => parse_float(name, text.trim()),
            None => Ok(0.0),
        }
    }

    fn read_string(&mut self, name: &str) -> Result<String> {
        let text = self.take_text(name)?.unwrap_or("");
        EncodingLimits::check(
            "string length",
            text.len(),
            self.context.limits().max_string_length,
        )?;
        Ok(text.to_string())
    }

    fn read_date_time(&mut self, name: &str) -> Result<DateTime> {
        match self.take_text(name)?.map(str::trim) {
            Some(text) if !text.is_empty() => DateTime::parse_rfc3339(text),
            _ => Ok(DateTime::MIN),
        }
    }

    fn read_guid(&mut self, name: &str) -> Result<Guid> {
        match self.take_element(name)?.and_then(|node| child_text(node, "String")) {
            Some(text) => text
                .parse()
                .map_err(|e: Error| Error::decoding(name, e.to_string())),
            None => Ok(Guid::NULL),
        }
    }

    fn read_byte_string(&mut self, name: &str) -> Result<ByteString> {
        let text = self.take_text(name)?.unwrap_or("");
        let bytes =
            ByteString::from_base64(text).map_err(|e| Error::decoding(name, e.to_string()))?;
        EncodingLimits::check(
            "byte string length",
            bytes.len(),
            self.context.limits().max_byte_string_length,
        )?;
        Ok(bytes)
    }

    fn read_node_id(&mut self, name: &str) -> Result<NodeId> {
        match self
            .take_element(name)?
            .and_then(|node| child_text(node, "Identifier"))
        {
            Some(text) => text
                .parse()
                .map_err(|e: Error| Error::decoding(name, e.to_string())),
            None => Ok(NodeId::NULL),
        }
    }

    fn read_expanded_node_id(&mut self, name: &str) -> Result<ExpandedNodeId> {
        match self
            .take_element(name)?
            .and_then(|node| child_text(node, "Identifier"))
        {
            Some(text) => text
                .parse()
                .map_err(|e: Error| Error::decoding(name, e.to_string())),
            None => Ok(ExpandedNodeId::default()),
        }
    }

    fn read_status_code(&mut self, name: &str) -> Result<StatusCode> {
        match self.take_element(name)?.and_then(|node| child_text(node, "Code")) {
            Some(text) => text
                .trim()
                .parse::<u32>()
                .map(StatusCode)
                .map_err(|e| Error::decoding(name, format!("'{text}': {e}"))),
            None => Ok(StatusCode::GOOD),
        }
    }

    fn read_qualified_name(&mut self, name: &str) -> Result<QualifiedName> {
        let Some(node) = self.take_element(name)? else {
            return Ok(QualifiedName::default());
        };
        let namespace = match child_text(node, "NamespaceIndex").map(str::trim) {
            Some(text) if !text.is_empty() => text
                .parse::<u16>()
                .map_err(|e| Error::decoding(name, format!("'{text}': {e}")))?,
            _ => 0,
        };
        let text = child_text(node, "Name").unwrap_or("");
        Ok(QualifiedName::new(namespace, text))
    }

    fn read_localized_text(&mut self, name: &str) -> Result<LocalizedText> {
        let Some(node) = self.take_element(name)? else {
            return Ok(LocalizedText::default());
        };
        Ok(LocalizedText::new(
            child_text(node, "Locale").unwrap_or(""),
            child_text(node, "Text").unwrap_or(""),
        ))
    }

    fn read_enumerated(&mut self, name: &str) -> Result<i32> {
        let Some(text) = self.take_text(name)?.map(str::trim) else {
            return Ok(0);
        };
        let number = text.rsplit_once('_').map_or(text, |(_, value)| value);
        number
            .parse::<i32>()
            .map_err(|e| Error::decoding(name, format!("'{text}': {e}")))
    }

    fn begin_structure(&mut self, name: &str) -> Result<bool> {
        match self.take_element(name)? {
            Some(node) => {
                self.enter(node)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn end_structure(&mut self, name: &str) -> Result<()> {
        self.leave(name)
    }

    fn begin_array(&mut self, name: &str, _min_item_size: usize) -> Result<Option<usize>> {
        let Some(node) = self.take_element(name)? else {
            return Ok(None);
        };
        self.enter(node)?;
        let len = self.frames.last().map_or(0, |frame| frame.children.len());
        EncodingLimits::check("array length", len, self.context.limits().max_array_length)?;
        Ok(Some(len))
    }

    fn end_array(&mut self, name: &str) -> Result<()> {
        self.leave(name)
    }

    fn next_element_name(&self) -> Option<String> {
        let frame = self.frames.last()?;
        frame
            .children
            .get(frame.pos)
            .map(|node| node.tag_name().name().to_string())
    }

    fn read_raw_xml(&mut self) -> Result<String> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| Error::decoding("Body", "no open element"))?;
        let node = frame
            .children
            .get(frame.pos)
            .copied()
            .ok_or_else(|| Error::decoding("Body", "empty body"))?;
        frame.pos += 1;
        capture_element(node, self.input)
    }
}

/// Source text of `node`, with the namespace declarations it inherits from
/// its ancestors added to its start tag so the text stands alone.
fn capture_element(node: Node<'_, '_>, input: &str) -> Result<String> {
    let range = node.range();
    let raw = input
        .get(range.clone())
        .ok_or_else(|| Error::decoding("Body", "element range outside input"))?;
    let tag_end = node.first_child().map_or(range.end, |child| child.range().start);
    let start_tag = input.get(range.start..tag_end).unwrap_or(raw);
    let name_end = raw
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c.is_whitespace() || c == '/' || c == '>')
        .map_or(raw.len(), |(i, _)| i);

    let inherited: Vec<_> = node
        .parent_element()
        .map(|parent| parent.namespaces().collect())
        .unwrap_or_default();
    let mut declarations = String::new();
    for namespace in node.namespaces() {
        let from_ancestor = inherited
            .iter()
            .any(|n| n.name() == namespace.name() && n.uri() == namespace.uri());
        let attribute = match namespace.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        if !from_ancestor || declares(start_tag, &attribute) {
            continue;
        }
        declarations.push(' ');
        declarations.push_str(&attribute);
        declarations.push_str("=\"");
        escape_into(&mut declarations, namespace.uri())?;
        declarations.push('"');
    }

    let mut text = String::with_capacity(raw.len() + declarations.len());
    text.push_str(&raw[..name_end]);
    text.push_str(&declarations);
    text.push_str(&raw[name_end..]);
    Ok(text)
}

/// True if `start_tag` carries the attribute `name` itself.
fn declares(start_tag: &str, name: &str) -> bool {
    start_tag.match_indices(name).any(|(i, _)| {
        start_tag[..i].ends_with(char::is_whitespace)
            && start_tag[i + name.len()..].trim_start().starts_with('=')
    })
}

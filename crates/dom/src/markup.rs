//! Reading and writing markup.
//!
//! Input must be well-formed XML (XHTML pages, standalone SVG). Elements are
//! stored under their qualified names and namespace declarations are turned
//! back into `xmlns` attributes where they first come into scope, so a
//! parse/serialize cycle keeps the document valid.

use crate::document::{Document, NodeId, NodeKind};
use crate::error::DomError;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// HTML elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{}:{}", p, local),
        _ => local.to_string(),
    }
}

impl Document {
    /// Parses well-formed markup into a new document. A DOCTYPE is accepted
    /// and dropped.
    pub fn parse(text: &str) -> Result<Self, DomError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let source = roxmltree::Document::parse_with_options(text, options)?;
        let mut doc = Document::new();
        let root = doc.root();
        for child in source.root().children() {
            doc.import_node(root, child);
        }
        log::debug!("Parsed document with {} nodes", doc.len());
        Ok(doc)
    }

    fn import_node(&mut self, parent: NodeId, node: roxmltree::Node<'_, '_>) {
        if node.is_element() {
            let tag = node.tag_name();
            let name = qualified(tag.namespace().and_then(|ns| node.lookup_prefix(ns)), tag.name());
            let element = self.append_element(parent, name);

            let inherited: Vec<(Option<&str>, &str)> = node
                .parent_element()
                .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
                .unwrap_or_default();
            for ns in node.namespaces() {
                if ns.uri() == XML_NAMESPACE || inherited.contains(&(ns.name(), ns.uri())) {
                    continue;
                }
                let attr_name = match ns.name() {
                    Some(prefix) => format!("xmlns:{}", prefix),
                    None => "xmlns".to_string(),
                };
                self.set_attr(element, &attr_name, ns.uri());
            }

            for attribute in node.attributes() {
                let prefix = match attribute.namespace() {
                    Some(XML_NAMESPACE) => Some("xml"),
                    Some(ns) => node.lookup_prefix(ns),
                    None => None,
                };
                self.set_attr(element, &qualified(prefix, attribute.name()), attribute.value());
            }

            for child in node.children() {
                self.import_node(element, child);
            }
        } else if node.is_text() {
            if let Some(text) = node.text() {
                let text_node = self.create_text(text);
                self.append_child(parent, text_node);
            }
        } else if node.is_comment()
            && let Some(text) = node.text()
        {
            let comment = self.create_comment(text);
            self.append_child(parent, comment);
        }
    }

    /// Serializes the whole document. Documents rooted at `<html>` get an
    /// HTML5 doctype.
    pub fn to_markup(&self) -> Result<String, DomError> {
        let mut buffer = Vec::new();
        if let Some(element) = self.document_element()
            && self.tag_name(element) == Some("html")
        {
            buffer.extend_from_slice(b"<!DOCTYPE html>\n");
        }
        let mut writer = Writer::new(buffer);
        for child in self.children(self.root()) {
            self.write_node(&mut writer, *child)?;
        }
        String::from_utf8(writer.into_inner()).map_err(|e| DomError::Serialize(e.to_string()))
    }

    /// Serializes a single node and its subtree.
    pub fn node_to_markup(&self, id: NodeId) -> Result<String, DomError> {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, id)?;
        String::from_utf8(writer.into_inner()).map_err(|e| DomError::Serialize(e.to_string()))
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), DomError> {
        let emit = |writer: &mut Writer<Vec<u8>>, event: Event<'_>| {
            writer
                .write_event(event)
                .map_err(|e| DomError::Serialize(e.to_string()))
        };

        match self.kind(id) {
            NodeKind::Document => {
                for child in self.children(id) {
                    self.write_node(writer, *child)?;
                }
            }
            NodeKind::Element { name, attributes } => {
                let mut start = BytesStart::new(name.as_str());
                for attribute in attributes {
                    start.push_attribute((attribute.name.as_str(), attribute.value.as_str()));
                }
                let children = self.children(id);
                if children.is_empty() && VOID_ELEMENTS.contains(&name.as_str()) {
                    emit(writer, Event::Empty(start))?;
                } else {
                    emit(writer, Event::Start(start))?;
                    for child in children {
                        self.write_node(writer, *child)?;
                    }
                    emit(writer, Event::End(BytesEnd::new(name.as_str())))?;
                }
            }
            NodeKind::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
            NodeKind::Comment(text) => emit(writer, Event::Comment(BytesText::from_escaped(text.as_str())))?,
        }
        Ok(())
    }
}

//! Minimal XML element tree
//!
//! The NewsML extractor needs path lookups ("NewsItem/NewsManagement"),
//! attribute access and subtree re-serialization over a document that is
//! parsed once up front. quick-xml's pull reader is used to build a small
//! owned tree supporting exactly that; this is not a general-purpose DOM.

use crate::{Result, WireError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A child of an element: nested element or a run of character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data, entity-decoded
    Text(String),
}

/// An XML element with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written in the document (prefixes kept verbatim)
    pub tag: String,
    /// Attributes in document order, xmlns declarations included
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order
    pub nodes: Vec<Node>,
}

impl Element {
    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(element_from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| WireError::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| WireError::Xml(e.to_string()))?
                        .to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.nodes.push(Node::Text(text));
                    }
                }
                Ok(Event::CData(ref e)) => {
                    let text = String::from_utf8_lossy(e).to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.nodes.push(Node::Text(text));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // declaration, doctype, comments, PIs
                Err(e) => return Err(WireError::Xml(format!("XML parse error: {e}"))),
            }
            buf.clear();
        }

        root.ok_or_else(|| WireError::Xml("document has no root element".to_string()))
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements.
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First direct text node, if any.
    pub fn text(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Text(text) => Some(text.as_str()),
            Node::Element(_) => None,
        })
    }

    /// First element matching a slash-separated tag path, in document order.
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.findall(path).into_iter().next()
    }

    /// All elements matching a slash-separated tag path, in document order.
    /// Every branch is explored, so paths with repeated intermediate
    /// elements collect matches from all of them.
    pub fn findall(&self, path: &str) -> Vec<&Element> {
        let mut matches: Vec<&Element> = vec![self];
        for tag in path.split('/') {
            matches = matches
                .iter()
                .flat_map(|el| el.children().filter(|child| child.tag == tag))
                .collect();
        }
        matches
    }

    /// Serialize this subtree back to markup, escaping character data.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        if self.nodes.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for node in &self.nodes {
            match node {
                Node::Element(el) => el.write_markup(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| WireError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| WireError::Xml(e.to_string()))?
            .to_string();
        attrs.push((key, value));
    }
    Ok(Element {
        tag,
        attrs,
        nodes: Vec::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.nodes.push(Node::Element(element)),
        None => {
            if root.is_some() {
                return Err(WireError::Xml("multiple root elements".to_string()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

//! Namespace-aware XML document access.
//!
//! Thin layer over `roxmltree` giving the rest of the crate qualified names,
//! child lookups by expanded name, xlink attribute access and verbatim source
//! fragments of elements.

use crate::constants::{XLINK_HREF, XLINK_TITLE};
use crate::error::Result;
use crate::models::XmlFragment;
use roxmltree::{Document, Node};
use std::fmt;

/// Expanded XML name plus the prefix conventionally used for it
///
/// Matching is done on namespace URI and local name only, the prefix is
/// there for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlName {
    pub namespace: &'static str,
    pub prefix: &'static str,
    pub local: &'static str,
}

impl XmlName {
    pub const fn new(namespace: &'static str, prefix: &'static str, local: &'static str) -> Self {
        Self {
            namespace,
            prefix,
            local,
        }
    }

    /// True when `node` is an element with this expanded name
    pub fn matches(&self, node: Node<'_, '_>) -> bool {
        node.is_element() && node.has_tag_name((self.namespace, self.local))
    }
}

impl fmt::Display for XmlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

/// Parsed observation document
pub struct ObservationDocument<'input> {
    document: Document<'input>,
}

impl<'input> ObservationDocument<'input> {
    /// Parse raw bytes as a UTF-8 XML document
    pub fn parse(bytes: &'input [u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Self::parse_str(text)
    }

    pub fn parse_str(text: &'input str) -> Result<Self> {
        let document = Document::parse(text)?;
        Ok(Self { document })
    }

    pub fn root_element(&self) -> Node<'_, 'input> {
        self.document.root_element()
    }

    pub fn source(&self) -> &'input str {
        self.document.input_text()
    }
}

/// First element child of `node` named `name`
pub fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    name: &XmlName,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| name.matches(*child))
}

/// All element children of `node` named `name`, in document order
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a XmlName,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |child| name.matches(*child))
}

/// First element child regardless of name
pub fn first_element_child<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.is_element())
}

pub fn attribute<'a>(node: Node<'a, '_>, name: &XmlName) -> Option<&'a str> {
    node.attribute((name.namespace, name.local))
}

pub fn xlink_href<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    attribute(node, &XLINK_HREF)
}

pub fn xlink_title<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    attribute(node, &XLINK_TITLE)
}

/// Concatenated text content of `node` and its descendants
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Element name exactly as written in the source start tag (`om:result`)
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let source = node.document().input_text();
    let start = node.range().start;
    let tag = source
        .get(start + 1..)
        .map(|rest| {
            rest.split(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .next()
                .unwrap_or_default()
        })
        .unwrap_or_default();

    if tag.is_empty() {
        node.tag_name().name().to_string()
    } else {
        tag.to_string()
    }
}

/// Copy an element verbatim out of the source document
pub fn fragment(node: Node<'_, '_>) -> XmlFragment {
    let xml = node
        .document()
        .input_text()
        .get(node.range())
        .unwrap_or_default();
    XmlFragment::new(qualified_name(node), xml)
}

/// Short description of an element for error messages
pub fn describe(node: Node<'_, '_>) -> String {
    match node.tag_name().namespace() {
        Some(namespace) => format!("{} ({})", qualified_name(node), namespace),
        None => qualified_name(node),
    }
}

//! Node tree for the thicket HTML parser.
//!
//! # Design
//!
//! The tree is single-ownership: every [`Node`] owns its ordered children
//! directly and there are no parent back-references, so a finished tree is a
//! plain value that can be shared across threads and queried concurrently.
//!
//! Lookups never return an absent value. When nothing matches, the query
//! engine hands back the shared [`NodeKind::Invalid`] sentinel, which has the
//! same shape as any other node (empty content, no attributes, no children).

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use strum_macros::Display;
use thicket_common::Location;

/// Depth-first queries over a node's subtree.
pub mod query;

pub use query::{DepthFirst, Matches};

/// Map of attribute names to values for an element.
///
/// Keys are unique; the parser keeps the first occurrence of a repeated key.
pub type AttributesMap = BTreeMap<String, String>;

/// Kind of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum NodeKind {
    /// Universal "not found" sentinel returned by failed lookups.
    Invalid,
    /// Synthetic root of every parsed document.
    Document,
    /// An element; its content is the lower-cased tag name.
    Element,
    /// Character data between tags.
    Text,
    /// `<!-- ... -->`
    Comment,
    /// `<! ... >`, e.g. `<!DOCTYPE html>`
    Declaration,
}

/// A node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// What this node represents.
    pub kind: NodeKind,

    /// Text for text, comment, and declaration nodes; tag name for elements.
    /// Empty for the document and the invalid sentinel.
    pub content: String,

    /// Tag attributes. Only populated on elements.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: AttributesMap,

    /// Child nodes. Only elements and the document ever have any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Where the node began in the input.
    pub loc: Location,
}

/// The node every failed lookup resolves to.
static INVALID_NODE: Node = Node {
    kind: NodeKind::Invalid,
    content: String::new(),
    attrs: AttributesMap::new(),
    children: Vec::new(),
    loc: Location::NONE,
};

impl Node {
    /// The shared "not found" sentinel.
    #[must_use]
    pub fn invalid() -> &'static Self {
        &INVALID_NODE
    }

    /// An empty document root.
    #[must_use]
    pub const fn document() -> Self {
        Self::leaf(NodeKind::Document, String::new(), Location::START)
    }

    /// An element named `name` with no children yet.
    #[must_use]
    pub const fn element(name: String, attrs: AttributesMap, loc: Location) -> Self {
        Self {
            kind: NodeKind::Element,
            content: name,
            attrs,
            children: Vec::new(),
            loc,
        }
    }

    /// A text node.
    #[must_use]
    pub const fn text_node(content: String, loc: Location) -> Self {
        Self::leaf(NodeKind::Text, content, loc)
    }

    /// A comment node.
    #[must_use]
    pub const fn comment(content: String, loc: Location) -> Self {
        Self::leaf(NodeKind::Comment, content, loc)
    }

    /// A declaration node.
    #[must_use]
    pub const fn declaration(content: String, loc: Location) -> Self {
        Self::leaf(NodeKind::Declaration, content, loc)
    }

    const fn leaf(kind: NodeKind, content: String, loc: Location) -> Self {
        Self {
            kind,
            content,
            attrs: AttributesMap::new(),
            children: Vec::new(),
            loc,
        }
    }

    /// Whether this is the "not found" sentinel.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.kind == NodeKind::Invalid
    }

    /// Whether this is an element node.
    #[must_use]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Whether this is an element with the given tag name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.is_element() && self.content == name
    }

    /// Value of attribute `key`, if the node has it.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Match an element against a [`Tag`] pattern.
    ///
    /// True when the node is an element named `tag.name` that carries every
    /// attribute of the pattern with an equal value. Extra attributes on the
    /// node are ignored. Always false for non-element nodes.
    #[must_use]
    pub fn matches_tag(&self, tag: &Tag) -> bool {
        self.is_named(&tag.name)
            && tag
                .attrs
                .iter()
                .all(|(key, value)| self.attrs.get(key) == Some(value))
    }

    /// Indented, human-readable rendering of the subtree for debugging.
    ///
    /// This is not markup: text is quoted with newlines escaped and spaces
    /// shown as `·`.
    #[must_use]
    pub fn pretty_tree(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let prefix = "  ".repeat(depth);
            let _ = match node.kind {
                NodeKind::Document => writeln!(out, "{prefix}Document"),
                NodeKind::Invalid => writeln!(out, "{prefix}Invalid"),
                NodeKind::Element if node.attrs.is_empty() => {
                    writeln!(out, "{prefix}<{}>", node.content)
                }
                NodeKind::Element => {
                    let attrs: Vec<String> = node
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    writeln!(out, "{prefix}<{} {}>", node.content, attrs.join(" "))
                }
                NodeKind::Text => {
                    let display = node.content.replace('\n', "\\n").replace(' ', "\u{00B7}");
                    writeln!(out, "{prefix}\"{display}\"")
                }
                NodeKind::Comment => writeln!(out, "{prefix}<!-- {} -->", node.content),
                NodeKind::Declaration => writeln!(out, "{prefix}<!{}>", node.content),
            };
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        out
    }
}

/// A tag pattern used for matching, never for storage.
///
/// # Example
/// ```ignore
/// let pattern = Tag::new("a").with_attr("class", "nav");
/// let link = document.find_tag(&pattern);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Lower-cased tag name to match.
    pub name: String,
    /// Attributes the element must carry with exactly these values.
    pub attrs: AttributesMap,
}

impl Tag {
    /// A pattern matching any element named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Also require attribute `key` to equal `value`.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(key.into(), value.into());
        self
    }
}

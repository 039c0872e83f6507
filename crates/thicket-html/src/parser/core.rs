use thicket_common::Location;
use thicket_dom::{AttributesMap, Node};

use super::attributes::split_fields;
use crate::error::{ErrorKind, ParseError};
use crate::lexer::helpers::trim_space;
use crate::lexer::{Token, TokenKind, expand_entities};

/// Elements that never have children and need no closing tag.
pub const VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "colgroup", "embed", "hr", "image", "img", "input", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Whether `name` (already lower-cased) is a void element.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Output of a parse: the tree plus its diagnostics.
///
/// `document` is always a [`thicket_dom::NodeKind::Document`] root, even when
/// `fatal` is set; in that case it holds everything built before the failure.
#[derive(Debug, Clone)]
pub struct Parsed {
    /// Root of the tree.
    pub document: Node,
    /// The error that stopped parsing, if any.
    pub fatal: Option<ParseError>,
    /// Recoverable problems, in the order they were found.
    pub warnings: Vec<ParseError>,
}

impl Parsed {
    /// Whether parsing finished without a fatal error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.fatal.is_none()
    }

    /// The tree, or the fatal error. Warnings are discarded.
    ///
    /// # Errors
    ///
    /// Returns the fatal error when parsing was aborted.
    pub fn into_result(self) -> Result<Node, ParseError> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(self.document),
        }
    }
}

/// Builds a node tree from a token sequence.
///
/// Keeps a stack of open elements whose bottom entry is the document root.
/// Each new node becomes a child of the element on top of the stack; a
/// non-void element is pushed and stays open until a closing tag with its name
/// arrives while it is on top. The stack owns the open elements and attaches
/// each one to its parent when it is popped.
pub struct TreeBuilder {
    stack_of_open_elements: Vec<Node>,
    warnings: Vec<ParseError>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a builder holding only the document root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack_of_open_elements: vec![Node::document()],
            warnings: Vec::new(),
        }
    }

    /// Consume `tokens` (stopping at [`TokenKind::Eof`]) and return the tree.
    ///
    /// A fatal error stops the loop immediately; the tree built so far is
    /// returned alongside it.
    #[must_use]
    pub fn run(mut self, tokens: &[Token<'_>]) -> Parsed {
        let end = tokens.last().map_or(Location::START, |token| token.loc);

        let fatal = self.process_tokens(tokens).err();
        if fatal.is_none() {
            self.check_open_elements(end);
        }

        Parsed {
            document: self.take_document(),
            fatal,
            warnings: self.warnings,
        }
    }

    fn process_tokens(&mut self, tokens: &[Token<'_>]) -> Result<(), ParseError> {
        for token in tokens {
            if self.stack_of_open_elements.is_empty() {
                return Err(ParseError::new(token.loc, ErrorKind::EmptyTagStack));
            }

            let node = match token.kind {
                TokenKind::Eof => break,
                TokenKind::Comment => {
                    Node::comment(Self::trimmed_content(token, "comment")?, token.loc)
                }
                TokenKind::Declaration => {
                    Node::declaration(Self::trimmed_content(token, "declaration")?, token.loc)
                }
                // no entity expansion and no tag lexing inside script/style/pre
                TokenKind::Verbatim => Node::text_node(
                    String::from_utf8_lossy(token.data).into_owned(),
                    token.loc,
                ),
                TokenKind::Text => self.text(token)?,
                TokenKind::TagOpen | TokenKind::TagSelfClose => self.open_tag(token)?,
                TokenKind::TagClose => {
                    self.close_tag(token)?;
                    continue;
                }
            };

            self.insert(node);
        }
        Ok(())
    }

    /// Content of a comment or declaration, whitespace-trimmed and required
    /// to be non-empty.
    fn trimmed_content(token: &Token<'_>, context: &'static str) -> Result<String, ParseError> {
        let data = trim_space(token.data);
        if data.is_empty() {
            return Err(ParseError::new(token.loc, ErrorKind::EmptyContent { context }));
        }
        Ok(String::from_utf8_lossy(data).into_owned())
    }

    /// Text keeps its surrounding whitespace; only entities are expanded.
    fn text(&mut self, token: &Token<'_>) -> Result<Node, ParseError> {
        if token.data.is_empty() {
            return Err(ParseError::new(
                token.loc,
                ErrorKind::EmptyContent { context: "text" },
            ));
        }

        let (content, warnings) = expand_entities(token.data, token.data_loc);
        self.warnings.extend(warnings);
        Ok(Node::text_node(content, token.loc))
    }

    fn open_tag(&mut self, token: &Token<'_>) -> Result<Node, ParseError> {
        let fields = split_fields(token.data, token.data_loc);
        let Some((name, attr_fields)) = fields.split_first() else {
            return Err(ParseError::new(
                token.loc,
                ErrorKind::EmptyContent {
                    context: "opening tag",
                },
            ));
        };

        let mut attrs = AttributesMap::new();
        for field in attr_fields {
            let key = String::from_utf8_lossy(field.key).into_owned();
            let (value, value_warnings) = match field.value {
                Some(value) => expand_entities(value.data, value.loc),
                None => (String::new(), Vec::new()),
            };

            if key.is_empty() {
                self.warnings
                    .push(ParseError::new(field.loc, ErrorKind::EmptyAttributeKey));
            } else if attrs.contains_key(&key) {
                self.warnings
                    .push(ParseError::new(field.loc, ErrorKind::DuplicateAttribute { key }));
            } else {
                let _ = attrs.insert(key, value);
            }
            self.warnings.extend(value_warnings);
        }

        let name = String::from_utf8_lossy(name.key).to_ascii_lowercase();
        Ok(Node::element(name, attrs, token.loc))
    }

    /// Pop the current element if the closing tag names it; otherwise warn and
    /// drop the closing tag, leaving the stack as it was.
    fn close_tag(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        let data = trim_space(token.data);
        if data.is_empty() {
            return Err(ParseError::new(
                token.loc,
                ErrorKind::EmptyContent {
                    context: "closing tag",
                },
            ));
        }
        let name = String::from_utf8_lossy(data).into_owned();

        let depth = self.stack_of_open_elements.len();
        let Some(current) = self.stack_of_open_elements.last() else {
            return Err(ParseError::new(token.loc, ErrorKind::EmptyTagStack));
        };

        // the document root is never popped
        if depth > 1 && current.content.eq_ignore_ascii_case(&name) {
            self.pop_current_node();
        } else {
            let expected = current.content.clone();
            self.warnings.push(ParseError::new(
                token.loc,
                ErrorKind::TagMismatch {
                    expected,
                    found: name,
                },
            ));
        }
        Ok(())
    }

    /// Append `node` to the current node, or open it if it is a non-void
    /// element.
    fn insert(&mut self, node: Node) {
        if node.is_element() && !is_void_element(&node.content) {
            self.stack_of_open_elements.push(node);
        } else if let Some(current) = self.stack_of_open_elements.last_mut() {
            current.children.push(node);
        }
    }

    /// Close the current node and attach it to its parent.
    fn pop_current_node(&mut self) {
        if self.stack_of_open_elements.len() < 2 {
            return;
        }
        if let Some(node) = self.stack_of_open_elements.pop()
            && let Some(parent) = self.stack_of_open_elements.last_mut()
        {
            parent.children.push(node);
        }
    }

    /// Report elements still open after the last token.
    fn check_open_elements(&mut self, end: Location) {
        match self.stack_of_open_elements.as_slice() {
            [] => self
                .warnings
                .push(ParseError::new(end, ErrorKind::EmptyTagStack)),
            [_document] => {}
            [.., innermost] => {
                let warning = ParseError::new(
                    innermost.loc,
                    ErrorKind::UnclosedTag {
                        name: innermost.content.clone(),
                    },
                );
                self.warnings.push(warning);
            }
        }
    }

    /// Close every open element and hand back the root.
    fn take_document(&mut self) -> Node {
        while self.stack_of_open_elements.len() > 1 {
            self.pop_current_node();
        }
        self.stack_of_open_elements
            .pop()
            .unwrap_or_else(Node::document)
    }
}

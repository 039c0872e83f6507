//! Diagnostics produced while lexing and parsing.
//!
//! The same type carries both fatal errors and warnings; [`ErrorKind::is_fatal`]
//! tells them apart. Every diagnostic is anchored to a [`Location`] and displays
//! as `line:col: message`.

use thicket_common::Location;
use thiserror::Error;

/// A diagnostic anchored to a position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{loc}: {kind}")]
pub struct ParseError {
    /// Where the problem was detected.
    pub loc: Location,
    /// What went wrong.
    pub kind: ErrorKind,
}

impl ParseError {
    /// Create a diagnostic at `loc`.
    #[must_use]
    pub const fn new(loc: Location, kind: ErrorKind) -> Self {
        Self { loc, kind }
    }

    /// Whether this diagnostic aborts the current stage.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Kinds of diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Zero-length input.
    #[error("empty input")]
    EmptyInput,

    /// A comment, declaration, tag, or text block ran off the end of the input.
    #[error("error lexing {context}: unexpected EOF")]
    UnexpectedEof {
        /// Construct being scanned.
        context: &'static str,
    },

    /// Only whitespace followed the last tag; it was ignored.
    #[error("ignored trailing whitespace at end of input")]
    TrailingWhitespace,

    /// A character reference could not be decoded; the literal text was kept.
    #[error("invalid entity: {0}")]
    InvalidEntity(#[from] EntityIssue),

    /// A token that requires content had none after trimming.
    #[error("error parsing {context}: empty token content")]
    EmptyContent {
        /// Construct being parsed.
        context: &'static str,
    },

    /// The stack of open elements lost its document root.
    #[error("empty tag stack")]
    EmptyTagStack,

    /// A closing tag did not match the current element and was dropped.
    #[error("mismatched tags: expected {expected:?} but got {found:?}")]
    TagMismatch {
        /// Name of the element that is currently open.
        expected: String,
        /// Name carried by the closing tag.
        found: String,
    },

    /// An attribute key was repeated; the first value was kept.
    #[error("repeated attribute key {key:?}")]
    DuplicateAttribute {
        /// The repeated key.
        key: String,
    },

    /// An attribute value had no key in front of it; the field was dropped.
    #[error("attribute value without a key")]
    EmptyAttributeKey,

    /// Elements were still open at the end of input.
    #[error("unclosed tag {name:?}")]
    UnclosedTag {
        /// Innermost element left open.
        name: String,
    },
}

impl ErrorKind {
    /// Whether this kind of diagnostic always aborts the current stage.
    ///
    /// [`ErrorKind::EmptyTagStack`] is fatal when the parser meets it mid-stream
    /// and a warning when it is detected after the last token.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::UnexpectedEof { .. } | Self::EmptyContent { .. }
        )
    }
}

/// Why a character reference could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityIssue {
    /// Nothing followed the `&`.
    #[error("no data")]
    NoData,

    /// A legacy entity matched without its terminating semicolon.
    #[error("no terminating semicolon")]
    MissingSemicolon,

    /// The name is not in the entity table.
    #[error("no matching entity")]
    NoMatch,

    /// The digits of a numeric reference did not parse.
    #[error("invalid number {raw:?}")]
    InvalidNumber {
        /// The text between `#` (or `#x`) and `;`.
        raw: String,
    },
}

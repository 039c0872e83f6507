use core::fmt;

use strum_macros::Display;
use thicket_common::Location;

/// Kinds of tokens the lexer emits.
///
/// There is deliberately no "invalid" kind: every token the parser sees is one
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// Character data that is subject to entity expansion.
    Text,
    /// Literal body of a `script`, `style`, or `pre` element.
    Verbatim,
    /// `<name attr=value>`
    TagOpen,
    /// `</name>`
    TagClose,
    /// `<name attr=value/>`
    TagSelfClose,
    /// `<!-- ... -->`
    Comment,
    /// `<! ... >`
    Declaration,
    /// End of input.
    Eof,
}

/// A token borrowing its raw bytes from the input buffer.
///
/// Raw bytes exclude the construct's delimiters. For open and self-closing
/// tags they hold the full name-and-attributes body, without the trailing `/`
/// of a self-closing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What was scanned.
    pub kind: TokenKind,
    /// Location of the first byte of the construct, delimiters included.
    pub loc: Location,
    /// Location and offset of the first raw byte.
    pub data_loc: Location,
    /// Raw bytes between the delimiters.
    pub data: &'a [u8],
}

impl<'a> Token<'a> {
    /// Create a token whose raw bytes start at `data_loc`.
    #[must_use]
    pub const fn new(kind: TokenKind, loc: Location, data_loc: Location, data: &'a [u8]) -> Self {
        Self {
            kind,
            loc,
            data_loc,
            data,
        }
    }

    /// The end-of-file token at `loc`.
    #[must_use]
    pub const fn eof(loc: Location) -> Self {
        Self::new(TokenKind::Eof, loc, loc, &[])
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// The tag name of an open or self-closing tag: the raw bytes up to the
    /// first whitespace, ASCII lower-cased. `None` for other kinds.
    #[must_use]
    pub fn tag_name(&self) -> Option<String> {
        if !matches!(self.kind, TokenKind::TagOpen | TokenKind::TagSelfClose) {
            return None;
        }
        let name = self
            .data
            .trim_ascii_start()
            .split(|b| b.is_ascii_whitespace() || *b == b'=')
            .next()
            .unwrap_or_default();
        Some(String::from_utf8_lossy(name).to_ascii_lowercase())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {:?}",
            self.loc,
            self.kind,
            String::from_utf8_lossy(self.data)
        )
    }
}

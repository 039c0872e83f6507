//! Error-tolerant HTML lexer and parser.
//!
//! # Scope
//!
//! This crate turns a raw byte buffer into a [`thicket_dom::Node`] tree:
//! - **Lexer** - scans bytes into comment, declaration, tag, text, and
//!   verbatim (`script`/`style`/`pre` body) tokens
//! - **Entity decoder** - resolves `&name;`, `&#NN;`, and `&#xHH;` references,
//!   always producing some output
//! - **Tree builder** - a stack of open elements that recovers locally from
//!   malformed markup and reports what it repaired as warnings
//!
//! Only a missing terminator, empty input, or a construct with no content is
//! fatal; in every case a document tree is still returned.
//!
//! # Not Implemented
//!
//! - HTML5 insertion modes, implied tags, and foster parenting
//! - Character encoding detection (input bytes are taken as already decoded)
//! - Serialization back to markup

/// Diagnostics.
pub mod error;
/// Lexer, entity decoder, and named-entity table.
pub mod lexer;
/// Tree construction.
pub mod parser;

pub use error::{EntityIssue, ErrorKind, ParseError};
pub use lexer::{Lexed, Token, TokenKind, lex};
pub use parser::{Parsed, TreeBuilder};

/// Parse HTML.
///
/// Returns the document root, the fatal error (if one was hit), and every
/// warning from lexing and parsing in order. The document is always present:
/// when lexing fails, the tokens scanned before the failure are still built
/// into a tree.
///
/// # Example
/// ```ignore
/// let parsed = thicket_html::parse(b"<p class=intro>Hi &amp; bye</p>");
/// assert!(parsed.is_ok());
/// assert_eq!(parsed.document.find("p").text(), "Hi & bye");
/// ```
#[must_use]
pub fn parse(data: &[u8]) -> Parsed {
    let Lexed {
        tokens,
        fatal,
        mut warnings,
    } = lex(data);

    let mut parsed = TreeBuilder::new().run(&tokens);
    warnings.append(&mut parsed.warnings);
    parsed.warnings = warnings;
    parsed.fatal = fatal.or(parsed.fatal);
    parsed
}

use thicket_common::Location;

use super::helpers::{
    CLOSE_TAG_START, COMMENT_START, DECLARATION_START, Scanned, TAG_START, lex_comment,
    lex_declaration, lex_tag_close, lex_tag_open, lex_text, lex_verbatim,
};
use super::token::{Token, TokenKind};
use crate::error::{ErrorKind, ParseError};

/// Elements whose body is scanned as opaque literal text.
pub const VERBATIM_ELEMENTS: [&str; 3] = ["script", "style", "pre"];

/// Output of [`lex`].
///
/// Tokens produced before a fatal error are kept; the trailing
/// [`TokenKind::Eof`] token is only present when lexing succeeded.
#[derive(Debug, Default)]
pub struct Lexed<'a> {
    /// Tokens in input order.
    pub tokens: Vec<Token<'a>>,
    /// The error that stopped lexing, if any.
    pub fatal: Option<ParseError>,
    /// Recoverable problems, in input order.
    pub warnings: Vec<ParseError>,
}

/// Scan `data` into tokens.
///
/// Dispatches on the byte at the cursor: `<!--` starts a comment, `<!` a
/// declaration, `</` a closing tag, and any other `<` an opening tag. Anything
/// else is text, or verbatim text when the previous token opened a `script`,
/// `style`, or `pre` element.
#[must_use]
pub fn lex(data: &[u8]) -> Lexed<'_> {
    let mut lexed = Lexed::default();
    if data.is_empty() {
        lexed.fatal = Some(ParseError::new(Location::START, ErrorKind::EmptyInput));
        return lexed;
    }

    let mut loc = Location::START;
    while loc.is_within(data) {
        let rest = &data[loc.offset..];

        let scanned = if rest.starts_with(COMMENT_START) {
            lex_comment(data, loc)
        } else if rest.starts_with(DECLARATION_START) {
            lex_declaration(data, loc)
        } else if rest.starts_with(CLOSE_TAG_START) {
            lex_tag_close(data, loc)
        } else if rest.starts_with(TAG_START) {
            lex_tag_open(data, loc)
        } else if let Some(closing) = verbatim_closing_tag(lexed.tokens.last()) {
            lex_verbatim(data, loc, &closing)
        } else {
            lex_text(data, loc)
        };

        match scanned {
            Ok(Scanned::Token(token, next)) => {
                lexed.tokens.push(token);
                loc = next;
            }
            Ok(Scanned::Skipped(warning, next)) => {
                lexed.warnings.push(warning);
                loc = next;
            }
            Err(err) => {
                lexed.fatal = Some(err);
                return lexed;
            }
        }
    }

    lexed.tokens.push(Token::eof(loc));
    lexed
}

/// The closing tag that ends a verbatim body, when `last` opened one.
fn verbatim_closing_tag(last: Option<&Token<'_>>) -> Option<Vec<u8>> {
    let token = last.filter(|token| token.kind == TokenKind::TagOpen)?;
    let name = token.tag_name()?;
    VERBATIM_ELEMENTS
        .contains(&name.as_str())
        .then(|| format!("</{name}>").into_bytes())
}

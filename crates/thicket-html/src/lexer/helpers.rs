//! Scanners for the individual lexical constructs.
//!
//! Each scanner starts at the construct's first byte, finds its terminator,
//! and returns the token together with the location just past it. A missing
//! terminator is fatal, except that a whitespace-only tail after the last tag
//! is downgraded to a warning.

use thicket_common::Location;

use super::token::{Token, TokenKind};
use crate::error::{ErrorKind, ParseError};

pub(super) const COMMENT_START: &[u8] = b"<!--";
pub(super) const COMMENT_END: &[u8] = b"-->";
pub(super) const DECLARATION_START: &[u8] = b"<!";
pub(super) const CLOSE_TAG_START: &[u8] = b"</";
pub(super) const TAG_START: &[u8] = b"<";
pub(super) const TAG_END: &[u8] = b">";

/// Result of running one scanner.
#[derive(Debug)]
pub enum Scanned<'a> {
    /// A token and the location just past it.
    Token(Token<'a>, Location),
    /// Nothing emitted; the warning explains why and lexing resumes at the
    /// location (which is the end of input).
    Skipped(ParseError, Location),
}

fn unexpected_eof(loc: Location, context: &'static str) -> ParseError {
    ParseError::new(loc, ErrorKind::UnexpectedEof { context })
}

/// Scan `start ... end` with the raw bytes between the delimiters as data.
fn lex_delimited<'a>(
    data: &'a [u8],
    loc: Location,
    (start, end): (&[u8], &[u8]),
    kind: TokenKind,
    context: &'static str,
) -> Result<Scanned<'a>, ParseError> {
    let body = loc.advance_by(data, start.len());
    let terminator = body.advance_to(data, end);
    if !terminator.is_within(data) {
        return Err(unexpected_eof(loc, context));
    }

    let token = Token::new(kind, loc, body, &data[body.offset..terminator.offset]);
    Ok(Scanned::Token(token, terminator.advance_by(data, end.len())))
}

/// `<!-- ... -->`
pub(super) fn lex_comment(data: &[u8], loc: Location) -> Result<Scanned<'_>, ParseError> {
    lex_delimited(
        data,
        loc,
        (COMMENT_START, COMMENT_END),
        TokenKind::Comment,
        "comment",
    )
}

/// `<! ... >`
pub(super) fn lex_declaration(data: &[u8], loc: Location) -> Result<Scanned<'_>, ParseError> {
    lex_delimited(
        data,
        loc,
        (DECLARATION_START, TAG_END),
        TokenKind::Declaration,
        "declaration",
    )
}

/// `</ ... >`
pub(super) fn lex_tag_close(data: &[u8], loc: Location) -> Result<Scanned<'_>, ParseError> {
    lex_delimited(
        data,
        loc,
        (CLOSE_TAG_START, TAG_END),
        TokenKind::TagClose,
        "closing tag",
    )
}

/// `< ... >` or `< ... />`
///
/// The tag is self-closing when the byte right before `>` is `/`; that byte is
/// left out of the token data.
pub(super) fn lex_tag_open(data: &[u8], loc: Location) -> Result<Scanned<'_>, ParseError> {
    let scanned = lex_delimited(
        data,
        loc,
        (TAG_START, TAG_END),
        TokenKind::TagOpen,
        "opening tag",
    )?;

    Ok(match scanned {
        Scanned::Token(mut token, next) => {
            let raw = token.data;
            if let Some((b'/', name_and_attrs)) = raw.split_last() {
                token.kind = TokenKind::TagSelfClose;
                token.data = name_and_attrs;
            }
            Scanned::Token(token, next)
        }
        skipped @ Scanned::Skipped(..) => skipped,
    })
}

/// Character data up to the next `<`.
pub(super) fn lex_text(data: &[u8], loc: Location) -> Result<Scanned<'_>, ParseError> {
    let end = loc.advance_to(data, TAG_START);
    finish_run(data, loc, end, TokenKind::Text, "text")
}

/// Literal body of a verbatim element, up to `closing` (compared ASCII
/// case-insensitively), e.g. `</script>`.
pub(super) fn lex_verbatim<'a>(
    data: &'a [u8],
    loc: Location,
    closing: &[u8],
) -> Result<Scanned<'a>, ParseError> {
    let end = loc.advance(data, |rest| starts_with_ignore_ascii_case(rest, closing));
    finish_run(data, loc, end, TokenKind::Verbatim, "verbatim text")
}

fn finish_run<'a>(
    data: &'a [u8],
    loc: Location,
    end: Location,
    kind: TokenKind,
    context: &'static str,
) -> Result<Scanned<'a>, ParseError> {
    let run = &data[loc.offset..end.offset];
    if end.is_within(data) {
        return Ok(Scanned::Token(Token::new(kind, loc, loc, run), end));
    }

    // Nothing but whitespace after the last tag, typically trailing newlines
    if trim_space(run).is_empty() {
        let warning = ParseError::new(loc, ErrorKind::TrailingWhitespace);
        return Ok(Scanned::Skipped(warning, end));
    }
    Err(unexpected_eof(loc, context))
}

/// Trim leading and trailing ASCII whitespace, vertical tab included.
pub(crate) fn trim_space(data: &[u8]) -> &[u8] {
    let is_space = |b: &u8| matches!(*b, b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r' | b' ');
    let start = data.iter().position(|b| !is_space(b)).unwrap_or(data.len());
    let end = data.iter().rposition(|b| !is_space(b)).map_or(start, |last| last + 1);
    &data[start..end]
}

/// ASCII case-insensitive `starts_with`.
pub(super) fn starts_with_ignore_ascii_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

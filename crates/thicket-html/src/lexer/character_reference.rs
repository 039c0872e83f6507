//! Character reference decoding.
//!
//! Decoding never fails outright: every malformed reference is reported as an
//! [`EntityIssue`] and falls back to the literal input text, so the caller
//! always gets some expansion and always makes progress.

use thicket_common::Location;

use super::named_character_references::{LONGEST_ENTITY, LONGEST_LEGACY_ENTITY, lookup_entity};
use crate::error::{EntityIssue, ParseError};

/// Outcome of decoding one character reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Replacement text, or the literal reference when nothing decoded.
    pub expansion: String,
    /// Number of input bytes the reference spans; at least 1 for non-empty input.
    pub consumed: usize,
    /// Why the reference was not decoded cleanly, if it wasn't.
    pub issue: Option<EntityIssue>,
}

impl Decoded {
    fn ok(expansion: &str, consumed: usize) -> Self {
        Self {
            expansion: expansion.to_string(),
            consumed,
            issue: None,
        }
    }

    /// Echo the first `consumed` bytes of `data` verbatim.
    fn literal(data: &[u8], consumed: usize, issue: EntityIssue) -> Self {
        Self {
            expansion: String::from_utf8_lossy(&data[..consumed]).into_owned(),
            consumed,
            issue: Some(issue),
        }
    }
}

/// Decode the character reference at the start of `data`, which must begin
/// with `&`.
///
/// Handles `&name;`, `&#NN;`, `&#xHH;`, and the legacy semicolon-less named
/// references. A numeric reference converts straight to a character; values
/// that are not Unicode scalar values become U+FFFD rather than an error.
#[must_use]
pub fn decode(data: &[u8]) -> Decoded {
    // "&" alone, or nothing at all
    if data.len() < 2 {
        return Decoded::literal(data, data.len(), EntityIssue::NoData);
    }

    let len = match data.iter().position(|&b| b == b';') {
        // `&;` is empty; anything past the longest entity can't be one
        Some(semicolon) if semicolon > 1 && semicolon < LONGEST_ENTITY => semicolon + 1,
        _ => return decode_legacy(data),
    };
    let reference = &data[..len];

    if data[1] != b'#' {
        return match std::str::from_utf8(reference).ok().and_then(lookup_entity) {
            Some(expansion) => Decoded::ok(expansion, len),
            None => Decoded::literal(data, len, EntityIssue::NoMatch),
        };
    }

    let (digits, radix) = if data[2] == b'x' {
        (&reference[3..len - 1], 16)
    } else {
        (&reference[2..len - 1], 10)
    };

    let parsed = std::str::from_utf8(digits)
        .ok()
        .and_then(|digits| i64::from_str_radix(digits, radix).ok());

    match parsed {
        Some(codepoint) => {
            let c = u32::try_from(codepoint)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            Decoded {
                expansion: c.to_string(),
                consumed: len,
                issue: None,
            }
        }
        None => Decoded::literal(
            data,
            len,
            EntityIssue::InvalidNumber {
                raw: String::from_utf8_lossy(digits).into_owned(),
            },
        ),
    }
}

/// Probe for a legacy reference written without its semicolon.
///
/// Candidate spans run from the longest legacy name up to the longest legal
/// reference; the first table hit wins. With no hit only the `&` is consumed.
fn decode_legacy(data: &[u8]) -> Decoded {
    let longest = LONGEST_ENTITY.min(data.len());
    for len in LONGEST_LEGACY_ENTITY..=longest {
        let candidate = std::str::from_utf8(&data[..len]).ok().and_then(lookup_entity);
        if let Some(expansion) = candidate {
            return Decoded {
                expansion: expansion.to_string(),
                consumed: len,
                issue: Some(EntityIssue::MissingSemicolon),
            };
        }
    }
    Decoded::literal(data, 1, EntityIssue::NoMatch)
}

/// Expand every character reference in `data`.
///
/// `loc` is the location of `data[0]` in the input; warnings are reported at
/// the `&` of each reference that failed to decode cleanly. Bytes between
/// references are copied verbatim and no whitespace is trimmed.
#[must_use]
pub fn expand_entities(data: &[u8], loc: Location) -> (String, Vec<ParseError>) {
    let mut out = Vec::with_capacity(data.len());
    let mut warnings = Vec::new();

    let mut cursor = Location { offset: 0, ..loc };
    loop {
        let amp = cursor.advance_to(data, b"&");
        out.extend_from_slice(&data[cursor.offset..amp.offset]);
        if !amp.is_within(data) {
            break;
        }

        let decoded = decode(&data[amp.offset..]);
        if let Some(issue) = decoded.issue {
            warnings.push(ParseError::new(amp.rebase(loc.offset), issue.into()));
        }
        out.extend_from_slice(decoded.expansion.as_bytes());
        cursor = amp.advance_by(data, decoded.consumed);
    }

    (String::from_utf8_lossy(&out).into_owned(), warnings)
}

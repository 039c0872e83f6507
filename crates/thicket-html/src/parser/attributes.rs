//! Splitting an opening tag's raw bytes into name and attribute fields.
//!
//! Field 0 is the tag name; every later field is `key` or `key=value`. Fields
//! are separated by unquoted whitespace, `=` may be surrounded by whitespace,
//! and a quoted value runs to its matching quote with no escape handling.

use thicket_common::Location;

/// One field of an opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    /// Location of the key's first byte.
    pub loc: Location,
    /// Tag name for field 0, attribute key otherwise. May be empty.
    pub key: &'a [u8],
    /// Value after `=`, if there was one.
    pub value: Option<FieldValue<'a>>,
}

/// The value part of a `key=value` field, quotes removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue<'a> {
    /// Location of the value's first byte (inside the quotes).
    pub loc: Location,
    /// Raw value bytes, entities not yet expanded.
    pub data: &'a [u8],
}

const fn is_space(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

fn not_space(rest: &[u8]) -> bool {
    !is_space(rest[0])
}

fn space_or_equals(rest: &[u8]) -> bool {
    is_space(rest[0]) || rest[0] == b'='
}

/// Split `data`, the raw bytes of an opening tag that begin at `start`.
///
/// An unquoted value that runs straight into another `=` is taken to be the
/// next key rather than this field's value (`a= b=c` is `a=""` and `b="c"`),
/// which recovers the common case of a forgotten value.
#[must_use]
pub fn split_fields(data: &[u8], start: Location) -> Vec<Field<'_>> {
    let base = start.offset;
    let mut fields = Vec::new();

    let mut loc = Location { offset: 0, ..start };
    while loc.is_within(data) {
        // skip over leading spaces
        loc = loc.advance(data, not_space);
        if !loc.is_within(data) {
            break;
        }

        // key runs to a space or '='
        let key_start = loc;
        loc = loc.advance(data, space_or_equals);
        let mut field = Field {
            loc: key_start.rebase(base),
            key: &data[key_start.offset..loc.offset],
            value: None,
        };

        // spaces are allowed before the '='
        loc = loc.advance(data, not_space);
        if !loc.is_within(data) || data[loc.offset] != b'=' {
            fields.push(field);
            continue;
        }
        loc = loc.step(b'=');

        // ... and after it
        let value_start = loc.advance(data, not_space);
        let (value, next) = match data.get(value_start.offset) {
            None => (empty_value(value_start, base), value_start),
            Some(&quote @ (b'"' | b'\'')) => {
                let content = value_start.step(quote);
                let close = content.advance(data, |rest| rest[0] == quote);
                let value = FieldValue {
                    loc: content.rebase(base),
                    data: &data[content.offset..close.offset],
                };
                let next = if close.is_within(data) {
                    close.step(quote)
                } else {
                    close
                };
                (value, next)
            }
            Some(_) => {
                let end = value_start.advance(data, space_or_equals);
                if data.get(end.offset) == Some(&b'=') {
                    // this is the next key, not a value
                    (empty_value(value_start, base), value_start)
                } else {
                    let value = FieldValue {
                        loc: value_start.rebase(base),
                        data: &data[value_start.offset..end.offset],
                    };
                    (value, end)
                }
            }
        };

        field.value = Some(value);
        fields.push(field);
        loc = next;
    }

    fields
}

const fn empty_value<'a>(loc: Location, base: usize) -> FieldValue<'a> {
    FieldValue {
        loc: loc.rebase(base),
        data: &[],
    }
}

use core::fmt;

use serde::Serialize;

/// A cursor position in the input buffer.
///
/// Lines and columns are 1-indexed, the byte offset is 0-indexed. A newline
/// advances the line and resets the column, a carriage return advances only the
/// offset, and every other byte advances the column by one. Scanning is byte
/// oriented: a multi-byte UTF-8 sequence counts as several columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Location {
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub col: usize,
    /// 0-indexed byte offset.
    pub offset: usize,
}

impl Location {
    /// The location of the first byte of any input.
    pub const START: Self = Self {
        line: 1,
        col: 1,
        offset: 0,
    };

    /// Placeholder for nodes that do not come from the input at all.
    pub const NONE: Self = Self {
        line: 0,
        col: 0,
        offset: 0,
    };

    /// Move past a single byte.
    #[must_use]
    pub const fn step(self, byte: u8) -> Self {
        match byte {
            b'\n' => Self {
                line: self.line + 1,
                col: 1,
                offset: self.offset + 1,
            },
            b'\r' => Self {
                offset: self.offset + 1,
                ..self
            },
            _ => Self {
                col: self.col + 1,
                offset: self.offset + 1,
                ..self
            },
        }
    }

    /// Scan forward from `self.offset` while `stop` is false for the remaining
    /// suffix of `data`.
    ///
    /// Returns the location of the first byte for which `stop` held, or the
    /// location one past the end of `data` if it never did. Use
    /// [`Location::is_within`] to tell the two apart.
    #[must_use]
    pub fn advance<F>(self, data: &[u8], stop: F) -> Self
    where
        F: Fn(&[u8]) -> bool,
    {
        let mut loc = self;
        while loc.offset < data.len() && !stop(&data[loc.offset..]) {
            loc = loc.step(data[loc.offset]);
        }
        loc
    }

    /// Step over the next `n` bytes of `data`, stopping early at the end.
    #[must_use]
    pub fn advance_by(self, data: &[u8], n: usize) -> Self {
        let end = self.offset.saturating_add(n).min(data.len());
        data.get(self.offset..end)
            .unwrap_or_default()
            .iter()
            .fold(self, |loc, &byte| loc.step(byte))
    }

    /// Scan forward until `data` at the cursor starts with `prefix`.
    #[must_use]
    pub fn advance_to(self, data: &[u8], prefix: &[u8]) -> Self {
        self.advance(data, |rest| rest.starts_with(prefix))
    }

    /// Whether the cursor still points at a byte of `data`.
    #[must_use]
    pub const fn is_within(self, data: &[u8]) -> bool {
        self.offset < data.len()
    }

    /// Translate a cursor that scanned a sub-slice into absolute coordinates.
    ///
    /// Scanners over a token's raw bytes start from `Location { offset: 0, ..start }`;
    /// `base` is the absolute offset of that slice in the input buffer.
    #[must_use]
    pub const fn rebase(self, base: usize) -> Self {
        Self {
            offset: self.offset + base,
            ..self
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

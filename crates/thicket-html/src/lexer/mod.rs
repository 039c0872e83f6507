//! HTML lexer module.
//!
//! Turns a byte buffer into an ordered sequence of [`Token`]s. Scanning is
//! byte oriented and only ever inspects structural ASCII bytes, so input does
//! not need to be valid UTF-8.

/// Character reference decoding and expansion.
pub mod character_reference;
/// The lexer main loop.
pub mod core;
/// Scanners for the individual constructs.
pub mod helpers;
/// Named character reference lookup table.
pub mod named_character_references;
/// Token types produced by the lexer.
pub mod token;

pub use character_reference::{Decoded, decode, expand_entities};
pub use self::core::{Lexed, VERBATIM_ELEMENTS, lex};
pub use token::{Token, TokenKind};

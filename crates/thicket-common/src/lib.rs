//! Common utilities for the thicket HTML parser.
//!
//! This crate provides shared infrastructure used by every thicket component:
//! - **Location** - line/column/byte-offset cursor and the byte scanner every
//!   lexer routine is built from
//! - **Warning System** - colored, deduplicated terminal output for front-ends

/// Source locations and byte scanning.
pub mod location;
/// Colored terminal warnings.
pub mod warning;

pub use location::Location;

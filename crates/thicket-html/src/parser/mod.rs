//! HTML parser module for tree construction.

/// Opening-tag field splitting.
pub mod attributes;
/// Stack-based tree builder.
pub mod core;

pub use attributes::{Field, FieldValue, split_fields};
pub use self::core::{Parsed, TreeBuilder, VOID_ELEMENTS, is_void_element};

//! Format-aware text splicing.
//!
//! Detects the ambient indentation unit and nesting depth at a buffer
//! offset, re-indents caller-supplied blocks, and splices them in
//! without disturbing the formatting of the surrounding text. All pure
//! functions; no I/O.

pub mod point;
pub mod splice;

pub use point::{format_at, format_at_end_of, FormatPoint, DEFAULT_INDENT_UNIT};
pub use splice::{append_formatted, indent, insert_at, insert_formatted};

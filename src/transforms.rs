//! Source transforms built on the rewrite engine.
//!
//! Each transform supplies a grammar, an optional exclusion grammar, and
//! an edit function; the engine does the rest. The Java shapes here are
//! applications; the engine itself stays language-agnostic.

pub mod rename_method;
pub mod wrap_in_try;

pub use rename_method::{rename_method, RenameMethodOptions};
pub use wrap_in_try::{wrap_in_try, WrapInTryOptions};

//! Composable micro-grammars.
//!
//! A grammar here is a [`Pattern`]: pure data describing a text shape,
//! built once from the combinator constructors and matched many times by
//! the engine in [`crate::matching`]. Patterns carry no position and no
//! state, so the same value can be reused across files.

pub mod java;
pub mod pattern;

pub use pattern::{
    literal, optional, regex, sequence, take_until, zero_or_more, GrammarError, Pattern,
};

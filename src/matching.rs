//! The match engine and its result types.
//!
//! [`find_matches`] applies a [`crate::grammar::Pattern`] across a buffer
//! and yields an ordered, non-overlapping stream of [`Match`]es;
//! [`not_within`] builds the containment filter used to suppress matches
//! nested inside another pattern's matches.

pub mod engine;
pub mod exclusion;
pub mod types;

pub use engine::find_matches;
pub use exclusion::{not_within, ExclusionZones, NotWithin};
pub use types::{CaptureValue, Match, Span};

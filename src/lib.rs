//! # micrograft
//!
//! A pattern-guided source-rewriting engine.
//!
//! Composable micro-grammars locate syntactic fragments in flat source
//! text, a containment filter drops fragments nested inside other
//! constructs, and a splice engine rewrites the surviving spans in place
//! while preserving the file's formatting. The engine knows nothing about
//! any particular language; the Java-shaped transforms in [`transforms`]
//! are applications built on top of it.

pub mod format;
pub mod grammar;
pub mod matching;
pub mod rewrite;
pub mod transforms;

pub use grammar::{
    literal, optional, regex, sequence, take_until, zero_or_more, GrammarError, Pattern,
};
pub use matching::{find_matches, not_within, CaptureValue, Match, NotWithin, Span};
pub use rewrite::{
    rewrite_files, EditError, FileMatches, FileOutcome, Project, TransformReport,
};

//! Rewrite passes: scan, mutate, splice.
//!
//! One pass covers one file: the engine scans it, the caller decides a
//! replacement per surviving match, and the accumulated replacements are
//! spliced back in a single deterministic pass. Files never share state,
//! so the order they are visited in cannot affect any individual result.

pub mod buffer;
pub mod pass;
pub mod project;

pub use buffer::{EditedBuffer, RewriteError};
pub use pass::{
    rewrite_files, EditError, FileMatches, FileOutcome, MatchHandle, TransformReport,
};
pub use project::{Project, ProjectError};

//! Deferred replacement of spans in a text buffer.
//!
//! Replacements accumulate against original-buffer offsets and are
//! spliced in one ascending pass, so edits computed early in a scan stay
//! valid no matter how much earlier replacements grow or shrink the
//! buffer.

use crate::matching::Span;
use std::fmt;

/// Errors raised while staging or applying replacements.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteError {
    /// A staged span overlaps one staged earlier.
    OverlappingSpans { first: Span, second: Span },
    /// A match handle's replacement was assigned twice.
    ReplacementAlreadySet(Span),
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::OverlappingSpans { first, second } => write!(
                f,
                "Replacement spans overlap: {}..{} and {}..{}",
                first.start, first.end, second.start, second.end
            ),
            RewriteError::ReplacementAlreadySet(span) => write!(
                f,
                "Replacement for span {}..{} was already set",
                span.start, span.end
            ),
        }
    }
}

impl std::error::Error for RewriteError {}

/// A text buffer plus the replacements pending against it.
#[derive(Debug, Clone)]
pub struct EditedBuffer {
    text: String,
    pending: Vec<(Span, String)>,
}

impl EditedBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pending: Vec::new(),
        }
    }

    /// The buffer as it was before any replacement.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Stage a replacement for `span`.
    ///
    /// Overlap with an already-staged span is rejected here; a corrupted
    /// splice would be unrecoverable later.
    pub fn stage(&mut self, span: Span, replacement: impl Into<String>) -> Result<(), RewriteError> {
        for (staged, _) in &self.pending {
            if staged.overlaps(&span) || staged.contains(&span) || span.contains(staged) {
                return Err(RewriteError::OverlappingSpans {
                    first: *staged,
                    second: span,
                });
            }
        }
        self.pending.push((span, replacement.into()));
        Ok(())
    }

    /// Splice the pending replacements, in ascending offset order.
    ///
    /// Returns `None` when nothing was staged, leaving callers free to
    /// skip the write entirely and keep the file byte-for-byte intact.
    pub fn apply(mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        self.pending.sort_by_key(|(span, _)| span.start);
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for (span, replacement) in &self.pending {
            out.push_str(&self.text[cursor..span.start]);
            out.push_str(replacement);
            cursor = span.end;
        }
        out.push_str(&self.text[cursor..]);
        Some(out)
    }
}

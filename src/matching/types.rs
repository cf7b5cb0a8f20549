//! Match results produced by the engine.

use serde::Serialize;
use std::collections::BTreeMap;

/// Half-open `[start, end)` byte range within a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies fully inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether this span and `other` share at least one position.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A named sub-result of a match.
///
/// Terminal patterns (literals, regexes, take-until, repetitions)
/// capture plain text; sequences capture a nested [`Match`]. The same
/// field of the same grammar can yield either shape: an optional
/// sequence field is empty text when absent and a nested match when
/// present. Consumers resolve the variant explicitly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CaptureValue {
    Text(String),
    Nested(Match),
}

impl CaptureValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CaptureValue::Text(text) => Some(text),
            CaptureValue::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Match> {
        match self {
            CaptureValue::Text(_) => None,
            CaptureValue::Nested(m) => Some(m),
        }
    }
}

/// A concrete, located instance of a pattern applied to a buffer.
///
/// Matches are read-only; the one mutation a rewrite pass allows happens
/// through [`crate::rewrite::MatchHandle`], never here. A match is only
/// meaningful for the buffer it was produced from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Where the match sits in the source buffer.
    pub span: Span,
    /// The exact matched substring.
    pub matched: String,
    /// Named captures, mirroring the pattern's structure.
    pub captures: BTreeMap<String, CaptureValue>,
}

impl Match {
    pub fn capture(&self, name: &str) -> Option<&CaptureValue> {
        self.captures.get(name)
    }

    /// Text of a capture, if it captured plain text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.captures.get(name).and_then(CaptureValue::as_text)
    }

    /// Nested match of a capture, if it captured one.
    pub fn nested(&self, name: &str) -> Option<&Match> {
        self.captures.get(name).and_then(CaptureValue::as_nested)
    }
}

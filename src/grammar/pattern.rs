//! Pattern combinators.
//!
//! Each constructor is pure: it returns a value describing a text shape
//! and never touches a buffer. Fallible constructors validate at build
//! time, so a misconfigured grammar fails before any file is scanned.

use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// A compiled regular-expression terminal.
///
/// Keeps the source pattern alongside the compiled form for Debug output
/// and error reporting.
#[derive(Debug, Clone)]
pub struct RegexTerm {
    pub(crate) source: String,
    pub(crate) regex: Regex,
}

impl RegexTerm {
    /// The pattern this terminal was built from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A named field of a [`Pattern::Sequence`].
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub pattern: Pattern,
}

/// An immutable, composable description of a text shape.
///
/// Built through the free-function constructors in this module; matched
/// by [`crate::matching::find_matches`].
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches the exact text.
    Literal(String),
    /// Matches a regular expression at the cursor. Boundary assertions
    /// such as `\b` are evaluated against the whole buffer, not just the
    /// text after the cursor.
    Regex(RegexTerm),
    /// Ordered, named sub-patterns. The field names form the capture
    /// mapping of the resulting match, so they must be unique.
    Sequence(Vec<Field>),
    /// Attempts the inner pattern; on failure succeeds zero-width with an
    /// empty text capture.
    Optional(Box<Pattern>),
    /// Repeats the inner pattern greedily until it fails. A zero-width
    /// successful inner match terminates the repetition.
    ZeroOrMore(Box<Pattern>),
    /// Captures everything before the first occurrence of the delimiter,
    /// exclusive; the delimiter itself is left for a follow-on field. If
    /// the delimiter never occurs the match fails at that point.
    TakeUntil(String),
}

/// Errors raised while constructing a grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// A sequence declares the same capture name twice. The captures of a
    /// sequence form a mapping, so a duplicate would silently shadow one
    /// of the two fields.
    DuplicateCapture(String),
    /// A regex terminal failed to compile.
    InvalidRegex { pattern: String, message: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::DuplicateCapture(name) => {
                write!(f, "Duplicate capture name '{}' in sequence", name)
            }
            GrammarError::InvalidRegex { pattern, message } => {
                write!(f, "Invalid regex '{}': {}", pattern, message)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// A pattern matching the exact `text`.
pub fn literal(text: &str) -> Pattern {
    Pattern::Literal(text.to_string())
}

/// A pattern matching the regular expression `pattern` at the cursor.
pub fn regex(pattern: &str) -> Result<Pattern, GrammarError> {
    let compiled = Regex::new(pattern).map_err(|e| GrammarError::InvalidRegex {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok(Pattern::Regex(RegexTerm {
        source: pattern.to_string(),
        regex: compiled,
    }))
}

/// A pattern matching the named `fields` in order.
///
/// Field names become capture keys and must be unique within the
/// sequence; a duplicate is a configuration error and fails here, before
/// anything is matched.
pub fn sequence(fields: Vec<(&str, Pattern)>) -> Result<Pattern, GrammarError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(fields.len());
    for (name, pattern) in fields {
        if !seen.insert(name.to_string()) {
            return Err(GrammarError::DuplicateCapture(name.to_string()));
        }
        out.push(Field {
            name: name.to_string(),
            pattern,
        });
    }
    Ok(Pattern::Sequence(out))
}

/// A pattern that attempts `inner` and succeeds either way.
pub fn optional(inner: Pattern) -> Pattern {
    Pattern::Optional(Box::new(inner))
}

/// A pattern repeating `inner` zero or more times, greedily.
pub fn zero_or_more(inner: Pattern) -> Pattern {
    Pattern::ZeroOrMore(Box::new(inner))
}

/// A pattern capturing everything before the first occurrence of
/// `delimiter`.
pub fn take_until(delimiter: &str) -> Pattern {
    Pattern::TakeUntil(delimiter.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_capture_name_fails_at_construction() {
        let result = sequence(vec![
            ("name", literal("a")),
            ("other", literal("b")),
            ("name", literal("c")),
        ]);
        assert_eq!(
            result.err(),
            Some(GrammarError::DuplicateCapture("name".to_string()))
        );
    }

    #[test]
    fn test_unique_capture_names_construct() {
        let result = sequence(vec![("first", literal("a")), ("second", literal("b"))]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_regex_fails_at_construction() {
        let result = regex("(unclosed");
        match result {
            Err(GrammarError::InvalidRegex { pattern, .. }) => {
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("expected InvalidRegex, got {:?}", other),
        }
    }

    #[test]
    fn test_patterns_are_reusable_values() {
        let pattern = literal("x");
        let copy = pattern.clone();
        // Both values describe the same shape; neither carries position.
        match (&pattern, &copy) {
            (Pattern::Literal(a), Pattern::Literal(b)) => assert_eq!(a, b),
            _ => panic!("expected literals"),
        }
    }
}

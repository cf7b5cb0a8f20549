//! The match engine.
//!
//! Scanning is greedy and leftmost-first: at each offset the pattern is
//! attempted; on success the match is emitted and the cursor resumes at
//! the end of the matched span, on failure the cursor advances one
//! character and the scan retries. Patterns are not anchored to line or
//! statement boundaries unless they encode such anchors themselves.
//!
//! Failures stay local. A pattern that doesn't fit at an offset, or a
//! `TakeUntil` whose delimiter never occurs before buffer end, just
//! means the scan moves on; the caller only ever sees fewer matches.

use crate::grammar::pattern::{Field, Pattern};
use crate::matching::types::{CaptureValue, Match, Span};
use std::collections::BTreeMap;

/// Find every non-overlapping match of `pattern` in `text`, left to
/// right.
///
/// When two candidates would overlap, the earliest start wins; the
/// cursor then resumes past the winner, so later overlapping candidates
/// are never considered. Matching the same pattern against the same text
/// twice yields identical results; the engine keeps no state.
pub fn find_matches(pattern: &Pattern, text: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut at = 0;
    while at <= text.len() {
        match apply(pattern, text, at) {
            // Zero-width successes (e.g. a bare optional) are degenerate:
            // emitting them would stall the scan, so they are skipped.
            Some(outcome) if outcome.end > at => {
                let end = outcome.end;
                matches.push(into_match(outcome, text));
                at = end;
            }
            _ => {
                if at >= text.len() {
                    break;
                }
                at = next_char_boundary(text, at);
            }
        }
    }
    matches
}

/// Result of applying one pattern at one offset.
///
/// `start` is where consumption actually began, which can sit after the
/// attempt offset when a sequence skipped ambient whitespace.
struct Outcome {
    start: usize,
    end: usize,
    value: CaptureValue,
}

fn apply(pattern: &Pattern, text: &str, at: usize) -> Option<Outcome> {
    match pattern {
        Pattern::Literal(lit) => {
            if text[at..].starts_with(lit.as_str()) {
                Some(Outcome {
                    start: at,
                    end: at + lit.len(),
                    value: CaptureValue::Text(lit.clone()),
                })
            } else {
                None
            }
        }
        Pattern::Regex(term) => {
            // find_at sees the whole buffer, so boundary assertions like
            // \b hold against the text before the cursor.
            let found = term.regex.find_at(text, at)?;
            if found.start() != at {
                return None;
            }
            Some(Outcome {
                start: at,
                end: found.end(),
                value: CaptureValue::Text(found.as_str().to_string()),
            })
        }
        Pattern::TakeUntil(delimiter) => {
            let found = text[at..].find(delimiter.as_str())?;
            Some(Outcome {
                start: at,
                end: at + found,
                value: CaptureValue::Text(text[at..at + found].to_string()),
            })
        }
        Pattern::Optional(inner) => Some(apply(inner, text, at).unwrap_or(Outcome {
            start: at,
            end: at,
            value: CaptureValue::Text(String::new()),
        })),
        Pattern::ZeroOrMore(inner) => {
            let mut end = at;
            loop {
                match apply(inner, text, end) {
                    // A zero-width success terminates the repetition
                    // instead of spinning.
                    Some(o) if o.end > end => end = o.end,
                    _ => break,
                }
            }
            Some(Outcome {
                start: at,
                end,
                value: CaptureValue::Text(text[at..end].to_string()),
            })
        }
        Pattern::Sequence(fields) => apply_sequence(fields, text, at),
    }
}

fn apply_sequence(fields: &[Field], text: &str, at: usize) -> Option<Outcome> {
    let mut cursor = skip_whitespace(text, at);
    let fallback_start = cursor;
    let mut consumed_start = None;
    let mut captures = BTreeMap::new();
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            cursor = skip_whitespace(text, cursor);
        }
        let outcome = apply(&field.pattern, text, cursor)?;
        if outcome.end > outcome.start && consumed_start.is_none() {
            consumed_start = Some(outcome.start);
        }
        cursor = outcome.end;
        captures.insert(field.name.clone(), outcome.value);
    }
    let start = consumed_start.unwrap_or(fallback_start);
    let span = Span::new(start, cursor);
    Some(Outcome {
        start,
        end: cursor,
        value: CaptureValue::Nested(Match {
            span,
            matched: text[start..cursor].to_string(),
            captures,
        }),
    })
}

fn into_match(outcome: Outcome, text: &str) -> Match {
    match outcome.value {
        CaptureValue::Nested(m) => m,
        CaptureValue::Text(_) => {
            let span = Span::new(outcome.start, outcome.end);
            Match {
                span,
                matched: text[span.start..span.end].to_string(),
                captures: BTreeMap::new(),
            }
        }
    }
}

fn skip_whitespace(text: &str, mut at: usize) -> usize {
    while let Some(c) = text[at..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        at += c.len_utf8();
    }
    at
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{literal, optional, regex, sequence, take_until, zero_or_more};

    #[test]
    fn test_literal_scan_finds_all_occurrences() {
        let pattern = literal("ab");
        let matches = find_matches(&pattern, "ab ab ab");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].span, Span::new(0, 2));
        assert_eq!(matches[1].span, Span::new(3, 5));
        assert_eq!(matches[2].span, Span::new(6, 8));
    }

    #[test]
    fn test_overlapping_candidates_prefer_earliest() {
        // "aaa" holds candidate "aa" at 0 and at 1; the scan takes 0 and
        // resumes past it, so 1 is never considered.
        let pattern = literal("aa");
        let matches = find_matches(&pattern, "aaa");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].span, Span::new(0, 2));
    }

    #[test]
    fn test_empty_input_yields_no_matches() {
        let pattern = literal("x");
        assert!(find_matches(&pattern, "").is_empty());
    }

    #[test]
    fn test_regex_word_boundary_sees_preceding_text() {
        let pattern = regex(r"\bget\(").unwrap();
        assert_eq!(find_matches(&pattern, "client.get(x)").len(), 1);
        // "get(" inside "widget(" sits after a word character, so the
        // boundary assertion rejects it.
        assert!(find_matches(&pattern, "client.widget(x)").is_empty());
    }

    #[test]
    fn test_take_until_without_delimiter_fails_locally() {
        let pattern = sequence(vec![
            ("open", literal("(")),
            ("body", take_until(")")),
            ("close", literal(")")),
        ])
        .unwrap();
        assert!(find_matches(&pattern, "(never closed").is_empty());
        // An earlier, well-formed occurrence is unaffected by the
        // unterminated one after it.
        let matches = find_matches(&pattern, "(ok)\n(never closed");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text("body"), Some("ok"));
    }

    #[test]
    fn test_optional_absent_yields_empty_text_capture() {
        let pattern = sequence(vec![
            ("prefix", optional(literal("pre-"))),
            ("word", literal("fix")),
        ])
        .unwrap();
        let matches = find_matches(&pattern, "fix");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text("prefix"), Some(""));
        assert_eq!(matches[0].span, Span::new(0, 3));
    }

    #[test]
    fn test_zero_or_more_is_greedy() {
        let pattern = sequence(vec![
            ("dots", zero_or_more(literal("."))),
            ("end", literal("!")),
        ])
        .unwrap();
        let matches = find_matches(&pattern, "...!");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text("dots"), Some("..."));
    }

    #[test]
    fn test_zero_or_more_with_zero_width_inner_terminates() {
        let pattern = zero_or_more(optional(literal("x")));
        // The inner optional succeeds zero-width forever on "y"; the
        // repetition must stop rather than loop.
        assert!(find_matches(&pattern, "y").is_empty());
    }

    #[test]
    fn test_sequence_skips_whitespace_between_fields() {
        let pattern = sequence(vec![
            ("declared_type", regex("[A-Za-z]+").unwrap()),
            ("varname", regex("[A-Za-z]+").unwrap()),
            ("equals", literal("=")),
        ])
        .unwrap();
        let matches = find_matches(&pattern, "int statusCode\n    =");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text("declared_type"), Some("int"));
        assert_eq!(matches[0].text("varname"), Some("statusCode"));
    }

    #[test]
    fn test_match_span_starts_at_first_consumed_character() {
        let pattern = sequence(vec![("word", literal("foo"))]).unwrap();
        let matches = find_matches(&pattern, "   foo");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].span, Span::new(3, 6));
        assert_eq!(matches[0].matched, "foo");
    }

    #[test]
    fn test_scan_advances_over_multibyte_characters() {
        let pattern = literal("x");
        let matches = find_matches(&pattern, "héllo x wörld x");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_matching_is_deterministic() {
        let pattern = sequence(vec![
            ("open", literal("(")),
            ("body", take_until(")")),
            ("close", literal(")")),
        ])
        .unwrap();
        let text = "f(a) g(b) h(c)";
        assert_eq!(find_matches(&pattern, text), find_matches(&pattern, text));
    }
}

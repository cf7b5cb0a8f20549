//! Containment-based match filtering ("not within").
//!
//! Lets a rewrite say "change this call site unless a human already
//! wrapped it in try/finally" without building an AST: the exclusion
//! grammar is matched once per buffer and candidates are tested against
//! the resulting spans.

use crate::grammar::Pattern;
use crate::matching::engine::find_matches;
use crate::matching::types::Span;

/// Suppress primary matches nested inside matches of `pattern`.
pub fn not_within(pattern: Pattern) -> NotWithin {
    NotWithin { pattern }
}

/// A reusable exclusion test built from a pattern.
#[derive(Debug, Clone)]
pub struct NotWithin {
    pattern: Pattern,
}

impl NotWithin {
    /// Compute the exclusion spans for one buffer. Called once per file
    /// scan; the zones are then consulted per candidate.
    pub fn zones(&self, text: &str) -> ExclusionZones {
        ExclusionZones::scan(&self.pattern, text)
    }
}

/// The spans matched by an exclusion grammar over one buffer.
///
/// Purely a set of containment tests; it has no ownership relation to
/// the primary match stream.
#[derive(Debug, Clone)]
pub struct ExclusionZones {
    spans: Vec<Span>,
}

impl ExclusionZones {
    /// Match `pattern` over `text` and keep only the spans.
    pub fn scan(pattern: &Pattern, text: &str) -> Self {
        let spans = find_matches(pattern, text)
            .into_iter()
            .map(|m| m.span)
            .collect();
        Self { spans }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether a candidate span is suppressed.
    ///
    /// Full containment suppresses, and so does partial overlap: a
    /// replacement straddling an exclusion boundary would corrupt the
    /// excluded construct, so the engine rejects it rather than guess.
    pub fn excludes(&self, candidate: Span) -> bool {
        self.spans
            .iter()
            .any(|zone| zone.contains(&candidate) || zone.overlaps(&candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::literal;

    #[test]
    fn test_contained_candidate_is_excluded() {
        let zones = ExclusionZones {
            spans: vec![Span::new(10, 50)],
        };
        assert!(zones.excludes(Span::new(20, 30)));
        assert!(zones.excludes(Span::new(10, 50)));
    }

    #[test]
    fn test_disjoint_candidate_is_kept() {
        let zones = ExclusionZones {
            spans: vec![Span::new(10, 50)],
        };
        assert!(!zones.excludes(Span::new(0, 10)));
        assert!(!zones.excludes(Span::new(50, 60)));
    }

    #[test]
    fn test_partial_overlap_is_excluded() {
        let zones = ExclusionZones {
            spans: vec![Span::new(10, 50)],
        };
        assert!(zones.excludes(Span::new(5, 15)));
        assert!(zones.excludes(Span::new(45, 55)));
    }

    #[test]
    fn test_zones_scan_collects_every_match() {
        let zones = ExclusionZones::scan(&literal("ab"), "ab ab");
        assert_eq!(zones.spans(), &[Span::new(0, 2), Span::new(3, 5)]);
    }
}

//! Indentation-aware insertion.

use crate::format::point::{format_at, format_at_end_of, FormatPoint};

/// Re-indent a block for insertion at a format point.
///
/// The block expresses "one indent level" with a single neutral tab
/// placeholder, consumed by the first application; every non-empty line
/// is then prefixed with `depth` repetitions of the indent unit. Blank
/// lines stay unpadded so inserted blocks don't accumulate stray
/// whitespace.
pub fn indent(block: &str, format_point: &FormatPoint) -> String {
    let pad = format_point.indent_unit.repeat(format_point.depth);
    block
        .replacen('\t', &format_point.indent_unit, 1)
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert `what` at `position`, formatting untouched.
pub fn insert_at(text: &str, position: usize, what: &str) -> String {
    let mut out = String::with_capacity(text.len() + what.len());
    out.push_str(&text[..position]);
    out.push_str(what);
    out.push_str(&text[position..]);
    out
}

/// Insert a neutral-tab block at `offset`, honoring the ambient
/// formatting there. Text before and after the insertion point keeps
/// its formatting untouched.
pub fn insert_formatted(text: &str, offset: usize, what: &str) -> String {
    let fp = format_at(text, offset);
    insert_at(text, offset, &indent(what, &fp))
}

/// Append a neutral-tab block, honoring the buffer's formatting.
pub fn append_formatted(left: &str, what: &str) -> String {
    let fp = format_at_end_of(left);
    let mut out = left.to_string();
    out.push_str(&indent(what, &fp));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_pads_nonempty_lines_only() {
        let fp = FormatPoint {
            indent_unit: "  ".to_string(),
            depth: 2,
        };
        assert_eq!(indent("a\n\nb", &fp), "    a\n\n    b");
    }

    #[test]
    fn test_indent_consumes_placeholder_once() {
        let fp = FormatPoint {
            indent_unit: "  ".to_string(),
            depth: 0,
        };
        let once = indent("x\n\ty\n", &fp);
        assert_eq!(once, "x\n  y\n");
        // No placeholder left and depth zero: a second application is a
        // no-op.
        assert_eq!(indent(&once, &fp), once);
    }

    #[test]
    fn test_insert_at_is_a_plain_byte_splice() {
        assert_eq!(insert_at("ab", 1, "-"), "a-b");
        assert_eq!(insert_at("", 0, "x"), "x");
    }

    #[test]
    fn test_insert_formatted_into_empty_buffer() {
        assert_eq!(insert_formatted("", 0, "a=b"), "a=b");
    }
}

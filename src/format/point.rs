//! Ambient formatting detection.

/// Indent unit assumed when a buffer gives no hint.
pub const DEFAULT_INDENT_UNIT: &str = "   ";

/// Formatting information at a particular point in a buffer.
///
/// Computed per call, never stored: the answer depends on the buffer
/// content at the time of the insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPoint {
    /// The text of one indent level: a tab, or a run of spaces.
    pub indent_unit: String,
    /// How many indent levels are in force at the offset.
    pub depth: usize,
}

/// Detect the formatting in force at `offset`.
///
/// The unit comes from the buffer as a whole (a tab anywhere wins, then
/// the leading run of the first space-indented line, then the default);
/// the depth comes from the last non-blank line strictly before the
/// offset.
pub fn format_at(text: &str, offset: usize) -> FormatPoint {
    let indent_unit = determine_indent_unit(text);
    let before = &text[..offset.min(text.len())];
    let last_line = before
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .last()
        .unwrap_or("");
    let depth = determine_depth(&indent_unit, last_line);
    FormatPoint { indent_unit, depth }
}

/// Formatting at the end of a buffer.
pub fn format_at_end_of(text: &str) -> FormatPoint {
    format_at(text, text.len().saturating_sub(1))
}

fn determine_depth(indent_unit: &str, line: &str) -> usize {
    let mut depth = 0;
    let mut rest = line;
    while rest.starts_with(indent_unit) {
        depth += 1;
        rest = &rest[indent_unit.len()..];
    }
    depth
}

fn determine_indent_unit(text: &str) -> String {
    if text.contains('\t') {
        return "\t".to_string();
    }
    match text.split('\n').find(|line| line.starts_with(' ')) {
        Some(space_line) => {
            let run = space_line.chars().take_while(|c| *c == ' ').count();
            " ".repeat(run)
        }
        None => DEFAULT_INDENT_UNIT.to_string(),
    }
}

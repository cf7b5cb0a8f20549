//! Rename a method at its call and declaration sites.

use crate::grammar::{regex, sequence, GrammarError, Pattern};
use crate::rewrite::{rewrite_files, Project, TransformReport};
use serde::Deserialize;

/// Options for [`rename_method`].
#[derive(Debug, Clone, Deserialize)]
pub struct RenameMethodOptions {
    pub old_method_name: String,
    pub new_method_name: String,
}

/// Grammar matching `oldName(` at a word boundary, tolerating space
/// before the parenthesis.
fn call_site(method_name: &str) -> Result<Pattern, GrammarError> {
    sequence(vec![(
        "call",
        regex(&format!(r"\b{}\s*\(", regex::escape(method_name)))?,
    )])
}

/// Rename every occurrence of the method across the project.
///
/// Word-boundary matching keeps `fetchAll(` intact when renaming
/// `fetch`; declarations are renamed along with call sites, which is
/// what a rename wants.
pub fn rename_method(
    project: &mut Project,
    options: &RenameMethodOptions,
) -> Result<TransformReport, GrammarError> {
    let pattern = call_site(&options.old_method_name)?;
    let replacement = format!("{}(", options.new_method_name);
    Ok(rewrite_files(project, &pattern, None, |_| {
        Ok(Some(replacement.clone()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::find_matches;

    #[test]
    fn test_call_site_respects_word_boundaries() {
        let grammar = call_site("fetch").unwrap();
        assert_eq!(find_matches(&grammar, "x = fetch();").len(), 1);
        assert_eq!(find_matches(&grammar, "x = fetchAll();").len(), 0);
        assert_eq!(find_matches(&grammar, "x = prefetch();").len(), 0);
    }

    #[test]
    fn test_call_site_tolerates_space_before_paren() {
        let grammar = call_site("fetch").unwrap();
        let matches = find_matches(&grammar, "fetch ();");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched, "fetch (");
    }
}

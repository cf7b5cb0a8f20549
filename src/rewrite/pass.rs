//! Per-file rewrite passes and the multi-file driver.
//!
//! A pass over one file yields mutable match handles in source order.
//! The only mutation a consumer may perform is assigning a replacement,
//! once per handle; replacements are staged against the original buffer
//! and spliced after iteration finishes. Abandoning the iteration early
//! keeps what was already staged and applies nothing for the rest.

use crate::grammar::Pattern;
use crate::matching::{find_matches, Match, NotWithin};
use crate::rewrite::buffer::{EditedBuffer, RewriteError};
use crate::rewrite::project::Project;
use serde::Serialize;
use std::fmt;

/// Error returned by a caller-supplied edit function.
#[derive(Debug, Clone, PartialEq)]
pub struct EditError {
    message: String,
}

impl EditError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EditError {}

/// A single match, mutable only through [`MatchHandle::replace`].
#[derive(Debug)]
pub struct MatchHandle {
    matched: Match,
    replacement: Option<String>,
}

impl MatchHandle {
    pub fn matched(&self) -> &Match {
        &self.matched
    }

    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Assign the replacement text. Each handle accepts exactly one
    /// assignment per pass.
    pub fn replace(&mut self, text: impl Into<String>) -> Result<(), RewriteError> {
        if self.replacement.is_some() {
            return Err(RewriteError::ReplacementAlreadySet(self.matched.span));
        }
        self.replacement = Some(text.into());
        Ok(())
    }
}

/// The matches of one pattern over one file, ready for mutation.
#[derive(Debug)]
pub struct FileMatches {
    text: String,
    handles: Vec<MatchHandle>,
}

impl FileMatches {
    /// Scan `text` with `pattern`, silently dropping candidates the
    /// exclusion test suppresses.
    pub fn scan(pattern: &Pattern, exclusion: Option<&NotWithin>, text: &str) -> Self {
        let zones = exclusion.map(|not_within| not_within.zones(text));
        let handles = find_matches(pattern, text)
            .into_iter()
            .filter(|m| zones.as_ref().map_or(true, |z| !z.excludes(m.span)))
            .map(|m| MatchHandle {
                matched: m,
                replacement: None,
            })
            .collect();
        Self {
            text: text.to_string(),
            handles,
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handles(&self) -> &[MatchHandle] {
        &self.handles
    }

    /// Visit the matches in ascending source-offset order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MatchHandle> {
        self.handles.iter_mut()
    }

    /// Splice the staged replacements into the buffer.
    ///
    /// Returns `None` when no replacement was staged; the file content is
    /// then byte-for-byte the original.
    pub fn apply(self) -> Result<Option<String>, RewriteError> {
        let mut buffer = EditedBuffer::new(self.text);
        for handle in self.handles {
            if let Some(replacement) = handle.replacement {
                buffer.stage(handle.matched.span, replacement)?;
            }
        }
        Ok(buffer.apply())
    }
}

/// Outcome of the rewrite pass for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: String,
    pub edited: bool,
    pub error: Option<String>,
}

/// Aggregate outcome of a transform across a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransformReport {
    /// True when any file changed.
    pub edited: bool,
    pub outcomes: Vec<FileOutcome>,
}

impl TransformReport {
    /// True when no file failed.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    pub fn edited_paths(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.edited)
            .map(|o| o.path.as_str())
    }

    pub fn failed_paths(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.error.is_some())
            .map(|o| o.path.as_str())
    }
}

/// Run one rewrite pass per project file, strictly sequentially.
///
/// The edit function decides each match's replacement; `Ok(None)` leaves
/// the match alone. An error from it abandons the current file's pass
/// (nothing staged there is applied) and is reported in that file's
/// outcome; files already committed stay committed and later files are
/// still visited.
pub fn rewrite_files<F>(
    project: &mut Project,
    pattern: &Pattern,
    exclusion: Option<&NotWithin>,
    mut edit: F,
) -> TransformReport
where
    F: FnMut(&Match) -> Result<Option<String>, EditError>,
{
    let mut report = TransformReport::default();
    let paths: Vec<String> = project.paths().map(str::to_string).collect();
    for path in paths {
        let Some(text) = project.file(&path) else {
            continue;
        };
        let old_len = text.len();
        let result = rewrite_one(pattern, exclusion, &path, text, &mut edit);
        match result {
            Ok(Some(new_text)) => {
                tracing::debug!(
                    "rewrote {} ({} bytes -> {} bytes)",
                    path,
                    old_len,
                    new_text.len()
                );
                project.set_file(&path, new_text);
                report.edited = true;
                report.outcomes.push(FileOutcome {
                    path,
                    edited: true,
                    error: None,
                });
            }
            Ok(None) => report.outcomes.push(FileOutcome {
                path,
                edited: false,
                error: None,
            }),
            Err(message) => {
                tracing::warn!("rewrite failed for {}: {}", path, message);
                report.outcomes.push(FileOutcome {
                    path,
                    edited: false,
                    error: Some(message),
                });
            }
        }
    }
    report
}

fn rewrite_one<F>(
    pattern: &Pattern,
    exclusion: Option<&NotWithin>,
    path: &str,
    text: &str,
    edit: &mut F,
) -> Result<Option<String>, String>
where
    F: FnMut(&Match) -> Result<Option<String>, EditError>,
{
    let mut matches = FileMatches::scan(pattern, exclusion, text);
    tracing::debug!("{}: {} candidate match(es)", path, matches.len());
    for handle in matches.iter_mut() {
        if let Some(replacement) = edit(handle.matched()).map_err(|e| e.to_string())? {
            handle.replace(replacement).map_err(|e| e.to_string())?;
        }
    }
    matches.apply().map_err(|e| e.to_string())
}

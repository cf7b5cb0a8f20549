//! The file surface a rewrite pass works against.
//!
//! A project is a mapping from path to UTF-8 content. Tests build one in
//! memory; the CLI loads one from disk with glob filters and writes back
//! only the files a pass actually changed.

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors at the project boundary: glob construction and file I/O.
#[derive(Debug)]
pub enum ProjectError {
    InvalidGlob { pattern: String, message: String },
    Io { path: PathBuf, message: String },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::InvalidGlob { pattern, message } => {
                write!(f, "Invalid glob '{}': {}", pattern, message)
            }
            ProjectError::Io { path, message } => {
                write!(f, "I/O error on {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ProjectError {}

/// An in-memory set of source files keyed by path.
///
/// Paths are stored sorted, so iteration order is stable regardless of
/// how the project was assembled.
#[derive(Debug, Clone, Default)]
pub struct Project {
    files: BTreeMap<String, String>,
    changed: BTreeSet<String>,
}

impl Project {
    /// Build a project from `(path, content)` pairs.
    pub fn in_memory<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        Self {
            files: files
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
            changed: BTreeSet::new(),
        }
    }

    /// Walk `root`, honoring ignore files, keeping files that match any
    /// of `globs` (every file when `globs` is empty). Non-UTF-8 files
    /// are skipped.
    pub fn discover(root: &Path, globs: &[String]) -> Result<Self, ProjectError> {
        let mut overrides = OverrideBuilder::new(root);
        for glob in globs {
            overrides
                .add(glob)
                .map_err(|e| ProjectError::InvalidGlob {
                    pattern: glob.clone(),
                    message: e.to_string(),
                })?;
        }
        let overrides = overrides.build().map_err(|e| ProjectError::InvalidGlob {
            pattern: globs.join(", "),
            message: e.to_string(),
        })?;

        let mut files = BTreeMap::new();
        let mut walk = WalkBuilder::new(root);
        walk.overrides(overrides);
        for entry in walk.build() {
            let entry = entry.map_err(|e| ProjectError::Io {
                path: root.to_path_buf(),
                message: e.to_string(),
            })?;
            if !entry.file_type().map_or(false, |t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .into_owned();
            files.insert(relative, content);
        }
        Ok(Self {
            files,
            changed: BTreeSet::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Replace a file's content, remembering it for [`Project::flush`].
    pub fn set_file(&mut self, path: &str, content: String) {
        self.files.insert(path.to_string(), content);
        self.changed.insert(path.to_string());
    }

    pub fn is_changed(&self, path: &str) -> bool {
        self.changed.contains(path)
    }

    pub fn changed_paths(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    /// Write changed files back under `root`; untouched files are not
    /// rewritten. Returns how many files were written.
    pub fn flush(&self, root: &Path) -> Result<usize, ProjectError> {
        let mut written = 0;
        for path in &self.changed {
            if let Some(content) = self.files.get(path) {
                let target = root.join(path);
                fs::write(&target, content).map_err(|e| ProjectError::Io {
                    path: target.clone(),
                    message: e.to_string(),
                })?;
                written += 1;
            }
        }
        Ok(written)
    }
}

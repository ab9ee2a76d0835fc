//! Entries discovered during a walk

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One filesystem object found by a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub path: PathBuf,
    /// True for directories and for symlinks that resolve to one.
    pub is_dir: bool,
}

impl Entry {
    pub fn new(path: PathBuf, is_dir: bool) -> Self {
        Self { path, is_dir }
    }

    /// Base name of the entry, lossily decoded.
    pub fn name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy())
            .unwrap_or(Cow::Borrowed("."))
    }

    /// Lowercased extension including the leading dot, e.g. `".txt"`.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// A directory or listing entry the walk had to skip.
#[derive(Debug)]
pub struct WalkWarning {
    pub path: PathBuf,
    pub error: io::Error,
}

impl std::fmt::Display for WalkWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped '{}': {}", self.path.display(), self.error)
    }
}

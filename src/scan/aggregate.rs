//! Folder statistics: entry counts and cumulative sizes
//!
//! Aggregates are computed from an unfiltered walk without keeping any
//! entries, so memory stays bounded by the walker's pending directories.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

use super::entry::Entry;
use super::walker::walk;

/// Counts gathered over a folder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateCount {
    pub files: u64,
    pub dirs: u64,
    /// Sum of regular file sizes. Directories contribute nothing.
    pub total_size_bytes: u64,
}

impl AggregateCount {
    /// Files plus directories.
    pub fn total(&self) -> u64 {
        self.files + self.dirs
    }

    /// Record one walked entry.
    pub fn record(&mut self, entry: &Entry) {
        if entry.is_dir {
            self.dirs += 1;
            return;
        }

        self.files += 1;
        match fs::metadata(&entry.path) {
            Ok(meta) if meta.is_file() => self.total_size_bytes += meta.len(),
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(path = %entry.path.display(), %err, "no size for entry");
            }
        }
    }
}

/// Count files, directories and bytes under `root`.
///
/// Subdirectories that cannot be read contribute nothing; only a bad root
/// is an error.
pub fn count_items(root: impl AsRef<Path>, recursive: bool) -> Result<AggregateCount> {
    let root = root.as_ref();
    let mut walker = walk(root, recursive)?;

    let mut count = AggregateCount::default();
    for entry in walker.by_ref() {
        count.record(&entry);
    }

    tracing::debug!(
        root = %root.display(),
        files = count.files,
        dirs = count.dirs,
        bytes = count.total_size_bytes,
        skipped = walker.warnings().len(),
        "count finished"
    );

    Ok(count)
}

/// Total size in bytes of all regular files below `root`, recursively.
pub fn folder_size(root: impl AsRef<Path>) -> Result<u64> {
    count_items(root, true).map(|c| c.total_size_bytes)
}

//! TreeWalker - lazy, stack-based directory traversal

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{FolderError, Result};

use super::config::WalkOptions;
use super::entry::{Entry, WalkWarning};

/// Lazy walk over a directory tree.
///
/// Entries come out in depth-first pre-order: a directory is yielded while
/// its parent is listed and its own children are listed later, so it always
/// precedes its descendants. Pending directories live on an explicit stack,
/// never on the call stack.
///
/// Directories that cannot be opened below the root are skipped and kept as
/// [`WalkWarning`]s. Dropping the walker releases all traversal state.
#[derive(Debug)]
pub struct TreeWalker {
    root: PathBuf,
    options: WalkOptions,
    state: WalkState,
    warnings: Vec<WalkWarning>,
}

#[derive(Debug)]
struct WalkState {
    /// Directories discovered but not listed yet.
    pending: Vec<PathBuf>,
    current: Option<OpenDir>,
    /// Canonical paths of every directory scheduled so far.
    visited: HashSet<PathBuf>,
    opened: usize,
}

#[derive(Debug)]
struct OpenDir {
    path: PathBuf,
    listing: fs::ReadDir,
}

/// Walk `root` with default options (directory symlinks followed once).
pub fn walk(root: impl AsRef<Path>, recursive: bool) -> Result<TreeWalker> {
    TreeWalker::new(
        root,
        WalkOptions {
            recursive,
            ..Default::default()
        },
    )
}

impl TreeWalker {
    /// Open `root` for walking.
    ///
    /// Fails here, before any entry is produced, if the root is missing,
    /// is not a directory, or cannot be listed.
    pub fn new(root: impl AsRef<Path>, options: WalkOptions) -> Result<Self> {
        let root = root.as_ref();
        let meta = fs::metadata(root).map_err(|e| FolderError::from_io(root, e))?;
        if !meta.is_dir() {
            return Err(FolderError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        let listing = fs::read_dir(root).map_err(|e| FolderError::from_io(root, e))?;

        let mut visited = HashSet::new();
        if options.recursive && options.follow_symlinks {
            let real = fs::canonicalize(root).map_err(|e| FolderError::from_io(root, e))?;
            visited.insert(real);
        }

        tracing::trace!(root = %root.display(), recursive = options.recursive, "walk started");

        Ok(Self {
            root: root.to_path_buf(),
            options,
            state: WalkState {
                pending: Vec::new(),
                current: Some(OpenDir {
                    path: root.to_path_buf(),
                    listing,
                }),
                visited,
                opened: 1,
            },
            warnings: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories skipped so far.
    pub fn warnings(&self) -> &[WalkWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<WalkWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Number of directory listings opened so far, root included.
    pub fn directories_opened(&self) -> usize {
        self.state.opened
    }

    /// Number of directories waiting to be listed.
    pub fn pending(&self) -> usize {
        self.state.pending.len()
    }

    fn visit(&mut self, dirent: fs::DirEntry) -> Entry {
        let path = dirent.path();
        let (is_dir, is_symlink) = match dirent.file_type() {
            Ok(ft) if ft.is_symlink() => (resolves_to_dir(&path), true),
            Ok(ft) => (ft.is_dir(), false),
            Err(_) => (resolves_to_dir(&path), false),
        };

        if is_dir && self.options.recursive && (!is_symlink || self.options.follow_symlinks) {
            self.schedule(&path);
        }

        Entry::new(path, is_dir)
    }

    fn schedule(&mut self, dir: &Path) {
        if self.options.follow_symlinks {
            match fs::canonicalize(dir) {
                Ok(real) => {
                    if !self.state.visited.insert(real) {
                        tracing::debug!(path = %dir.display(), "directory already visited, not descending");
                        return;
                    }
                }
                Err(err) => {
                    self.record(dir.to_path_buf(), err);
                    return;
                }
            }
        }
        self.state.pending.push(dir.to_path_buf());
    }

    fn open(&mut self, dir: PathBuf) {
        match fs::read_dir(&dir) {
            Ok(listing) => {
                tracing::trace!(path = %dir.display(), "listing directory");
                self.state.opened += 1;
                self.state.current = Some(OpenDir { path: dir, listing });
            }
            Err(err) => self.record(dir, err),
        }
    }

    fn record(&mut self, path: PathBuf, error: io::Error) {
        tracing::warn!(path = %path.display(), %error, "skipping unreadable directory");
        self.warnings.push(WalkWarning { path, error });
    }
}

impl Iterator for TreeWalker {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        loop {
            let Some(current) = self.state.current.as_mut() else {
                let dir = self.state.pending.pop()?;
                self.open(dir);
                continue;
            };

            match current.listing.next() {
                Some(Ok(dirent)) => return Some(self.visit(dirent)),
                Some(Err(err)) => {
                    let path = current.path.clone();
                    self.record(path, err);
                }
                None => self.state.current = None,
            }
        }
    }
}

fn resolves_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

//! Single-folder operations over the host filesystem
//!
//! Thin wrappers that add typed errors. Nothing here retries or keeps state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{FolderError, Result};
use crate::scan::{TreeWalker, WalkOptions};

/// Create `path` and any missing parents, returning its canonical path.
///
/// With `exist_ok == false` an existing folder is an `AlreadyExists` error.
pub fn create_folder(path: impl AsRef<Path>, exist_ok: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Ok(meta) = fs::metadata(path) {
        if !meta.is_dir() {
            return Err(FolderError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        if !exist_ok {
            return Err(FolderError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
    }
    fs::create_dir_all(path).map_err(|e| FolderError::from_io(path, e))?;
    fs::canonicalize(path).map_err(|e| FolderError::from_io(path, e))
}

/// Make sure `path` exists as a folder.
pub fn ensure_folder(path: impl AsRef<Path>) -> Result<PathBuf> {
    create_folder(path, true)
}

/// Delete a folder and everything in it.
///
/// Returns `Ok(false)` when there was nothing to delete.
pub fn delete_folder(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(FolderError::from_io(path, e)),
    };
    if !meta.is_dir() {
        return Err(FolderError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    fs::remove_dir_all(path).map_err(|e| FolderError::from_io(path, e))?;
    tracing::debug!(path = %path.display(), "deleted folder");
    Ok(true)
}

/// Rename a folder; `new` must not exist yet.
pub fn rename_folder(old: impl AsRef<Path>, new: impl AsRef<Path>) -> Result<PathBuf> {
    let (old, new) = (old.as_ref(), new.as_ref());
    require_dir(old)?;
    if fs::symlink_metadata(new).is_ok() {
        return Err(FolderError::AlreadyExists {
            path: new.to_path_buf(),
        });
    }
    fs::rename(old, new).map_err(|e| FolderError::from_io(old, e))?;
    absolute_path(new)
}

/// Recursively copy `src` into `dst`, returning the number of files copied.
///
/// An existing `dst` is merged into when `overwrite` is set, otherwise it is
/// an `AlreadyExists` error. Unlike scans, a subtree that cannot be read
/// fails the copy.
pub fn copy_folder(src: impl AsRef<Path>, dst: impl AsRef<Path>, overwrite: bool) -> Result<u64> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let mut walker = TreeWalker::new(src, WalkOptions::recursive())?;

    if fs::symlink_metadata(dst).is_ok() && !overwrite {
        return Err(FolderError::AlreadyExists {
            path: dst.to_path_buf(),
        });
    }
    if absolute_path(dst)?.starts_with(absolute_path(src)?) {
        return Err(FolderError::Io {
            path: dst.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot copy a folder into itself",
            ),
        });
    }

    fs::create_dir_all(dst).map_err(|e| FolderError::from_io(dst, e))?;

    let mut copied = 0;
    for entry in walker.by_ref() {
        let Ok(relative) = entry.path.strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.is_dir {
            fs::create_dir_all(&target).map_err(|e| FolderError::from_io(&target, e))?;
        } else {
            fs::copy(&entry.path, &target).map_err(|e| FolderError::from_io(&entry.path, e))?;
            copied += 1;
        }
    }

    if let Some(warning) = walker.take_warnings().into_iter().next() {
        return Err(FolderError::from_io(warning.path, warning.error));
    }

    tracing::debug!(src = %src.display(), dst = %dst.display(), files = copied, "copied folder");
    Ok(copied)
}

/// Move a folder, like `mv`.
///
/// If `dst` is an existing folder, `src` is moved inside it. Moves across
/// devices fall back to copy-then-delete. Returns the final location.
pub fn move_folder(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<PathBuf> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    require_dir(src)?;

    let target = match fs::metadata(dst) {
        Ok(meta) if meta.is_dir() => {
            let name = src.file_name().ok_or_else(|| FolderError::Io {
                path: src.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "folder has no name"),
            })?;
            dst.join(name)
        }
        Ok(_) => {
            return Err(FolderError::AlreadyExists {
                path: dst.to_path_buf(),
            });
        }
        Err(_) => dst.to_path_buf(),
    };
    if fs::symlink_metadata(&target).is_ok() {
        return Err(FolderError::AlreadyExists { path: target });
    }

    match fs::rename(src, &target) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tracing::debug!(src = %src.display(), "rename crosses devices, copying instead");
            copy_folder(src, &target, false)?;
            fs::remove_dir_all(src).map_err(|e| FolderError::from_io(src, e))?;
        }
        Err(e) => return Err(FolderError::from_io(src, e)),
    }
    absolute_path(&target)
}

/// True if `path` exists and is a folder.
pub fn folder_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}

/// True if `path` is an existing folder with no entries.
pub fn is_empty_folder(path: impl AsRef<Path>) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Join path parts in order.
pub fn join_path<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    parts.into_iter().collect()
}

/// Absolute form of `path` with symlinks resolved as far as it exists.
///
/// The path does not need to exist; the missing tail is appended to the
/// resolved part as written.
pub fn absolute_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|e| FolderError::from_io(path, e))?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(real) = fs::canonicalize(existing) {
            return Ok(missing.iter().rev().fold(real, |acc, name| acc.join(name)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

/// Absolute parent of `path`. The root is its own parent.
pub fn parent_folder(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => absolute_path("."),
        Some(parent) => absolute_path(parent),
        None => absolute_path(path),
    }
}

pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| FolderError::from_io(".", e))
}

/// Change the process working directory, returning the new one.
pub fn change_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    std::env::set_current_dir(path).map_err(|e| FolderError::from_io(path, e))?;
    current_dir()
}

fn require_dir(path: &Path) -> Result<()> {
    let meta = fs::metadata(path).map_err(|e| FolderError::from_io(path, e))?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(FolderError::NotADirectory {
            path: path.to_path_buf(),
        })
    }
}

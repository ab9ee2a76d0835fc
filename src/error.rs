//! Error types for folder operations and scans

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by folderkit operations.
///
/// Scans only raise these for the root they were given. Failures below the
/// root are recorded as [`WalkWarning`](crate::WalkWarning)s instead.
#[derive(Debug, Error)]
pub enum FolderError {
    /// The path does not exist.
    #[error("no such file or directory: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but a directory was required.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// The path exists but cannot be accessed.
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The target of a create/rename/copy/move already exists.
    #[error("already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// A glob pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Any other I/O failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FolderError {
    /// Map an `io::Error` on `path` to the matching typed variant.
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source: err },
        }
    }

    /// The path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path }
            | Self::AlreadyExists { path }
            | Self::Io { path, .. } => Some(path),
            Self::InvalidPattern { .. } => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FolderError>;

//! Test utilities for building temporary folder trees.
//!
//! This module is only compiled for tests, benchmarks and the `test-utils`
//! feature.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary folder tree for testing.
///
/// Removed when dropped. On Unix, permissions changed with [`TestTree::lock`]
/// are restored first so the cleanup can succeed.
pub struct TestTree {
    dir: TempDir,
    locked: Vec<PathBuf>,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            locked: Vec::new(),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a file of exactly `size` bytes.
    pub fn add_sized(&self, path: &str, size: usize) -> PathBuf {
        self.add_file(path, &"x".repeat(size))
    }

    /// Add an (empty) directory and its parents.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create `count` files spread over `dirs` subdirectories.
    pub fn populate(&self, dirs: usize, count: usize) {
        for i in 0..count {
            let sub = i % dirs.max(1);
            self.add_file(&format!("dir_{}/file_{}.txt", sub, i), "content");
        }
    }

    /// Create a symlink at `link` pointing to `target`.
    #[cfg(unix)]
    pub fn add_symlink(&self, target: impl AsRef<Path>, link: &str) -> PathBuf {
        let link_path = self.dir.path().join(link);
        std::os::unix::fs::symlink(target, &link_path).expect("Failed to create symlink");
        link_path
    }

    /// Remove all permissions from a directory until the tree is dropped.
    #[cfg(unix)]
    pub fn lock(&mut self, path: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.dir.path().join(path);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(0o000))
            .expect("Failed to set permissions");
        self.locked.push(full_path.clone());
        full_path
    }
}

impl Drop for TestTree {
    fn drop(&mut self) {
        #[cfg(unix)]
        for path in &self.locked {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
        }
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

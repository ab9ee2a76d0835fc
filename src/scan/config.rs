//! Configuration types for walks and scans

use serde::Serialize;

/// Which kinds of entries a scan reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    #[default]
    All,
    Files,
    Dirs,
}

/// Filter dimensions for a scan.
///
/// Every dimension defaults to "no constraint": an empty extension list, no
/// keyword and no pattern match everything the mode allows.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// File extensions to keep, e.g. `[".jpg", ".png"]`. Case-insensitive;
    /// a missing leading dot is added. Directories are never filtered by
    /// extension.
    pub extensions: Vec<String>,
    /// Case-insensitive substring the base name must contain.
    pub keyword: Option<String>,
    pub mode: EntryMode,
    /// Shell glob the whole base name must match (see [`NamePattern`](super::NamePattern)).
    pub pattern: Option<String>,
}

impl FilterConfig {
    pub fn with_mode(mut self, mode: EntryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Traversal behavior shared by every walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Descend into subdirectories (otherwise list one level).
    pub recursive: bool,
    /// Descend into directory symlinks whose target was not visited yet.
    pub follow_symlinks: bool,
}

impl WalkOptions {
    pub fn recursive() -> Self {
        Self {
            recursive: true,
            ..Default::default()
        }
    }

    pub fn shallow() -> Self {
        Self::default()
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            follow_symlinks: true,
        }
    }
}

/// Options for [`scan`](super::scan) and [`iter_scan`](super::iter_scan).
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub recursive: bool,
    pub follow_symlinks: bool,
    pub filter: FilterConfig,
}

impl ScanOptions {
    pub fn new(recursive: bool) -> Self {
        Self {
            recursive,
            follow_symlinks: true,
            filter: FilterConfig::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            recursive: self.recursive,
            follow_symlinks: self.follow_symlinks,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Key used to order a materialized scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Lexicographic order of the full path string.
    #[default]
    Path,
    /// Case-insensitive base name.
    Name,
    /// File size in bytes.
    Size,
    /// Last modification time.
    Modified,
    /// Creation time, where the platform records one.
    Created,
}

/// Sort requested for a materialized scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub reverse: bool,
}

impl SortOrder {
    pub fn by(key: SortKey) -> Self {
        Self {
            key,
            reverse: false,
        }
    }

    pub fn by_path() -> Self {
        Self::by(SortKey::Path)
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }
}

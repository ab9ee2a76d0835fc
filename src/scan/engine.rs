//! Scan entry points: materialized `scan`, lazy `iter_scan`, and `find`

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

use super::config::{EntryMode, FilterConfig, ScanOptions, SortKey, SortOrder};
use super::entry::{Entry, WalkWarning};
use super::filter::PathFilter;
use super::walker::TreeWalker;

/// Entries collected by [`scan`], plus the directories it had to skip.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<Entry>,
    pub warnings: Vec<WalkWarning>,
}

impl ScanResult {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.entries.into_iter().map(Entry::into_path).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lazy filtered scan returned by [`iter_scan`].
///
/// Holds only the walker state; nothing is collected or sorted.
#[derive(Debug)]
pub struct ScanIter {
    walker: TreeWalker,
    filter: PathFilter,
}

impl ScanIter {
    /// Directories skipped so far.
    pub fn warnings(&self) -> &[WalkWarning] {
        self.walker.warnings()
    }

    pub fn take_warnings(&mut self) -> Vec<WalkWarning> {
        self.walker.take_warnings()
    }

    pub fn walker(&self) -> &TreeWalker {
        &self.walker
    }
}

impl Iterator for ScanIter {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let filter = &self.filter;
        self.walker.find(|entry| filter.matches(entry))
    }
}

/// Lazily scan `root`, yielding matching entries as they are discovered.
///
/// Root errors are returned here, before iteration starts.
pub fn iter_scan(root: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanIter> {
    let filter = PathFilter::new(&options.filter)?;
    let walker = TreeWalker::new(root, options.walk_options())?;
    Ok(ScanIter { walker, filter })
}

/// Scan `root` into a list, sorted when `sort` is given.
///
/// Without a sort the entries keep traversal order.
pub fn scan(
    root: impl AsRef<Path>,
    options: &ScanOptions,
    sort: Option<SortOrder>,
) -> Result<ScanResult> {
    let root = root.as_ref();
    let mut iter = iter_scan(root, options)?;
    let mut entries: Vec<Entry> = iter.by_ref().collect();
    let warnings = iter.take_warnings();

    if let Some(order) = sort {
        sort_entries(&mut entries, order);
    }

    tracing::debug!(
        root = %root.display(),
        matched = entries.len(),
        skipped = warnings.len(),
        "scan finished"
    );

    Ok(ScanResult { entries, warnings })
}

/// Find entries whose base name matches a shell glob, sorted by path.
pub fn find(root: impl AsRef<Path>, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    search(root, pattern, recursive).map(ScanResult::into_paths)
}

/// Like [`find`], but keeps the matched entries and the skipped directories.
pub fn search(root: impl AsRef<Path>, pattern: &str, recursive: bool) -> Result<ScanResult> {
    let options = ScanOptions::new(recursive).with_filter(
        FilterConfig::default()
            .with_mode(EntryMode::All)
            .with_pattern(pattern),
    );
    scan(root, &options, Some(SortOrder::by_path()))
}

/// Sort entries in place by the requested key.
pub fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    match order.key {
        SortKey::Path => entries.sort_by(path_order),
        SortKey::Name => entries.sort_by_cached_key(|e| e.name().to_lowercase()),
        SortKey::Size => entries.sort_by_cached_key(|e| {
            fs::metadata(&e.path).map(|m| m.len()).unwrap_or(0)
        }),
        SortKey::Modified => {
            entries.sort_by_cached_key(|e| timestamp(&e.path, fs::Metadata::modified))
        }
        SortKey::Created => {
            entries.sort_by_cached_key(|e| timestamp(&e.path, fs::Metadata::created))
        }
    }
    if order.reverse {
        entries.reverse();
    }
}

fn timestamp(path: &Path, pick: fn(&fs::Metadata) -> std::io::Result<SystemTime>) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| pick(&m))
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

fn path_order(a: &Entry, b: &Entry) -> Ordering {
    a.path.as_os_str().cmp(b.path.as_os_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolderError;
    use tempfile::TempDir;

    fn make_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.TXT"), "upper").unwrap();
        fs::write(dir.path().join("b.txt"), "lower").unwrap();
        fs::write(dir.path().join("b.txtx"), "not text").unwrap();
        fs::create_dir_all(dir.path().join("notes/old")).unwrap();
        fs::write(dir.path().join("notes/todo.txt"), "1").unwrap();
        fs::write(dir.path().join("notes/old/report.md"), "22").unwrap();
        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_scan_sorted_by_path() {
        let dir = make_tree();
        let result = scan(dir.path(), &ScanOptions::new(true), Some(SortOrder::by_path())).unwrap();
        let paths: Vec<&Path> = result.paths().collect();
        assert!(paths.windows(2).all(|w| w[0].as_os_str() <= w[1].as_os_str()));
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn test_scan_matches_iter_scan() {
        let dir = make_tree();
        let options = ScanOptions::new(true).with_filter(FilterConfig::default().with_extensions([".txt"]));

        let mut eager = scan(dir.path(), &options, None).unwrap().into_paths();
        let mut lazy: Vec<PathBuf> = iter_scan(dir.path(), &options)
            .unwrap()
            .map(Entry::into_path)
            .collect();
        eager.sort();
        lazy.sort();
        assert_eq!(eager, lazy);
    }

    #[test]
    fn test_scan_files_with_extension() {
        let dir = make_tree();
        let options = ScanOptions::new(true).with_filter(
            FilterConfig::default()
                .with_mode(EntryMode::Files)
                .with_extensions([".txt"]),
        );
        let result = scan(dir.path(), &options, Some(SortOrder::by(SortKey::Name))).unwrap();
        assert_eq!(names(&result.into_paths()), vec!["A.TXT", "b.txt", "todo.txt"]);
    }

    #[test]
    fn test_scan_no_match_is_empty_not_error() {
        let dir = make_tree();
        let options = ScanOptions::new(true).with_filter(FilterConfig::default().with_keyword("zzz"));
        let result = scan(dir.path(), &options, None).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = scan(dir.path().join("missing"), &ScanOptions::default(), None).unwrap_err();
        assert!(matches!(err, FolderError::NotFound { .. }));
    }

    #[test]
    fn test_sort_by_size_reversed() {
        let dir = make_tree();
        let options = ScanOptions::new(false).with_filter(FilterConfig::default().with_mode(EntryMode::Files));
        let order = SortOrder::by(SortKey::Size).reversed();
        let result = scan(dir.path(), &options, Some(order)).unwrap();
        assert_eq!(names(&result.into_paths())[0], "b.txtx");
    }

    #[test]
    fn test_find_glob() {
        let dir = make_tree();
        let found = find(dir.path(), "*.txt", true).unwrap();
        assert_eq!(names(&found), vec!["A.TXT", "b.txt", "todo.txt"]);
    }

    #[test]
    fn test_find_shallow() {
        let dir = make_tree();
        let found = find(dir.path(), "*.txt", false).unwrap();
        assert_eq!(names(&found), vec!["A.TXT", "b.txt"]);
    }

    #[test]
    fn test_find_unclosed_bracket_is_literal() {
        let dir = make_tree();
        fs::write(dir.path().join("notes["), "").unwrap();
        let found = find(dir.path(), "notes[", true).unwrap();
        assert_eq!(found, vec![dir.path().join("notes[")]);
    }

    #[test]
    fn test_find_non_ascii_case() {
        let dir = make_tree();
        fs::write(dir.path().join("äpfel.txt"), "").unwrap();
        let found = find(dir.path(), "ÄPFEL*", true).unwrap();
        assert_eq!(names(&found), vec!["äpfel.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_search_keeps_warnings() {
        use std::os::unix::fs::PermissionsExt;

        let dir = make_tree();
        let locked = dir.path().join("notes/old");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let denied = fs::read_dir(&locked).is_err();

        let result = search(dir.path(), "*.txt", true).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.len(), 3);
        if denied {
            assert_eq!(result.warnings.len(), 1);
            assert_eq!(result.warnings[0].path, locked);
        }
    }

    #[test]
    fn test_iter_scan_stops_early() {
        let dir = make_tree();
        let mut iter = iter_scan(dir.path(), &ScanOptions::new(true)).unwrap();
        assert!(iter.next().is_some());
        assert!(iter.walker().directories_opened() <= 2);
    }
}

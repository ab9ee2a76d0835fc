//! folderkit - folder utilities with filtered, memory-friendly tree scans
//!
//! - [`folders`]: well-known user folders (documents, downloads, temp, ...)
//! - [`ops`]: create, delete, rename, copy and move folders
//! - [`scan`]: walks, filtered scans, glob search and size/count aggregates

pub mod error;
pub mod folders;
pub mod ops;
pub mod output;
pub mod scan;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{FolderError, Result};
pub use folders::KnownFolder;
pub use output::{EntryFormatter, OutputConfig, print_json};
pub use scan::{
    AggregateCount, Entry, EntryMode, FilterConfig, NamePattern, PathFilter, ScanIter,
    ScanOptions, ScanResult, SortKey, SortOrder, TreeWalker, WalkOptions, WalkWarning,
    count_items, find, folder_size, iter_scan, scan, search, walk,
};

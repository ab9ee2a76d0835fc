//! Folder scanning
//!
//! Everything here is built on one traversal primitive:
//!
//! - `TreeWalker`: lazy depth-first walk that skips unreadable subdirectories
//! - `scan` / `iter_scan` / `find`: filtered walks, materialized or streamed
//! - `count_items` / `folder_size`: aggregates over an unfiltered walk

mod aggregate;
mod config;
mod engine;
mod entry;
mod filter;
mod pattern;
mod walker;

pub use aggregate::{AggregateCount, count_items, folder_size};
pub use config::{EntryMode, FilterConfig, ScanOptions, SortKey, SortOrder, WalkOptions};
pub use engine::{ScanIter, ScanResult, find, iter_scan, scan, search, sort_entries};
pub use entry::{Entry, WalkWarning};
pub use filter::PathFilter;
pub use pattern::NamePattern;
pub use walker::{TreeWalker, walk};

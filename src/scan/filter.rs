//! Entry filtering for scans

use super::config::{EntryMode, FilterConfig};
use super::entry::Entry;
use super::pattern::NamePattern;
use crate::error::Result;

/// A [`FilterConfig`] normalized once for repeated matching.
///
/// Extensions and keyword are lowercased up front and the pattern is
/// compiled, so `matches` does no parsing per entry.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    mode: EntryMode,
    extensions: Vec<String>,
    keyword: Option<String>,
    pattern: Option<NamePattern>,
}

impl PathFilter {
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let extensions = config
            .extensions
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(normalize_extension)
            .collect();

        let keyword = config
            .keyword
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase);

        let pattern = config.pattern.as_deref().map(NamePattern::new).transpose()?;

        Ok(Self {
            mode: config.mode,
            extensions,
            keyword,
            pattern,
        })
    }

    /// Filter that accepts every entry.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Check if an entry passes every configured dimension.
    pub fn matches(&self, entry: &Entry) -> bool {
        match self.mode {
            EntryMode::Files if entry.is_dir => return false,
            EntryMode::Dirs if !entry.is_dir => return false,
            _ => {}
        }

        if !self.extensions.is_empty() && !entry.is_dir {
            match entry.extension() {
                Some(ext) if self.extensions.contains(&ext) => {}
                _ => return false,
            }
        }

        if self.keyword.is_none() && self.pattern.is_none() {
            return true;
        }

        let name = entry.name();
        if let Some(keyword) = &self.keyword {
            if !name.to_lowercase().contains(keyword.as_str()) {
                return false;
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.matches(&name) {
                return false;
            }
        }

        true
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

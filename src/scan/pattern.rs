//! Shell-style name patterns for `find`

use glob::{MatchOptions, Pattern};

use crate::error::{FolderError, Result};

const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A glob compiled once and matched against base names.
///
/// Supports `*`, `?` and bracket classes. A `[` with no closing `]` is a
/// literal character. The whole name must match and matching ignores case,
/// including non-ASCII letters.
#[derive(Debug, Clone)]
pub struct NamePattern {
    source: String,
    pattern: Pattern,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let normalized = normalize(&pattern.to_lowercase());
        let compiled = Pattern::new(&normalized).map_err(|e| FolderError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            pattern: compiled,
        })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(&name.to_lowercase(), NAME_MATCH)
    }

    /// The pattern as it was given.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Rewrite a base-name glob into a form `glob` accepts.
///
/// Unclosed `[` becomes the one-character class `[[]`. Runs of `*` collapse
/// to one, since there is no separator for `**` to cross.
fn normalize(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => {
                // `]` right after `[` or `[!` is a class member, not the end
                let mut first = i + 1;
                if chars.get(first) == Some(&'!') {
                    first += 1;
                }
                let close = chars
                    .get(first + 1..)
                    .and_then(|rest| rest.iter().position(|&c| c == ']'))
                    .map(|offset| first + 1 + offset);
                match close {
                    Some(end) => {
                        out.extend(&chars[i..=end]);
                        i = end + 1;
                    }
                    None => {
                        out.push_str("[[]");
                        i += 1;
                    }
                }
            }
            '*' if out.ends_with('*') => i += 1,
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

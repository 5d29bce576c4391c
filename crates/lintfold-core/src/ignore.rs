//! Glob-style ignore patterns
//!
//! Patterns are matched against paths relative to the configuration base:
//! - a trailing `/` restricts the pattern to directories, so `dist/` ignores
//!   `dist` and everything beneath it
//! - without a trailing `/`, the pattern matches the path itself or any of
//!   its parent directories
//! - `*` stays within one path segment, `**` crosses segments
//! - wildcards match dotfiles
//!
//! Negated patterns (`!pattern`) are rejected: the ignore set is append-only.

use crate::error::LintfoldError;
use crate::result::Result;
use glob::{MatchOptions, Pattern};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled ignore pattern
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw: String,
    glob: Pattern,
    directory_only: bool,
}

impl IgnorePattern {
    /// Compile a raw pattern; `layer_index` is used for error reporting
    pub fn new(raw: &str, layer_index: usize) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(LintfoldError::invalid_ignore_pattern(
                raw,
                layer_index,
                "pattern is empty",
            ));
        }
        if raw.starts_with('!') {
            return Err(LintfoldError::invalid_ignore_pattern(
                raw,
                layer_index,
                "negated patterns cannot un-ignore paths",
            ));
        }

        let normalized = raw.replace('\\', "/");
        let directory_only = normalized.ends_with('/');
        let body = normalize(&normalized);
        if body.is_empty() {
            return Err(LintfoldError::invalid_ignore_pattern(
                raw,
                layer_index,
                "pattern matches nothing",
            ));
        }

        let glob = Pattern::new(body).map_err(|e| {
            LintfoldError::invalid_ignore_pattern(raw, layer_index, e.msg.to_string())
        })?;

        Ok(Self {
            raw: raw.to_string(),
            glob,
            directory_only,
        })
    }

    /// The pattern as it was declared
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// Check a normalized relative path against this pattern
    fn matches_normalized(&self, path: &str, path_is_dir: bool) -> bool {
        if path.is_empty() {
            return false;
        }

        // Every proper ancestor is a directory
        let mut ancestors = path.match_indices('/').map(|(idx, _)| &path[..idx]);
        if ancestors.any(|ancestor| self.glob.matches_with(ancestor, MATCH_OPTIONS)) {
            return true;
        }

        (!self.directory_only || path_is_dir) && self.glob.matches_with(path, MATCH_OPTIONS)
    }
}

impl PartialEq for IgnorePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for IgnorePattern {}

/// Strip `./` and `/` prefixes and trailing slashes
fn normalize(path: &str) -> &str {
    let mut path = path;
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        } else {
            break;
        }
    }
    path.trim_end_matches('/')
}

/// Deduplicated, deterministically ordered set of ignore patterns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: BTreeMap<String, IgnorePattern>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern; returns `false` when it was already present
    pub fn insert(&mut self, raw: &str, layer_index: usize) -> Result<bool> {
        if self.patterns.contains_key(raw) {
            return Ok(false);
        }
        let pattern = IgnorePattern::new(raw, layer_index)?;
        self.patterns.insert(raw.to_string(), pattern);
        Ok(true)
    }

    /// Whether the path matches at least one pattern
    pub fn is_ignored(&self, path: impl AsRef<Path>) -> bool {
        self.matching(path).is_some()
    }

    /// First pattern (in sorted order) that ignores the path
    pub fn matching(&self, path: impl AsRef<Path>) -> Option<&str> {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let path_is_dir = raw.ends_with('/');
        let normalized = normalize(&raw);

        self.patterns
            .values()
            .find(|pattern| pattern.matches_normalized(normalized, path_is_dir))
            .map(IgnorePattern::as_str)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Serialize for IgnoreSet {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.patterns.keys())
    }
}

//! Ignorable-file filtering.
//!
//! Whole file records are excluded from the statistics when either of their
//! paths contains a configured substring. Matching is literal (no globs, no
//! regex), which keeps the list trivially auditable and the check allocation
//! free.

use serde::{Deserialize, Serialize};

/// Paths containing any of these substrings contribute nothing to the count.
///
/// Lockfiles and generated artifacts dominate raw diff sizes without carrying
/// reviewable change; vendored directories, images, and editor config are in
/// the same bucket.
pub const DEFAULT_IGNORES: &[&str] = &[
    // Dependency lockfiles
    "yarn.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    "pubspec.lock",
    "Cargo.lock",
    "Gemfile.lock",
    "poetry.lock",
    "composer.lock",
    "go.sum",
    // Generated artifacts
    ".snap",
    ".min.js",
    // Vendored trees
    "Pods/",
    "node_modules/",
    "vendor/",
    // Images
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".svg",
    ".ico",
    // Editor / linter / VCS config
    ".gitignore",
    ".gitattributes",
    ".editorconfig",
    ".vscode/",
    ".idea/",
];

/// Configuration for file-level exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Literal substrings matched against both paths of a file record
    substrings: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            substrings: DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IgnoreConfig {
    /// Create a config with the default ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that ignores nothing.
    pub fn empty() -> Self {
        Self {
            substrings: Vec::new(),
        }
    }

    /// Add one ignore substring.
    pub fn add(mut self, substring: impl Into<String>) -> Self {
        self.substrings.push(substring.into());
        self
    }

    /// Add several ignore substrings.
    pub fn extend(mut self, substrings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.substrings
            .extend(substrings.into_iter().map(Into::into));
        self
    }

    /// The configured substrings, in match order.
    pub fn substrings(&self) -> &[String] {
        &self.substrings
    }

    /// True if `path` contains any configured substring.
    pub fn is_ignored_path(&self, path: &str) -> bool {
        self.substrings.iter().any(|s| path.contains(s.as_str()))
    }

    /// True if either present path of a file record matches.
    ///
    /// An ignored record is dropped whole: its hunks are never inspected.
    pub fn is_ignored_file(&self, old_path: Option<&str>, new_path: Option<&str>) -> bool {
        old_path.is_some_and(|p| self.is_ignored_path(p))
            || new_path.is_some_and(|p| self.is_ignored_path(p))
    }
}

//! File set for collecting files to analyze.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use super::{Language, Result};
use crate::config::Config;

/// A set of files to analyze, respecting .gitignore.
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Root directory.
    root: PathBuf,
    /// All files in the set.
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Create a file set from a directory path.
    pub fn from_path(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        Self::from_path_with_patterns(path, &config.exclude_patterns)
    }

    /// Create a file set from a directory path with no exclude patterns.
    pub fn from_path_default(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with_patterns(path, &[])
    }

    /// Create a file set with custom exclude patterns.
    pub fn from_path_with_patterns(
        path: impl AsRef<Path>,
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let root = path.as_ref().canonicalize()?;
        let excludes = build_globset(exclude_patterns)?;
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker.flatten() {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            // Skip non-source files
            if Language::detect(path).is_none() {
                continue;
            }

            let relative = path.strip_prefix(&root).unwrap_or(path);
            if excludes.is_match(relative) || excludes.is_match(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        // Sort for deterministic ordering
        files.sort();

        Ok(Self { root, files })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all files in the set.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over files.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    /// Get relative path from root.
    pub fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

impl IntoIterator for FileSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| super::Error::config(format!("bad exclude pattern {pattern:?}: {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| super::Error::config(e.to_string()))
}

//! Analyzer trait and shared analysis context.

use std::path::Path;

use serde::Serialize;

use super::{FileSet, Result};
use crate::config::Config;

/// Trait implemented by analyzers that walk a file set.
pub trait Analyzer: Send + Sync {
    /// The result type produced by this analyzer.
    type Output: Serialize + Send;

    /// Unique identifier for this analyzer.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Run analysis and return results.
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output>;

    /// Configure the analyzer from config.
    fn configure(&mut self, _config: &Config) -> Result<()> {
        Ok(())
    }
}

/// Context shared by analyzers during analysis.
pub struct AnalysisContext<'a> {
    /// Root directory being analyzed.
    pub root: &'a Path,
    /// Set of files to analyze.
    pub files: &'a FileSet,
    /// Configuration.
    pub config: &'a Config,
    /// Progress callback.
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync + 'a>>,
}

impl<'a> AnalysisContext<'a> {
    /// Create a new analysis context.
    pub fn new(files: &'a FileSet, config: &'a Config, root: Option<&'a Path>) -> Self {
        Self {
            root: root.unwrap_or_else(|| files.root()),
            files,
            config,
            on_progress: None,
        }
    }

    /// Add progress callback.
    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'a,
    {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Report progress if callback is set.
    pub fn report_progress(&self, current: usize, total: usize) {
        if let Some(ref f) = self.on_progress {
            f(current, total);
        }
    }
}

//! Cognitive complexity analyzer.
//!
//! # Overview
//!
//! Scores every function in the file set with the cognitive complexity
//! metric: branching and looping constructs cost 1 plus their structural
//! nesting depth, and chains of logical operators cost 1 per run of
//! identical operators. Each score is classified against the configured
//! threshold as acceptable, a warning, or an error.
//!
//! # Example
//!
//! ```no_run
//! use cogmet::analyzers::cognitive::Analyzer;
//! use cogmet::config::Config;
//! use cogmet::core::{AnalysisContext, Analyzer as AnalyzerTrait, FileSet};
//!
//! let config = Config::default();
//! let files = FileSet::from_path(".", &config).unwrap();
//! let ctx = AnalysisContext::new(&files, &config, None);
//!
//! let analyzer = Analyzer::new();
//! let result = analyzer.analyze(&ctx).unwrap();
//! println!("Scored {} functions", result.summary.total_functions);
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CognitiveConfig;
use crate::core::{AnalysisContext, Analyzer as AnalyzerTrait, Language, Result, SourceFile};
use crate::parser::{self, lower, ParseResult, Parser};
use crate::scorer::Scorer;

/// Cognitive complexity analyzer.
pub struct Analyzer {
    parser: Parser,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create a new cognitive complexity analyzer.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Maximum file size to analyze (1MB). Larger files are likely minified bundles.
    const MAX_FILE_SIZE: u64 = 1_000_000;

    /// Analyze a single file.
    pub fn analyze_file(&self, path: &Path, cfg: &CognitiveConfig) -> Result<FileResult> {
        if let Ok(metadata) = std::fs::metadata(path) {
            if metadata.len() > Self::MAX_FILE_SIZE {
                return Err(crate::core::Error::Parse {
                    path: path.to_path_buf(),
                    message: format!(
                        "File too large: {} bytes (max {})",
                        metadata.len(),
                        Self::MAX_FILE_SIZE
                    ),
                });
            }
        }
        let result = self.parser.parse_file(path)?;
        Ok(analyze_parse_result(&result, cfg))
    }

    /// Analyze file content (without reading from the filesystem).
    pub fn analyze_content(
        &self,
        path: &Path,
        content: Vec<u8>,
        cfg: &CognitiveConfig,
    ) -> Result<FileResult> {
        if content.len() > Self::MAX_FILE_SIZE as usize {
            return Err(crate::core::Error::Parse {
                path: path.to_path_buf(),
                message: format!(
                    "File too large: {} bytes (max {})",
                    content.len(),
                    Self::MAX_FILE_SIZE
                ),
            });
        }

        let language =
            Language::detect(path).ok_or_else(|| crate::core::Error::UnsupportedLanguage {
                path: path.to_path_buf(),
            })?;

        let source_file = SourceFile::from_content(path, language, content);
        let result = self.parser.parse_source(&source_file)?;
        Ok(analyze_parse_result(&result, cfg))
    }
}

impl AnalyzerTrait for Analyzer {
    type Output = Analysis;

    fn name(&self) -> &'static str {
        "cognitive"
    }

    fn description(&self) -> &'static str {
        "Score cognitive complexity per function"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Self::Output> {
        let start = Instant::now();
        let total_files = ctx.files.len();
        let counter = Arc::new(AtomicUsize::new(0));
        let cfg = &ctx.config.cognitive;

        let results: Vec<FileResult> = ctx
            .files
            .files()
            .par_iter()
            .filter_map(|path| {
                let result = match self.analyze_file(path, cfg) {
                    Ok(file_result) => Some(file_result),
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", path.display(), e);
                        None
                    }
                };

                let current = counter.fetch_add(1, Ordering::Relaxed) + 1;
                ctx.report_progress(current, total_files);

                result
            })
            .collect();

        let summary = build_summary(&results, cfg);
        let analysis = Analysis {
            files: results,
            summary,
        };

        tracing::info!(
            "Cognitive analysis completed in {:?}: {} files, {} functions",
            start.elapsed(),
            analysis.summary.total_files,
            analysis.summary.total_functions
        );

        Ok(analysis)
    }
}

/// Classification of one function's score against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Score is at or under the threshold.
    Info,
    /// Score exceeds the threshold.
    Warning,
    /// Score exceeds the threshold and the config escalates violations.
    Error,
}

impl Severity {
    /// Classify a score under the given configuration.
    pub fn classify(score: u32, cfg: &CognitiveConfig) -> Self {
        if score <= cfg.threshold {
            Self::Info
        } else if cfg.error_on_exceed {
            Self::Error
        } else {
            Self::Warning
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// Full analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// Per-file results.
    pub files: Vec<FileResult>,
    /// Aggregate summary.
    pub summary: AnalysisSummary,
}

/// A function that exceeded the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Function name.
    pub name: String,
    /// File path.
    pub file: String,
    /// Line number.
    pub line: u32,
    /// Cognitive complexity score.
    pub score: u32,
}

impl Analysis {
    /// Check every function against a threshold.
    ///
    /// Returns Ok(()) if all functions are within the threshold, or the
    /// list of violations otherwise.
    pub fn check_threshold(&self, threshold: u32) -> std::result::Result<(), Vec<Violation>> {
        let violations: Vec<Violation> = self
            .files
            .iter()
            .flat_map(|file| &file.functions)
            .filter(|func| func.score > threshold)
            .map(|func| Violation {
                name: func.name.clone(),
                file: func.file.clone(),
                line: func.start_line,
                score: func.score,
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Iterate all function results across files.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionResult> {
        self.files.iter().flat_map(|file| &file.functions)
    }
}

/// Per-file result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// File path.
    pub path: String,
    /// Detected language.
    pub language: String,
    /// Per-function results.
    pub functions: Vec<FunctionResult>,
    /// Sum of function scores.
    pub total_score: u32,
    /// Highest function score in the file.
    pub max_score: u32,
}

/// Per-function result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResult {
    /// Function name.
    pub name: String,
    /// File path.
    pub file: String,
    /// Start line (1-indexed).
    pub start_line: u32,
    /// End line (1-indexed).
    pub end_line: u32,
    /// Cognitive complexity score.
    pub score: u32,
    /// Classification against the configured threshold.
    pub severity: Severity,
}

/// Aggregate summary statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total files analyzed.
    pub total_files: usize,
    /// Total functions scored.
    pub total_functions: usize,
    /// Functions over the threshold.
    pub over_threshold: usize,
    /// Average score.
    pub avg_score: f64,
    /// Maximum score.
    pub max_score: u32,
    /// P50 score.
    pub p50_score: u32,
    /// P90 score.
    pub p90_score: u32,
    /// P95 score.
    pub p95_score: u32,
}

/// Score every function of a parsed file.
fn analyze_parse_result(result: &ParseResult, cfg: &CognitiveConfig) -> FileResult {
    let functions = parser::extract_functions(result);
    let path = result.path.to_string_lossy().to_string();
    let mut file_result = FileResult {
        path: path.clone(),
        language: result.language.to_string(),
        functions: Vec::with_capacity(functions.len()),
        total_score: 0,
        max_score: 0,
    };

    for func in functions {
        let tree = lower::lower_function(&func.node, &result.source, result.language);
        // A fresh scorer per function: no state crosses method boundaries.
        let score = Scorer::new().score(&tree, tree.root());

        file_result.total_score += score;
        file_result.max_score = file_result.max_score.max(score);
        file_result.functions.push(FunctionResult {
            name: func.name,
            file: path.clone(),
            start_line: func.start_line,
            end_line: func.end_line,
            score,
            severity: Severity::classify(score, cfg),
        });
    }

    file_result
}

/// Build summary statistics from file results.
fn build_summary(results: &[FileResult], cfg: &CognitiveConfig) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        total_files: results.len(),
        ..Default::default()
    };

    let mut scores = Vec::new();
    let mut total: u64 = 0;

    for file in results {
        summary.total_functions += file.functions.len();

        for func in &file.functions {
            scores.push(func.score);
            total += func.score as u64;

            if func.score > summary.max_score {
                summary.max_score = func.score;
            }
            if func.score > cfg.threshold {
                summary.over_threshold += 1;
            }
        }
    }

    if summary.total_functions > 0 {
        summary.avg_score = total as f64 / summary.total_functions as f64;
    }

    if !scores.is_empty() {
        scores.sort_unstable();
        summary.p50_score = percentile(&scores, 50);
        summary.p90_score = percentile(&scores, 90);
        summary.p95_score = percentile(&scores, 95);
    }

    summary
}

/// Calculate percentile value from sorted slice.
fn percentile(sorted: &[u32], p: usize) -> u32 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (p * sorted.len()) / 100;
    sorted[idx.min(sorted.len() - 1)]
}

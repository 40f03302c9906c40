//! Cogmet - cognitive complexity analysis for multi-language codebases.
//!
//! Cogmet scores every function in a source tree with the cognitive
//! complexity metric (nesting-aware construct costs plus flattened
//! logical-operator chains) and classifies each score against a configured
//! threshold.
//!
//! # Supported Languages
//!
//! C#, Java, TypeScript, JavaScript, TSX/JSX
//!
//! # Example
//!
//! ```no_run
//! use cogmet::analyzers::cognitive::Analyzer as CognitiveAnalyzer;
//! use cogmet::config::Config;
//! use cogmet::core::{AnalysisContext, Analyzer, FileSet};
//!
//! let config = Config::default();
//! let files = FileSet::from_path(".", &config).unwrap();
//! let ctx = AnalysisContext::new(&files, &config, None);
//! let analyzer = CognitiveAnalyzer::new();
//! let result = analyzer.analyze(&ctx).unwrap();
//! println!("Scored {} functions", result.summary.total_functions);
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod output;
pub mod parser;
pub mod scorer;
pub mod syntax;

pub use core::{AnalysisContext, Analyzer};

//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cogmet - cognitive complexity scoring for multi-language codebases.
#[derive(Parser)]
#[command(name = "cogmet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the source tree to analyze
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Output format (defaults to the config file's output.format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score cognitive complexity per function
    #[command(alias = "cc")]
    Analyze(AnalyzeArgs),

    /// Score and fail when functions exceed the threshold
    Check(CheckArgs),

    /// Write a default cogmet.toml to the target path
    Init(InitArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Exclude files matching glob pattern (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Only report functions at or above this score
    #[arg(short = 'n', long)]
    pub min_score: Option<u32>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: AnalyzeArgs,

    /// Maximum allowed score (overrides the config threshold)
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Exit non-zero on violations even when the config only warns
    #[arg(long)]
    pub deny: bool,
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Output format selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

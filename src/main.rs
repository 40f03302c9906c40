//! Cogmet CLI - cognitive complexity scoring for multi-language codebases.

use std::io::stdout;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cogmet::analyzers::cognitive::{self, Analysis};
use cogmet::cli::{AnalyzeArgs, CheckArgs, Cli, Command, InitArgs, OutputFormat};
use cogmet::config::{self, Config};
use cogmet::core::{AnalysisContext, Analyzer, Error, FileSet, Result};
use cogmet::output::Format;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(&cli.path)?,
    };

    if let Some(jobs) = cli.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            tracing::warn!("Could not set worker count: {e}");
        }
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let format = match cli.format {
        Some(OutputFormat::Json) => Format::Json,
        Some(OutputFormat::Markdown) => Format::Markdown,
        Some(OutputFormat::Text) => Format::Text,
        None => match config.output.format {
            config::OutputFormat::Json => Format::Json,
            config::OutputFormat::Markdown => Format::Markdown,
            config::OutputFormat::Text => Format::Text,
        },
    };

    match cli.command {
        Command::Analyze(args) => run_analyze(&cli.path, config, &args, format),
        Command::Check(args) => run_check(&cli.path, config, &args, format),
        Command::Init(args) => run_init(&cli.path, &args),
    }
}

fn run_analyze(
    path: &Path,
    mut config: Config,
    args: &AnalyzeArgs,
    format: Format,
) -> Result<()> {
    config.exclude_patterns.extend(args.exclude.iter().cloned());

    let mut analysis = run_analysis(path, &config)?;
    if let Some(min_score) = args.min_score {
        for file in &mut analysis.files {
            file.functions.retain(|func| func.score >= min_score);
        }
        analysis.files.retain(|file| !file.functions.is_empty());
    }

    format.write_analysis(&analysis, &mut stdout())?;
    Ok(())
}

fn run_check(path: &Path, mut config: Config, args: &CheckArgs, format: Format) -> Result<()> {
    config
        .exclude_patterns
        .extend(args.common.exclude.iter().cloned());
    let threshold = args.threshold.unwrap_or(config.cognitive.threshold);
    config.cognitive.threshold = threshold;

    let analysis = run_analysis(path, &config)?;
    format.write_analysis(&analysis, &mut stdout())?;

    let violations = match analysis.check_threshold(threshold) {
        Ok(()) => return Ok(()),
        Err(violations) => violations,
    };

    for violation in &violations {
        eprintln!(
            "{} {} ({}:{}) scored {} > {}",
            "over threshold:".yellow().bold(),
            violation.name,
            violation.file,
            violation.line,
            violation.score,
            threshold
        );
    }

    if args.deny || config.cognitive.error_on_exceed {
        return Err(Error::threshold_violation(
            format!(
                "{} function(s) exceed the cognitive complexity threshold {}",
                violations.len(),
                threshold
            ),
            violations.len(),
        ));
    }

    tracing::warn!(
        "{} function(s) over threshold {}; pass --deny or set error_on_exceed to fail",
        violations.len(),
        threshold
    );
    Ok(())
}

fn run_init(path: &Path, args: &InitArgs) -> Result<()> {
    let target = path.join("cogmet.toml");
    if target.exists() && !args.force {
        return Err(Error::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }
    std::fs::write(&target, Config::default_toml())?;
    println!("Wrote {}", target.display());
    Ok(())
}

fn run_analysis(path: &Path, config: &Config) -> Result<Analysis> {
    let file_set = FileSet::from_path(path, config)?;
    let bar = ProgressBar::new(file_set.len() as u64);

    let ctx = AnalysisContext::new(&file_set, config, Some(path)).with_progress(
        |current, _total| {
            bar.set_position(current as u64);
        },
    );

    let analyzer = cognitive::Analyzer::new();
    let analysis = analyzer.analyze(&ctx);
    bar.finish_and_clear();
    analysis
}

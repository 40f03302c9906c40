//! Output formatters for analysis reports.

use std::io::Write;

use colored::Colorize;

use crate::analyzers::cognitive::{Analysis, FunctionResult, Severity};
use crate::core::Result;

/// Output format enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    Json,
    Markdown,
    #[default]
    Text,
}

impl Format {
    /// Render an analysis report to the writer.
    pub fn write_analysis<W: Write>(&self, analysis: &Analysis, writer: &mut W) -> Result<()> {
        match self {
            Format::Json => write_json(analysis, writer),
            Format::Markdown => write_markdown(analysis, writer),
            Format::Text => write_text(analysis, writer),
        }
    }
}

fn write_json<W: Write>(analysis: &Analysis, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, analysis)?;
    writeln!(writer)?;
    Ok(())
}

fn write_markdown<W: Write>(analysis: &Analysis, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Cognitive Complexity\n")?;

    let mut functions: Vec<&FunctionResult> = analysis.functions().collect();
    functions.sort_by(|a, b| b.score.cmp(&a.score));

    if functions.is_empty() {
        writeln!(writer, "_No functions found._\n")?;
    } else {
        writeln!(writer, "| Function | File | Line | Score | Severity |")?;
        writeln!(writer, "| --- | --- | --- | --- | --- |")?;
        for func in &functions {
            writeln!(
                writer,
                "| {} | {} | {} | {} | {} |",
                func.name, func.file, func.start_line, func.score, func.severity
            )?;
        }
        writeln!(writer)?;
    }

    let summary = &analysis.summary;
    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- Files: {}", summary.total_files)?;
    writeln!(writer, "- Functions: {}", summary.total_functions)?;
    writeln!(writer, "- Over threshold: {}", summary.over_threshold)?;
    writeln!(writer, "- Average score: {:.2}", summary.avg_score)?;
    writeln!(writer, "- Max score: {}", summary.max_score)?;
    writeln!(
        writer,
        "- p50/p90/p95: {}/{}/{}",
        summary.p50_score, summary.p90_score, summary.p95_score
    )?;
    Ok(())
}

fn write_text<W: Write>(analysis: &Analysis, writer: &mut W) -> Result<()> {
    for file in &analysis.files {
        if file.functions.is_empty() {
            continue;
        }
        writeln!(writer, "{}", file.path.bold())?;
        for func in &file.functions {
            writeln!(
                writer,
                "  {:<40} line {:<5} score {:<4} {}",
                func.name,
                func.start_line,
                func.score,
                severity_label(func.severity)
            )?;
        }
    }

    let summary = &analysis.summary;
    writeln!(writer)?;
    writeln!(
        writer,
        "{} files, {} functions, {} over threshold",
        summary.total_files, summary.total_functions, summary.over_threshold
    )?;
    writeln!(
        writer,
        "score avg {:.2}, max {}, p50/p90/p95 {}/{}/{}",
        summary.avg_score,
        summary.max_score,
        summary.p50_score,
        summary.p90_score,
        summary.p95_score
    )?;
    Ok(())
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Info => severity.to_string().green().to_string(),
        Severity::Warning => severity.to_string().yellow().to_string(),
        Severity::Error => severity.to_string().red().bold().to_string(),
    }
}

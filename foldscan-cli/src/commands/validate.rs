//! Validate command implementation

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use foldscan_core::{parse, validate, ValidationReport};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text report
    Text,
    /// JSON report for downstream tooling
    Json,
}

/// Validation outcome for one input file
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    passed: bool,
    report: ValidationReport,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let pipeline = config.pipeline_config();
        let files = resolve_patterns(&self.input)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let mut results = Vec::new();
        for path in &files {
            let text = FileReader::read_text(path)?;
            let outcome = parse(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            for diagnostic in &outcome.diagnostics {
                log::warn!("{}: {diagnostic}", path.display());
            }
            let report = validate(&outcome.video_rows(), &outcome.summary_rows(), &pipeline);
            progress.file_completed(&FileReader::display_name(path));
            results.push(FileReport {
                file: path.display().to_string(),
                passed: report.passed(),
                report,
            });
        }
        progress.finish();

        let rendered = match self.format {
            ReportFormat::Text => render_text(&results),
            ReportFormat::Json => {
                if config.output.pretty_json {
                    serde_json::to_string_pretty(&results)?
                } else {
                    serde_json::to_string(&results)?
                }
            }
        };

        match &self.output {
            Some(path) => std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{rendered}"),
        }

        let failed = results.iter().filter(|r| !r.passed).count();
        if failed > 0 {
            anyhow::bail!("validation failed for {failed} of {} file(s)", results.len());
        }
        Ok(())
    }
}

fn render_text(results: &[FileReport]) -> String {
    let mut out = String::new();
    for entry in results {
        if results.len() > 1 {
            out.push_str(&format!("### {}\n\n", entry.file));
        }
        out.push_str(&entry.report.to_string());
        out.push('\n');
    }
    out
}

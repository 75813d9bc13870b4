//! Report command implementation

use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::{HtmlRenderer, LatexRenderer, ReportContext, ReportRenderer};
use anyhow::{Context, Result};
use clap::Args;
use foldscan_core::{aggregate, parse, validate};
use std::path::PathBuf;

/// Arguments for the report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Input scan text file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Directory for the rendered report(s)
    #[arg(short, long, value_name = "DIR", default_value = "reports")]
    pub output: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "html")]
    pub format: ReportKind,

    /// Entries kept in the worst-video and sensitivity rankings
    #[arg(long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress console output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported report kinds
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportKind {
    /// Self-contained HTML with inline SVG charts
    Html,
    /// LaTeX article with pgfplots charts
    Latex,
    /// Both HTML and LaTeX
    Both,
}

impl ReportArgs {
    /// Execute the report command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        if let Some(top_k) = self.top_k {
            config.pipeline.top_k = top_k;
        }
        let pipeline = config.pipeline_config();

        let text = FileReader::read_text(&self.input)?;
        let outcome = parse(&text)
            .with_context(|| format!("Failed to parse {}", self.input.display()))?;
        for diagnostic in &outcome.diagnostics {
            log::warn!("{}: {diagnostic}", self.input.display());
        }

        let videos = outcome.video_rows();
        let summaries = outcome.summary_rows();
        let features = outcome.feature_rows();
        let validation = validate(&videos, &summaries, &pipeline);
        let tables = aggregate(&videos, &summaries, &pipeline);

        let source_name = FileReader::display_name(&self.input);
        let ctx = ReportContext {
            source_name: &source_name,
            videos: &videos,
            features: &features,
            tables: &tables,
            validation: &validation,
        };

        std::fs::create_dir_all(&self.output)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;

        let renderers: Vec<Box<dyn ReportRenderer>> = match self.format {
            ReportKind::Html => vec![Box::new(HtmlRenderer)],
            ReportKind::Latex => vec![Box::new(LatexRenderer)],
            ReportKind::Both => vec![Box::new(HtmlRenderer), Box::new(LatexRenderer)],
        };

        for renderer in renderers {
            let content = renderer.render(&ctx)?;
            let path = self.output.join(renderer.file_name());
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !self.quiet {
                println!("Report -> {}", path.display());
            }
        }

        Ok(())
    }
}

//! Convert command implementation

use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::tables;
use anyhow::{Context, Result};
use clap::Args;
use foldscan_core::{aggregate, parse};
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input scan text file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Directory for the output tables
    #[arg(short, long, value_name = "DIR", default_value = "processed")]
    pub output: PathBuf,

    /// Field delimiter for the table files
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

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

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.quiet, self.verbose);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        if let Some(delimiter) = self.delimiter {
            config.output.delimiter = delimiter;
        }
        let delimiter = config.delimiter_byte()?;

        log::info!("Parsing scan file: {}", self.input.display());
        let text = FileReader::read_text(&self.input)?;
        let outcome = parse(&text)
            .with_context(|| format!("Failed to parse {}", self.input.display()))?;
        for diagnostic in &outcome.diagnostics {
            log::warn!("{}: {diagnostic}", self.input.display());
        }

        let videos = outcome.video_rows();
        let summaries = outcome.summary_rows();
        let features = outcome.feature_rows();
        let derived = aggregate(&videos, &summaries, &config.pipeline_config());

        std::fs::create_dir_all(&self.output)
            .with_context(|| format!("Failed to create {}", self.output.display()))?;

        let video_path = self.output.join("video_results.csv");
        let summary_path = self.output.join("summary_stats.csv");
        let feature_path = self.output.join("feature_importance.csv");
        let metadata_path = self.output.join("metadata.txt");

        tables::write_video_results(&video_path, &videos, delimiter)?;
        tables::write_summary_stats(&summary_path, &derived.window_stats, delimiter)?;
        tables::write_feature_importance(&feature_path, &features, delimiter)?;
        tables::write_metadata(&metadata_path, &outcome)?;

        if !self.quiet {
            println!("Video results: {} rows -> {}", videos.len(), video_path.display());
            println!(
                "Summary stats: {} rows -> {}",
                derived.window_stats.len(),
                summary_path.display()
            );
            println!(
                "Feature importance: {} rows -> {}",
                features.len(),
                feature_path.display()
            );
            println!("Metadata -> {}", metadata_path.display());
            if !outcome.diagnostics.is_empty() {
                println!("Skipped {} malformed line(s)", outcome.diagnostics.len());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SCAN: &str = "\
Window 10
Video Results:
video_id accuracy prec_nb prec_b recall_nb recall_b f1_nb f1_b video_name [identity]
1 0.90 0.95 0.85 0.92 0.88 0.93 0.70 a.mp4 [0]
2 0.80 0.94 0.86 0.91 0.89 0.92 0.80 b.mp4 [0]
";

    #[test]
    fn test_convert_writes_all_tables() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("scan.txt");
        fs::write(&input, SCAN).unwrap();
        let output = temp.path().join("processed");

        let args = ConvertArgs {
            input,
            output: output.clone(),
            delimiter: None,
            config: None,
            quiet: true,
            verbose: 0,
        };
        args.execute().unwrap();

        for name in [
            "video_results.csv",
            "summary_stats.csv",
            "feature_importance.csv",
            "metadata.txt",
        ] {
            assert!(output.join(name).exists(), "missing {name}");
        }
        let summary = fs::read_to_string(output.join("summary_stats.csv")).unwrap();
        assert!(summary.lines().nth(1).unwrap().starts_with("10,0.85"));
    }

    #[test]
    fn test_convert_unparsable_input_fails() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("noise.txt");
        fs::write(&input, "no headers at all\n").unwrap();

        let args = ConvertArgs {
            input,
            output: temp.path().join("out"),
            delimiter: None,
            config: None,
            quiet: true,
            verbose: 0,
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}

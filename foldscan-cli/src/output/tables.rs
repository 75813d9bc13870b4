//! Flat table output
//!
//! Writes the three delimited result tables plus a plain-text metadata
//! file. Column sets are fixed; the delimiter is configurable.

use anyhow::{Context, Result};
use foldscan_core::{FeatureRow, ParseOutcome, VideoRow, WindowStats};
use std::io::Write;
use std::path::Path;

/// Write the video-level results table
pub fn write_video_results(path: &Path, rows: &[VideoRow], delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record([
        "window_size",
        "video_id",
        "video_name",
        "identity",
        "accuracy",
        "precision_not_behavior",
        "precision_behavior",
        "recall_not_behavior",
        "recall_behavior",
        "f1_not_behavior",
        "f1_behavior",
    ])?;
    for row in rows {
        wtr.write_record([
            row.window_size.to_string(),
            row.video_id.to_string(),
            row.video_name.clone(),
            row.identity.to_string(),
            row.accuracy.to_string(),
            row.precision_not_behavior.to_string(),
            row.precision_behavior.to_string(),
            row.recall_not_behavior.to_string(),
            row.recall_behavior.to_string(),
            row.f1_not_behavior.to_string(),
            row.f1_behavior.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the per-window summary statistics table
pub fn write_summary_stats(path: &Path, stats: &[WindowStats], delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record([
        "window_size",
        "mean_accuracy",
        "sd_accuracy",
        "mean_f1_behavior",
        "sd_f1_behavior",
        "mean_f1_not_behavior",
        "sd_f1_not_behavior",
    ])?;
    for ws in stats {
        wtr.write_record([
            ws.window_size.to_string(),
            ws.mean_accuracy.to_string(),
            ws.sd_accuracy.to_string(),
            ws.mean_f1_behavior.to_string(),
            ws.sd_f1_behavior.to_string(),
            ws.mean_f1_not_behavior.to_string(),
            ws.sd_f1_not_behavior.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the feature-importance table
pub fn write_feature_importance(path: &Path, rows: &[FeatureRow], delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record(["window_size", "rank", "feature_name", "importance"])?;
    for row in rows {
        wtr.write_record([
            row.window_size.to_string(),
            row.rank.to_string(),
            row.feature_name.clone(),
            row.importance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the human-readable parsing metadata file
pub fn write_metadata(path: &Path, outcome: &ParseOutcome) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let sizes: Vec<String> = outcome
        .windows
        .iter()
        .map(|w| w.window_size.to_string())
        .collect();

    writeln!(file, "Parsing Metadata")?;
    writeln!(file, "{}", "=".repeat(80))?;
    writeln!(file)?;
    writeln!(file, "Number of windows: {}", outcome.windows.len())?;
    writeln!(file, "Window sizes: [{}]", sizes.join(", "))?;
    writeln!(file, "Skipped lines: {}", outcome.diagnostics.len())?;
    writeln!(file)?;
    writeln!(file, "Video counts per window:")?;
    for window in &outcome.windows {
        writeln!(
            file,
            "  Window {}: {} videos",
            window.window_size,
            window.videos.len()
        )?;
    }
    Ok(())
}

//! Derived tables for reporting
//!
//! Everything here is a pure function of the parsed records: per-window
//! statistics, the best-window recommendation, the worst-video and
//! window-sensitivity rankings, and the per-column best values used for
//! highlighting. Rows with any metric outside [0, 1] are excluded from
//! every statistic (they stay in the video table and are flagged by the
//! validator).

use crate::config::PipelineConfig;
use crate::record::{SummaryRow, VideoRow};
use crate::stats;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where a [`WindowStats`] row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsSource {
    /// Recomputed from the window's video rows
    Computed,
    /// Taken from the reported summary (no usable video rows)
    Reported,
}

/// Aggregate statistics for one window size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Window size (frame count)
    pub window_size: u32,
    /// Mean accuracy
    pub mean_accuracy: f64,
    /// Sample standard deviation of accuracy
    pub sd_accuracy: f64,
    /// Mean F1 (behavior)
    pub mean_f1_behavior: f64,
    /// Sample standard deviation of F1 (behavior)
    pub sd_f1_behavior: f64,
    /// Mean F1 (not behavior)
    pub mean_f1_not_behavior: f64,
    /// Sample standard deviation of F1 (not behavior)
    pub sd_f1_not_behavior: f64,
    /// Number of video rows that entered the statistics
    pub video_count: usize,
    /// Computed from rows or taken from the reported summary
    pub source: StatsSource,
}

impl WindowStats {
    /// The six summary values as (column name, value) pairs in table order
    pub fn values(&self) -> [(&'static str, f64); 6] {
        [
            ("mean_accuracy", self.mean_accuracy),
            ("sd_accuracy", self.sd_accuracy),
            ("mean_f1_behavior", self.mean_f1_behavior),
            ("sd_f1_behavior", self.sd_f1_behavior),
            ("mean_f1_not_behavior", self.mean_f1_not_behavior),
            ("sd_f1_not_behavior", self.sd_f1_not_behavior),
        ]
    }
}

/// One entry of the worst-video ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorstVideo {
    /// Video file name
    pub video_name: String,
    /// Held-out identity
    pub identity: u32,
    /// Mean accuracy across the windows the pair appears in
    pub mean_accuracy: f64,
    /// Sample standard deviation of those accuracies
    pub sd_accuracy: f64,
    /// Per-window accuracy breakdown, ascending window size
    pub per_window: Vec<(u32, f64)>,
}

/// One entry of the window-sensitivity ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    /// Video file name
    pub video_name: String,
    /// Held-out identity
    pub identity: u32,
    /// Coefficient of variation of F1 (behavior) across windows
    pub cv: f64,
    /// Mean F1 (behavior) across windows
    pub mean_f1_behavior: f64,
    /// Sample standard deviation of F1 (behavior)
    pub sd_f1_behavior: f64,
    /// Number of windows the pair was observed in
    pub window_count: usize,
}

/// The window holding the best value of one summary column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnBest {
    /// Summary column name
    pub column: String,
    /// Window size holding the extreme value
    pub window_size: u32,
    /// The extreme value itself
    pub value: f64,
}

/// Best value per summary column (max for means, min for SDs)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestValues {
    /// One entry per summary column, in table order
    pub columns: Vec<ColumnBest>,
}

impl BestValues {
    /// The window holding the best value of `column`, if any
    pub fn window_for(&self, column: &str) -> Option<u32> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.window_size)
    }
}

/// All derived tables, consumed read-only by the report renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTables {
    /// One row per window, ascending window size
    pub window_stats: Vec<WindowStats>,
    /// The recommended window, if any statistics exist
    pub best_window: Option<WindowStats>,
    /// Worst pairs by mean accuracy, ascending, at most top-K
    pub worst_videos: Vec<WorstVideo>,
    /// Most window-sensitive pairs by CV, descending, at most top-K
    pub sensitivity: Vec<SensitivityEntry>,
    /// Extreme value per summary column
    pub best_values: BestValues,
}

/// Compute every derived table
pub fn aggregate(
    videos: &[VideoRow],
    summaries: &[SummaryRow],
    cfg: &PipelineConfig,
) -> AggregateTables {
    let usable: Vec<&VideoRow> = videos.iter().filter(|v| v.metrics_in_range()).collect();

    let window_stats = window_stats(&usable, summaries);
    let best_window = select_best_window(&window_stats);
    let worst_videos = worst_videos(&usable, cfg.top_k);
    let sensitivity = sensitivity_ranking(&usable, cfg.top_k);
    let best_values = best_values(&window_stats);

    AggregateTables {
        window_stats,
        best_window,
        worst_videos,
        sensitivity,
        best_values,
    }
}

fn window_stats(usable: &[&VideoRow], summaries: &[SummaryRow]) -> Vec<WindowStats> {
    let mut sizes: BTreeSet<u32> = usable.iter().map(|v| v.window_size).collect();
    sizes.extend(summaries.iter().map(|s| s.window_size));

    let mut out = Vec::new();
    for size in sizes {
        let rows: Vec<&&VideoRow> = usable.iter().filter(|v| v.window_size == size).collect();
        if !rows.is_empty() {
            let acc: Vec<f64> = rows.iter().map(|v| v.accuracy).collect();
            let f1b: Vec<f64> = rows.iter().map(|v| v.f1_behavior).collect();
            let f1nb: Vec<f64> = rows.iter().map(|v| v.f1_not_behavior).collect();
            out.push(WindowStats {
                window_size: size,
                mean_accuracy: stats::mean(&acc).unwrap_or(0.0),
                sd_accuracy: stats::sample_sd(&acc).unwrap_or(0.0),
                mean_f1_behavior: stats::mean(&f1b).unwrap_or(0.0),
                sd_f1_behavior: stats::sample_sd(&f1b).unwrap_or(0.0),
                mean_f1_not_behavior: stats::mean(&f1nb).unwrap_or(0.0),
                sd_f1_not_behavior: stats::sample_sd(&f1nb).unwrap_or(0.0),
                video_count: rows.len(),
                source: StatsSource::Computed,
            });
        } else if let Some(summary) = summaries.iter().find(|s| s.window_size == size) {
            out.push(WindowStats {
                window_size: size,
                mean_accuracy: summary.mean_accuracy,
                sd_accuracy: summary.sd_accuracy,
                mean_f1_behavior: summary.mean_f1_behavior,
                sd_f1_behavior: summary.sd_f1_behavior,
                mean_f1_not_behavior: summary.mean_f1_not_behavior,
                sd_f1_not_behavior: summary.sd_f1_not_behavior,
                video_count: 0,
                source: StatsSource::Reported,
            });
        }
        // A window with only out-of-range rows and no reported summary
        // has nothing defensible to report and is left out.
    }
    out
}

fn select_best_window(window_stats: &[WindowStats]) -> Option<WindowStats> {
    window_stats
        .iter()
        .max_by(|a, b| {
            a.mean_f1_behavior
                .total_cmp(&b.mean_f1_behavior)
                .then(a.mean_accuracy.total_cmp(&b.mean_accuracy))
                .then(b.sd_f1_behavior.total_cmp(&a.sd_f1_behavior))
                .then(b.window_size.cmp(&a.window_size))
        })
        .cloned()
}

/// Group usable rows by (name, identity); BTreeMap keeps the output
/// deterministic regardless of input order.
fn group_by_pair<'a>(usable: &'a [&'a VideoRow]) -> BTreeMap<(String, u32), Vec<&'a VideoRow>> {
    let mut groups: BTreeMap<(String, u32), Vec<&VideoRow>> = BTreeMap::new();
    for &row in usable {
        groups
            .entry((row.video_name.clone(), row.identity))
            .or_default()
            .push(row);
    }
    groups
}

fn worst_videos(usable: &[&VideoRow], top_k: usize) -> Vec<WorstVideo> {
    let mut out = Vec::new();
    for ((name, identity), rows) in group_by_pair(usable) {
        let mut per_window: Vec<(u32, f64)> =
            rows.iter().map(|r| (r.window_size, r.accuracy)).collect();
        per_window.sort_by_key(|(w, _)| *w);
        let acc: Vec<f64> = per_window.iter().map(|(_, a)| *a).collect();
        out.push(WorstVideo {
            video_name: name,
            identity,
            mean_accuracy: stats::mean(&acc).unwrap_or(0.0),
            sd_accuracy: stats::sample_sd(&acc).unwrap_or(0.0),
            per_window,
        });
    }
    out.sort_by(|a, b| {
        a.mean_accuracy
            .total_cmp(&b.mean_accuracy)
            .then_with(|| a.video_name.cmp(&b.video_name))
            .then(a.identity.cmp(&b.identity))
    });
    out.truncate(top_k);
    out
}

fn sensitivity_ranking(usable: &[&VideoRow], top_k: usize) -> Vec<SensitivityEntry> {
    let mut out = Vec::new();
    for ((name, identity), rows) in group_by_pair(usable) {
        let f1: Vec<f64> = rows.iter().map(|r| r.f1_behavior).collect();
        // CV is undefined for a single observation or a non-positive
        // mean; those pairs are excluded rather than ranked at zero.
        let Some(cv) = stats::coefficient_of_variation(&f1) else {
            continue;
        };
        out.push(SensitivityEntry {
            video_name: name,
            identity,
            cv,
            mean_f1_behavior: stats::mean(&f1).unwrap_or(0.0),
            sd_f1_behavior: stats::sample_sd(&f1).unwrap_or(0.0),
            window_count: f1.len(),
        });
    }
    out.sort_by(|a, b| {
        b.cv.total_cmp(&a.cv)
            .then_with(|| a.video_name.cmp(&b.video_name))
            .then(a.identity.cmp(&b.identity))
    });
    out.truncate(top_k);
    out
}

fn best_values(window_stats: &[WindowStats]) -> BestValues {
    let mut columns: Vec<ColumnBest> = Vec::new();
    for ws in window_stats {
        for (column, value) in ws.values() {
            let lower_is_better = column.starts_with("sd_");
            match columns.iter_mut().find(|c| c.column == column) {
                Some(best) => {
                    // Strict comparison: the first (smallest) window
                    // keeps a tied value.
                    let improves = if lower_is_better {
                        value < best.value
                    } else {
                        value > best.value
                    };
                    if improves {
                        best.window_size = ws.window_size;
                        best.value = value;
                    }
                }
                None => columns.push(ColumnBest {
                    column: column.to_string(),
                    window_size: ws.window_size,
                    value,
                }),
            }
        }
    }
    BestValues { columns }
}

//! Consistency checks over parsed records
//!
//! All four checks run unconditionally and report their findings as
//! data; nothing here is a control-flow error. The rendered report
//! enumerates PASS/FAIL per category followed by every failure detail.

use crate::config::PipelineConfig;
use crate::record::{SummaryRow, VideoRow};
use crate::stats;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The four consistency check categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckCategory {
    /// Same (video, identity) pairs present in every window
    PairCoverage,
    /// No duplicate pair within a window
    PairUniqueness,
    /// Every metric within [0, 1]
    MetricRange,
    /// Reported summary matches recomputed statistics
    SummaryConsistency,
}

impl CheckCategory {
    /// All categories in report order
    pub const ALL: [CheckCategory; 4] = [
        CheckCategory::PairCoverage,
        CheckCategory::PairUniqueness,
        CheckCategory::MetricRange,
        CheckCategory::SummaryConsistency,
    ];

    /// Human-readable section title
    pub fn title(&self) -> &'static str {
        match self {
            CheckCategory::PairCoverage => "PAIR COVERAGE",
            CheckCategory::PairUniqueness => "PAIR UNIQUENESS",
            CheckCategory::MetricRange => "METRIC RANGE",
            CheckCategory::SummaryConsistency => "SUMMARY CONSISTENCY",
        }
    }

    fn pass_text(&self) -> &'static str {
        match self {
            CheckCategory::PairCoverage => "all windows cover the same (video, identity) pairs",
            CheckCategory::PairUniqueness => "no duplicate (video, identity) pair in any window",
            CheckCategory::MetricRange => "all metrics within [0, 1]",
            CheckCategory::SummaryConsistency => "reported summaries match recomputed statistics",
        }
    }

    fn fail_text(&self) -> &'static str {
        match self {
            CheckCategory::PairCoverage => "windows cover different (video, identity) pairs",
            CheckCategory::PairUniqueness => "duplicate (video, identity) pairs found",
            CheckCategory::MetricRange => "metric values outside [0, 1]",
            CheckCategory::SummaryConsistency => "reported summaries disagree with recomputation",
        }
    }
}

/// One recorded check failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// The check that failed
    pub category: CheckCategory,
    /// What exactly went wrong
    pub detail: String,
}

/// Outcome of all consistency checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Every recorded failure, grouped by category in check order
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Number of check categories that ran (always all of them)
    pub fn checks_run(&self) -> usize {
        CheckCategory::ALL.len()
    }

    /// True when no check recorded a failure
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when the given category recorded no failure
    pub fn category_passed(&self, category: CheckCategory) -> bool {
        !self.failures.iter().any(|f| f.category == category)
    }

    /// Failure details for one category
    pub fn failures_for(&self, category: CheckCategory) -> Vec<&str> {
        self.failures
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.detail.as_str())
            .collect()
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(80);
        let thin = "-".repeat(80);
        writeln!(f, "Window Scan Validation Report")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        for (i, category) in CheckCategory::ALL.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, category.title())?;
            writeln!(f, "{thin}")?;
            let details = self.failures_for(*category);
            if details.is_empty() {
                writeln!(f, "   ✓ PASS: {}", category.pass_text())?;
            } else {
                writeln!(f, "   ✗ FAIL: {}", category.fail_text())?;
                for detail in details {
                    writeln!(f, "     - {detail}")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "{rule}")?;
        if self.passed() {
            writeln!(f, "✓ ALL VALIDATION CHECKS PASSED")?;
        } else {
            writeln!(
                f,
                "✗ SOME VALIDATION CHECKS FAILED ({} failures)",
                self.failures.len()
            )?;
        }
        Ok(())
    }
}

/// Run every consistency check
pub fn validate(
    videos: &[VideoRow],
    summaries: &[SummaryRow],
    cfg: &PipelineConfig,
) -> ValidationReport {
    let mut failures = Vec::new();
    check_pair_coverage(videos, &mut failures);
    check_pair_uniqueness(videos, &mut failures);
    check_metric_range(videos, &mut failures);
    check_summary_consistency(videos, summaries, cfg, &mut failures);
    ValidationReport { failures }
}

/// Pairs missing from a window are summarized by count; data collection
/// gaps are expected and never escalate beyond a report entry.
fn check_pair_coverage(videos: &[VideoRow], failures: &mut Vec<ValidationFailure>) {
    let mut per_window: BTreeMap<u32, BTreeSet<(String, u32)>> = BTreeMap::new();
    for row in videos {
        per_window
            .entry(row.window_size)
            .or_default()
            .insert((row.video_name.clone(), row.identity));
    }
    if per_window.len() < 2 {
        return;
    }

    let union: BTreeSet<(String, u32)> = per_window.values().flatten().cloned().collect();
    for (window, pairs) in &per_window {
        let missing: Vec<&(String, u32)> = union.difference(pairs).collect();
        if missing.is_empty() {
            continue;
        }
        let examples: Vec<String> = missing
            .iter()
            .take(3)
            .map(|(name, id)| format!("('{name}', {id})"))
            .collect();
        failures.push(ValidationFailure {
            category: CheckCategory::PairCoverage,
            detail: format!(
                "window {window}: {} of {} pairs missing, e.g. {}",
                missing.len(),
                union.len(),
                examples.join(", ")
            ),
        });
    }
}

fn check_pair_uniqueness(videos: &[VideoRow], failures: &mut Vec<ValidationFailure>) {
    let mut counts: BTreeMap<(u32, String, u32), usize> = BTreeMap::new();
    for row in videos {
        *counts
            .entry((row.window_size, row.video_name.clone(), row.identity))
            .or_default() += 1;
    }
    for ((window, name, identity), count) in counts {
        if count > 1 {
            failures.push(ValidationFailure {
                category: CheckCategory::PairUniqueness,
                detail: format!(
                    "window {window}: pair ('{name}', {identity}) appears {count} times"
                ),
            });
        }
    }
}

fn check_metric_range(videos: &[VideoRow], failures: &mut Vec<ValidationFailure>) {
    for row in videos {
        for (metric, value) in row.metrics() {
            if !(0.0..=1.0).contains(&value) {
                failures.push(ValidationFailure {
                    category: CheckCategory::MetricRange,
                    detail: format!(
                        "window {}: video '{}' [{}]: {metric} = {value} outside [0, 1]",
                        row.window_size, row.video_name, row.identity
                    ),
                });
            }
        }
    }
}

fn check_summary_consistency(
    videos: &[VideoRow],
    summaries: &[SummaryRow],
    cfg: &PipelineConfig,
    failures: &mut Vec<ValidationFailure>,
) {
    for summary in summaries {
        let rows: Vec<&VideoRow> = videos
            .iter()
            .filter(|v| v.window_size == summary.window_size)
            .collect();
        if rows.is_empty() {
            // Nothing to recompute against; not a failure.
            continue;
        }
        let acc: Vec<f64> = rows.iter().map(|v| v.accuracy).collect();
        let f1b: Vec<f64> = rows.iter().map(|v| v.f1_behavior).collect();
        let expected = [
            ("mean_accuracy", summary.mean_accuracy, stats::mean(&acc)),
            ("sd_accuracy", summary.sd_accuracy, stats::sample_sd(&acc)),
            (
                "mean_f1_behavior",
                summary.mean_f1_behavior,
                stats::mean(&f1b),
            ),
            (
                "sd_f1_behavior",
                summary.sd_f1_behavior,
                stats::sample_sd(&f1b),
            ),
        ];
        for (column, reported, computed) in expected {
            let Some(computed) = computed else { continue };
            if !stats::within_tolerance(computed, reported, cfg.summary_tolerance) {
                failures.push(ValidationFailure {
                    category: CheckCategory::SummaryConsistency,
                    detail: format!(
                        "window {}: {column} mismatch (reported={reported:.6}, computed={computed:.6})",
                        summary.window_size
                    ),
                });
            }
        }
    }
}

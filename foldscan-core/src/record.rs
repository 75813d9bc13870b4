//! Typed records produced by the parser
//!
//! One [`WindowSection`] per "Window N" header in the input, each
//! owning its video rows, optional summary row and feature rows.
//! Records are validated at construction and immutable afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Construction-time record validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A metric value was NaN or infinite
    #[error("metric '{name}' is not a finite number")]
    NonFiniteMetric {
        /// Name of the offending metric column
        name: &'static str,
    },

    /// The video name was empty after trimming
    #[error("video name is empty")]
    EmptyVideoName,

    /// The feature name was empty after trimming
    #[error("feature name is empty")]
    EmptyFeatureName,

    /// Feature importance must be a non-negative finite number
    #[error("feature importance {value} is negative or not finite")]
    InvalidImportance {
        /// The rejected importance value
        value: f64,
    },
}

/// Performance of the classifier on one (video, identity) test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRow {
    /// Window size (frame count) this result belongs to
    pub window_size: u32,
    /// Leading index column of the results table
    pub video_id: u32,
    /// Video file name, may contain spaces
    pub video_name: String,
    /// Held-out animal identity within the video
    pub identity: u32,
    /// Overall accuracy
    pub accuracy: f64,
    /// Precision for the "not behavior" class
    pub precision_not_behavior: f64,
    /// Precision for the "behavior" class
    pub precision_behavior: f64,
    /// Recall for the "not behavior" class
    pub recall_not_behavior: f64,
    /// Recall for the "behavior" class
    pub recall_behavior: f64,
    /// F1 score for the "not behavior" class
    pub f1_not_behavior: f64,
    /// F1 score for the "behavior" class
    pub f1_behavior: f64,
}

impl VideoRow {
    /// Build a row, rejecting non-finite metrics and empty names.
    ///
    /// Range checking against [0, 1] is deliberately left to the
    /// validator so that out-of-range data can be reported instead of
    /// silently dropped at parse time.
    pub fn new(
        window_size: u32,
        video_id: u32,
        video_name: &str,
        identity: u32,
        metrics: [f64; 7],
    ) -> Result<Self, RecordError> {
        let video_name = video_name.trim();
        if video_name.is_empty() {
            return Err(RecordError::EmptyVideoName);
        }
        for (value, name) in metrics.iter().zip(METRIC_NAMES) {
            if !value.is_finite() {
                return Err(RecordError::NonFiniteMetric { name });
            }
        }
        Ok(Self {
            window_size,
            video_id,
            video_name: video_name.to_string(),
            identity,
            accuracy: metrics[0],
            precision_not_behavior: metrics[1],
            precision_behavior: metrics[2],
            recall_not_behavior: metrics[3],
            recall_behavior: metrics[4],
            f1_not_behavior: metrics[5],
            f1_behavior: metrics[6],
        })
    }

    /// The seven metrics as (column name, value) pairs in table order
    pub fn metrics(&self) -> [(&'static str, f64); 7] {
        [
            ("accuracy", self.accuracy),
            ("precision_not_behavior", self.precision_not_behavior),
            ("precision_behavior", self.precision_behavior),
            ("recall_not_behavior", self.recall_not_behavior),
            ("recall_behavior", self.recall_behavior),
            ("f1_not_behavior", self.f1_not_behavior),
            ("f1_behavior", self.f1_behavior),
        ]
    }

    /// True when every metric lies within [0, 1]
    pub fn metrics_in_range(&self) -> bool {
        self.metrics().iter().all(|(_, v)| (0.0..=1.0).contains(v))
    }

    /// The (name, identity) pair identifying this test case
    pub fn pair(&self) -> (&str, u32) {
        (&self.video_name, self.identity)
    }
}

/// Metric column names in the fixed left-to-right input order
pub const METRIC_NAMES: [&str; 7] = [
    "accuracy",
    "precision_not_behavior",
    "precision_behavior",
    "recall_not_behavior",
    "recall_behavior",
    "f1_not_behavior",
    "f1_behavior",
];

/// Reported per-window aggregate statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Window size these statistics belong to
    pub window_size: u32,
    /// Mean accuracy across videos
    pub mean_accuracy: f64,
    /// Standard deviation of accuracy
    pub sd_accuracy: f64,
    /// Mean F1 score for the "behavior" class
    pub mean_f1_behavior: f64,
    /// Standard deviation of F1 (behavior)
    pub sd_f1_behavior: f64,
    /// Mean F1 score for the "not behavior" class
    pub mean_f1_not_behavior: f64,
    /// Standard deviation of F1 (not behavior)
    pub sd_f1_not_behavior: f64,
}

impl SummaryRow {
    /// Build a summary row, rejecting non-finite values
    pub fn new(window_size: u32, values: [f64; 6]) -> Result<Self, RecordError> {
        for (value, name) in values.iter().zip(SUMMARY_NAMES) {
            if !value.is_finite() {
                return Err(RecordError::NonFiniteMetric { name });
            }
        }
        Ok(Self {
            window_size,
            mean_accuracy: values[0],
            sd_accuracy: values[1],
            mean_f1_behavior: values[2],
            sd_f1_behavior: values[3],
            mean_f1_not_behavior: values[4],
            sd_f1_not_behavior: values[5],
        })
    }

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

/// Summary column names in table order
pub const SUMMARY_NAMES: [&str; 6] = [
    "mean_accuracy",
    "sd_accuracy",
    "mean_f1_behavior",
    "sd_f1_behavior",
    "mean_f1_not_behavior",
    "sd_f1_not_behavior",
];

/// One ranked feature-importance entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Window size this feature ranking belongs to
    pub window_size: u32,
    /// 1-based rank, assigned in encounter order per window
    pub rank: u32,
    /// Feature name, may contain spaces
    pub feature_name: String,
    /// Importance value, non-negative
    pub importance: f64,
}

impl FeatureRow {
    /// Build a feature row, rejecting empty names and invalid importance
    pub fn new(
        window_size: u32,
        rank: u32,
        feature_name: &str,
        importance: f64,
    ) -> Result<Self, RecordError> {
        let feature_name = feature_name.trim();
        if feature_name.is_empty() {
            return Err(RecordError::EmptyFeatureName);
        }
        if !importance.is_finite() || importance < 0.0 {
            return Err(RecordError::InvalidImportance { value: importance });
        }
        Ok(Self {
            window_size,
            rank,
            feature_name: feature_name.to_string(),
            importance,
        })
    }
}

/// One "Window N" block of the input
///
/// Sections with zero video rows are retained so that every declared
/// window size appears in the outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSection {
    /// Window size (frame count) from the header line
    pub window_size: u32,
    /// Video rows in document order
    pub videos: Vec<VideoRow>,
    /// Reported summary statistics, if the block contained them
    pub summary: Option<SummaryRow>,
    /// Feature rows in ascending rank
    pub features: Vec<FeatureRow>,
}

impl WindowSection {
    /// Create an empty section for a window header
    pub fn new(window_size: u32) -> Self {
        Self {
            window_size,
            videos: Vec::new(),
            summary: None,
            features: Vec::new(),
        }
    }
}

/// Kinds of lines the parser skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A line that looked like a video row but did not parse
    MalformedVideoRow,
    /// A feature table line whose importance did not parse
    MalformedFeatureRow,
    /// A summary block missing or failing to parse labeled values
    MalformedSummaryValue,
    /// A (video, identity) pair repeated within one window
    DuplicatePair,
    /// A data-shaped line that fit no known structure
    UnrecognizedLine,
}

/// A skipped line, recorded instead of aborting the parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseDiagnostic {
    /// 1-based line number in the input
    pub line: usize,
    /// What kind of line was skipped
    pub kind: DiagnosticKind,
    /// Why it was skipped
    pub reason: String,
}

impl ParseDiagnostic {
    /// Record a skipped line
    pub fn new(line: usize, kind: DiagnosticKind, reason: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

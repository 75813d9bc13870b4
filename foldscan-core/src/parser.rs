//! Scan text parser
//!
//! Turns the loosely formatted text report of a window-size scan into
//! [`WindowSection`] records. The input is processed line by line with
//! a small state machine: a "Window N" header opens a section, and
//! within a section the parser recognizes the video results table, the
//! labeled summary block and the feature-importance table. Lines that
//! look like data but do not parse are skipped and recorded as
//! diagnostics; only structurally unusable input is an error.

use crate::error::{CoreError, Result};
use crate::input::Input;
use crate::record::{
    DiagnosticKind, FeatureRow, ParseDiagnostic, SummaryRow, VideoRow, WindowSection, SUMMARY_NAMES,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WINDOW_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwindow\s+(\d+)").unwrap());

static IDENTITY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\d+)\]\s*$").unwrap());

/// A line starting with an integer index then a numeric field is a
/// video-row candidate; anything else in the table is non-data.
static VIDEO_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\s+[\d.]").unwrap());

/// Labeled summary values, in [`SUMMARY_NAMES`] order. The label
/// spellings `std-dev`, `std dev` and `sd` are all accepted.
static SUMMARY_VALUES: LazyLock<[Regex; 6]> = LazyLock::new(|| {
    let sd = r"(?:std[- ]dev|sd)";
    [
        Regex::new(r"(?i)mean accuracy:\s*([\d.]+)").unwrap(),
        Regex::new(&format!(r"(?i){sd} accuracy:\s*([\d.]+)")).unwrap(),
        Regex::new(r"(?i)mean f1(?: score)? \(behavior\):\s*([\d.]+)").unwrap(),
        Regex::new(&format!(r"(?i){sd} f1(?: score)? \(behavior\):\s*([\d.]+)")).unwrap(),
        Regex::new(r"(?i)mean f1(?: score)? \(not behavior\):\s*([\d.]+)").unwrap(),
        Regex::new(&format!(r"(?i){sd} f1(?: score)? \(not behavior\):\s*([\d.]+)")).unwrap(),
    ]
});

/// Labels without a parsable value still mark summary lines
static SUMMARY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:mean|std[- ]dev|sd) (?:accuracy|f1(?: score)? \((?:not )?behavior\)):")
        .unwrap()
});

/// Result of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// Window sections in document order
    pub windows: Vec<WindowSection>,
    /// Skipped lines, in document order
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParseOutcome {
    /// All video rows, flattened in document order
    pub fn video_rows(&self) -> Vec<VideoRow> {
        self.windows.iter().flat_map(|w| w.videos.clone()).collect()
    }

    /// All reported summary rows in document order
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.windows.iter().filter_map(|w| w.summary.clone()).collect()
    }

    /// All feature rows, per window in ascending rank
    pub fn feature_rows(&self) -> Vec<FeatureRow> {
        self.windows.iter().flat_map(|w| w.features.clone()).collect()
    }
}

/// Parse scan text from any [`Input`] source
pub fn parse_input(input: Input) -> Result<ParseOutcome> {
    parse(&input.to_text()?)
}

/// Parse the full scan text
///
/// Fails only on empty input or input without a single window header;
/// everything else degrades to per-line diagnostics.
pub fn parse(text: &str) -> Result<ParseOutcome> {
    if text.trim().is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let mut state = ParserState::new();
    for (idx, line) in text.lines().enumerate() {
        state.feed(idx + 1, line);
    }
    state.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scan,
    VideoTable,
    Summary,
    Features,
}

#[derive(Default)]
struct SummaryAccumulator {
    values: [Option<f64>; 6],
    first_line: usize,
    touched: bool,
}

struct ParserState {
    windows: Vec<WindowSection>,
    diagnostics: Vec<ParseDiagnostic>,
    current: Option<WindowSection>,
    seen_pairs: HashSet<(String, u32)>,
    mode: Mode,
    summary: SummaryAccumulator,
    feature_rank: u32,
}

impl ParserState {
    fn new() -> Self {
        Self {
            windows: Vec::new(),
            diagnostics: Vec::new(),
            current: None,
            seen_pairs: HashSet::new(),
            mode: Mode::Scan,
            summary: SummaryAccumulator::default(),
            feature_rank: 0,
        }
    }

    fn feed(&mut self, line_no: usize, raw: &str) {
        let line = raw.trim();

        // A window header takes priority in every mode; summary labels
        // are checked first so that no "Window ..." label inside a
        // summary block can be mistaken for one.
        if self.mode == Mode::Summary && SUMMARY_LABEL.is_match(line) {
            self.feed_summary(line_no, line);
            return;
        }
        if let Some(size) = parse_window_size(line) {
            self.open_window(size);
            return;
        }
        if self.current.is_none() {
            // Preamble before the first header is ignored.
            return;
        }

        match self.mode {
            Mode::Scan => self.feed_scan(line_no, line),
            Mode::VideoTable => self.feed_video_table(line_no, line),
            Mode::Summary => self.feed_summary(line_no, line),
            Mode::Features => self.feed_features(line_no, line),
        }
    }

    fn open_window(&mut self, size: u32) {
        self.close_section();
        self.current = Some(WindowSection::new(size));
        self.seen_pairs.clear();
        self.mode = Mode::Scan;
    }

    fn close_section(&mut self) {
        self.flush_summary();
        if let Some(section) = self.current.take() {
            self.windows.push(section);
        }
        self.feature_rank = 0;
    }

    fn feed_scan(&mut self, line_no: usize, line: &str) {
        if is_video_table_header(line) {
            self.mode = Mode::VideoTable;
        } else if is_summary_trigger(line) {
            self.mode = Mode::Summary;
            self.summary = SummaryAccumulator {
                first_line: line_no,
                ..Default::default()
            };
            self.feed_summary(line_no, line);
        } else if is_feature_header(line) {
            self.mode = Mode::Features;
            self.feature_rank = 0;
        } else if VIDEO_CANDIDATE.is_match(line) {
            self.diagnostics.push(ParseDiagnostic::new(
                line_no,
                DiagnosticKind::UnrecognizedLine,
                format!("data-shaped line outside any table: {}", truncate(line)),
            ));
        }
    }

    fn feed_video_table(&mut self, line_no: usize, line: &str) {
        if is_summary_trigger(line) {
            self.mode = Mode::Summary;
            self.summary = SummaryAccumulator {
                first_line: line_no,
                ..Default::default()
            };
            self.feed_summary(line_no, line);
            return;
        }
        if is_feature_header(line) {
            self.mode = Mode::Features;
            self.feature_rank = 0;
            return;
        }
        if is_section_rule(line) {
            self.mode = Mode::Scan;
            return;
        }
        if line.is_empty() || is_separator(line) {
            return;
        }
        if VIDEO_CANDIDATE.is_match(line) {
            let window_size = self.current.as_ref().map(|w| w.window_size).unwrap_or(0);
            match parse_video_row(line, window_size) {
                Ok(row) => {
                    let key = (row.video_name.clone(), row.identity);
                    if self.seen_pairs.contains(&key) {
                        self.diagnostics.push(ParseDiagnostic::new(
                            line_no,
                            DiagnosticKind::DuplicatePair,
                            format!(
                                "duplicate pair ('{}', {}) in window {window_size}; first kept",
                                key.0, key.1
                            ),
                        ));
                    } else {
                        self.seen_pairs.insert(key);
                        if let Some(section) = self.current.as_mut() {
                            section.videos.push(row);
                        }
                    }
                }
                Err(reason) => {
                    self.diagnostics.push(ParseDiagnostic::new(
                        line_no,
                        DiagnosticKind::MalformedVideoRow,
                        reason,
                    ));
                }
            }
            return;
        }
        if is_table_end_marker(line) {
            self.mode = Mode::Scan;
        }
    }

    fn feed_summary(&mut self, line_no: usize, line: &str) {
        if is_feature_header(line) {
            self.flush_summary();
            self.mode = Mode::Features;
            self.feature_rank = 0;
            return;
        }
        if is_video_table_header(line) {
            self.flush_summary();
            self.mode = Mode::VideoTable;
            return;
        }

        let mut matched = false;
        for (slot, re) in self.summary.values.iter_mut().zip(SUMMARY_VALUES.iter()) {
            if let Some(caps) = re.captures(line) {
                match caps[1].parse::<f64>() {
                    Ok(value) => *slot = Some(value),
                    Err(_) => self.diagnostics.push(ParseDiagnostic::new(
                        line_no,
                        DiagnosticKind::MalformedSummaryValue,
                        format!("unparsable summary value: {}", truncate(line)),
                    )),
                }
                matched = true;
                break;
            }
        }
        if matched {
            self.summary.touched = true;
        } else if SUMMARY_LABEL.is_match(line) {
            // A known label whose value did not look like a number at all.
            self.diagnostics.push(ParseDiagnostic::new(
                line_no,
                DiagnosticKind::MalformedSummaryValue,
                format!("summary label without numeric value: {}", truncate(line)),
            ));
            self.summary.touched = true;
        }
    }

    fn flush_summary(&mut self) {
        if self.mode != Mode::Summary {
            return;
        }
        self.mode = Mode::Scan;
        let acc = std::mem::take(&mut self.summary);
        if !acc.touched {
            return;
        }
        let window_size = match self.current.as_ref() {
            Some(section) => section.window_size,
            None => return,
        };
        if acc.values.iter().all(Option::is_some) {
            let values: [f64; 6] = std::array::from_fn(|i| acc.values[i].unwrap());
            match SummaryRow::new(window_size, values) {
                Ok(row) => {
                    if let Some(section) = self.current.as_mut() {
                        section.summary = Some(row);
                    }
                }
                Err(e) => self.diagnostics.push(ParseDiagnostic::new(
                    acc.first_line,
                    DiagnosticKind::MalformedSummaryValue,
                    e.to_string(),
                )),
            }
        } else {
            let missing: Vec<&str> = acc
                .values
                .iter()
                .zip(SUMMARY_NAMES)
                .filter(|(v, _)| v.is_none())
                .map(|(_, name)| name)
                .collect();
            self.diagnostics.push(ParseDiagnostic::new(
                acc.first_line,
                DiagnosticKind::MalformedSummaryValue,
                format!(
                    "summary block for window {window_size} missing: {}",
                    missing.join(", ")
                ),
            ));
        }
    }

    fn feed_features(&mut self, line_no: usize, line: &str) {
        // Header and separator lines are skipped before the terminator
        // check so the dashed rule under the table header cannot end
        // the block.
        if line.is_empty()
            || line.contains("Feature Name")
            || line.contains("Importance")
            || line.contains("---")
        {
            return;
        }
        if is_section_rule(line) {
            self.mode = Mode::Scan;
            return;
        }
        if is_summary_trigger(line) {
            self.mode = Mode::Summary;
            self.summary = SummaryAccumulator {
                first_line: line_no,
                ..Default::default()
            };
            self.feed_summary(line_no, line);
            return;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return;
        }
        let importance = match parts[parts.len() - 1].parse::<f64>() {
            Ok(v) => v,
            // Last token is not numeric: a prose line, not a feature row.
            Err(_) => return,
        };
        // A leading integer is the file's own rank column; the rank we
        // assign is the encounter order.
        let name_parts = if parts.len() >= 3 && parts[0].parse::<u32>().is_ok() {
            &parts[1..parts.len() - 1]
        } else {
            &parts[..parts.len() - 1]
        };
        let window_size = self.current.as_ref().map(|w| w.window_size).unwrap_or(0);
        match FeatureRow::new(
            window_size,
            self.feature_rank + 1,
            &name_parts.join(" "),
            importance,
        ) {
            Ok(row) => {
                self.feature_rank += 1;
                if let Some(section) = self.current.as_mut() {
                    section.features.push(row);
                }
            }
            Err(e) => self.diagnostics.push(ParseDiagnostic::new(
                line_no,
                DiagnosticKind::MalformedFeatureRow,
                format!("{e}: {}", truncate(line)),
            )),
        }
    }

    fn finish(mut self) -> Result<ParseOutcome> {
        self.close_section();
        if self.windows.is_empty() {
            return Err(CoreError::NoWindowHeader);
        }
        Ok(ParseOutcome {
            windows: self.windows,
            diagnostics: self.diagnostics,
        })
    }
}

/// Extract the window size from a header line, if this is one
pub fn parse_window_size(line: &str) -> Option<u32> {
    // "Window Size: 5" labels inside summary blocks must not open a
    // new section; the word must be directly followed by the number.
    WINDOW_HEADER
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

fn is_video_table_header(line: &str) -> bool {
    // "prec" covers both "precision" and the abbreviated "prec_nb"
    // column spelling seen in real scan files.
    let lower = line.to_lowercase();
    lower.contains("accuracy") && lower.contains("prec") && lower.contains("recall")
}

fn is_summary_trigger(line: &str) -> bool {
    line.to_lowercase().contains("summary") || SUMMARY_LABEL.is_match(line)
}

fn is_feature_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("feature") && lower.contains("importance")
}

fn is_separator(line: &str) -> bool {
    line.starts_with("--") || (line.starts_with('=') && line.len() > 20)
}

fn is_section_rule(line: &str) -> bool {
    line.starts_with('%') && line.len() > 50
}

fn is_table_end_marker(line: &str) -> bool {
    let lower = line.to_lowercase();
    ["classifier:", "behavior:", "final classifier"]
        .iter()
        .any(|marker| lower.contains(marker))
}

fn truncate(line: &str) -> &str {
    let cut = line
        .char_indices()
        .nth(80)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    &line[..cut]
}

/// Parse one video results row
///
/// Shape: `<index> <exactly 7 float metrics> <video name> [<identity>]`.
/// Any other shape is rejected with a reason string.
fn parse_video_row(line: &str, window_size: u32) -> std::result::Result<VideoRow, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 9 {
        return Err(format!(
            "expected index, 7 metrics and a name, found {} fields: {}",
            parts.len(),
            truncate(line)
        ));
    }

    let video_id: u32 = parts[0]
        .parse()
        .map_err(|_| format!("unparsable index column: {}", truncate(line)))?;

    let mut metrics = Vec::new();
    let mut i = 1;
    while i < parts.len() {
        match parts[i].parse::<f64>() {
            Ok(v) => {
                metrics.push(v);
                i += 1;
            }
            Err(_) => break,
        }
    }
    if metrics.len() != 7 {
        return Err(format!(
            "expected exactly 7 numeric metrics, found {}: {}",
            metrics.len(),
            truncate(line)
        ));
    }

    let remainder = parts[i..].join(" ");
    let caps = IDENTITY_SUFFIX
        .captures(&remainder)
        .ok_or_else(|| format!("missing trailing [identity]: {}", truncate(line)))?;
    let identity: u32 = caps[1]
        .parse()
        .map_err(|_| format!("unparsable identity: {}", truncate(line)))?;
    let name_end = caps.get(0).map(|m| m.start()).unwrap_or(remainder.len());
    let video_name = remainder[..name_end].trim();

    let metrics: [f64; 7] = metrics.try_into().expect("length checked above");
    VideoRow::new(window_size, video_id, video_name, identity, metrics)
        .map_err(|e| format!("{e}: {}", truncate(line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Window 5

Video Results:
video_id accuracy prec_nb prec_b recall_nb recall_b f1_nb f1_b video_name [identity]
1 0.8234 0.8500 0.8000 0.8400 0.8100 0.8450 0.8050 test_video_1.mp4 [0]
2 0.7500 0.7600 0.7400 0.7500 0.7300 0.7550 0.7350 test_video_2.mp4 [1]

Summary Statistics:
Window Size: 5
Mean Accuracy: 0.7867
SD Accuracy: 0.0517
Mean F1 (Behavior): 0.7700
SD F1 (Behavior): 0.0495
Mean F1 (Not Behavior): 0.8000
SD F1 (Not Behavior): 0.0636

Top Feature Importance:
Feature Name                 Importance
speed                        0.5234
body angle                   0.4123

Window 10 frames

Video Results:
video_id accuracy prec_nb prec_b recall_nb recall_b f1_nb f1_b video_name [identity]
1 0.8717 0.8800 0.8600 0.8700 0.8500 0.8750 0.8550 test_video_1.mp4 [0]
2 0.8500 0.8600 0.8400 0.8500 0.8300 0.8550 0.8350 test_video_2.mp4 [1]

Summary Statistics:
Mean Accuracy: 0.8609
SD Accuracy: 0.0153
Mean F1 (Behavior): 0.8450
SD F1 (Behavior): 0.0141
Mean F1 (Not Behavior): 0.8650
SD F1 (Not Behavior): 0.0141
";

    #[test]
    fn test_window_header_detection() {
        assert_eq!(parse_window_size("Window 10"), Some(10));
        assert_eq!(parse_window_size("Window 15 frames"), Some(15));
        assert_eq!(parse_window_size("window 20"), Some(20));
        assert_eq!(parse_window_size("Window Size: 5"), None);
        assert_eq!(parse_window_size("No marker here"), None);
    }

    #[test]
    fn test_parse_two_windows() {
        let outcome = parse(SAMPLE).unwrap();
        assert_eq!(outcome.windows.len(), 2);
        assert_eq!(outcome.windows[0].window_size, 5);
        assert_eq!(outcome.windows[1].window_size, 10);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_video_rows_in_document_order() {
        let outcome = parse(SAMPLE).unwrap();
        let rows = outcome.video_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].video_name, "test_video_1.mp4");
        assert_eq!(rows[0].identity, 0);
        assert_eq!(rows[0].accuracy, 0.8234);
        assert_eq!(rows[0].f1_behavior, 0.8050);
        assert_eq!(rows[3].window_size, 10);
        assert_eq!(rows[3].identity, 1);
    }

    #[test]
    fn test_summary_block_parsed() {
        let outcome = parse(SAMPLE).unwrap();
        let summaries = outcome.summary_rows();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].window_size, 5);
        assert_eq!(summaries[0].mean_accuracy, 0.7867);
        assert_eq!(summaries[0].sd_f1_not_behavior, 0.0636);
        assert_eq!(summaries[1].mean_f1_behavior, 0.8450);
    }

    #[test]
    fn test_feature_table_ranked_in_order() {
        let outcome = parse(SAMPLE).unwrap();
        let features = outcome.feature_rows();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].rank, 1);
        assert_eq!(features[0].feature_name, "speed");
        assert_eq!(features[0].importance, 0.5234);
        assert_eq!(features[1].rank, 2);
        assert_eq!(features[1].feature_name, "body angle");
    }

    #[test]
    fn test_feature_rank_resets_per_window() {
        let text = "\
Window 5
Top Feature Importance:
speed 0.5
Window 10
Top Feature Importance:
body angle 0.4
";
        let outcome = parse(text).unwrap();
        let features = outcome.feature_rows();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].rank, 1);
        assert_eq!(features[1].rank, 1);
        assert_eq!(features[1].window_size, 10);
    }

    #[test]
    fn test_feature_row_with_leading_rank_column() {
        let text = "\
Window 5
Top Feature Importance:
1 speed 0.5234
2 body angle 0.4123
";
        let outcome = parse(text).unwrap();
        let features = outcome.feature_rows();
        assert_eq!(features[0].feature_name, "speed");
        assert_eq!(features[1].feature_name, "body angle");
        assert_eq!(features[1].rank, 2);
    }

    #[test]
    fn test_malformed_video_row_is_skipped_with_diagnostic() {
        let text = "\
Window 5
Video Results:
accuracy precision recall header
1 0.8 0.8 not_enough_floats.mp4 [0]
2 0.7500 0.7600 0.7400 0.7500 0.7300 0.7550 0.7350 good.mp4 [1]
";
        let outcome = parse(text).unwrap();
        assert_eq!(outcome.video_rows().len(), 1);
        assert_eq!(outcome.video_rows()[0].video_name, "good.mp4");
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::MalformedVideoRow);
        assert_eq!(outcome.diagnostics[0].line, 4);
    }

    #[test]
    fn test_video_row_with_too_many_floats_rejected() {
        let text = "\
Window 5
Video Results:
accuracy precision recall header
1 0.8 0.8 0.8 0.8 0.8 0.8 0.8 0.9 extra_float.mp4 [0]
";
        let outcome = parse(text).unwrap();
        assert!(outcome.video_rows().is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0].reason.contains("8"));
    }

    #[test]
    fn test_video_row_missing_identity_rejected() {
        let text = "\
Window 5
Video Results:
accuracy precision recall header
1 0.8 0.8 0.8 0.8 0.8 0.8 0.8 no_identity.mp4
";
        let outcome = parse(text).unwrap();
        assert!(outcome.video_rows().is_empty());
        assert!(outcome.diagnostics[0].reason.contains("identity"));
    }

    #[test]
    fn test_video_name_with_spaces() {
        let text = "\
Window 5
Video Results:
accuracy precision recall header
1 0.8 0.8 0.8 0.8 0.8 0.8 0.8 mouse open field test.mp4 [3]
";
        let outcome = parse(text).unwrap();
        let rows = outcome.video_rows();
        assert_eq!(rows[0].video_name, "mouse open field test.mp4");
        assert_eq!(rows[0].identity, 3);
    }

    #[test]
    fn test_duplicate_pair_keeps_first() {
        let text = "\
Window 5
Video Results:
accuracy precision recall header
1 0.8 0.8 0.8 0.8 0.8 0.8 0.8 clip.mp4 [0]
2 0.5 0.5 0.5 0.5 0.5 0.5 0.5 clip.mp4 [0]
";
        let outcome = parse(text).unwrap();
        let rows = outcome.video_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].accuracy, 0.8);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].kind, DiagnosticKind::DuplicatePair);
    }

    #[test]
    fn test_same_pair_across_windows_is_fine() {
        let outcome = parse(SAMPLE).unwrap();
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.kind != DiagnosticKind::DuplicatePair));
    }

    #[test]
    fn test_empty_window_retained() {
        let text = "Window 30\n\nWindow 40\n";
        let outcome = parse(text).unwrap();
        assert_eq!(outcome.windows.len(), 2);
        assert!(outcome.windows[0].videos.is_empty());
        assert!(outcome.windows[1].videos.is_empty());
    }

    #[test]
    fn test_incomplete_summary_reported() {
        let text = "\
Window 5
Summary Statistics:
Mean Accuracy: 0.9
";
        let outcome = parse(text).unwrap();
        assert!(outcome.windows[0].summary.is_none());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(
            outcome.diagnostics[0].kind,
            DiagnosticKind::MalformedSummaryValue
        );
        assert!(outcome.diagnostics[0].reason.contains("sd_accuracy"));
    }

    #[test]
    fn test_std_dev_label_spelling() {
        let text = "\
Window 5
Mean Accuracy: 0.9
Std-Dev Accuracy: 0.1
Mean F1 Score (Behavior): 0.8
Std Dev F1 Score (Behavior): 0.05
Mean F1 Score (Not Behavior): 0.85
Std-Dev F1 Score (Not Behavior): 0.04
";
        let outcome = parse(text).unwrap();
        let summary = outcome.windows[0].summary.as_ref().unwrap();
        assert_eq!(summary.sd_accuracy, 0.1);
        assert_eq!(summary.sd_f1_behavior, 0.05);
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(parse(""), Err(CoreError::EmptyInput)));
        assert!(matches!(parse("   \n \t\n"), Err(CoreError::EmptyInput)));
    }

    #[test]
    fn test_no_window_header_is_fatal() {
        let result = parse("some text\nwithout any marker\n");
        assert!(matches!(result, Err(CoreError::NoWindowHeader)));
    }

    #[test]
    fn test_separator_lines_ignored() {
        let text = "\
Window 5
Video Results:
accuracy precision recall header
------------------------------------------------------------
1 0.8 0.8 0.8 0.8 0.8 0.8 0.8 clip.mp4 [0]
============================================================
";
        let outcome = parse(text).unwrap();
        assert_eq!(outcome.video_rows().len(), 1);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_percent_rule_ends_table() {
        let text = format!(
            "Window 5\nVideo Results:\naccuracy precision recall header\n\
             1 0.8 0.8 0.8 0.8 0.8 0.8 0.8 clip.mp4 [0]\n{}\n\
             2 0.7 0.7 0.7 0.7 0.7 0.7 0.7 after_rule.mp4 [1]\n",
            "%".repeat(60)
        );
        let outcome = parse(&text).unwrap();
        // The row after the rule is outside any table and flagged.
        assert_eq!(outcome.video_rows().len(), 1);
        assert_eq!(
            outcome.diagnostics[0].kind,
            DiagnosticKind::UnrecognizedLine
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse(SAMPLE).unwrap();
        let second = parse(SAMPLE).unwrap();
        assert_eq!(first, second);
    }
}

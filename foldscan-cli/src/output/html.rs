//! HTML report renderer
//!
//! Produces a single self-contained HTML document: best-window callout,
//! summary table with per-column highlighting, inline SVG barbell
//! charts for every summary metric, worst-video and sensitivity
//! rankings, top features and the validation outcome.

use super::{ReportContext, ReportRenderer};
use anyhow::Result;
use foldscan_core::{AggregateTables, CheckCategory, FeatureRow, WindowStats};
use std::fmt::Write;

const PLOT_WIDTH: u32 = 300;
const PLOT_HEIGHT: u32 = 200;
const PLOT_MARGIN: u32 = 35;

/// Renders `report.html`
pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn file_name(&self) -> &'static str {
        "report.html"
    }

    fn render(&self, ctx: &ReportContext) -> Result<String> {
        if ctx.tables.window_stats.is_empty() {
            anyhow::bail!("no aggregate statistics available; refusing to render report");
        }
        let best = ctx
            .tables
            .best_window
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no best window selected; refusing to render report"))?;

        let mut html = String::new();
        html.push_str(&document_head(ctx.source_name));
        html.push_str(&best_window_box(best));
        html.push_str(&summary_table(ctx.tables));
        html.push_str(&chart_section(ctx.tables));
        html.push_str(&worst_videos_section(ctx.tables));
        html.push_str(&sensitivity_section(ctx.tables));
        html.push_str(&feature_section(ctx.features));
        html.push_str(&validation_section(ctx));
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn document_head(source_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Window Size Analysis - {name}</title>
<style>
  body {{ font-family: Arial, sans-serif; margin: 40px; color: #2c3e50; }}
  h1, h2 {{ color: #2c3e50; }}
  table {{ border-collapse: collapse; margin: 20px 0; }}
  th, td {{ border: 1px solid #bdc3c7; padding: 6px 12px; text-align: center; }}
  th {{ background-color: #34495e; color: white; }}
  .best-cell {{ background-color: #27ae60; color: white; font-weight: bold; }}
  .best-f1 {{ background-color: #e74c3c; color: white; font-weight: bold; }}
  .summary-box {{ background-color: #ecf0f1; border-left: 6px solid #2ecc71;
                  padding: 12px 20px; margin: 20px 0; }}
  .barbell-dot {{ fill: #3498db; stroke: #2980b9; stroke-width: 1; }}
  .barbell-dot-best {{ fill: #e74c3c; stroke: #c0392b; stroke-width: 2; }}
  .barbell-stem {{ stroke: #95a5a6; stroke-width: 2; }}
  .axis {{ stroke: #7f8c8d; stroke-width: 1; }}
  .tick-label {{ font-size: 10px; fill: #7f8c8d; }}
  .chart-grid {{ display: flex; flex-wrap: wrap; gap: 20px; }}
</style>
</head>
<body>
<h1>Window Size Analysis</h1>
<p>Source: <strong>{name}</strong></p>
"#,
        name = escape_html(source_name)
    )
}

fn best_window_box(best: &WindowStats) -> String {
    format!(
        r#"<div class="summary-box">
<h2>Recommended Window Size: {} frames</h2>
<p>Mean F1 (Behavior): <strong>{:.4}</strong> &middot;
   Mean Accuracy: <strong>{:.4}</strong> &middot;
   SD F1 (Behavior): <strong>{:.4}</strong></p>
</div>
"#,
        best.window_size, best.mean_f1_behavior, best.mean_accuracy, best.sd_f1_behavior
    )
}

/// Only the best value in each column is highlighted, not the whole
/// best-window row; F1 (behavior) gets its own stronger class.
fn summary_table(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "<h2>Overall Performance</h2>\n<table>\n<tr><th>Window</th><th>Mean Accuracy</th>\
         <th>SD Accuracy</th><th>Mean F1 (Behavior)</th><th>SD F1 (Behavior)</th>\
         <th>Mean F1 (Not Behavior)</th><th>SD F1 (Not Behavior)</th><th>Videos</th></tr>\n",
    );
    for ws in &tables.window_stats {
        let _ = write!(out, "<tr><td>{}</td>", ws.window_size);
        for (column, value) in ws.values() {
            let class = if tables.best_values.window_for(column) == Some(ws.window_size) {
                if column == "mean_f1_behavior" {
                    " class=\"best-f1\""
                } else {
                    " class=\"best-cell\""
                }
            } else {
                ""
            };
            let _ = write!(out, "<td{class}>{value:.4}</td>");
        }
        let _ = writeln!(out, "<td>{}</td></tr>", ws.video_count);
    }
    out.push_str("</table>\n");
    out
}

fn chart_section(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "<h2>Metric Charts</h2>\n<p>The best value in each chart is highlighted in red.</p>\n\
         <div class=\"chart-grid\">\n",
    );
    let titles = [
        ("mean_accuracy", "Mean Accuracy"),
        ("sd_accuracy", "SD Accuracy"),
        ("mean_f1_behavior", "Mean F1 (Behavior)"),
        ("sd_f1_behavior", "SD F1 (Behavior)"),
        ("mean_f1_not_behavior", "Mean F1 (Not Behavior)"),
        ("sd_f1_not_behavior", "SD F1 (Not Behavior)"),
    ];
    for (column, title) in titles {
        let points: Vec<(u32, f64)> = tables
            .window_stats
            .iter()
            .map(|ws| {
                let value = ws
                    .values()
                    .iter()
                    .find(|(c, _)| *c == column)
                    .map(|(_, v)| *v)
                    .unwrap_or(0.0);
                (ws.window_size, value)
            })
            .collect();
        let best_window = tables.best_values.window_for(column);
        out.push_str(&barbell_svg(title, &points, best_window));
    }
    out.push_str("</div>\n");
    out
}

/// One dot per window on a shared value axis, with a stem down to the
/// axis line.
fn barbell_svg(title: &str, points: &[(u32, f64)], best_window: Option<u32>) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg width="{PLOT_WIDTH}" height="{PLOT_HEIGHT}" role="img" aria-label="{title}">"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="16" text-anchor="middle" font-size="13">{}</text>"#,
        PLOT_WIDTH / 2,
        escape_html(title)
    );

    let lo = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let hi = points
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((hi - lo) * 0.15).max(1e-6);
    let (lo, hi) = (lo - pad, hi + pad);

    let baseline = PLOT_HEIGHT - PLOT_MARGIN;
    let _ = writeln!(
        svg,
        r#"<line class="axis" x1="{PLOT_MARGIN}" y1="{baseline}" x2="{}" y2="{baseline}"/>"#,
        PLOT_WIDTH - PLOT_MARGIN / 2
    );

    let span = (PLOT_WIDTH - PLOT_MARGIN - PLOT_MARGIN / 2) as f64;
    let step = span / points.len().max(1) as f64;
    for (i, (window, value)) in points.iter().enumerate() {
        let x = PLOT_MARGIN as f64 + step * (i as f64 + 0.5);
        let y_span = (baseline - PLOT_MARGIN) as f64;
        let y = baseline as f64 - (value - lo) / (hi - lo) * y_span;
        let is_best = best_window == Some(*window);
        let (dot_class, radius) = if is_best {
            ("barbell-dot-best", 6)
        } else {
            ("barbell-dot", 5)
        };
        let _ = writeln!(
            svg,
            r#"<line class="barbell-stem" x1="{x:.1}" y1="{baseline}" x2="{x:.1}" y2="{y:.1}"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<circle class="{dot_class}" cx="{x:.1}" cy="{y:.1}" r="{radius}"/>"#
        );
        let _ = writeln!(
            svg,
            r#"<text class="tick-label" x="{x:.1}" y="{y2:.1}" text-anchor="middle">{value:.3}</text>"#,
            y2 = y - 10.0
        );
        let _ = writeln!(
            svg,
            r#"<text class="tick-label" x="{x:.1}" y="{}" text-anchor="middle">{window}</text>"#,
            baseline + 15
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn worst_videos_section(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "<h2>Worst Performing Videos</h2>\n\
         <p>Lowest mean accuracy across the windows each (video, identity) pair appears in.</p>\n\
         <table>\n<tr><th>#</th><th>Video</th><th>Identity</th><th>Mean Accuracy</th>\
         <th>SD Accuracy</th><th>Per-Window Accuracy</th></tr>\n",
    );
    for (i, video) in tables.worst_videos.iter().enumerate() {
        let breakdown: Vec<String> = video
            .per_window
            .iter()
            .map(|(w, a)| format!("{w}: {a:.3}"))
            .collect();
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.4}</td><td>{:.4}</td><td>{}</td></tr>",
            i + 1,
            escape_html(&video.video_name),
            video.identity,
            video.mean_accuracy,
            video.sd_accuracy,
            breakdown.join(", ")
        );
    }
    out.push_str("</table>\n");
    out
}

fn sensitivity_section(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "<h2>Window Sensitivity</h2>\n\
         <p>Coefficient of variation of F1 (Behavior) across window sizes; pairs seen in fewer \
         than two windows are excluded.</p>\n\
         <table>\n<tr><th>#</th><th>Video</th><th>Identity</th><th>CV</th>\
         <th>Mean F1 (Behavior)</th><th>Windows</th></tr>\n",
    );
    for (i, entry) in tables.sensitivity.iter().enumerate() {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.4}</td><td>{:.4}</td><td>{}</td></tr>",
            i + 1,
            escape_html(&entry.video_name),
            entry.identity,
            entry.cv,
            entry.mean_f1_behavior,
            entry.window_count
        );
    }
    out.push_str("</table>\n");
    out
}

fn feature_section(features: &[FeatureRow]) -> String {
    if features.is_empty() {
        return String::new();
    }
    let mut out = String::from(
        "<h2>Top Features</h2>\n<table>\n\
         <tr><th>Window</th><th>Rank</th><th>Feature</th><th>Importance</th></tr>\n",
    );
    for feature in features.iter().filter(|f| f.rank <= 10) {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.4}</td></tr>",
            feature.window_size,
            feature.rank,
            escape_html(&feature.feature_name),
            feature.importance
        );
    }
    out.push_str("</table>\n");
    out
}

fn validation_section(ctx: &ReportContext) -> String {
    let mut out = String::from("<h2>Validation</h2>\n<ul>\n");
    for category in CheckCategory::ALL {
        let passed = ctx.validation.category_passed(category);
        let mark = if passed { "✓" } else { "✗" };
        let _ = writeln!(
            out,
            "<li>{mark} {} ({} issue(s))</li>",
            category.title(),
            ctx.validation.failures_for(category).len()
        );
    }
    out.push_str("</ul>\n");
    out
}

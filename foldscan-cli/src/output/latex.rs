//! LaTeX report renderer
//!
//! Emits a standalone article with pgfplots charts mirroring the HTML
//! report: summary table, per-metric barbell plots, worst-video and
//! sensitivity rankings and the top features.

use super::{ReportContext, ReportRenderer};
use anyhow::Result;
use foldscan_core::{AggregateTables, FeatureRow, WindowStats};
use std::fmt::Write;

/// Renders `report.tex`
pub struct LatexRenderer;

impl ReportRenderer for LatexRenderer {
    fn file_name(&self) -> &'static str {
        "report.tex"
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

        let mut tex = String::new();
        tex.push_str(PREAMBLE);
        let _ = writeln!(
            tex,
            "\\title{{Window Size Analysis: {}}}\n\\date{{}}\n\\begin{{document}}\n\\maketitle\n",
            escape_latex(ctx.source_name)
        );
        tex.push_str(&executive_summary(best));
        tex.push_str(&summary_table(ctx.tables));
        tex.push_str(&chart_section(ctx.tables));
        tex.push_str(&worst_videos_section(ctx.tables));
        tex.push_str(&sensitivity_section(ctx.tables));
        tex.push_str(&feature_section(ctx.features));
        tex.push_str("\\end{document}\n");
        Ok(tex)
    }
}

const PREAMBLE: &str = "\\documentclass[11pt]{article}\n\
\\usepackage[margin=2.5cm]{geometry}\n\
\\usepackage{pgfplots}\n\
\\pgfplotsset{compat=1.17}\n\
\\usepackage{booktabs}\n";

/// Escape LaTeX special characters in free text (video and feature names)
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

fn executive_summary(best: &WindowStats) -> String {
    format!(
        "\\section{{Executive Summary}}\n\
         The recommended window size is \\textbf{{{} frames}} with a mean F1 (behavior) of \
         \\textbf{{{:.4}}}, mean accuracy of {:.4} and an F1 standard deviation of {:.4}.\n\n",
        best.window_size, best.mean_f1_behavior, best.mean_accuracy, best.sd_f1_behavior
    )
}

fn summary_table(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "\\section{Window Size Comparison}\n\
         \\begin{table}[h]\n\\centering\n\\begin{tabular}{lcccccc}\n\\toprule\n\
         Window & Mean Acc. & SD Acc. & Mean F1 (B) & SD F1 (B) & Mean F1 (NB) & SD F1 (NB) \\\\\n\
         \\midrule\n",
    );
    for ws in &tables.window_stats {
        let _ = write!(out, "{}", ws.window_size);
        for (column, value) in ws.values() {
            let cell = if tables.best_values.window_for(column) == Some(ws.window_size) {
                format!("\\textbf{{{value:.4}}}")
            } else {
                format!("{value:.4}")
            };
            let _ = write!(out, " & {cell}");
        }
        out.push_str(" \\\\\n");
    }
    out.push_str("\\bottomrule\n\\end{tabular}\n\\caption{Performance metrics per window size; best value per column in bold.}\n\\end{table}\n\n");
    out
}

fn chart_section(tables: &AggregateTables) -> String {
    let mut out = String::from("\\section{Metric Plots}\n");
    let titles = [
        ("mean_accuracy", "Mean Accuracy"),
        ("mean_f1_behavior", "Mean F1 (Behavior)"),
        ("mean_f1_not_behavior", "Mean F1 (Not Behavior)"),
    ];
    for (column, title) in titles {
        out.push_str(&barbell_plot(tables, column, title));
    }
    out
}

/// A pgfplots stem chart of one summary column across window sizes
fn barbell_plot(tables: &AggregateTables, column: &str, title: &str) -> String {
    let coords: Vec<String> = tables
        .window_stats
        .iter()
        .map(|ws| {
            let value = ws
                .values()
                .iter()
                .find(|(c, _)| *c == column)
                .map(|(_, v)| *v)
                .unwrap_or(0.0);
            format!("({}, {value:.4})", ws.window_size)
        })
        .collect();
    let mut out = String::new();
    out.push_str("\\begin{figure}[h]\n\\centering\n\\begin{tikzpicture}\n");
    out.push_str("\\begin{axis}[\n");
    let _ = writeln!(out, "    title={{{title}}},");
    out.push_str("    xlabel={Window size (frames)},\n");
    let _ = writeln!(out, "    ylabel={{{title}}},");
    out.push_str("    ycomb,\n    ymajorgrids=true,\n    width=0.75\\textwidth,\n    height=6cm,\n]\n");
    let _ = writeln!(out, "\\addplot+[mark=*] coordinates {{ {} }};", coords.join(" "));
    out.push_str("\\end{axis}\n\\end{tikzpicture}\n\\end{figure}\n\n");
    out
}

fn worst_videos_section(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "\\section{Worst Performing Videos}\n\
         \\begin{table}[h]\n\\centering\n\\begin{tabular}{rlrrr}\n\\toprule\n\
         \\# & Video & Identity & Mean Acc. & SD Acc. \\\\\n\\midrule\n",
    );
    for (i, video) in tables.worst_videos.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} & {} & {} & {:.4} & {:.4} \\\\",
            i + 1,
            escape_latex(&video.video_name),
            video.identity,
            video.mean_accuracy,
            video.sd_accuracy
        );
    }
    out.push_str("\\bottomrule\n\\end{tabular}\n\\caption{Pairs with the lowest mean accuracy across windows.}\n\\end{table}\n\n");
    out
}

fn sensitivity_section(tables: &AggregateTables) -> String {
    let mut out = String::from(
        "\\section{Window Sensitivity}\n\
         Pairs observed in fewer than two windows are excluded (undefined CV).\n\
         \\begin{table}[h]\n\\centering\n\\begin{tabular}{rlrrr}\n\\toprule\n\
         \\# & Video & Identity & CV & Mean F1 (B) \\\\\n\\midrule\n",
    );
    for (i, entry) in tables.sensitivity.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} & {} & {} & {:.4} & {:.4} \\\\",
            i + 1,
            escape_latex(&entry.video_name),
            entry.identity,
            entry.cv,
            entry.mean_f1_behavior
        );
    }
    out.push_str("\\bottomrule\n\\end{tabular}\n\\caption{Coefficient of variation of F1 (behavior) across window sizes.}\n\\end{table}\n\n");
    out
}

fn feature_section(features: &[FeatureRow]) -> String {
    if features.is_empty() {
        return String::new();
    }
    let mut out = String::from(
        "\\section{Top Features}\n\
         \\begin{table}[h]\n\\centering\n\\begin{tabular}{rrlr}\n\\toprule\n\
         Window & Rank & Feature & Importance \\\\\n\\midrule\n",
    );
    for feature in features.iter().filter(|f| f.rank <= 10) {
        let _ = writeln!(
            out,
            "{} & {} & {} & {:.4} \\\\",
            feature.window_size,
            feature.rank,
            escape_latex(&feature.feature_name),
            feature.importance
        );
    }
    out.push_str("\\bottomrule\n\\end{tabular}\n\\caption{Most important features per window size.}\n\\end{table}\n\n");
    out
}

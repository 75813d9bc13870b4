//! Output rendering module

use anyhow::Result;
use foldscan_core::{AggregateTables, FeatureRow, ValidationReport, VideoRow};

/// Everything a report renderer may draw from, read-only
pub struct ReportContext<'a> {
    /// Name of the scan file the report describes
    pub source_name: &'a str,
    /// All parsed video rows
    pub videos: &'a [VideoRow],
    /// All parsed feature rows
    pub features: &'a [FeatureRow],
    /// Derived tables
    pub tables: &'a AggregateTables,
    /// Consistency check outcome
    pub validation: &'a ValidationReport,
}

/// Trait for report renderers
pub trait ReportRenderer {
    /// File name the rendered report is written to
    fn file_name(&self) -> &'static str;

    /// Render the full report document
    ///
    /// Renderers fail loudly when the aggregate tables they need are
    /// empty; a wrong report is worse than no report.
    fn render(&self, ctx: &ReportContext) -> Result<String>;
}

pub mod html;
pub mod latex;
pub mod tables;

pub use html::HtmlRenderer;
pub use latex::LatexRenderer;

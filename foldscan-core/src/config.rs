//! Pipeline configuration
//!
//! Every stage takes its knobs from an explicit [`PipelineConfig`]
//! passed in by the caller; there is no process-wide state.

/// Configuration shared by the validator and aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// How many entries the worst-video and sensitivity rankings keep
    pub top_k: usize,
    /// Relative tolerance when comparing reported summary statistics
    /// against values recomputed from the video rows
    pub summary_tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            summary_tolerance: 1e-3,
        }
    }
}

impl PipelineConfig {
    /// Override the ranking cutoff
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Override the summary comparison tolerance
    pub fn with_summary_tolerance(mut self, tolerance: f64) -> Self {
        self.summary_tolerance = tolerance;
        self
    }
}

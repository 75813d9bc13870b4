//! Configuration module
//!
//! A TOML file can set the pipeline and output defaults; command-line
//! flags always win over the file.

use anyhow::{Context, Result};
use foldscan_core::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Pipeline-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct PipelineSection {
    /// Entries kept in the worst-video and sensitivity rankings
    pub top_k: usize,

    /// Relative tolerance for the summary consistency check
    pub summary_tolerance: f64,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            top_k: 10,
            summary_tolerance: 1e-3,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSection {
    /// Field delimiter for the table files
    pub delimiter: char,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            delimiter: ',',
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from an optional path, falling back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The core pipeline configuration this file describes
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_top_k(self.pipeline.top_k)
            .with_summary_tolerance(self.pipeline.summary_tolerance)
    }

    /// The table delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.output.delimiter as u32)
            .map_err(|_| anyhow::anyhow!("delimiter must be a single ASCII character"))
    }
}

//! Comparison configuration.
//!
//! Loaded from TOML; every section is optional and falls back to its
//! defaults. Command-line flags override file values.

use crate::analysis::DEFAULT_ALPHA;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Statistical test settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance threshold; must lie strictly between 0 and 1.
    pub alpha: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Sample acquisition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Largest image accepted, in pixels (0 disables the check).
    pub max_pixels: u64,
    /// Seed for synthetic samples.
    pub synthetic_seed: u64,
    /// Number of values in each synthetic sample.
    pub synthetic_size: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_pixels: 100_000_000,
            synthetic_seed: 42,
            synthetic_size: 10_000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the TOML report, if anywhere.
    pub report: Option<PathBuf>,
    /// Where to write the CSV distribution table, if anywhere.
    pub table: Option<PathBuf>,
    /// Print Prometheus metrics after the comparison.
    pub metrics: bool,
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid significance level {0} (must be between 0 and 1, exclusive)")]
    InvalidAlpha(f64),
    #[error("synthetic sample size must be non-zero")]
    InvalidSampleSize,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

impl AnalysisConfig {
    /// Validates the significance level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        Ok(())
    }
}

impl FileConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        if self.sampling.synthetic_size == 0 {
            return Err(ConfigError::InvalidSampleSize);
        }
        Ok(())
    }

    /// Returns the pixel cap, or `None` when disabled.
    pub fn max_pixels(&self) -> Option<u64> {
        match self.sampling.max_pixels {
            0 => None,
            n => Some(n),
        }
    }
}

//! Analyzer configuration
//!
//! Defaults can be overridden by a TOML file, which in turn is overridden by
//! explicit command-line flags:
//!
//! ```toml
//! threshold = 7.5
//! labels = "shift-conv"
//! ```

use crate::instruction_mix::LabelSet;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Stall percentage above which a file is reported
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Errors from loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid config TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("Invalid threshold: {0} (must be a finite percentage)")]
    InvalidThreshold(f64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Settings that control when and how a file is reported
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Minimum stall percentage (exclusive) that triggers detailed reporting
    pub threshold: f64,
    /// Labels for the convert and misc categories
    pub labels: LabelSet,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            labels: LabelSet::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file; absent keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(mut self, threshold: Option<f64>, labels: Option<LabelSet>) -> Self {
        if let Some(threshold) = threshold {
            self.threshold = threshold;
        }
        if let Some(labels) = labels {
            self.labels = labels;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

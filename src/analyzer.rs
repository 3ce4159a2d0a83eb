//! Stall analysis of profiler exports
//!
//! `analyze` is pure: it returns a result for files whose pipe-busy stall
//! percentage is strictly above the threshold and `None` otherwise. Printing
//! is left to the output formatters.

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::instruction_mix::{InstructionCounts, InstructionMix};
use crate::metric_row::{load_row, MetricRow};
use crate::profile::{self, ProfileRecord};
use std::path::{Path, PathBuf};

/// Report for one file that crossed the stall threshold
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub path: PathBuf,
    pub stall_percentage: f64,
    pub threshold: f64,
    pub mix: InstructionMix,
}

/// Normalized instruction mix of a row
///
/// Fails with `DivisionByZero` when every category count is zero, and with
/// `NonFiniteTotal` when the counts sum to NaN or infinity.
pub fn instruction_mix(row: &MetricRow) -> Result<InstructionMix> {
    normalize_counts(row.path(), &profile::instruction_counts(row)?)
}

fn normalize_counts(path: &Path, counts: &InstructionCounts) -> Result<InstructionMix> {
    counts.normalize().ok_or_else(|| {
        let total = counts.total();
        if total == 0.0 {
            AnalysisError::DivisionByZero {
                path: path.to_path_buf(),
            }
        } else {
            AnalysisError::NonFiniteTotal {
                path: path.to_path_buf(),
                total,
            }
        }
    })
}

/// Analyze one file against `threshold`
pub fn analyze<P: AsRef<Path>>(path: P, threshold: f64) -> Result<Option<AnalysisResult>> {
    StallAnalyzer::new(AnalyzerConfig {
        threshold,
        ..AnalyzerConfig::default()
    })
    .analyze(path)
}

/// Applies one configuration to any number of profiler exports
#[derive(Debug, Clone, Default)]
pub struct StallAnalyzer {
    config: AnalyzerConfig,
}

impl StallAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one file
    ///
    /// Instruction columns are only required once the stall threshold is
    /// crossed.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<Option<AnalysisResult>> {
        let path = path.as_ref();
        let row = load_row(path)?;
        self.analyze_row(&row)
    }

    /// Analyze an already-loaded row
    pub fn analyze_row(&self, row: &MetricRow) -> Result<Option<AnalysisResult>> {
        let stall = profile::stall_percentage(row)?;
        if stall <= self.config.threshold || stall.is_nan() {
            tracing::debug!(
                path = %row.path().display(),
                stall,
                threshold = self.config.threshold,
                "below stall threshold"
            );
            return Ok(None);
        }

        let record = ProfileRecord::from_row(row)?;
        let mix = normalize_counts(row.path(), &record.counts)?;

        tracing::debug!(
            path = %row.path().display(),
            stall,
            dominant = self.config.labels.label(mix.dominant()),
            "stall threshold exceeded"
        );

        Ok(Some(AnalysisResult {
            path: row.path().to_path_buf(),
            stall_percentage: record.stall_percentage,
            threshold: self.config.threshold,
            mix,
        }))
    }

    /// Analyze every file in order, stopping at the first error
    ///
    /// Files below the threshold contribute nothing to the returned list.
    pub fn analyze_all<I, P>(&self, paths: I) -> Result<Vec<AnalysisResult>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut results = Vec::new();
        for path in paths {
            let analyzed = self.analyze(path).map_err(|e| {
                tracing::warn!(path = %e.path().display(), "analysis failed");
                e
            })?;
            if let Some(result) = analyzed {
                results.push(result);
            }
        }
        Ok(results)
    }
}

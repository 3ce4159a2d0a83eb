//! Typed view of the columns the analyzer needs
//!
//! All required columns are checked and parsed once, so code downstream of
//! `ProfileRecord::from_row` works with plain fields instead of string keys.

use crate::error::Result;
use crate::instruction_mix::{Category, InstructionCounts};
use crate::metric_row::MetricRow;

/// Column holding the pipe-busy stall percentage
pub const STALL_COLUMN: &str = "Issue Stall Reasons (Pipe Busy)(%)";

/// Stall percentage of a row, parsed verbatim from its column
pub fn stall_percentage(row: &MetricRow) -> Result<f64> {
    row.require_f64(STALL_COLUMN)
}

/// Raw instruction counts of a row, one per category
pub fn instruction_counts(row: &MetricRow) -> Result<InstructionCounts> {
    let mut counts = [0.0; 8];
    for (slot, category) in counts.iter_mut().zip(Category::ALL) {
        *slot = row.require_f64(category.column())?;
    }
    Ok(InstructionCounts::new(counts))
}

/// All required metrics from one profiler export
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub stall_percentage: f64,
    pub counts: InstructionCounts,
}

impl ProfileRecord {
    /// Validate and parse every required column of `row`
    ///
    /// Column presence is checked for the whole schema before any value is
    /// parsed, so a missing column is reported ahead of a bad value.
    pub fn from_row(row: &MetricRow) -> Result<Self> {
        for column in Self::required_columns() {
            row.require(column)?;
        }
        Ok(Self {
            stall_percentage: stall_percentage(row)?,
            counts: instruction_counts(row)?,
        })
    }

    /// Names of every column `from_row` requires
    pub fn required_columns() -> impl Iterator<Item = &'static str> {
        std::iter::once(STALL_COLUMN).chain(Category::ALL.iter().map(|c| c.column()))
    }
}

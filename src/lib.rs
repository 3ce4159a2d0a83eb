//! Stallscope - pipeline stall and instruction-mix reports for GPU profiler exports
//!
//! This library reads two-row profiler CSV exports (metric names + values),
//! checks the pipe-busy stall percentage against a threshold, and computes the
//! normalized instruction mix for files that cross it.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod instruction_mix;
pub mod json_output;
pub mod metric_row;
pub mod profile;
pub mod text_output;

pub use analyzer::{analyze, instruction_mix, AnalysisResult, StallAnalyzer};
pub use config::AnalyzerConfig;
pub use error::AnalysisError;
pub use instruction_mix::{Category, InstructionMix, LabelSet};
pub use metric_row::{load_row, MetricRow};
pub use profile::stall_percentage;

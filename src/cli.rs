//! CLI argument parsing for stallscope

use crate::instruction_mix::LabelSet;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for stall reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "stallscope")]
#[command(version)]
#[command(
    about = "Report pipeline stalls and instruction mix from GPU profiler CSV exports",
    long_about = None
)]
pub struct Cli {
    /// Profiler CSV exports (header row + one data row each)
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Minimum pipe-busy stall percentage that triggers a report (default: 5.0)
    #[arg(short = 't', long = "threshold", value_name = "PCT")]
    pub threshold: Option<f64>,

    /// Labels for the bit-convert and misc categories (default: conv-misc)
    #[arg(short = 'l', long = "labels", value_enum)]
    pub labels: Option<LabelSet>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// TOML config file providing threshold and labels
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

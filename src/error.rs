//! Error taxonomy for stall analysis
//!
//! Every variant names the file it came from so a failure in a multi-file
//! run points straight at the offending export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or analyzing a profiler export
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{}: cannot read file: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: malformed input: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("{}: missing required column \"{field}\"", .path.display())]
    MissingField { path: PathBuf, field: String },

    #[error("{}: column \"{field}\" has non-numeric value \"{value}\"", .path.display())]
    ParseError {
        path: PathBuf,
        field: String,
        value: String,
    },

    #[error("{}: total instruction count is zero, cannot normalize instruction mix", .path.display())]
    DivisionByZero { path: PathBuf },

    #[error("{}: total instruction count is {total}, cannot normalize instruction mix", .path.display())]
    NonFiniteTotal { path: PathBuf, total: f64 },
}

impl AnalysisError {
    /// Path of the file the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            AnalysisError::FileAccess { path, .. }
            | AnalysisError::MalformedInput { path, .. }
            | AnalysisError::MissingField { path, .. }
            | AnalysisError::ParseError { path, .. }
            | AnalysisError::DivisionByZero { path }
            | AnalysisError::NonFiniteTotal { path, .. } => path,
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

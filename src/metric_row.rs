//! Header/data row pair read from a profiler CSV export
//!
//! Profiler exports with a single kernel summary are two lines: a header of
//! metric names and one line of values. `MetricRow` pairs them up positionally.

use crate::error::{AnalysisError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Column name to value mapping for one profiler export
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    path: PathBuf,
    columns: Vec<String>,
    values: Vec<String>,
}

/// Read a two-row CSV file into a `MetricRow`
///
/// The whole file is read and the handle released before parsing starts.
pub fn load_row<P: AsRef<Path>>(path: P) -> Result<MetricRow> {
    let path = path.as_ref();
    let contents = fs::read(path).map_err(|source| AnalysisError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "read profiler export");
    MetricRow::parse(path, &contents)
}

impl MetricRow {
    /// Parse CSV bytes (header row + data row) attributed to `path`
    pub fn parse(path: &Path, data: &[u8]) -> Result<Self> {
        let malformed = |reason: String| AnalysisError::MalformedInput {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .quote(b'"')
            .flexible(true)
            .from_reader(data);

        let mut rows = Vec::with_capacity(2);
        let mut extra_rows = 0usize;
        for record in reader.records() {
            let record = record.map_err(|e| malformed(e.to_string()))?;
            if rows.len() < 2 {
                rows.push(record);
            } else {
                extra_rows += 1;
            }
        }

        if rows.len() < 2 {
            return Err(malformed(format!(
                "expected a header row and a data row, found {} row(s)",
                rows.len()
            )));
        }
        if extra_rows > 0 {
            tracing::warn!(
                path = %path.display(),
                extra_rows,
                "ignoring rows after the first data row"
            );
        }

        let values = rows.pop().unwrap_or_default();
        let header = rows.pop().unwrap_or_default();
        if header.len() != values.len() {
            return Err(malformed(format!(
                "header has {} columns but data row has {}",
                header.len(),
                values.len()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            columns: header.iter().map(str::to_string).collect(),
            values: values.iter().map(str::to_string).collect(),
        })
    }

    /// File this row was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a value by column name
    ///
    /// When a header name repeats, the last occurrence wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .rposition(|c| c == column)
            .map(|idx| self.values[idx].as_str())
    }

    /// Look up a value, failing with `MissingField` if the column is absent
    pub fn require(&self, column: &str) -> Result<&str> {
        self.get(column).ok_or_else(|| AnalysisError::MissingField {
            path: self.path.clone(),
            field: column.to_string(),
        })
    }

    /// Look up a value and parse it as a float
    pub fn require_f64(&self, column: &str) -> Result<f64> {
        let raw = self.require(column)?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| AnalysisError::ParseError {
                path: self.path.clone(),
                field: column.to_string(),
                value: raw.to_string(),
            })
    }
}

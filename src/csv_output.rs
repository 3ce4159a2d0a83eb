//! CSV output format for stall reports
//!
//! One row per file above the threshold, for spreadsheet analysis across many
//! kernels.

use crate::analyzer::AnalysisResult;
use crate::instruction_mix::LabelSet;
use crate::text_output::format_number;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    rows: Vec<AnalysisResult>,
    labels: LabelSet,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new(labels: LabelSet) -> Self {
        Self {
            rows: Vec::new(),
            labels,
        }
    }

    /// Add a result to the output
    pub fn add_result(&mut self, result: &AnalysisResult) {
        self.rows.push(result.clone());
    }

    /// Header row: path, stall percentage, one column per category label
    fn header(&self) -> String {
        let mut headers = vec!["path", "stall_pct"];
        headers.extend(self.labels.labels());
        headers.join(",")
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_row(result: &AnalysisResult) -> String {
        let mut fields = vec![
            Self::escape_field(&result.path.display().to_string()),
            format_number(result.stall_percentage),
        ];
        fields.extend(result.mix.iter().map(|(_, ratio)| format_number(ratio)));
        fields.join(",")
    }

    /// Generate CSV output as string; the header is always present
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.header());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }

        output
    }
}

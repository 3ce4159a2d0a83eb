//! JSON output format for stall reports
//!
//! `--format json` emits an array with one object per file above the
//! threshold. Mix entries keep category order.

use crate::analyzer::AnalysisResult;
use crate::instruction_mix::{InstructionMix, LabelSet};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Instruction mix keyed by display label, serialized in category order
#[derive(Debug, Clone)]
pub struct JsonMix {
    entries: Vec<(&'static str, f64)>,
}

impl JsonMix {
    pub fn new(mix: &InstructionMix, labels: LabelSet) -> Self {
        Self {
            entries: mix
                .iter()
                .map(|(category, ratio)| (labels.label(category), ratio))
                .collect(),
        }
    }
}

impl Serialize for JsonMix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, ratio) in &self.entries {
            map.serialize_entry(label, ratio)?;
        }
        map.end()
    }
}

/// A single file's report
#[derive(Debug, Clone, Serialize)]
pub struct JsonStallReport {
    /// Profiler export the report came from
    pub path: String,
    /// Pipe-busy stall percentage
    pub stall_percentage: f64,
    /// Threshold the stall percentage exceeded
    pub threshold: f64,
    /// Normalized instruction mix
    pub mix: JsonMix,
}

/// JSON output formatter
#[derive(Debug)]
pub struct JsonOutput {
    reports: Vec<JsonStallReport>,
    labels: LabelSet,
}

impl JsonOutput {
    pub fn new(labels: LabelSet) -> Self {
        Self {
            reports: Vec::new(),
            labels,
        }
    }

    pub fn add_result(&mut self, result: &AnalysisResult) {
        self.reports.push(JsonStallReport {
            path: result.path.display().to_string(),
            stall_percentage: result.stall_percentage,
            threshold: result.threshold,
            mix: JsonMix::new(&result.mix, self.labels),
        });
    }

    /// Serialize all reports as a pretty-printed JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction_mix::InstructionCounts;
    use std::path::PathBuf;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            path: PathBuf::from("kernel.csv"),
            stall_percentage: 7.5,
            threshold: 5.0,
            mix: InstructionCounts::new([40.0, 10.0, 0.0, 40.0, 0.0, 0.0, 10.0, 0.0])
                .normalize()
                .unwrap(),
        }
    }

    #[test]
    fn test_json_empty_array() {
        let output = JsonOutput::new(LabelSet::ConvMisc);
        assert_eq!(output.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_json_report_fields() {
        let mut output = JsonOutput::new(LabelSet::ConvMisc);
        output.add_result(&sample_result());

        let json = output.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let report = &parsed[0];

        assert_eq!(report["path"], "kernel.csv");
        assert_eq!(report["stall_percentage"], 7.5);
        assert_eq!(report["threshold"], 5.0);
        assert_eq!(report["mix"]["FP32"], 0.4);
        assert_eq!(report["mix"]["Misc"], 0.0);
    }

    #[test]
    fn test_json_mix_keeps_category_order() {
        let mut output = JsonOutput::new(LabelSet::ShiftConv);
        output.add_result(&sample_result());

        let json = output.to_json().unwrap();
        let positions: Vec<usize> = LabelSet::ShiftConv
            .labels()
            .iter()
            .map(|label| json.find(&format!("\"{label}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

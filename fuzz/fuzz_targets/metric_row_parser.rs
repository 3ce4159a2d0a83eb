#![no_main]

use libfuzzer_sys::fuzz_target;
use stallscope::{MetricRow, StallAnalyzer};
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    // Loading and analyzing arbitrary bytes should never panic
    if let Ok(row) = MetricRow::parse(Path::new("fuzz.csv"), data) {
        let _ = StallAnalyzer::default().analyze_row(&row);
    }
});

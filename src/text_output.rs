//! Human-readable report, one block per file above the stall threshold

use crate::analyzer::AnalysisResult;
use crate::instruction_mix::LabelSet;
use std::fmt::Write;

/// Format a float the way the report prints numbers: shortest round-trip
/// form, always with a fractional part (`7.5`, `0.0`), switching to
/// scientific notation below 1e-4 or from 1e16 up with a signed exponent of
/// at least two digits (`1e-05`, `1.5e+16`)
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    let scientific = value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude);
    if !scientific {
        return format!("{value:?}");
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

/// Text block for a single result, terminated by a blank line
pub fn format_result(result: &AnalysisResult, labels: LabelSet) -> String {
    let mut output = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        output,
        "{}: {}% pipeline stalls",
        result.path.display(),
        format_number(result.stall_percentage)
    );
    for (category, ratio) in result.mix.iter() {
        let _ = writeln!(output, "{}: {}", labels.label(category), format_number(ratio));
    }
    output.push('\n');
    output
}

/// Concatenated text blocks for all results
pub fn format_results(results: &[AnalysisResult], labels: LabelSet) -> String {
    results
        .iter()
        .map(|result| format_result(result, labels))
        .collect()
}

use anyhow::{Context, Result};
use clap::Parser;
use stallscope::cli::{Cli, OutputFormat};
use stallscope::{
    csv_output, json_output, text_output, AnalysisResult, AnalyzerConfig, LabelSet, StallAnalyzer,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Render all results in the requested format
fn render(results: &[AnalysisResult], format: OutputFormat, labels: LabelSet) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => text_output::format_results(results, labels),
        OutputFormat::Json => {
            let mut output = json_output::JsonOutput::new(labels);
            for result in results {
                output.add_result(result);
            }
            let mut json = output.to_json()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => {
            let mut output = csv_output::CsvOutput::new(labels);
            for result in results {
                output.add_result(result);
            }
            output.to_csv()
        }
    };
    Ok(rendered)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let base = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let config = base.with_overrides(args.threshold, args.labels);
    config.validate()?;
    tracing::debug!(threshold = config.threshold, labels = %config.labels, "analyzer config");

    // Every file is analyzed before anything is printed
    let analyzer = StallAnalyzer::new(config);
    let results = analyzer.analyze_all(&args.files)?;

    print!("{}", render(&results, args.format, config.labels)?);

    Ok(())
}

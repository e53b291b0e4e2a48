//! Extract command - extract fields from a single recognized document.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use fincr_core::models::config::OutputFormat;
use fincr_core::{DocumentExtractor, RuleBasedParser, TotalStrategy};

use super::{format_report, format_result, load_config, FormatArg, InputFormat, StrategyArg};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file with recognized text or a recognizer JSON response ("-" for stdin)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// How to interpret the input
    #[arg(short, long, value_enum, default_value = "auto")]
    input_format: InputFormat,

    /// Total amount selection strategy (default: from config)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Print the full report (raw text, warnings, OCR error)
    #[arg(long)]
    report: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let (payload, path) = if args.input == "-" {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        (buffer, None)
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        (fs::read(&path)?, Some(path))
    };

    info!("Processing input: {}", args.input);

    let recognizer = args.input_format.recognizer(path.as_deref());
    let strategy = args
        .strategy
        .map(TotalStrategy::from)
        .unwrap_or(config.extraction.total_strategy);
    let parser = RuleBasedParser::from_config(&config.extraction).with_total_strategy(strategy);

    let report = parser.extract_from_image(recognizer.as_ref(), &payload);

    if let Some(error) = &report.ocr_error {
        eprintln!("{} {}", style("⚠").yellow(), error);
    }

    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);
    let output = if args.report || config.extraction.include_report {
        format_report(&report, format, config.output.pretty)?
    } else {
        format_result(&report.extracted, format, config.output.pretty)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

//! Batch command - extract fields from many documents concurrently.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use fincr_core::models::config::OutputFormat;
use fincr_core::{DocumentExtractor, RuleBasedParser, ScanReport, TotalStrategy};

use super::output::{csv_cells, CSV_HEADER};
use super::{format_report, format_result, load_config, FormatArg, InputFormat, StrategyArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// How to interpret the inputs
    #[arg(short, long, value_enum, default_value = "auto")]
    input_format: InputFormat,

    /// Total amount selection strategy (default: from config)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue when a file fails to process
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<ScanReport>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let strategy = args
        .strategy
        .map(TotalStrategy::from)
        .unwrap_or(config.extraction.total_strategy);
    let parser = Arc::new(RuleBasedParser::from_config(&config.extraction).with_total_strategy(strategy));
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let parser = Arc::clone(&parser);
        let permits = Arc::clone(&permits);
        let input_format = args.input_format;

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let result = tokio::task::spawn_blocking(move || {
                let outcome = process_single_file(&path, &parser, input_format);
                (path, outcome)
            })
            .await?;
            anyhow::Ok((index, result))
        });
    }

    let mut indexed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, (path, outcome)) = joined??;

        let result = match outcome {
            Ok(report) => ProcessResult {
                path,
                report: Some(report),
                error: None,
            },
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    tasks.abort_all();
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                ProcessResult {
                    path,
                    report: None,
                    error: Some(error_msg),
                }
            }
        };

        indexed.push((index, result));
        pb.inc(1);
    }

    pb.finish_and_clear();

    // Keep glob order in outputs regardless of completion order
    indexed.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = indexed.into_iter().map(|(_, r)| r).collect();

    let format: OutputFormat = args.format.map(Into::into).unwrap_or(config.output.format);

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(report) = &result.report else {
                continue;
            };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

            let content = if config.extraction.include_report {
                format_report(report, format, config.output.pretty)?
            } else {
                format_result(&report.extracted, format, config.output.pretty)?
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let ocr_failed = results
        .iter()
        .filter(|r| r.report.as_ref().is_some_and(|report| !report.is_success()))
        .count();

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} unreadable, {} failed",
        style(results.len() - failed.len() - ocr_failed).green(),
        style(ocr_failed).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &RuleBasedParser,
    input_format: InputFormat,
) -> anyhow::Result<ScanReport> {
    let payload = fs::read(path)?;
    let recognizer = input_format.recognizer(Some(path));

    Ok(parser.extract_from_image(recognizer.as_ref(), &payload))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["filename", "status"];
    header.extend(CSV_HEADER);
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];
        match &result.report {
            Some(report) => {
                let status = if report.is_success() { "success" } else { "ocr_failed" };
                record.push(status.to_string());
                record.extend(csv_cells(&report.extracted));
                record.push(report.processing_time_ms.to_string());
                record.push(report.ocr_error.clone().unwrap_or_default());
            }
            None => {
                record.push("error".to_string());
                record.extend(std::iter::repeat_n(String::new(), CSV_HEADER.len() + 1));
                record.push(result.error.clone().unwrap_or_default());
            }
        }

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

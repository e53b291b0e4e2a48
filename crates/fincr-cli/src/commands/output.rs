//! Output formatting shared by the extract and batch commands.

use clap::ValueEnum;
use fincr_core::extraction::rules::{format_amount, parse_date_candidate};
use fincr_core::models::config::OutputFormat;
use fincr_core::{ExtractionResult, ScanReport};

/// Output format as a command-line value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

pub const CSV_HEADER: [&str; 6] = [
    "document_type",
    "document_number",
    "inn",
    "total_amount",
    "dates",
    "amounts",
];

/// CSV cells for one result, in `CSV_HEADER` order.
pub fn csv_cells(result: &ExtractionResult) -> [String; 6] {
    [
        result.document_type.map(|t| t.label().to_string()).unwrap_or_default(),
        result.document_number.clone().unwrap_or_default(),
        result.inn.clone().unwrap_or_default(),
        result.total_amount.map(|a| a.to_string()).unwrap_or_default(),
        result.dates.join(";"),
        result
            .amounts
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(";"),
    ]
}

/// Format an extraction result.
pub fn format_result(
    result: &ExtractionResult,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

/// Format a full scan report. CSV and text carry only the extracted fields
/// plus warnings.
pub fn format_report(
    report: &ScanReport,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string(report)?),
        OutputFormat::Csv => format_csv(&report.extracted),
        OutputFormat::Text => {
            let mut output = format_text(&report.extracted);
            if !report.warnings.is_empty() {
                output.push_str("\nWarnings:\n");
                for warning in &report.warnings {
                    output.push_str(&format!("  - {}\n", warning));
                }
            }
            Ok(output)
        }
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_cells(result))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    let doc_type = result.document_type.map(|t| t.label()).unwrap_or("unknown");
    match &result.document_number {
        Some(number) => output.push_str(&format!("Document: {} № {}\n", doc_type, number)),
        None => output.push_str(&format!("Document: {}\n", doc_type)),
    }

    if let Some(inn) = &result.inn {
        output.push_str(&format!("INN: {}\n", inn));
    }

    match result.total_amount {
        Some(total) => output.push_str(&format!("Total: {} руб\n", format_amount(total))),
        None => output.push_str("Total: not found\n"),
    }

    if !result.dates.is_empty() {
        output.push_str("\nDates:\n");
        for date in &result.dates {
            match parse_date_candidate(date) {
                Some(parsed) => output.push_str(&format!("  {} ({})\n", date, parsed)),
                None => output.push_str(&format!("  {} (invalid)\n", date)),
            }
        }
    }

    if !result.amounts.is_empty() {
        output.push_str("\nAmounts:\n");
        for amount in &result.amounts {
            output.push_str(&format!("  {}\n", format_amount(*amount)));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincr_core::extract_fields;

    #[test]
    fn test_csv_output() {
        let result = extract_fields("Акт № 7 от 01.02.2026, итого 1 000 руб");
        let csv = format_result(&result, OutputFormat::Csv, false).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("document_type,document_number,inn,total_amount,dates,amounts")
        );
        assert_eq!(lines.next(), Some("Акт,7,,1000,01.02.2026;01.02.20;01.02.2026,1000;1000"));
    }

    #[test]
    fn test_text_output() {
        let result = extract_fields("Счет № 3 от 35.13.2026\nИтого: 12 500,00 руб");
        let text = format_result(&result, OutputFormat::Text, false).unwrap();

        assert!(text.starts_with("Document: Счёт № 3\n"));
        assert!(text.contains("Total: 12 500,00 руб"));
        assert!(text.contains("35.13.2026 (invalid)"));
    }

    #[test]
    fn test_report_text_lists_warnings() {
        let report = ScanReport {
            warnings: vec!["Recognized text is empty".to_string()],
            ..Default::default()
        };
        let text = format_report(&report, OutputFormat::Text, false).unwrap();

        assert!(text.contains("Total: not found"));
        assert!(text.contains("  - Recognized text is empty"));
    }
}

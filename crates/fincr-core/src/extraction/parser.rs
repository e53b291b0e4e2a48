//! Rule-based parser assembling the extraction result.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::config::{ExtractionConfig, TotalStrategy};
use crate::models::document::{ExtractionResult, ScanReport};
use crate::ocr::TextRecognizer;

use super::rules::{
    amounts::extract_amounts,
    dates::extract_dates,
    document_number::DocumentNumberExtractor,
    document_type::DocumentTypeClassifier,
    inn::InnExtractor,
    FieldExtractor,
};
use super::DocumentExtractor;

/// Trait for document parsing.
pub trait DocumentParser {
    /// Parse structured fields from text. Never fails.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser combining all rule-based field extractors.
///
/// Stateless apart from its configuration; safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedParser {
    /// How the total amount is selected.
    total_strategy: TotalStrategy,
}

impl RuleBasedParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_total_strategy(config.total_strategy)
    }

    /// Set the total amount selection strategy.
    pub fn with_total_strategy(mut self, strategy: TotalStrategy) -> Self {
        self.total_strategy = strategy;
        self
    }

    /// Current total amount selection strategy.
    pub fn total_strategy(&self) -> TotalStrategy {
        self.total_strategy
    }

    fn report(&self, text: String, ocr_error: Option<String>, start: Instant) -> ScanReport {
        let extracted = self.parse(&text);

        let mut warnings = Vec::new();
        if let Some(error) = &ocr_error {
            warnings.push(format!("Text recognition failed: {}", error));
        } else if text.trim().is_empty() {
            warnings.push("Recognized text is empty".to_string());
        }
        if extracted.amounts.is_empty() {
            warnings.push("Could not extract any amount".to_string());
        }
        if extracted.dates.is_empty() {
            warnings.push("Could not extract any date".to_string());
        }
        if extracted.document_number.is_none() {
            warnings.push("Could not extract document number".to_string());
        }
        if extracted.document_type.is_none() {
            warnings.push("Could not determine document type".to_string());
        }
        if extracted.inn.is_none() {
            warnings.push("Could not extract INN".to_string());
        }

        ScanReport {
            extracted,
            raw_text: text,
            warnings,
            ocr_error,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl DocumentParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        if text.trim().is_empty() {
            debug!("Empty text, nothing to extract");
            return ExtractionResult::default();
        }

        info!("Extracting financial fields from {} characters of text", text.len());

        let amounts = extract_amounts(text);
        let dates = extract_dates(text);
        let document_number = DocumentNumberExtractor::new().extract(text).map(|m| m.value);
        let document_type = DocumentTypeClassifier::new().classify(text);
        let inn = InnExtractor::new().extract(text).map(|m| m.value);
        let total_amount = amounts.total(self.total_strategy);

        debug!(
            "Found {} amounts, {} dates, number {:?}, type {:?}, INN {:?}, total {:?}",
            amounts.candidates.len(),
            dates.len(),
            document_number,
            document_type,
            inn,
            total_amount
        );

        ExtractionResult {
            amounts: amounts.values(),
            dates,
            document_number,
            document_type,
            inn,
            total_amount,
        }
    }
}

impl DocumentExtractor for RuleBasedParser {
    fn extract_from_text(&self, text: &str) -> ScanReport {
        self.report(text.to_string(), None, Instant::now())
    }

    fn extract_from_image(&self, recognizer: &dyn TextRecognizer, image: &[u8]) -> ScanReport {
        let start = Instant::now();

        match recognizer.recognize(image) {
            Ok(text) => {
                debug!("{} recognized {} characters", recognizer.name(), text.len());
                self.report(text, None, start)
            }
            Err(e) => {
                warn!("{} failed, treating document as empty: {}", recognizer.name(), e);
                self.report(String::new(), Some(e.to_string()), start)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::models::document::DocumentType;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
            Err(OcrError::Unavailable("timeout".to_string()))
        }
    }

    #[test]
    fn test_parse_tax_invoice() {
        let text = "Счёт-фактура №123/45 от 01.02.2026, сумма 500.00 руб";
        let result = RuleBasedParser::new().parse(text);

        assert_eq!(result.document_type, Some(DocumentType::TaxInvoice));
        assert_eq!(result.document_number, Some("123/45".to_string()));
        assert!(result.dates.contains(&"01.02.2026".to_string()));
        assert!(result.amounts.contains(&Decimal::from_str("500.00").unwrap()));
        assert_eq!(result.total_amount, Some(Decimal::from_str("500.00").unwrap()));
    }

    #[test]
    fn test_blank_text_yields_empty_result() {
        let parser = RuleBasedParser::new();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("  \n\t ").is_empty());
    }

    #[test]
    fn test_strategy_from_config() {
        let config = ExtractionConfig {
            total_strategy: TotalStrategy::PreferLabeled,
            ..Default::default()
        };
        let parser = RuleBasedParser::from_config(&config);
        assert_eq!(parser.total_strategy(), TotalStrategy::PreferLabeled);

        let result = parser.parse("Итого: 900,00 руб\nОстаток по договору 12 000,00 руб");
        assert_eq!(result.total_amount, Some(Decimal::from_str("900.00").unwrap()));
        assert_eq!(result.amounts.iter().max(), Some(&Decimal::from_str("12000.00").unwrap()));
    }

    #[test]
    fn test_failed_recognition_reports_empty_result() {
        let report = RuleBasedParser::new().extract_from_image(&FailingRecognizer, b"\xff\xd8");

        assert!(!report.is_success());
        assert!(report.extracted.is_empty());
        assert!(report.raw_text.is_empty());
        assert_eq!(
            report.ocr_error.as_deref(),
            Some("recognizer unavailable: timeout")
        );
        assert!(report.warnings[0].starts_with("Text recognition failed"));
    }

    #[test]
    fn test_report_warnings_for_missing_fields() {
        let report = RuleBasedParser::new().extract_from_text("Акт №5 от 10.10.2025");

        assert!(report.is_success());
        assert_eq!(report.raw_text, "Акт №5 от 10.10.2025");
        assert!(report.warnings.contains(&"Could not extract any amount".to_string()));
        assert!(report.warnings.contains(&"Could not extract INN".to_string()));
        assert!(!report.warnings.contains(&"Could not extract document number".to_string()));
    }
}

//! Structured output of the financial field extractor.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured fields extracted from one recognized document.
///
/// Created once per extraction call and never mutated afterwards. Candidate
/// sequences keep discovery order and may contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Strictly positive amount candidates, in discovery order.
    pub amounts: Vec<Decimal>,

    /// Date candidates as the exact substrings that matched.
    pub dates: Vec<String>,

    /// First document number found after a number label.
    pub document_number: Option<String>,

    /// Document type, if any keyword matched.
    pub document_type: Option<DocumentType>,

    /// Taxpayer identification number (ИНН), 10 to 12 digits.
    pub inn: Option<String>,

    /// Selected total amount; `None` exactly when `amounts` is empty.
    pub total_amount: Option<Decimal>,
}

impl ExtractionResult {
    /// Check whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
            && self.dates.is_empty()
            && self.document_number.is_none()
            && self.document_type.is_none()
            && self.inn.is_none()
            && self.total_amount.is_none()
    }
}

/// Closed set of accounting document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// VAT invoice (счёт-фактура).
    #[serde(rename = "Счёт-фактура")]
    TaxInvoice,
    /// Act of completed works or services (акт).
    #[serde(rename = "Акт")]
    Act,
    /// Invoice for payment (счёт).
    #[serde(rename = "Счёт")]
    Invoice,
    /// Delivery note (накладная).
    #[serde(rename = "Накладная")]
    DeliveryNote,
}

impl DocumentType {
    /// All document types, in classification priority order.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::TaxInvoice,
        DocumentType::Act,
        DocumentType::Invoice,
        DocumentType::DeliveryNote,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TaxInvoice => "Счёт-фактура",
            Self::Act => "Акт",
            Self::Invoice => "Счёт",
            Self::DeliveryNote => "Накладная",
        }
    }

    /// Parse from a label. Accepts both `ё` and `е` spellings.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace('ё', "е");
        match normalized.as_str() {
            "счет-фактура" => Some(Self::TaxInvoice),
            "акт" => Some(Self::Act),
            "счет" => Some(Self::Invoice),
            "накладная" => Some(Self::DeliveryNote),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extraction outcome for one document, as handed back to clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Extracted fields.
    pub extracted: ExtractionResult,

    /// Text the fields were extracted from (empty when OCR failed).
    pub raw_text: String,

    /// Notes about fields that could not be extracted.
    pub warnings: Vec<String>,

    /// Recognizer failure, if the OCR collaborator did not deliver text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_error: Option<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ScanReport {
    /// Whether the recognizer delivered text.
    pub fn is_success(&self) -> bool {
        self.ocr_error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_empty_result_serializes_all_keys() {
        let json = serde_json::to_value(ExtractionResult::default()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "amounts": [],
                "dates": [],
                "documentNumber": null,
                "documentType": null,
                "inn": null,
                "totalAmount": null
            })
        );
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let result = ExtractionResult {
            amounts: vec![Decimal::from_str("1234.56").unwrap()],
            total_amount: Some(Decimal::from_str("1234.56").unwrap()),
            document_type: Some(DocumentType::TaxInvoice),
            ..Default::default()
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["amounts"][0].as_f64(), Some(1234.56));
        assert_eq!(json["totalAmount"].as_f64(), Some(1234.56));
        assert_eq!(json["documentType"], "Счёт-фактура");
    }

    #[test]
    fn test_document_type_labels() {
        for doc_type in DocumentType::ALL {
            assert_eq!(DocumentType::from_label(doc_type.label()), Some(doc_type));
        }
        assert_eq!(DocumentType::from_label("счет-фактура"), Some(DocumentType::TaxInvoice));
        assert_eq!(DocumentType::from_label("договор"), None);
    }

    #[test]
    fn test_is_empty() {
        assert!(ExtractionResult::default().is_empty());

        let result = ExtractionResult {
            inn: Some("7707083893".to_string()),
            ..Default::default()
        };
        assert!(!result.is_empty());
    }
}

//! Core library for extracting financial fields from recognized documents.
//!
//! This crate provides:
//! - Rule-based extraction of amounts, dates, document number, document type
//!   and ИНН from OCR text of invoices, acts and delivery notes
//! - Result models serializable to the client-facing JSON shape
//! - The seam to the external OCR collaborator
//!
//! Extraction is a pure function of the text: it never fails and holds no
//! shared mutable state, so one parser can serve many threads.

pub mod error;
pub mod extraction;
pub mod models;
pub mod ocr;

pub use error::{FincrError, OcrError, Result};
pub use extraction::{DocumentExtractor, DocumentParser, RuleBasedParser};
pub use models::config::{FincrConfig, TotalStrategy};
pub use models::document::{DocumentType, ExtractionResult, ScanReport};
pub use ocr::{PlainTextRecognizer, TextRecognizer, VisionResponseRecognizer};

/// Extract financial fields from text with default settings.
pub fn extract_fields(text: &str) -> ExtractionResult {
    RuleBasedParser::new().parse(text)
}

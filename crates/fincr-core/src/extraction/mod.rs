//! Financial field extraction module.

mod parser;
pub mod rules;

pub use parser::{DocumentParser, RuleBasedParser};

use crate::models::document::ScanReport;
use crate::ocr::TextRecognizer;

/// Trait for extractors that produce a full scan report.
pub trait DocumentExtractor {
    /// Extract fields from already-recognized text.
    fn extract_from_text(&self, text: &str) -> ScanReport;

    /// Recognize an image with `recognizer` and extract fields from the text.
    ///
    /// A recognizer failure is not an error: the report carries an empty
    /// result and the failure message.
    fn extract_from_image(&self, recognizer: &dyn TextRecognizer, image: &[u8]) -> ScanReport;
}

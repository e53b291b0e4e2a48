//! Seam to the external OCR collaborator.
//!
//! Recognition itself happens elsewhere; this module defines the interface
//! and adapters for payloads that already contain recognized text.

mod vision;

pub use vision::{
    TextAnnotation, VisionBlock, VisionLine, VisionResponse, VisionResponseRecognizer,
    VisionResult, VisionWord,
};

use crate::error::OcrError;

/// Something that turns document image bytes into recognized text.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in `image`. Lines are joined with `\n`.
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;

    /// Recognizer name used in logs.
    fn name(&self) -> &str {
        "recognizer"
    }
}

/// Recognizer for payloads that already are UTF-8 text (OCR dumps).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRecognizer;

impl TextRecognizer for PlainTextRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let text = std::str::from_utf8(image).map_err(|e| OcrError::Decode(e.to_string()))?;
        // Strip a UTF-8 byte order mark left by some exporters
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }

    fn name(&self) -> &str {
        "plain-text"
    }
}

//! Error types for the fincr-core library.
//!
//! Field extraction itself never fails: a pattern that does not match yields
//! an absent field. These errors cover the collaborators around it.

use thiserror::Error;

/// Main error type for the fincr library.
#[derive(Error, Debug)]
pub enum FincrError {
    /// OCR collaborator error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by a text recognizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    /// The recognition service could not be reached or refused the request.
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),

    /// The payload could not be decoded as text.
    #[error("failed to decode recognized text: {0}")]
    Decode(String),

    /// The recognizer answered with something that is not a recognition result.
    #[error("invalid recognizer response: {0}")]
    InvalidResponse(String),

    /// The recognizer answered, but without any text annotation.
    #[error("recognizer returned no text")]
    EmptyResponse,
}

/// Result type for the fincr library.
pub type Result<T> = std::result::Result<T, FincrError>;

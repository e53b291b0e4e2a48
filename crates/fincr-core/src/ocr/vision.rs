//! Cloud Vision `recognizeText` response handling.
//!
//! Response shape: `result.textAnnotation.blocks[].lines[].words[].text`.

use serde::{Deserialize, Serialize};

use super::TextRecognizer;
use crate::error::OcrError;

/// Top-level `recognizeText` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResponse {
    #[serde(default)]
    pub result: Option<VisionResult>,
}

/// Recognition result wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResult {
    #[serde(default)]
    pub text_annotation: Option<TextAnnotation>,
}

/// Text annotation for a whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    #[serde(default)]
    pub blocks: Vec<VisionBlock>,
}

/// A block of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionBlock {
    #[serde(default)]
    pub lines: Vec<VisionLine>,
}

/// A recognized line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionLine {
    #[serde(default)]
    pub words: Vec<VisionWord>,
}

/// A recognized word.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionWord {
    pub text: String,
}

impl VisionResponse {
    /// Parse a response from JSON bytes.
    pub fn from_slice(payload: &[u8]) -> Result<Self, OcrError> {
        serde_json::from_slice(payload).map_err(|e| OcrError::InvalidResponse(e.to_string()))
    }

    /// Join words with spaces and lines with newlines.
    ///
    /// Returns `None` when the response carries no text annotation.
    pub fn text(&self) -> Option<String> {
        let annotation = self.result.as_ref()?.text_annotation.as_ref()?;

        let lines: Vec<String> = annotation
            .blocks
            .iter()
            .flat_map(|block| block.lines.iter())
            .map(|line| {
                line.words
                    .iter()
                    .map(|word| word.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        Some(lines.join("\n"))
    }
}

/// Recognizer for payloads holding a saved `recognizeText` JSON response.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionResponseRecognizer;

impl TextRecognizer for VisionResponseRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        VisionResponse::from_slice(image)?
            .text()
            .ok_or(OcrError::EmptyResponse)
    }

    fn name(&self) -> &str {
        "vision-response"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "result": {
            "textAnnotation": {
                "width": "1240",
                "blocks": [
                    {"lines": [
                        {"text": "Счёт № 12", "words": [{"text": "Счёт"}, {"text": "№"}, {"text": "12"}]},
                        {"words": [{"text": "ИНН"}, {"text": "7707083893"}]}
                    ]},
                    {"lines": [
                        {"words": [{"text": "Итого:"}, {"text": "1"}, {"text": "200,00"}, {"text": "руб"}]}
                    ]}
                ]
            }
        }
    }"#;

    #[test]
    fn test_join_lines_and_words() {
        let text = VisionResponseRecognizer.recognize(RESPONSE.as_bytes()).unwrap();
        assert_eq!(text, "Счёт № 12\nИНН 7707083893\nИтого: 1 200,00 руб");
    }

    #[test]
    fn test_missing_annotation() {
        let result = VisionResponseRecognizer.recognize(br#"{"result": {}}"#);
        assert_eq!(result, Err(OcrError::EmptyResponse));
    }

    #[test]
    fn test_not_json() {
        let result = VisionResponseRecognizer.recognize(b"not json");
        assert!(matches!(result, Err(OcrError::InvalidResponse(_))));
    }
}

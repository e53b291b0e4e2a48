//! WASM bindings for financial field extraction.
//!
//! Recognition happens elsewhere (in the browser or a cloud service); these
//! bindings take the recognized text, or a saved recognizer response, and
//! return the extracted fields as plain JS objects.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use fincr_core::extraction::rules;
use fincr_core::ocr::VisionResponse;
use fincr_core::{DocumentParser, ExtractionResult, RuleBasedParser, TotalStrategy};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js(result: &ExtractionResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn vision_text(response: &str) -> Result<String, JsValue> {
    let response = VisionResponse::from_slice(response.as_bytes())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(response.text().unwrap_or_default())
}

/// Extract financial fields from recognized text.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&fincr_core::extract_fields(text))
}

/// Extract financial fields from a `recognizeText` JSON response.
///
/// A response without text annotations yields an empty result; malformed JSON
/// is an error.
#[wasm_bindgen]
pub fn extract_from_vision_response(response: &str) -> Result<JsValue, JsValue> {
    let text = vision_text(response)?;
    to_js(&fincr_core::extract_fields(&text))
}

/// Parse an amount as written in a document (e.g. "1 234,56").
#[wasm_bindgen]
pub fn parse_amount(amount: &str) -> Option<f64> {
    rules::parse_amount(amount).and_then(|d| d.to_f64())
}

/// Format an amount with space-grouped thousands and a decimal comma (1 234,56).
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> String {
    Decimal::from_f64(amount)
        .map(rules::format_amount)
        .unwrap_or_else(|| amount.to_string())
}

/// Parse a DD.MM.YYYY (or DD.MM.YY) date into ISO format.
#[wasm_bindgen]
pub fn parse_date(date: &str) -> Option<String> {
    rules::parse_date_candidate(date).map(|d| d.to_string())
}

/// Field extractor class for browser use.
#[wasm_bindgen]
pub struct FieldExtractor {
    parser: RuleBasedParser,
}

#[wasm_bindgen]
impl FieldExtractor {
    /// Create a new field extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: RuleBasedParser::new(),
        }
    }

    /// Prefer amounts following a total label when choosing the total.
    #[wasm_bindgen]
    pub fn set_prefer_labeled(&mut self, prefer: bool) {
        let strategy = if prefer {
            TotalStrategy::PreferLabeled
        } else {
            TotalStrategy::Maximum
        };
        self.parser = RuleBasedParser::new().with_total_strategy(strategy);
    }

    /// Whether labeled totals are preferred.
    #[wasm_bindgen(getter)]
    pub fn prefer_labeled(&self) -> bool {
        self.parser.total_strategy() == TotalStrategy::PreferLabeled
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Extract fields from a `recognizeText` JSON response.
    #[wasm_bindgen]
    pub fn extract_vision(&self, response: &str) -> Result<JsValue, JsValue> {
        let text = vision_text(response)?;
        to_js(&self.parser.parse(&text))
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_amount() {
        let amount = parse_amount("1 234,56");
        assert!(amount.is_some());
        assert!((amount.unwrap() - 1234.56).abs() < 0.01);
        assert_eq!(parse_amount("abc"), None);
    }

    #[wasm_bindgen_test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.56), "1 234,56");
    }

    #[wasm_bindgen_test]
    fn test_parse_date() {
        assert_eq!(parse_date("15.03.2024").as_deref(), Some("2024-03-15"));
        assert_eq!(parse_date("31.02.2024"), None);
    }

    #[wasm_bindgen_test]
    fn test_vision_text() {
        let response = r#"{"result":{"textAnnotation":{"blocks":[{"lines":[{"words":[{"text":"Итого"},{"text":"100,00"},{"text":"руб"}]}]}]}}}"#;
        assert_eq!(vision_text(response).unwrap(), "Итого 100,00 руб");
        assert_eq!(vision_text("{}").unwrap(), "");
    }

    #[wasm_bindgen_test]
    fn test_extractor_strategy() {
        let mut extractor = FieldExtractor::new();
        assert!(!extractor.prefer_labeled());
        extractor.set_prefer_labeled(true);
        assert!(extractor.prefer_labeled());
    }
}

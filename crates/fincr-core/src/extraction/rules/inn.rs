//! ИНН (Russian taxpayer identification number) extraction.
//!
//! Any run of 10 to 12 digits after the label is accepted; checksums are not
//! verified. A longer run is rejected rather than truncated.

use super::{ExtractionMatch, FieldExtractor, MatchRule};
use super::patterns::INN_PATTERN;

/// ИНН field extractor.
pub struct InnExtractor;

impl InnExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InnExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InnExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();
        let mut start = 0;

        // Resume after the digits, not after the consumed terminator, so a
        // label directly following an ИНН is still seen.
        while let Some(caps) = INN_PATTERN.captures_at(text, start) {
            let (Some(whole), Some(inn)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let source = &text[whole.start()..inn.end()];
            results.push(
                ExtractionMatch::new(inn.as_str().to_string(), MatchRule::TaxpayerId, source)
                    .with_position(inn.start(), inn.end()),
            );
            start = inn.end();
        }

        results
    }
}

/// Extract the first ИНН from text.
pub fn extract_inn(text: &str) -> Option<String> {
    InnExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_entity_and_individual() {
        assert_eq!(extract_inn("ИНН: 7707083893"), Some("7707083893".to_string()));
        assert_eq!(extract_inn("инн 500100732259\n"), Some("500100732259".to_string()));
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(extract_inn("ИНН: 123456789"), None);
        assert_eq!(extract_inn("ИНН 1234567890123"), None);
    }

    #[test]
    fn test_combined_kpp_label() {
        assert_eq!(
            extract_inn("ИНН/КПП 7707083893/773601001"),
            Some("7707083893".to_string())
        );
    }

    #[test]
    fn test_first_of_several() {
        let text = "Продавец ИНН 7707083893\nПокупатель ИНН 7736207543";
        assert_eq!(extract_inn(text), Some("7707083893".to_string()));

        let all = InnExtractor::new().extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].value, "7736207543");
    }

    #[test]
    fn test_label_required() {
        assert_eq!(extract_inn("7707083893"), None);
        assert_eq!(extract_inn("КПП 770701001 7707083893"), None);
    }

    #[test]
    fn test_label_glued_to_previous_word() {
        assert_eq!(
            extract_inn("ПоставщикИНН 7707083893"),
            Some("7707083893".to_string())
        );
    }

    #[test]
    fn test_adjacent_labels() {
        let all = InnExtractor::new().extract_all("ИНН 7707083893ИНН 7736207543");

        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["7707083893", "7736207543"]);
        assert_eq!(all[1].position, Some((24, 34)));
    }
}

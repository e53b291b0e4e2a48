//! Document number extraction ("№ 123/45", "номер 17", "Счёт 2024-15").

use super::{ExtractionMatch, FieldExtractor, MatchRule};
use super::patterns::DOCUMENT_NUMBER;

/// Document number extractor.
pub struct DocumentNumberExtractor;

impl DocumentNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocumentNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DocumentNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = DOCUMENT_NUMBER.captures(text)?;
        let number = caps.get(1)?;

        Some(
            ExtractionMatch::new(number.as_str().to_string(), MatchRule::DocumentNumber, &caps[0])
                .with_position(number.start(), number.end()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DOCUMENT_NUMBER
            .captures_iter(text)
            .filter_map(|caps| {
                let number = caps.get(1)?;
                Some(
                    ExtractionMatch::new(
                        number.as_str().to_string(),
                        MatchRule::DocumentNumber,
                        &caps[0],
                    )
                    .with_position(number.start(), number.end()),
                )
            })
            .collect()
    }
}

/// Extract the first document number from text.
pub fn extract_document_number(text: &str) -> Option<String> {
    DocumentNumberExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_sign() {
        assert_eq!(extract_document_number("Акт №123/45"), Some("123/45".to_string()));
        assert_eq!(extract_document_number("Акт № 17-3"), Some("17-3".to_string()));
        assert_eq!(extract_document_number("№#: 42"), Some("42".to_string()));
    }

    #[test]
    fn test_word_labels() {
        assert_eq!(extract_document_number("НОМЕР: 2024"), Some("2024".to_string()));
        assert_eq!(extract_document_number("Счет 15 от 01.01.2025"), Some("15".to_string()));
        assert_eq!(extract_document_number("Счёт 16"), Some("16".to_string()));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Счёт-фактура № 88 к платёжке № 99";
        assert_eq!(extract_document_number(text), Some("88".to_string()));

        let all = DocumentNumberExtractor::new().extract_all(text);
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["88", "99"]);
    }

    #[test]
    fn test_label_inside_word_ignored() {
        assert_eq!(extract_document_number("Расчет 500"), None);
        assert_eq!(extract_document_number("№ без номера"), None);
    }

    #[test]
    fn test_only_one_separator_kept() {
        assert_eq!(extract_document_number("№ 1/2/3"), Some("1/2".to_string()));
    }
}

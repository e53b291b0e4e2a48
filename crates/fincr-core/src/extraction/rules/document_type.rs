//! Document type classification.
//!
//! An ordered decision table: the first keyword found decides the type. The
//! compound "счёт-фактура" is tested before the bare "счёт" it contains.

use regex::Regex;

use super::patterns::{ACT_KEYWORD, DELIVERY_NOTE_KEYWORD, INVOICE_KEYWORD, TAX_INVOICE_KEYWORD};
use crate::models::document::DocumentType;

/// Keyword-based document type classifier.
pub struct DocumentTypeClassifier {
    rules: [(&'static Regex, DocumentType); 4],
}

impl DocumentTypeClassifier {
    pub fn new() -> Self {
        Self {
            rules: [
                (&*TAX_INVOICE_KEYWORD, DocumentType::TaxInvoice),
                (&*ACT_KEYWORD, DocumentType::Act),
                (&*INVOICE_KEYWORD, DocumentType::Invoice),
                (&*DELIVERY_NOTE_KEYWORD, DocumentType::DeliveryNote),
            ],
        }
    }

    /// Classify the whole text; `None` if no keyword is present.
    pub fn classify(&self, text: &str) -> Option<DocumentType> {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, doc_type)| *doc_type)
    }
}

impl Default for DocumentTypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify document text.
pub fn classify_document(text: &str) -> Option<DocumentType> {
    DocumentTypeClassifier::new().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keywords() {
        assert_eq!(classify_document("АКТ № 5 выполненных работ"), Some(DocumentType::Act));
        assert_eq!(classify_document("Счет на оплату № 12"), Some(DocumentType::Invoice));
        assert_eq!(classify_document("Товарная накладная ТОРГ-12"), Some(DocumentType::DeliveryNote));
        assert_eq!(classify_document("Счёт-фактура № 1"), Some(DocumentType::TaxInvoice));
    }

    #[test]
    fn test_tax_invoice_before_invoice() {
        assert_eq!(classify_document("СЧЕТ ФАКТУРА 17"), Some(DocumentType::TaxInvoice));
    }

    #[test]
    fn test_priority_over_later_keywords() {
        let text = "Акт сверки\nприложение: Счёт-фактура № 3, накладная № 4";
        assert_eq!(classify_document(text), Some(DocumentType::TaxInvoice));

        let text = "Накладная к акту № 9 по счету 14";
        assert_eq!(classify_document(text), Some(DocumentType::Act));
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(classify_document("Договор поставки"), None);
        assert_eq!(classify_document("Контактный телефон"), None);
        assert_eq!(classify_document(""), None);
    }

    #[test]
    fn test_act_keyword_starts_a_word() {
        assert_eq!(classify_document("Контракт на поставку"), None);
        assert_eq!(
            classify_document("Фактическая отгрузка, накладная"),
            Some(DocumentType::DeliveryNote)
        );
        assert_eq!(classify_document("АКТ выполненных работ"), Some(DocumentType::Act));
    }
}

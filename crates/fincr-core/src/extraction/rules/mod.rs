//! Rule-based field extractors for Russian accounting documents.

pub mod amounts;
pub mod dates;
pub mod document_number;
pub mod document_type;
pub mod inn;
pub mod patterns;

pub use amounts::{extract_amounts, format_amount, normalize_amount, parse_amount, AmountExtractor};
pub use dates::{extract_dates, parse_date_candidate, DateExtractor};
pub use document_number::{extract_document_number, DocumentNumberExtractor};
pub use document_type::{classify_document, DocumentTypeClassifier};
pub use inn::{extract_inn, InnExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in discovery order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Pattern family that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// Number after a total label ("итого", "сумма", "к оплате", "всего").
    LabeledTotal,
    /// Number with two fractional digits followed by a currency marker.
    CurrencyDecimal,
    /// Whitespace-delimited grouped number followed by a currency marker.
    CurrencyGrouped,
    /// `dd.mm.yyyy` with `.`, `/` or `-` separators.
    FullYearDate,
    /// `dd.mm.yy`.
    ShortYearDate,
    /// Date after "от" or "дата".
    LabeledDate,
    /// Digits after "№", "номер" or "счёт".
    DocumentNumber,
    /// Digits after "ИНН".
    TaxpayerId,
}

/// A single extracted candidate with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Pattern family that matched.
    pub rule: MatchRule,
    /// Byte span of the captured value in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: MatchRule, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

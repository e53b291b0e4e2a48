//! Common regex patterns for Russian accounting documents.
//!
//! Currency markers are `руб` (also matches `руб.`, `рублей`) and `₽`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amounts (local format: 1 234,56 or 1,234.56 or 1234.56)
    pub static ref LABELED_TOTAL: Regex = Regex::new(
        r"(?i)(?:итого|сумма|к\s+оплате|всего)[:\s]*(\d{1,3}(?:[ \u{00a0},]\d{3})+(?:[.,]\d+)?|\d+(?:[.,]\d+)?)\s*(?:руб|₽)?"
    ).unwrap();

    pub static ref CURRENCY_DECIMAL: Regex = Regex::new(
        r"(?i)(\d{1,3}(?:[ \u{00a0},]\d{3})+[.,]\d{2}|\d+[.,]\d{2})\s*(?:руб|₽)"
    ).unwrap();

    pub static ref CURRENCY_GROUPED: Regex = Regex::new(
        r"(?im)(?:^|\s)(\d{1,3}(?:[ \u{00a0},]\d{3})*(?:[.,]\d{2})?)\s*(?:руб|₽)"
    ).unwrap();

    // Dates (kept as literal substrings)
    pub static ref DATE_FULL_YEAR: Regex = Regex::new(
        r"(\d{2}[./\-]\d{2}[./\-]\d{4})"
    ).unwrap();

    pub static ref DATE_SHORT_YEAR: Regex = Regex::new(
        r"(\d{2}\.\d{2}\.\d{2})"
    ).unwrap();

    pub static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)(?:от|дата)[:\s]*(\d{2}[./\-]\d{2}[./\-]\d{2,4})"
    ).unwrap();

    // Document number
    pub static ref DOCUMENT_NUMBER: Regex = Regex::new(
        r"(?i)(?:№|\bномер|\bсч[её]т)[:\s#]*(\d+(?:[/\-]\d+)?)"
    ).unwrap();

    // Document type keywords
    pub static ref TAX_INVOICE_KEYWORD: Regex = Regex::new(
        r"(?i)\bсч[её]т[\s\-–]*фактур"
    ).unwrap();

    pub static ref ACT_KEYWORD: Regex = Regex::new(
        r"(?i)\bакт"
    ).unwrap();

    pub static ref INVOICE_KEYWORD: Regex = Regex::new(
        r"(?i)\bсч[её]т"
    ).unwrap();

    pub static ref DELIVERY_NOTE_KEYWORD: Regex = Regex::new(
        r"(?i)накладн"
    ).unwrap();

    // Taxpayer ID (ИНН, optionally as the combined ИНН/КПП label)
    pub static ref INN_PATTERN: Regex = Regex::new(
        r"(?i)ИНН(?:\s*/\s*КПП)?[:\s]*(\d{10,12})(?:\D|$)"
    ).unwrap();
}

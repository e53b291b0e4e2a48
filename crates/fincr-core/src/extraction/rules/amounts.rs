//! Amount extraction for Russian accounting documents.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::{ExtractionMatch, FieldExtractor, MatchRule};
use super::patterns::{CURRENCY_DECIMAL, CURRENCY_GROUPED, LABELED_TOTAL};
use crate::models::config::TotalStrategy;

/// Amount field extractor.
///
/// Scans three pattern families independently over the whole text, so one
/// number may be reported by several families.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Pattern families in scan order.
    fn families() -> [(&'static Regex, MatchRule); 3] {
        [
            (&*LABELED_TOTAL, MatchRule::LabeledTotal),
            (&*CURRENCY_DECIMAL, MatchRule::CurrencyDecimal),
            (&*CURRENCY_GROUPED, MatchRule::CurrencyGrouped),
        ]
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (pattern, rule) in Self::families() {
            for caps in pattern.captures_iter(text) {
                let Some(numeral) = caps.get(1) else {
                    continue;
                };

                match parse_amount(numeral.as_str()) {
                    Some(amount) if amount > Decimal::ZERO => {
                        results.push(
                            ExtractionMatch::new(amount, rule, numeral.as_str())
                                .with_position(numeral.start(), numeral.end()),
                        );
                    }
                    _ => trace!("Discarding amount candidate {:?}", numeral.as_str()),
                }
            }
        }

        results
    }
}

/// Amount candidates found in a document.
#[derive(Debug, Clone, Default)]
pub struct DocumentAmounts {
    /// All candidates, in discovery order.
    pub candidates: Vec<ExtractionMatch<Decimal>>,
}

impl DocumentAmounts {
    /// Candidate values, in discovery order.
    pub fn values(&self) -> Vec<Decimal> {
        self.candidates.iter().map(|m| m.value).collect()
    }

    /// Largest candidate.
    pub fn maximum(&self) -> Option<Decimal> {
        self.candidates.iter().map(|m| m.value).max()
    }

    /// Largest candidate that followed a total label.
    pub fn labeled_maximum(&self) -> Option<Decimal> {
        self.candidates
            .iter()
            .filter(|m| m.rule == MatchRule::LabeledTotal)
            .map(|m| m.value)
            .max()
    }

    /// Select the total amount according to `strategy`.
    pub fn total(&self, strategy: TotalStrategy) -> Option<Decimal> {
        match strategy {
            TotalStrategy::Maximum => self.maximum(),
            TotalStrategy::PreferLabeled => self.labeled_maximum().or_else(|| self.maximum()),
        }
    }
}

/// Extract amounts from document text.
pub fn extract_amounts(text: &str) -> DocumentAmounts {
    DocumentAmounts {
        candidates: AmountExtractor::new().extract_all(text),
    }
}

/// Normalize a matched numeral to a plain decimal literal.
///
/// Whitespace is removed. A comma followed by exactly three digits separates
/// thousands and is dropped; any other comma is the decimal point.
pub fn normalize_amount(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let mut normalized = String::with_capacity(compact.len());
    for (i, group) in compact.split(',').enumerate() {
        if i > 0 {
            let digits = group.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits != 3 {
                normalized.push('.');
            }
        }
        normalized.push_str(group);
    }

    if normalized.ends_with('.') {
        normalized.pop();
    }

    normalized
}

/// Parse a locally formatted amount (e.g., "1 234,56" or "1,234.56").
///
/// Returns the signed value; callers decide whether non-positive values count.
/// Numerals too large for `Decimal` saturate to `Decimal::MAX`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_amount(s);

    match Decimal::from_str(&normalized) {
        Ok(amount) => Some(amount),
        Err(_) if is_plain_numeral(&normalized) => {
            trace!("Amount {:?} out of decimal range, saturating", normalized);
            Some(Decimal::MAX)
        }
        Err(_) => None,
    }
}

/// Digits with at most one decimal point.
fn is_plain_numeral(s: &str) -> bool {
    let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));
    !integer.is_empty()
        && integer.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Format amount in local style (1 234,56).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let Some((integer_part, decimal_part)) = s.split_once('.') else {
        return s;
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}

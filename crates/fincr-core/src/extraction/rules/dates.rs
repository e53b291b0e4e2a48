//! Date candidate extraction.
//!
//! Dates are reported as the literal matched substrings. Calendar validity is
//! not checked here; [`parse_date_candidate`] is available to consumers.
//! A dotted full-year date also yields its `dd.mm.yy` prefix as a second
//! candidate.

use chrono::NaiveDate;
use regex::Regex;

use super::{ExtractionMatch, FieldExtractor, MatchRule};
use super::patterns::{DATE_FULL_YEAR, DATE_LABELED, DATE_SHORT_YEAR};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Pattern families in scan order.
    fn families() -> [(&'static Regex, MatchRule); 3] {
        [
            (&*DATE_FULL_YEAR, MatchRule::FullYearDate),
            (&*DATE_SHORT_YEAR, MatchRule::ShortYearDate),
            (&*DATE_LABELED, MatchRule::LabeledDate),
        ]
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (pattern, rule) in Self::families() {
            for caps in pattern.captures_iter(text) {
                if let Some(date) = caps.get(1) {
                    results.push(
                        ExtractionMatch::new(date.as_str().to_string(), rule, &caps[0])
                            .with_position(date.start(), date.end()),
                    );
                }
            }
        }

        results
    }
}

/// Extract all date candidates from text, in discovery order.
pub fn extract_dates(text: &str) -> Vec<String> {
    DateExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Parse a date candidate (`dd.mm.yyyy`, `dd/mm/yy`, ...) into a calendar date.
///
/// Returns `None` for impossible dates such as "35.13.2099".
pub fn parse_date_candidate(candidate: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = candidate.trim().split(['.', '/', '-']).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year = parse_year(year)?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    match s.len() {
        // Two-digit year: 2000s for 00-50, 1900s for 51-99
        2 if year <= 50 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

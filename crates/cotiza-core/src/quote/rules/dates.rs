//! Date extraction for supplier quotes.

use chrono::NaiveDate;
use regex::Captures;
use tracing::debug;

use super::patterns::{DATE_DASH_DMY, DATE_DASH_YMD, DATE_SLASH_DMY};
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
///
/// Tries `D/M/YYYY`, `D-M-YYYY` and `YYYY-M-D` in that order; only the first
/// match of each pattern is considered.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        [&*DATE_SLASH_DMY, &*DATE_DASH_DMY, &*DATE_DASH_YMD]
            .iter()
            .filter_map(|pattern| pattern.captures(text))
            .find_map(|caps| {
                let date = date_from_captures(&caps)?;
                let full_match = caps.get(0)?;
                Some(
                    ExtractionMatch::new(date, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
    }
}

/// Build a date from three captured groups. A four-digit first group means
/// year-first, anything else day-first.
fn date_from_captures(caps: &Captures<'_>) -> Option<NaiveDate> {
    let (year, month, day) = if caps[1].len() == 4 {
        (&caps[1], &caps[2], &caps[3])
    } else {
        (&caps[3], &caps[2], &caps[1])
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Extract the quote date, if any pattern yields a valid calendar date.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let found = DateExtractor::new().extract(text)?;
    debug!("Date {} from {:?} at {:?}", found.value, found.source, found.position);
    Some(found.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_date_slash() {
        assert_eq!(extract_date("Fecha: 12/03/2024"), Some(ymd(2024, 3, 12)));
        assert_eq!(extract_date("1/2/2023"), Some(ymd(2023, 2, 1)));
    }

    #[test]
    fn test_extract_date_dash_day_first() {
        assert_eq!(extract_date("Data 05-11-2023"), Some(ymd(2023, 11, 5)));
    }

    #[test]
    fn test_extract_date_year_first() {
        assert_eq!(extract_date("emitido 2024-1-9"), Some(ymd(2024, 1, 9)));
    }

    #[test]
    fn test_slash_pattern_wins_over_later_patterns() {
        let text = "Vence 2024-12-31\nEmitido 15/01/2024";
        assert_eq!(extract_date(text), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_invalid_date_falls_through_to_next_pattern() {
        let text = "ref 31/02/2024 emitido 10-04-2024";
        assert_eq!(extract_date(text), Some(ymd(2024, 4, 10)));
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("sin fecha"), None);
        assert_eq!(extract_date("45/99/2024"), None);
    }

    #[test]
    fn test_match_position() {
        let found = DateExtractor::new().extract("Data: 12/03/2024").unwrap();
        assert_eq!(found.source, "12/03/2024");
        assert_eq!(found.position, Some((6, 16)));
    }
}

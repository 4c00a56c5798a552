//! Grand total extraction.

use rust_decimal::Decimal;
use tracing::debug;

use super::numbers::parse_quote_amount;
use super::patterns::TOTAL_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Extractor for amounts following a `TOTAL` keyword.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<Decimal>;

    /// Only the first `TOTAL` occurrence counts; an unparsable amount there
    /// leaves the total unset.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = TOTAL_AMOUNT.captures(text)?;
        let amount = caps.get(1)?;
        let value = parse_quote_amount(amount.as_str())?;
        Some(ExtractionMatch::new(value, &caps[0]).with_position(amount.start(), amount.end()))
    }
}

/// Extract the quote's grand total.
pub fn extract_total(text: &str) -> Option<Decimal> {
    let found = TotalExtractor::new().extract(text)?;
    debug!("Total {} from {:?} at {:?}", found.value, found.source, found.position);
    Some(found.value)
}

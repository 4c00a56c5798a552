//! Numeric token handling for quote lines.
//!
//! Quotes use `.` as thousands separator and `,` as decimal separator
//! (`1.250,50`), so normalization drops every `.` and turns `,` into `.`.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::quote::{MAX_QUANTITY, MIN_QUANTITY};

use super::patterns::NUMERIC_TOKEN;

/// Extract all numeric tokens from a line, left to right.
pub fn numeric_tokens(line: &str) -> Vec<&str> {
    NUMERIC_TOKEN.find_iter(line).map(|m| m.as_str()).collect()
}

/// Parse a quote-formatted amount (e.g. "1.250,50" or "125.000").
pub fn parse_quote_amount(token: &str) -> Option<Decimal> {
    let mut normalized = token.replace('.', "").replace(',', ".");
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if normalized.ends_with('.') {
        normalized.push('0');
    }
    Decimal::from_str(&normalized).ok()
}

/// Whether an amount is plausibly a price: strictly between 0.1 and 1 000 000.
pub fn is_price_shaped(amount: Decimal) -> bool {
    amount > Decimal::new(1, 1) && amount < Decimal::new(1_000_000, 0)
}

/// Parse a token as a price candidate.
pub fn parse_price(token: &str) -> Option<Decimal> {
    parse_quote_amount(token).filter(|a| is_price_shaped(*a))
}

/// Parse a token as a quantity: digits only once separators are removed,
/// within [`MIN_QUANTITY`, `MAX_QUANTITY`].
pub fn parse_quantity(token: &str) -> Option<u32> {
    let digits: String = token.chars().filter(|c| *c != '.' && *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|q| (MIN_QUANTITY..=MAX_QUANTITY).contains(q))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_quote_amount() {
        assert_eq!(parse_quote_amount("125.000"), Some(dec("125000")));
        assert_eq!(parse_quote_amount("1.250,50"), Some(dec("1250.50")));
        assert_eq!(parse_quote_amount("2,5"), Some(dec("2.5")));
        assert_eq!(parse_quote_amount("15,"), Some(dec("15")));
        assert_eq!(parse_quote_amount(",75"), Some(dec("0.75")));
        assert_eq!(parse_quote_amount("1,2,3"), None);
    }

    #[test]
    fn test_price_bounds_are_exclusive() {
        assert_eq!(parse_price("0,1"), None);
        assert_eq!(parse_price("0,11"), Some(dec("0.11")));
        assert_eq!(parse_price("999.999,99"), Some(dec("999999.99")));
        assert_eq!(parse_price("1.000.000"), None);
        assert_eq!(parse_price("0"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Some(3));
        assert_eq!(parse_quantity("1.000"), Some(1000));
        assert_eq!(parse_quantity("10.000"), Some(10_000));
        assert_eq!(parse_quantity("10.001"), None);
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("99999999999999"), None);
    }

    #[test]
    fn test_numeric_tokens() {
        assert_eq!(
            numeric_tokens("3 PC MOTOR 5.000,00 15.000,00"),
            vec!["3", "5.000,00", "15.000,00"]
        );
    }

    #[test]
    fn test_separator_only_tokens_parse_to_nothing() {
        assert_eq!(parse_quantity("."), None);
        assert_eq!(parse_quantity(",,"), None);
        assert_eq!(parse_price("."), None);
        assert_eq!(parse_price(","), None);
    }
}

//! Line item parsing.
//!
//! A quote row is read as a bag of numbers and words:
//!
//! - the first integer-looking run among the first three runs of digits and
//!   separators, if it is a plausible count, is the quantity;
//! - every price-shaped number is a price candidate, the last being the line
//!   total and the one before it the unit price;
//! - the remaining words, minus table noise, form the description.
//!
//! A small catalog code in the first columns can be read as the quantity.
//! Nothing on a bare OCR line distinguishes the two.

use crate::models::quote::LineItem;

use super::numbers::{numeric_tokens, parse_price, parse_quantity};
use super::patterns::WORD_TOKEN;
use super::vocabulary::CompiledVocabulary;

/// Numeric tokens examined when looking for the quantity.
const QUANTITY_LOOKAHEAD: usize = 3;

/// Parser turning one text line into a [`LineItem`].
#[derive(Debug, Clone)]
pub struct LineItemParser<'v> {
    vocabulary: &'v CompiledVocabulary,
    min_line_length: usize,
    max_description_words: usize,
}

impl<'v> LineItemParser<'v> {
    /// Create a parser with the default line length and description limits.
    pub fn new(vocabulary: &'v CompiledVocabulary) -> Self {
        Self {
            vocabulary,
            min_line_length: 10,
            max_description_words: 10,
        }
    }

    /// Set the minimum trimmed line length.
    pub fn with_min_line_length(mut self, length: usize) -> Self {
        self.min_line_length = length;
        self
    }

    /// Set the maximum number of description words.
    pub fn with_max_description_words(mut self, words: usize) -> Self {
        self.max_description_words = words;
        self
    }

    /// Parse a line, returning `None` for lines that are not item rows.
    pub fn parse(&self, line: &str) -> Option<LineItem> {
        let line = line.trim();
        if line.chars().count() < self.min_line_length {
            return None;
        }

        let numbers = numeric_tokens(line);
        if numbers.len() < 2 {
            return None;
        }

        let quantity = numbers
            .iter()
            .take(QUANTITY_LOOKAHEAD)
            .find_map(|token| parse_quantity(token));

        let prices: Vec<_> = numbers.iter().filter_map(|token| parse_price(token)).collect();
        let (unit_price, total) = match prices.as_slice() {
            [] => (None, None),
            [only] => (Some(*only), None),
            [.., unit, total] => (Some(*unit), Some(*total)),
        };

        let item = LineItem {
            code: None,
            quantity,
            unit: self.vocabulary.find_unit(line).map(str::to_string),
            description: self.description(line),
            brand: self.vocabulary.find_brand(line).map(str::to_string),
            unit_price,
            total,
        };

        item.is_meaningful().then_some(item)
    }

    fn description(&self, line: &str) -> Option<String> {
        let words: Vec<&str> = WORD_TOKEN
            .find_iter(line)
            .map(|m| m.as_str())
            .filter(|w| !self.vocabulary.is_stopword(w))
            .take(self.max_description_words)
            .collect();

        (!words.is_empty()).then(|| words.join(" "))
    }
}

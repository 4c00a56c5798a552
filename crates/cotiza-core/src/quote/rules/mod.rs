//! Rule-based field extractors for supplier quotes.

pub mod dates;
pub mod header;
pub mod items;
pub mod lines;
pub mod numbers;
pub mod patterns;
pub mod totals;
pub mod vocabulary;

pub use dates::{extract_date, DateExtractor};
pub use header::{extract_quote_number, extract_supplier, QuoteNumberExtractor};
pub use items::LineItemParser;
pub use lines::{locate_lines, LocatedLines};
pub use numbers::{is_price_shaped, numeric_tokens, parse_price, parse_quantity, parse_quote_amount};
pub use totals::{extract_total, TotalExtractor};
pub use vocabulary::CompiledVocabulary;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

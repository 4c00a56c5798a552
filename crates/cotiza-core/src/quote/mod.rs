//! Supplier quote extraction module.

mod parser;
pub mod reflow;
pub mod rules;

pub use parser::{ExtractionResult, HeuristicQuoteParser, QuoteParser};
pub use reflow::RowReflow;

use crate::error::ExtractionError;
use crate::models::quote::ParsedQuote;
use crate::ocr::OcrOutput;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for quote extractors.
pub trait QuoteExtractor {
    /// Extract quote data from OCR output.
    fn extract(&self, ocr_output: &OcrOutput) -> Result<ParsedQuote>;

    /// Extract quote data from plain text.
    fn extract_from_text(&self, text: &str) -> Result<ParsedQuote>;
}

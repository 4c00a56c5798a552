//! Heuristic supplier quote parser.

use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::{CotizaConfig, ExtractionConfig, Vocabulary};
use crate::models::quote::{LineItem, ParsedQuote};
use crate::ocr::{parse_detections, OcrOutput};

use super::reflow::RowReflow;
use super::rules::{
    extract_date, extract_quote_number, extract_supplier, extract_total, locate_lines,
    CompiledVocabulary, LineItemParser,
};
use super::{QuoteExtractor, Result};

/// Result of quote extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted quote data.
    pub quote: ParsedQuote,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Whether the date came from the document rather than the reference time.
    pub date_detected: bool,
    /// Whether coordinate reflow replaced the plain-text items.
    pub reflow_applied: bool,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for quote parsing.
pub trait QuoteParser {
    /// Parse a quote from OCR text and optional raw word detections.
    fn parse(&self, text: &str, detections: &[Value]) -> Result<ExtractionResult>;
}

/// Quote parser built on keyword tables and line heuristics.
#[derive(Debug, Clone)]
pub struct HeuristicQuoteParser {
    vocabulary: CompiledVocabulary,
    extraction: ExtractionConfig,
    reflow: RowReflow,
}

impl HeuristicQuoteParser {
    /// Create a parser with the default vocabulary and settings.
    pub fn new() -> Self {
        Self {
            vocabulary: CompiledVocabulary::default(),
            extraction: ExtractionConfig::default(),
            reflow: RowReflow::default(),
        }
    }

    /// Create a parser from a full configuration.
    pub fn from_config(config: &CotizaConfig) -> Result<Self> {
        Ok(Self {
            vocabulary: CompiledVocabulary::compile(&config.vocabulary)?,
            extraction: config.extraction.clone(),
            reflow: RowReflow::new(config.reflow.row_tolerance_px),
        })
    }

    /// Replace the keyword tables.
    pub fn with_vocabulary(mut self, vocabulary: &Vocabulary) -> Result<Self> {
        self.vocabulary = CompiledVocabulary::compile(vocabulary)?;
        Ok(self)
    }

    /// Enable or disable coordinate reflow.
    pub fn with_reflow(mut self, enabled: bool) -> Self {
        self.extraction.enable_reflow = enabled;
        self
    }

    /// Set the vertical row bucket size for reflow.
    pub fn with_row_tolerance(mut self, pixels: f64) -> Self {
        self.reflow = RowReflow::new(pixels);
        self
    }

    fn item_parser(&self) -> LineItemParser<'_> {
        LineItemParser::new(&self.vocabulary)
            .with_min_line_length(self.extraction.min_line_length)
            .with_max_description_words(self.extraction.max_description_words)
    }

    fn extract_line_items(&self, text: &str) -> Vec<LineItem> {
        let located = locate_lines(text, &self.vocabulary);
        let parser = self.item_parser();

        located
            .candidates(self.extraction.min_line_length)
            .into_iter()
            .filter_map(|line| parser.parse(line))
            .collect()
    }

    /// Parse with an explicit reference time used when the document has no date.
    ///
    /// Identical inputs and reference time always give identical quotes.
    pub fn parse_at(
        &self,
        text: &str,
        detections: &[Value],
        now: NaiveDateTime,
    ) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        if text.trim().is_empty() {
            return Err(ExtractionError::MissingInput);
        }

        info!(
            "Parsing quote from {} characters of text and {} detections",
            text.len(),
            detections.len()
        );

        let mut quote = ParsedQuote::new(now);

        quote.supplier = extract_supplier(text, &self.vocabulary);
        if quote.supplier.is_none() {
            warnings.push("Could not extract supplier".to_string());
        }

        let date = extract_date(text);
        let date_detected = date.is_some();
        match date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
            Some(date) => quote.date = date,
            None => warnings.push("Could not extract quote date, using extraction time".to_string()),
        }

        quote.quote_number = extract_quote_number(text);
        if quote.quote_number.is_none() {
            warnings.push("Could not extract quote number".to_string());
        }

        quote.items = self.extract_line_items(text);
        quote.total = extract_total(text);

        let mut reflow_applied = false;
        if self.extraction.enable_reflow && !detections.is_empty() {
            let (valid, skipped) = parse_detections(detections);
            warnings.extend(skipped);

            if let Some(items) = self.reflow.reflow(&valid, &self.item_parser()) {
                debug!(
                    "Coordinate reflow replaced {} plain-text items with {}",
                    quote.items.len(),
                    items.len()
                );
                quote.items = items;
                reflow_applied = true;
            }
        }

        if quote.items.is_empty() {
            warnings.push("Could not extract line items".to_string());
        }

        debug!(
            "Extracted quote {:?} with {} items",
            quote.quote_number,
            quote.items.len()
        );

        Ok(ExtractionResult {
            quote,
            warnings,
            date_detected,
            reflow_applied,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

impl Default for HeuristicQuoteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteParser for HeuristicQuoteParser {
    fn parse(&self, text: &str, detections: &[Value]) -> Result<ExtractionResult> {
        self.parse_at(text, detections, Local::now().naive_local())
    }
}

impl QuoteExtractor for HeuristicQuoteParser {
    fn extract(&self, ocr_output: &OcrOutput) -> Result<ParsedQuote> {
        self.parse(&ocr_output.text, &ocr_output.detections)
            .map(|r| r.quote)
    }

    fn extract_from_text(&self, text: &str) -> Result<ParsedQuote> {
        self.parse(text, &[]).map(|r| r.quote)
    }
}

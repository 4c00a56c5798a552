//! Core library for supplier quote OCR processing.
//!
//! This crate provides:
//! - Validation of untrusted word-level OCR detections
//! - Header extraction (supplier, date, quote number, grand total)
//! - Line item parsing from plain OCR text
//! - Row reconstruction from word coordinates

pub mod error;
pub mod models;
pub mod ocr;
pub mod quote;

pub use error::{CotizaError, DetectionError, ExtractionError, Result};
pub use models::config::{CotizaConfig, Vocabulary};
pub use models::quote::{LineItem, ParsedQuote};
pub use ocr::{parse_detections, read_detections, BoundingBox, Detection, OcrOutput, Point};
pub use quote::{ExtractionResult, HeuristicQuoteParser, QuoteExtractor, QuoteParser};

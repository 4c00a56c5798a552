//! Error types for the cotiza-core library.

use thiserror::Error;

/// Main error type for the cotiza library.
#[derive(Error, Debug)]
pub enum CotizaError {
    /// Quote extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// OCR input file has an unexpected shape.
    #[error("invalid OCR input: {0}")]
    Input(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to quote extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No OCR text was supplied.
    #[error("no text provided")]
    MissingInput,

    /// A configured keyword table could not be compiled.
    #[error("invalid vocabulary entry in {list}: {reason}")]
    InvalidVocabulary { list: String, reason: String },
}

/// Reasons an OCR detection is rejected at the input boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The detection is neither a `[bbox, text, score]` tuple nor an object.
    #[error("unrecognized detection shape")]
    UnrecognizedShape,

    /// The bounding box is not an array of points.
    #[error("bounding box is not a sequence")]
    NotASequence,

    /// The bounding box has no points.
    #[error("bounding box is empty")]
    EmptyBoundingBox,

    /// A point is not a two-element `[x, y]` pair.
    #[error("point {index} is not an [x, y] pair")]
    MalformedPoint { index: usize },

    /// A coordinate is not a finite number.
    #[error("point {index} has a non-numeric coordinate")]
    NonNumericCoordinate { index: usize },

    /// The recognized text is missing or not a string.
    #[error("missing recognized text")]
    MissingText,
}

/// Result type for the cotiza library.
pub type Result<T> = std::result::Result<T, CotizaError>;

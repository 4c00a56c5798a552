//! Word-level OCR detections.
//!
//! Detections come from an external OCR engine and are treated as untrusted.
//! Every raw JSON entry passes through [`Detection::try_from`] exactly once;
//! entries that fail validation are skipped by [`parse_detections`] and never
//! abort an extraction.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CotizaError, DetectionError};

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Bounding polygon of a detection, usually a quadrilateral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct BoundingBox {
    points: Vec<Point>,
}

impl TryFrom<Vec<Point>> for BoundingBox {
    type Error = DetectionError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        BoundingBox::new(points)
    }
}

impl From<BoundingBox> for Vec<Point> {
    fn from(bbox: BoundingBox) -> Self {
        bbox.points
    }
}

impl BoundingBox {
    /// Create a bounding box from at least one point.
    pub fn new(points: Vec<Point>) -> Result<Self, DetectionError> {
        if points.is_empty() {
            return Err(DetectionError::EmptyBoundingBox);
        }
        Ok(Self { points })
    }

    /// Points of the polygon.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mean of the points' coordinates.
    pub fn center(&self) -> (f64, f64) {
        let n = self.points.len() as f64;
        let x = self.points.iter().map(|p| p.x).sum::<f64>() / n;
        let y = self.points.iter().map(|p| p.y).sum::<f64>() / n;
        (x, y)
    }
}

impl TryFrom<&Value> for BoundingBox {
    type Error = DetectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let raw_points = value.as_array().ok_or(DetectionError::NotASequence)?;

        let points = raw_points
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let pair = raw
                    .as_array()
                    .filter(|p| p.len() == 2)
                    .ok_or(DetectionError::MalformedPoint { index })?;
                let x = pair[0].as_f64().filter(|v| v.is_finite());
                let y = pair[1].as_f64().filter(|v| v.is_finite());
                match (x, y) {
                    (Some(x), Some(y)) => Ok(Point { x, y }),
                    _ => Err(DetectionError::NonNumericCoordinate { index }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        BoundingBox::new(points)
    }
}

/// One recognized word with its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding polygon.
    pub bbox: BoundingBox,

    /// Recognized text.
    pub text: String,

    /// Engine confidence; its scale (0-1 or 0-100) depends on the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Detection {
    /// Create a detection from validated parts.
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }

    /// Center point of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        self.bbox.center()
    }
}

/// Accepts the tuple layout `[bbox, text, confidence]` used by EasyOCR and
/// PaddleOCR, or an object with `bbox`/`box`/`points`, `text` and
/// `confidence`/`score` keys.
impl TryFrom<&Value> for Detection {
    type Error = DetectionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let (bbox, text, confidence) = match value {
            Value::Array(parts) if parts.len() >= 2 => {
                (&parts[0], &parts[1], parts.get(2))
            }
            Value::Object(map) => {
                let bbox = ["bbox", "box", "points"]
                    .iter()
                    .find_map(|k| map.get(*k))
                    .ok_or(DetectionError::NotASequence)?;
                let text = map.get("text").ok_or(DetectionError::MissingText)?;
                let confidence = ["confidence", "score"].iter().find_map(|k| map.get(*k));
                (bbox, text, confidence)
            }
            _ => return Err(DetectionError::UnrecognizedShape),
        };

        let bbox = BoundingBox::try_from(bbox)?;
        let text = text.as_str().ok_or(DetectionError::MissingText)?;

        Ok(Detection::new(
            bbox,
            text,
            confidence.and_then(Value::as_f64),
        ))
    }
}

/// Output of an external OCR run: the recognized text and, optionally, the
/// raw word detections it was assembled from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Full text, one visual line per text line.
    pub text: String,

    /// Raw word detections, validated lazily by [`parse_detections`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detections: Vec<Value>,
}

impl OcrOutput {
    /// OCR output with text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detections: Vec::new(),
        }
    }

    /// Attach raw detections.
    pub fn with_detections(mut self, detections: Vec<Value>) -> Self {
        self.detections = detections;
        self
    }

    /// Load OCR text from a file, with detections from an optional JSON file.
    pub fn load(text_path: &Path, detections_path: Option<&Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(text_path)?;
        let detections = match detections_path {
            Some(path) => read_detections(path)?,
            None => Vec::new(),
        };
        Ok(Self { text, detections })
    }
}

/// Read raw detections from a JSON file.
///
/// The file holds either a bare array of detections or an object with a
/// `detections` array. Individual entries are not validated here.
pub fn read_detections(path: &Path) -> crate::Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    let detections = match serde_json::from_str::<Value>(&content)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("detections") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CotizaError::Input(format!(
                    "{} has no detections array",
                    path.display()
                )));
            }
        },
        _ => {
            return Err(CotizaError::Input(format!(
                "{} is not a detections array",
                path.display()
            )));
        }
    };

    debug!("Read {} raw detections from {}", detections.len(), path.display());
    Ok(detections)
}

/// Validate raw detections, keeping the well-formed ones in input order.
///
/// Returns the detections and one warning per skipped entry.
pub fn parse_detections(raw: &[Value]) -> (Vec<Detection>, Vec<String>) {
    let mut detections = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for (index, value) in raw.iter().enumerate() {
        match Detection::try_from(value) {
            Ok(detection) => detections.push(detection),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed detection");
                warnings.push(format!("Skipped detection {}: {}", index, e));
            }
        }
    }

    (detections, warnings)
}

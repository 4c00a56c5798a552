//! Row reconstruction from word coordinates.
//!
//! Plain OCR text breaks lines wherever the engine decided to, which often
//! splits or merges table rows. With word boxes available, words are bucketed
//! by vertical center and re-read left to right.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::quote::LineItem;
use crate::ocr::Detection;

use super::rules::LineItemParser;

/// Groups detections into visual rows.
#[derive(Debug, Clone)]
pub struct RowReflow {
    row_tolerance_px: f64,
}

impl RowReflow {
    /// Create a reflow with the given vertical bucket size.
    pub fn new(row_tolerance_px: f64) -> Self {
        Self { row_tolerance_px }
    }

    fn row_key(&self, y_center: f64) -> i64 {
        if self.row_tolerance_px > 0.0 {
            ((y_center / self.row_tolerance_px).floor() * self.row_tolerance_px) as i64
        } else {
            y_center.floor() as i64
        }
    }

    /// Reconstructed row texts, top to bottom.
    pub fn rows(&self, detections: &[Detection]) -> Vec<String> {
        let mut buckets: BTreeMap<i64, Vec<(f64, &str)>> = BTreeMap::new();

        for detection in detections {
            let (x, y) = detection.center();
            buckets
                .entry(self.row_key(y))
                .or_default()
                .push((x, detection.text.as_str()));
        }

        buckets
            .into_values()
            .map(|mut words| {
                words.sort_by(|a, b| a.0.total_cmp(&b.0));
                words
                    .iter()
                    .map(|(_, text)| *text)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Parse every reconstructed row into line items.
    ///
    /// Returns `None` when no row yields an item, so callers keep their
    /// plain-text items.
    pub fn reflow(&self, detections: &[Detection], parser: &LineItemParser<'_>) -> Option<Vec<LineItem>> {
        let rows = self.rows(detections);
        let items: Vec<LineItem> = rows.iter().filter_map(|row| parser.parse(row)).collect();

        debug!(
            "Reflowed {} detections into {} rows, {} items",
            detections.len(),
            rows.len(),
            items.len()
        );

        (!items.is_empty()).then_some(items)
    }
}

impl Default for RowReflow {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{BoundingBox, Point};
    use crate::quote::rules::CompiledVocabulary;
    use rust_decimal::Decimal;

    fn word(text: &str, x: f64, y: f64) -> Detection {
        let points = vec![
            Point { x, y },
            Point { x: x + 8.0, y },
            Point { x: x + 8.0, y: y + 6.0 },
            Point { x, y: y + 6.0 },
        ];
        Detection::new(BoundingBox::new(points).unwrap(), text, Some(0.9))
    }

    #[test]
    fn test_rows_sorted_by_position() {
        let detections = vec![
            word("MOTOR", 30.0, 52.0),
            word("TOTAL", 0.0, 80.0),
            word("3", 0.0, 51.0),
            word("PC", 10.0, 53.0),
        ];

        let rows = RowReflow::default().rows(&detections);
        assert_eq!(rows, vec!["3 PC MOTOR".to_string(), "TOTAL".to_string()]);
    }

    #[test]
    fn test_bucket_boundaries() {
        // Centers at y=9 and y=11 straddle the 10px bucket edge.
        let detections = vec![word("A", 0.0, 6.0), word("B", 10.0, 8.0)];
        let rows = RowReflow::default().rows(&detections);
        assert_eq!(rows, vec!["A".to_string(), "B".to_string()]);

        let rows = RowReflow::new(20.0).rows(&detections);
        assert_eq!(rows, vec!["A B".to_string()]);
    }

    #[test]
    fn test_reflow_parses_rows() {
        let vocab = CompiledVocabulary::default();
        let parser = LineItemParser::new(&vocab);
        let detections = vec![
            word("15000", 90.0, 100.0),
            word("PC", 10.0, 100.0),
            word("3", 0.0, 100.0),
            word("5000", 60.0, 100.0),
            word("MOTOR", 30.0, 100.0),
        ];

        let items = RowReflow::default().reflow(&detections, &parser).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, Some(3));
        assert_eq!(items[0].unit, Some("PC".to_string()));
        assert_eq!(items[0].unit_price, Some(Decimal::new(5000, 0)));
        assert_eq!(items[0].total, Some(Decimal::new(15000, 0)));
    }

    #[test]
    fn test_reflow_without_items() {
        let vocab = CompiledVocabulary::default();
        let parser = LineItemParser::new(&vocab);
        let detections = vec![word("ENERLUZ", 0.0, 0.0), word("LTDA", 40.0, 0.0)];

        assert_eq!(RowReflow::default().reflow(&detections, &parser), None);
        assert_eq!(RowReflow::default().reflow(&[], &parser), None);
    }
}

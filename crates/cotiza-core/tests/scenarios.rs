//! End-to-end extraction scenarios.

use chrono::{NaiveDate, NaiveDateTime};
use cotiza_core::{ExtractionError, HeuristicQuoteParser, OcrOutput, QuoteExtractor, QuoteParser};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn word(text: &str, x: f64, y: f64) -> Value {
    json!([[[x, y], [x + 8.0, y], [x + 8.0, y + 6.0], [x, y + 6.0]], text, 0.91])
}

fn motor_row() -> Vec<Value> {
    vec![
        word("PC", 10.0, 200.0),
        word("3", 0.0, 200.0),
        word("MOTOR", 30.0, 201.0),
        word("5000", 60.0, 199.0),
        word("15000", 90.0, 200.0),
    ]
}

const NOISY_QUOTE: &str = "\
ELECTRO SUR LTDA
Presupuesto N° 77-2024
Fecha 3/7/2024
CODIGO DESCRIPCION CANTIDAD PRECIO TOTAL
10 UND LAMPARA LED PHILIPS 9W 3.500 35.000
0,01 0,02 0,03
2500000 1 3
99999 88888 CONTACTOR 12.000,50 1.500.000
KG 5 CEMENTO 0 0
TOTAL: 35.000";

#[test]
fn test_enerluz_quote() {
    let text = "FACTURA ENERLUZ S.A.\n12/03/2024\n2 UND CABLE INDUSCABOS 15000 30000\n";
    let quote = HeuristicQuoteParser::new()
        .parse_at(text, &[], reference_time())
        .unwrap()
        .quote;

    assert!(quote.supplier.as_deref().unwrap().contains("ENERLUZ"));
    assert_eq!(
        quote.date,
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert_eq!(quote.items.len(), 1);

    let item = &quote.items[0];
    assert_eq!(item.quantity, Some(2));
    assert_eq!(item.unit.as_deref(), Some("UND"));
    assert_eq!(item.brand.as_deref(), Some("INDUSCABOS"));
    assert_eq!(item.unit_price, Some(Decimal::new(15000, 0)));
    assert_eq!(item.total, Some(Decimal::new(30000, 0)));
    assert!(item.description.as_deref().unwrap().contains("CABLE"));
    assert_eq!(item.code, None);
}

#[test]
fn test_empty_input_is_rejected() {
    let result = HeuristicQuoteParser::new().extract_from_text("");
    assert!(matches!(result, Err(ExtractionError::MissingInput)));
}

#[test]
fn test_short_line_yields_no_items() {
    let quote = HeuristicQuoteParser::new()
        .parse_at("xyz", &[], reference_time())
        .unwrap()
        .quote;

    assert!(quote.items.is_empty());
}

#[test]
fn test_total_keyword() {
    let quote = HeuristicQuoteParser::new()
        .parse_at("TOTAL: 125.000", &[], reference_time())
        .unwrap()
        .quote;

    assert_eq!(quote.total, Some(Decimal::new(125_000, 0)));
}

#[test]
fn test_reflow_orders_words_regardless_of_input_order() {
    let parser = HeuristicQuoteParser::new();
    let mut detections = motor_row();

    for _ in 0..detections.len() {
        detections.rotate_left(1);
        let result = parser
            .parse_at("Comercial Silva\nsin filas", &detections, reference_time())
            .unwrap();

        assert!(result.reflow_applied);
        assert_eq!(result.quote.items.len(), 1);
        let item = &result.quote.items[0];
        assert_eq!(item.quantity, Some(3));
        assert_eq!(item.unit.as_deref(), Some("PC"));
        assert_eq!(item.unit_price, Some(Decimal::new(5000, 0)));
        assert_eq!(item.total, Some(Decimal::new(15000, 0)));
    }
}

#[test]
fn test_malformed_detection_is_skipped() {
    let mut detections = motor_row();
    detections.insert(2, json!(["not-a-list", "RUIDO", 0.5]));

    let result = HeuristicQuoteParser::new()
        .parse_at("Comercial Silva", &detections, reference_time())
        .unwrap();

    assert_eq!(result.quote.items.len(), 1);
    assert_eq!(result.quote.items[0].quantity, Some(3));
    assert_eq!(
        result
            .warnings
            .iter()
            .filter(|w| w.starts_with("Skipped detection"))
            .count(),
        1
    );
}

#[test]
fn test_reflow_supersedes_plain_text_items() {
    let text = "ENERLUZ\n2 UND CABLE INDUSCABOS 15000 30000\n4 PC TOMADA STECK 12,00 48,00";
    let parser = HeuristicQuoteParser::new();

    let plain = parser.parse_at(text, &[], reference_time()).unwrap().quote;
    assert_eq!(plain.items.len(), 2);

    let reflowed = parser
        .parse_at(text, &motor_row(), reference_time())
        .unwrap()
        .quote;
    assert_eq!(reflowed.items.len(), 1);
    assert_eq!(reflowed.items[0].description.as_deref(), Some("PC MOTOR"));
}

#[test]
fn test_reflow_without_items_keeps_plain_text() {
    let text = "ENERLUZ\n2 UND CABLE INDUSCABOS 15000 30000";
    let detections = vec![word("ENERLUZ", 0.0, 0.0), json!({"bbox": 5, "text": "X"})];

    let result = HeuristicQuoteParser::new()
        .parse_at(text, &detections, reference_time())
        .unwrap();

    assert!(!result.reflow_applied);
    assert_eq!(result.quote.items.len(), 1);
    assert_eq!(result.quote.items[0].brand.as_deref(), Some("INDUSCABOS"));
}

#[test]
fn test_extraction_is_idempotent() {
    let parser = HeuristicQuoteParser::new();
    let detections = motor_row();

    let first = parser.parse_at(NOISY_QUOTE, &detections, reference_time()).unwrap();
    let second = parser.parse_at(NOISY_QUOTE, &detections, reference_time()).unwrap();

    assert_eq!(first.quote, second.quote);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_item_invariants_on_noisy_quote() {
    let quote = HeuristicQuoteParser::new()
        .parse_at(NOISY_QUOTE, &[], reference_time())
        .unwrap()
        .quote;

    assert!(!quote.items.is_empty());
    let low = Decimal::new(1, 1);
    let high = Decimal::new(1_000_000, 0);

    for item in &quote.items {
        if let Some(q) = item.quantity {
            assert!((1..=10_000).contains(&q), "quantity {} out of range", q);
        }
        for price in [item.unit_price, item.total].into_iter().flatten() {
            assert!(price > low && price < high, "price {} out of range", price);
        }
        assert!(
            item.description.as_deref().is_some_and(|d| !d.is_empty()) || item.unit_price.is_some()
        );
    }

    assert_eq!(quote.supplier.as_deref(), Some("ELECTRO SUR LTDA\nPresupuest"));
    assert_eq!(quote.quote_number.as_deref(), Some("77-2024"));
    assert_eq!(
        quote.date,
        NaiveDate::from_ymd_opt(2024, 7, 3).unwrap().and_hms_opt(0, 0, 0).unwrap()
    );
    assert_eq!(quote.total, Some(Decimal::new(35_000, 0)));
}

#[test]
fn test_extract_from_ocr_output() {
    let ocr = OcrOutput::from_text("Comercial Silva\n3 PC MOTOR 5000 15000").with_detections(motor_row());
    let quote = HeuristicQuoteParser::new().extract(&ocr).unwrap();

    assert_eq!(quote.supplier.as_deref(), Some("Comercial Silva"));
    assert_eq!(quote.items.len(), 1);
    assert_eq!(quote.items[0].total, Some(Decimal::new(15000, 0)));
}

#[test]
fn test_parse_uses_clock_only_without_date() {
    let result = HeuristicQuoteParser::new()
        .parse("Comercial Silva\n3 PC MOTOR 5000 15000", &[])
        .unwrap();

    assert!(!result.date_detected);
    assert!(result.quote.date.and_utc().timestamp() > 0);
}

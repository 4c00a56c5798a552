//! Supplier and quote number extraction.

use tracing::debug;

use super::patterns::QUOTE_NUMBER;
use super::vocabulary::CompiledVocabulary;
use super::{ExtractionMatch, FieldExtractor};

/// Characters of context kept on each side of a supplier keyword.
const SUPPLIER_CONTEXT_CHARS: usize = 20;

/// Number of leading lines considered for the supplier fallback.
const SUPPLIER_FALLBACK_LINES: usize = 5;

/// Guess the supplier name.
///
/// A known supplier keyword wins and is returned with its surrounding
/// context. Otherwise the first short, non-numeric line near the top of the
/// document is used.
pub fn extract_supplier(text: &str, vocabulary: &CompiledVocabulary) -> Option<String> {
    if let Some((start, end)) = vocabulary.find_supplier_keyword(text) {
        let window = context_window(text, start, end, SUPPLIER_CONTEXT_CHARS).trim();
        if !window.is_empty() {
            return Some(window.to_string());
        }
    }

    text.lines()
        .take(SUPPLIER_FALLBACK_LINES)
        .map(str::trim)
        .find(|line| {
            let len = line.chars().count();
            (4..50).contains(&len) && !line.chars().take(3).any(|c| c.is_ascii_digit())
        })
        .map(str::to_string)
}

/// Slice of `text` spanning `chars` characters before `start` and after `end`,
/// clipped to the text bounds. Offsets stay on character boundaries.
fn context_window(text: &str, start: usize, end: usize, chars: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(chars)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[from..to]
}

/// Quote number extractor (`Nº 1234/2024`, `Presupuesto: 77-3`).
pub struct QuoteNumberExtractor;

impl QuoteNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuoteNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for QuoteNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = QUOTE_NUMBER.captures(text)?;
        let number = caps.get(1)?;
        Some(
            ExtractionMatch::new(number.as_str().to_string(), &caps[0])
                .with_position(number.start(), number.end()),
        )
    }
}

/// Extract the supplier-assigned quote number.
pub fn extract_quote_number(text: &str) -> Option<String> {
    let found = QuoteNumberExtractor::new().extract(text)?;
    debug!("Quote number from {:?} at {:?}", found.source, found.position);
    Some(found.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_from_keyword_context() {
        let vocab = CompiledVocabulary::default();
        let text = "FACTURA ENERLUZ S.A.\n12/03/2024\n2 UND CABLE";

        let supplier = extract_supplier(text, &vocab).unwrap();
        assert!(supplier.contains("ENERLUZ"));
        assert!(supplier.starts_with("FACTURA"));
    }

    #[test]
    fn test_supplier_context_is_clipped() {
        let vocab = CompiledVocabulary::default();
        let text = "Cotización emitida por la empresa ELETROSUL Distribuidora Ltda, Porto Alegre RS";

        let supplier = extract_supplier(text, &vocab).unwrap();
        assert_eq!(supplier, "tida por la empresa ELETROSUL Distribuidora Lt");
    }

    #[test]
    fn test_supplier_fallback_first_short_line() {
        let vocab = CompiledVocabulary::default();
        let text = "\n123 RUA DAS FLORES\nComercial Silva Ltda\n12/03/2024";

        assert_eq!(
            extract_supplier(text, &vocab),
            Some("Comercial Silva Ltda".to_string())
        );
    }

    #[test]
    fn test_supplier_fallback_only_first_five_lines() {
        let vocab = CompiledVocabulary::default();
        let text = "1\n2\n3\n4\n5\nComercial Silva Ltda";

        assert_eq!(extract_supplier(text, &vocab), None);
    }

    #[test]
    fn test_context_window_multibyte() {
        let text = "ÁÉÍ KEY ÓÚ";
        let start = text.find("KEY").unwrap();
        assert_eq!(context_window(text, start, start + 3, 2), "Í KEY Ó");
    }

    #[test]
    fn test_extract_quote_number() {
        assert_eq!(
            extract_quote_number("ORÇAMENTO: 4512/2024"),
            Some("4512/2024".to_string())
        );
        assert_eq!(
            extract_quote_number("Presupuesto N° 88-12"),
            Some("88-12".to_string())
        );
        assert_eq!(extract_quote_number("Numero de cliente 4512"), None);
    }
}

//! Supplier quote data model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smallest quantity a line item may carry.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a line item may carry.
pub const MAX_QUANTITY: u32 = 10_000;

/// A structured supplier quote extracted from OCR output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuote {
    /// Best-guess vendor name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,

    /// Quote date, or the extraction reference time when none was found.
    pub date: NaiveDateTime,

    /// Supplier-assigned quote identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_number: Option<String>,

    /// Line items in reading order.
    pub items: Vec<LineItem>,

    /// Grand total from a `TOTAL` line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

/// One row of the quote's product table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog/part code. Not populated by the heuristic parser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Quantity, within [`MIN_QUANTITY`, `MAX_QUANTITY`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Unit of measure (M, PC, UND, KG, M2, M3).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Product description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Known brand mentioned on the line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Line total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

impl LineItem {
    /// Whether the item carries enough signal to be kept.
    ///
    /// Lines with neither a description nor a unit price are OCR noise.
    pub fn is_meaningful(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty()) || self.unit_price.is_some()
    }
}

impl ParsedQuote {
    /// Create an empty quote dated at `date`.
    pub fn new(date: NaiveDateTime) -> Self {
        Self {
            supplier: None,
            date,
            quote_number: None,
            items: Vec::new(),
            total: None,
        }
    }

    /// Sum of all line totals that were detected.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().filter_map(|i| i.total).sum()
    }

    /// Validate the quote data and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.supplier.is_none() {
            issues.push("Missing supplier".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        if let Some(total) = self.total {
            let calculated = self.items_total();
            if !self.items.is_empty() && (calculated - total).abs() > Decimal::new(1, 2) {
                issues.push(format!(
                    "Line item total ({}) differs from quote total ({})",
                    calculated, total
                ));
            }
        }

        issues
    }
}

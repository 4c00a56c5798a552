//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the cotiza pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CotizaConfig {
    /// Line and item extraction settings.
    pub extraction: ExtractionConfig,

    /// Coordinate reflow settings.
    pub reflow: ReflowConfig,

    /// Keyword tables driving the heuristics.
    pub vocabulary: Vocabulary,
}

/// Line item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum trimmed length for a line to be parsed as an item.
    pub min_line_length: usize,

    /// Maximum number of words kept in an item description.
    pub max_description_words: usize,

    /// Rebuild rows from word coordinates when detections are supplied.
    pub enable_reflow: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_line_length: 10,
            max_description_words: 10,
            enable_reflow: true,
        }
    }
}

/// Coordinate reflow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// Vertical bucket size in pixels; words whose centers share a bucket form one row.
    pub row_tolerance_px: f64,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            row_tolerance_px: 10.0,
        }
    }
}

/// Keyword tables used by the header, line and item heuristics.
///
/// Matching is case-insensitive for every list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Fragments of supplier names, searched in order.
    pub supplier_keywords: Vec<String>,

    /// Words that mark the item table's header row.
    pub table_header_keywords: Vec<String>,

    /// Header and unit noise removed from descriptions.
    pub description_stopwords: Vec<String>,

    /// Known brands, searched in order.
    pub brands: Vec<String>,

    /// Unit codes, matched as whole words in order.
    pub units: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            supplier_keywords: strings(&[
                "ENERLUZ",
                "ELETRO",
                "ELECTRO",
                "ENERGIA",
                "ELÉTRICA",
                "ELETRICA",
                "ELÉCTRICA",
                "ELECTRICA",
                "ILUMINA",
            ]),
            table_header_keywords: strings(&[
                "DESCRIÇÃO",
                "DESCRIPCION",
                "DESCRIPCIÓN",
                "PRODUTO",
                "PRODUCTO",
                "CODIGO",
                "CÓDIGO",
                "ITEM",
                "QTDE",
                "CANTIDAD",
            ]),
            description_stopwords: strings(&[
                "ITE",
                "ITEM",
                "CODIGO",
                "CÓDIGO",
                "QTDE",
                "UND",
                "DESCRIÇÃO",
                "DESCRIPCION",
                "PRODUTO",
                "PRODUCTO",
                "MARCA",
                "LOCAL",
                "PRECO",
                "PREÇO",
                "UNIT",
                "TOT",
            ]),
            brands: strings(&[
                "INDUSCABOS",
                "PRYSMIAN",
                "SIEMENS",
                "SCHNEIDER",
                "LEGRAND",
                "TRAMONTINA",
                "PHILIPS",
                "OSRAM",
                "STECK",
                "TIGRE",
                "CORFIO",
                "WEG",
            ]),
            units: strings(&["M", "PC", "UND", "KG", "M2", "M3"]),
        }
    }
}

impl CotizaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

//! Compiled keyword tables.

use regex::{Regex, RegexBuilder};

use crate::error::ExtractionError;
use crate::models::config::Vocabulary;

/// Keyword tables compiled for case-insensitive matching.
#[derive(Debug, Clone)]
pub struct CompiledVocabulary {
    supplier_keywords: Vec<Regex>,
    table_header_keywords: Vec<String>,
    description_stopwords: Vec<String>,
    brands: Vec<(String, String)>,
    units: Vec<(String, Regex)>,
}

fn case_insensitive(pattern: &str, list: &str) -> Result<Regex, ExtractionError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractionError::InvalidVocabulary {
            list: list.to_string(),
            reason: e.to_string(),
        })
}

fn non_blank(words: &[String]) -> impl Iterator<Item = &str> {
    words.iter().map(|w| w.trim()).filter(|w| !w.is_empty())
}

impl CompiledVocabulary {
    /// Compile a vocabulary. Blank entries are ignored.
    pub fn compile(vocabulary: &Vocabulary) -> Result<Self, ExtractionError> {
        let supplier_keywords = non_blank(&vocabulary.supplier_keywords)
            .map(|k| case_insensitive(&regex::escape(k), "supplier_keywords"))
            .collect::<Result<Vec<_>, _>>()?;

        let units = non_blank(&vocabulary.units)
            .map(|u| {
                let pattern = format!(r"\b{}\b", regex::escape(u));
                case_insensitive(&pattern, "units").map(|re| (u.to_uppercase(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            supplier_keywords,
            table_header_keywords: non_blank(&vocabulary.table_header_keywords)
                .map(str::to_uppercase)
                .collect(),
            description_stopwords: non_blank(&vocabulary.description_stopwords)
                .map(str::to_uppercase)
                .collect(),
            brands: non_blank(&vocabulary.brands)
                .map(|b| (b.to_string(), b.to_uppercase()))
                .collect(),
            units,
        })
    }

    /// First supplier keyword (in list order) found in `text`, as a byte span.
    pub fn find_supplier_keyword(&self, text: &str) -> Option<(usize, usize)> {
        self.supplier_keywords
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| (m.start(), m.end()))
    }

    /// Whether a line contains any table-header keyword.
    pub fn is_table_header(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.table_header_keywords.iter().any(|k| upper.contains(k))
    }

    /// Whether a word is description noise.
    pub fn is_stopword(&self, word: &str) -> bool {
        let upper = word.to_uppercase();
        self.description_stopwords.iter().any(|s| *s == upper)
    }

    /// First known brand (in list order) mentioned on the line.
    pub fn find_brand(&self, line: &str) -> Option<&str> {
        let upper = line.to_uppercase();
        self.brands
            .iter()
            .find(|(_, needle)| upper.contains(needle.as_str()))
            .map(|(brand, _)| brand.as_str())
    }

    /// First unit code (in list order) present as a whole word, uppercased.
    pub fn find_unit(&self, line: &str) -> Option<&str> {
        self.units
            .iter()
            .find(|(_, re)| re.is_match(line))
            .map(|(unit, _)| unit.as_str())
    }
}

impl Default for CompiledVocabulary {
    fn default() -> Self {
        lazy_static::lazy_static! {
            static ref DEFAULT: CompiledVocabulary = CompiledVocabulary::compile(&Vocabulary::default())
                .expect("default vocabulary compiles");
        }
        DEFAULT.clone()
    }
}

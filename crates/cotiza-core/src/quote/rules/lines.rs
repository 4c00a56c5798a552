//! Candidate line location.

use tracing::debug;

use super::patterns::{COUNT_THEN_WORD, DECIMAL_NUMBER};
use super::vocabulary::CompiledVocabulary;

/// Minimum trimmed length for a line to survive cleaning.
const MIN_CLEAN_LINE_CHARS: usize = 3;

/// Cleaned lines and the table anchor found among them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocatedLines<'a> {
    /// Trimmed lines with noise removed, in document order.
    pub lines: Vec<&'a str>,
    /// Index into `lines` of the table-header row.
    pub header_index: Option<usize>,
}

impl<'a> LocatedLines<'a> {
    /// Lines worth handing to the line item parser.
    ///
    /// After a table header every line of `min_length` characters qualifies.
    /// Without one, a line must also look like an item row.
    pub fn candidates(&self, min_length: usize) -> Vec<&'a str> {
        let long_enough = |line: &&str| line.chars().count() >= min_length;

        match self.header_index {
            Some(index) => self.lines[index + 1..]
                .iter()
                .copied()
                .filter(long_enough)
                .collect(),
            None => self
                .lines
                .iter()
                .copied()
                .filter(long_enough)
                .filter(|line| looks_like_item_row(line))
                .collect(),
        }
    }
}

fn looks_like_item_row(line: &str) -> bool {
    DECIMAL_NUMBER.is_match(line) || COUNT_THEN_WORD.is_match(line)
}

/// Split text into cleaned lines and find the item table header.
pub fn locate_lines<'a>(text: &'a str, vocabulary: &CompiledVocabulary) -> LocatedLines<'a> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| l.chars().count() >= MIN_CLEAN_LINE_CHARS)
        .filter(|l| l.chars().any(char::is_alphanumeric))
        .collect();

    let header_index = lines.iter().position(|l| vocabulary.is_table_header(l));

    debug!(
        "Located {} cleaned lines, table header at {:?}",
        lines.len(),
        header_index
    );

    LocatedLines {
        lines,
        header_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cleaning_drops_short_and_symbol_lines() {
        let vocab = CompiledVocabulary::default();
        let located = locate_lines("ab\n  ----------  \nxyz\n\n***\n  Comercial Silva  ", &vocab);

        assert_eq!(located.lines, vec!["xyz", "Comercial Silva"]);
        assert_eq!(located.header_index, None);
    }

    #[test]
    fn test_candidates_after_header() {
        let vocab = CompiledVocabulary::default();
        let text = "ENERLUZ\nCODIGO DESCRICAO QTDE PRECO\nCABO FLEXIVEL PRETO\nshort\n3 PC MOTOR 5000 15000";
        let located = locate_lines(text, &vocab);

        assert_eq!(located.header_index, Some(1));
        assert_eq!(
            located.candidates(10),
            vec!["CABO FLEXIVEL PRETO", "3 PC MOTOR 5000 15000"]
        );
    }

    #[test]
    fn test_candidates_without_header_need_item_shape() {
        let vocab = CompiledVocabulary::default();
        let text = "FACTURA ENERLUZ S.A.\n12/03/2024\n2 UND CABLE INDUSCABOS 15000 30000\nCABO 2,5 FLEXIVEL\nObservaciones generales";
        let located = locate_lines(text, &vocab);

        assert_eq!(located.header_index, None);
        assert_eq!(
            located.candidates(10),
            vec!["2 UND CABLE INDUSCABOS 15000 30000", "CABO 2,5 FLEXIVEL"]
        );
    }
}

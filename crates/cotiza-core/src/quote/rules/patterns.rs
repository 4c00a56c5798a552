//! Common regex patterns for supplier quote extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Date patterns, tried in this order
    pub static ref DATE_SLASH_DMY: Regex = Regex::new(
        r"(\d{1,2})/(\d{1,2})/(\d{4})"
    ).unwrap();

    pub static ref DATE_DASH_DMY: Regex = Regex::new(
        r"(\d{1,2})-(\d{1,2})-(\d{4})"
    ).unwrap();

    pub static ref DATE_DASH_YMD: Regex = Regex::new(
        r"(\d{4})-(\d{1,2})-(\d{1,2})"
    ).unwrap();

    // Quote number: label, optional punctuation, then 123/2024 or 45-7
    pub static ref QUOTE_NUMBER: Regex = Regex::new(
        r"(?i)(?:ORÇAMENTO|PRESUPUESTO|N°|Nº|NUMERO)[\s.:#°º-]*(\d+[/-]\d+)"
    ).unwrap();

    // Grand total, amount on the same line as the keyword
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)TOTAL[ \t:;=$€R.\-]*(\d[\d.,]*)"
    ).unwrap();

    // Maximal runs of digits and separators; a run may hold no digit at all
    pub static ref NUMERIC_TOKEN: Regex = Regex::new(
        r"[\d.,]+"
    ).unwrap();

    // Latin words, including Spanish/Portuguese accented letters
    pub static ref WORD_TOKEN: Regex = Regex::new(
        r"[A-Za-zÁÉÍÓÚÀÂÊÔÃÕÇÜÑáéíóúàâêôãõçüñ]+"
    ).unwrap();

    // Item row shapes used when no table header is found
    pub static ref DECIMAL_NUMBER: Regex = Regex::new(
        r"\d+[.,]\d+"
    ).unwrap();

    pub static ref COUNT_THEN_WORD: Regex = Regex::new(
        r"\d\s+\p{Lu}"
    ).unwrap();
}

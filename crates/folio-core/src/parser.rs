//! Comma-delimited text parsing.
//!
//! The first line is always the header. Empty data lines are skipped. A double
//! quote toggles an "inside field" state in which commas do not split; the
//! quote characters themselves are dropped and `""` has no escape meaning.

use std::str::Utf8Error;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// Data row together with its 1-based line number in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Header fields plus every non-empty data row, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// Case-insensitive position of a header column.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }
}

/// Decodes uploaded bytes as UTF-8 text.
pub fn decode_upload(bytes: &[u8]) -> Result<&str, Utf8Error> {
    std::str::from_utf8(bytes)
}

/// Splits text into a header row and data records.
pub fn parse_table(text: &str) -> Table {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = text.lines().enumerate();

    let headers = lines
        .next()
        .map(|(_, line)| split_fields(line))
        .unwrap_or_default();

    let records = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Record {
            line: index + 1,
            fields: split_fields(line),
        })
        .collect();

    Table { headers, records }
}

/// Splits one line on commas that are outside double quotes. Fields are trimmed.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_owned());
                current.clear();
            }
            other => current.push(other),
        }
    }
    fields.push(current.trim().to_owned());

    fields
}

use csv::ReaderBuilder;
use log::warn;

use crate::errors::CoreError;

/// A CSV sheet export held in memory: cleaned headers plus raw string rows.
///
/// Rows may be shorter or longer than the header; cell access past the end
/// of a row reads as a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Parse CSV text whose first record is the header row.
    ///
    /// Header names are trimmed and stripped of the UTF-8 BOM that sheet
    /// exports prepend. Records the CSV reader rejects are skipped with a
    /// warning instead of failing the whole sheet.
    pub fn parse(content: &str) -> Result<Self, CoreError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()?
            .iter()
            .map(clean_header)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            match result {
                Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
                Err(e) => warn!("Skipping unreadable CSV row {}: {}", idx + 1, e),
            }
        }

        Ok(Self { headers, rows })
    }

    /// Build a table directly from headers and rows.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| clean_header(h)).collect(),
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns declared by the header row.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first header matching any of `names` (case-insensitive).
    pub fn column_index(&self, names: &[&str]) -> Option<usize> {
        self.headers.iter().position(|h| {
            let h = h.to_lowercase();
            names.iter().any(|n| n.to_lowercase() == h)
        })
    }

    /// Cell content, or `None` when the cell is absent or blank.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

fn clean_header(raw: &str) -> String {
    raw.replace('\u{feff}', "").trim().to_string()
}

//! CSV parsing for style source files.
//!
//! Rows have up to three columns: `name, prompt, negative_prompt`. Missing
//! columns read as empty, extra columns are ignored, every field is trimmed.
//! A first non-blank row whose first cell is `name` (any case) is a header.

use crate::error::StyleError;
use crate::record::StyleRecord;
use crate::Result;
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// One data row of a style file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRow {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Trimmed prompt.
    pub prompt: String,
    /// Trimmed negative prompt.
    pub negative_prompt: String,
}

impl StyleRow {
    /// Create a row.
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        negative_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
        }
    }

    /// Turn into a record belonging to `source`.
    pub fn into_record(self, source: &str, priority: i32) -> StyleRecord {
        StyleRecord::new(self.name, self.prompt, self.negative_prompt, source, priority)
    }
}

/// Parse style rows from CSV text.
pub fn parse_rows(content: &str) -> std::result::Result<Vec<StyleRow>, csv::Error> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    let mut header_checked = false;

    for result in reader.records() {
        let record = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let field = |i: usize| record.get(i).map(str::trim).unwrap_or_default();
        let name = field(0);

        if !header_checked {
            header_checked = true;
            if name.eq_ignore_ascii_case("name") {
                continue;
            }
        }

        if name.is_empty() {
            continue;
        }

        rows.push(StyleRow::new(name, field(1), field(2)));
    }

    Ok(rows)
}

/// Read and parse a style file.
pub fn read_rows(path: &Path) -> Result<Vec<StyleRow>> {
    let bytes = std::fs::read(path).map_err(|e| StyleError::file_read(path, e))?;
    let content = String::from_utf8(bytes).map_err(|_| StyleError::Encoding {
        path: path.to_path_buf(),
    })?;
    parse_rows(&content).map_err(|e| StyleError::csv(path, e))
}

/// Read a style file into records tagged with `source` and `priority`.
pub fn parse_styles_csv(path: &Path, source: &str, priority: i32) -> Result<Vec<StyleRecord>> {
    Ok(read_rows(path)?
        .into_iter()
        .map(|row| row.into_record(source, priority))
        .collect())
}

//! Writing styles back to a CSV source file.
//!
//! Every mutation is a whole-file rewrite: read the existing rows, edit them
//! in memory, write the file again with a `name,prompt,negative_prompt`
//! header. Header and blank rows of the existing file are not preserved.

use crate::error::StyleError;
use crate::parser::{read_rows, StyleRow};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Column names written as the first row.
pub const CSV_HEADER: [&str; 3] = ["name", "prompt", "negative_prompt"];

/// A CSV source file opened for editing.
#[derive(Debug, Clone)]
pub struct CsvStyleFile {
    path: PathBuf,
}

impl CsvStyleFile {
    /// Target the file at `path`. Nothing is read until a mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current rows, or none when the file does not exist yet.
    pub fn rows(&self) -> Result<Vec<StyleRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_rows(&self.path)
    }

    /// Replace the first row named `row.name`, or append it.
    ///
    /// Returns `true` when a new row was appended.
    pub fn upsert(&self, row: StyleRow) -> Result<bool> {
        let mut rows = self.rows()?;
        let created = match rows.iter_mut().find(|existing| existing.name == row.name) {
            Some(existing) => {
                *existing = row;
                false
            }
            None => {
                rows.push(row);
                true
            }
        };
        self.write_rows(&rows)?;
        Ok(created)
    }

    /// Remove every row named `name`. Returns `true` when anything was removed.
    ///
    /// The file is left untouched when nothing matches.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut rows = self.rows()?;
        let before = rows.len();
        rows.retain(|row| row.name != name);
        if rows.len() == before {
            return Ok(false);
        }
        self.write_rows(&rows)?;
        Ok(true)
    }

    /// Overwrite the file with a header and `rows`.
    pub fn write_rows(&self, rows: &[StyleRow]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| StyleError::csv(&self.path, e))?;
        for row in rows {
            writer
                .write_record([&row.name, &row.prompt, &row.negative_prompt])
                .map_err(|e| StyleError::csv(&self.path, e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| StyleError::file_write(&self.path, e.into_error()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StyleError::file_write(parent, e))?;
            }
        }
        fs::write(&self.path, bytes).map_err(|e| StyleError::file_write(&self.path, e))?;

        tracing::info!("Wrote {} styles to {}", rows.len(), self.path.display());
        Ok(())
    }
}

//! Category and display-name derivation.
//!
//! Rules, first match wins:
//!
//! 1. `PREFIX_rest`: category `PREFIX`, display `rest` with `_` as spaces.
//!    In [`CategoryMode::Strict`] the prefix must already be uppercase, with
//!    at least one cased letter, and at least two characters long; [`CategoryMode::Lenient`] accepts any
//!    non-empty prefix and upper-cases it.
//! 2. `prefix-rest`: category `prefix`, display `rest` with `-` as spaces.
//! 3. Otherwise the category is the capitalized source file stem (or
//!    [`OTHER_CATEGORY`] without a source) and the display is the name with
//!    `_` as spaces.

use serde::Serialize;
use std::path::Path;
use stylegrid_config::CategoryMode;

/// Category used when nothing else applies.
pub const OTHER_CATEGORY: &str = "OTHER";

/// Derived category and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Categorization {
    /// Category key.
    pub category: String,
    /// Human-readable name.
    pub display_name: String,
}

/// Derive category and display name for a style. Pure and idempotent.
pub fn categorize(name: &str, source: &str, mode: CategoryMode) -> Categorization {
    if let Some((prefix, rest)) = name.split_once('_') {
        if let Some(category) = underscore_category(prefix, mode) {
            return Categorization {
                category,
                display_name: rest.replace('_', " "),
            };
        }
    }

    if let Some((prefix, rest)) = name.split_once('-') {
        if !prefix.is_empty() {
            return Categorization {
                category: prefix.to_string(),
                display_name: rest.replace('-', " "),
            };
        }
    }

    Categorization {
        category: category_from_filename(source).unwrap_or_else(|| OTHER_CATEGORY.to_string()),
        display_name: name.replace('_', " "),
    }
}

fn underscore_category(prefix: &str, mode: CategoryMode) -> Option<String> {
    match mode {
        CategoryMode::Strict => {
            let is_upper =
                prefix.chars().any(char::is_uppercase) && prefix == prefix.to_uppercase();
            (prefix.chars().count() >= 2 && is_upper).then(|| prefix.to_string())
        }
        CategoryMode::Lenient => (!prefix.is_empty()).then(|| prefix.to_uppercase()),
    }
}

/// Source file stem with its first character upper-cased.
///
/// Returns `None` when the source is blank.
pub fn category_from_filename(source: &str) -> Option<String> {
    let source = source.trim();
    if source.is_empty() {
        return None;
    }

    let stem = Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .unwrap_or_default();

    let mut chars = stem.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

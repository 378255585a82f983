//! The style record type.

use crate::categorize::{categorize, Categorization};
use serde::{Deserialize, Serialize};
use stylegrid_config::CategoryMode;

/// Placeholder replaced by the current prompt when a style is applied.
pub const PLACEHOLDER: &str = "{prompt}";

/// One style parsed from one row of a source file.
///
/// `category` and `display_name` are empty until [`StyleRecord::categorize`]
/// is called; the scanner always does so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRecord {
    /// Style name, the merge key.
    pub name: String,
    /// Positive prompt fragment.
    pub prompt: String,
    /// Negative prompt fragment.
    pub negative_prompt: String,
    /// Label (basename) of the source file.
    pub source: String,
    /// Priority of the source tier; higher wins on merge.
    pub source_priority: i32,
    /// Derived category.
    #[serde(default)]
    pub category: String,
    /// Derived human-readable name.
    #[serde(default)]
    pub display_name: String,
}

impl StyleRecord {
    /// Create an uncategorized record.
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        negative_prompt: impl Into<String>,
        source: impl Into<String>,
        source_priority: i32,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            negative_prompt: negative_prompt.into(),
            source: source.into(),
            source_priority,
            category: String::new(),
            display_name: String::new(),
        }
    }

    /// Fill the derived fields from name and source.
    pub fn categorize(&mut self, mode: CategoryMode) {
        let Categorization {
            category,
            display_name,
        } = categorize(&self.name, &self.source, mode);
        self.category = category;
        self.display_name = display_name;
    }

    /// Builder form of [`categorize`](Self::categorize).
    pub fn categorized(mut self, mode: CategoryMode) -> Self {
        self.categorize(mode);
        self
    }

    /// Display name, falling back to the raw name when not categorized.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

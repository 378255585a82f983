//! Priority-based deduplication of style records.

use crate::record::StyleRecord;
use std::collections::HashMap;

/// Pseudo source label meaning "every source, merged".
pub const ALL_SOURCES: &str = "All Sources";

/// Keep one record per name.
///
/// The record with the highest `source_priority` wins; on equal priority the
/// first one in input order wins. Each name keeps the position where it was
/// first seen. Records with an empty name are dropped.
pub fn merge_by_priority(styles: &[StyleRecord]) -> Vec<StyleRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut merged: Vec<&StyleRecord> = Vec::new();

    for style in styles {
        if style.name.is_empty() {
            continue;
        }
        match index.get(style.name.as_str()) {
            Some(&slot) => {
                if style.source_priority > merged[slot].source_priority {
                    merged[slot] = style;
                }
            }
            None => {
                index.insert(style.name.as_str(), merged.len());
                merged.push(style);
            }
        }
    }

    merged.into_iter().cloned().collect()
}

/// Styles shown for a source selection.
///
/// `None` or [`ALL_SOURCES`] yields the merged set; a label yields that
/// source's records unmerged.
pub fn styles_for_source(styles: &[StyleRecord], source: Option<&str>) -> Vec<StyleRecord> {
    match source {
        None | Some(ALL_SOURCES) => merge_by_priority(styles),
        Some(label) => styles
            .iter()
            .filter(|style| style.source == label)
            .cloned()
            .collect(),
    }
}

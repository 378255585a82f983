//! The query result: sources, raw styles and category groups.

use crate::merge::{merge_by_priority, styles_for_source};
use crate::record::StyleRecord;
use crate::search::SearchQuery;
use serde::Serialize;
use std::collections::BTreeMap;

/// Styles sharing a category, sorted by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Category key.
    pub name: String,
    /// Members of the category.
    pub styles: Vec<StyleRecord>,
}

/// Snapshot of the style library after one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleCatalog {
    /// Source labels in scan order.
    pub sources: Vec<String>,
    /// Every record, categorized, unmerged.
    pub styles: Vec<StyleRecord>,
    /// Groups built from the merged set.
    pub categories: Vec<CategoryGroup>,
}

impl StyleCatalog {
    /// Build the catalog, grouping the merged view by `category_order`.
    pub fn new(sources: Vec<String>, styles: Vec<StyleRecord>, category_order: &[String]) -> Self {
        let categories = group_by_category(merge_by_priority(&styles), category_order);
        Self {
            sources,
            styles,
            categories,
        }
    }

    /// One record per name, highest priority wins.
    pub fn merged(&self) -> Vec<StyleRecord> {
        merge_by_priority(&self.styles)
    }

    /// Records of one source, or the merged set for `None` / "All Sources".
    pub fn for_source(&self, source: Option<&str>) -> Vec<StyleRecord> {
        styles_for_source(&self.styles, source)
    }

    /// Records in the source view that match `query`.
    pub fn search(&self, query: &SearchQuery, source: Option<&str>) -> Vec<StyleRecord> {
        self.for_source(source)
            .into_iter()
            .filter(|style| query.matches(style))
            .collect()
    }

    /// The merged record for `name`.
    pub fn find(&self, name: &str) -> Option<StyleRecord> {
        self.merged().into_iter().find(|style| style.name == name)
    }
}

/// Group styles by category.
///
/// Categories named in `order` come first, in that order; the rest follow
/// alphabetically. Within a group styles are sorted by lower-cased display
/// name, ties keep input order.
pub fn group_by_category(styles: Vec<StyleRecord>, order: &[String]) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<String, Vec<StyleRecord>> = BTreeMap::new();
    for style in styles {
        groups.entry(style.category.clone()).or_default().push(style);
    }

    let mut result = Vec::with_capacity(groups.len());
    for name in order {
        if let Some(styles) = groups.remove(name) {
            result.push(CategoryGroup {
                name: name.clone(),
                styles,
            });
        }
    }
    result.extend(
        groups
            .into_iter()
            .map(|(name, styles)| CategoryGroup { name, styles }),
    );

    for group in &mut result {
        group
            .styles
            .sort_by_cached_key(|style| style.label().to_lowercase());
    }
    result
}

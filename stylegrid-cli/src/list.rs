//! Stylegrid List - show styles grouped by category.

use stylegrid_styles::{group_by_category, CategoryGroup, StyleError, StyleService, ALL_SOURCES};

use crate::table::{new_table, print_json, truncate_str};

/// Maximum prompt length shown in verbose tables.
const MAX_PROMPT_LENGTH: usize = 40;

/// Run the list command.
///
/// Without `source` the merged view is shown; with a source label only that
/// file's styles are listed, unmerged.
pub fn run_list(
    service: &StyleService,
    source: Option<&str>,
    category: Option<&str>,
    verbose: bool,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = service.query();

    let source = source.filter(|s| *s != ALL_SOURCES);
    if let Some(label) = source {
        if !catalog.sources.iter().any(|s| s == label) {
            return Err(StyleError::SourceNotFound {
                label: label.to_string(),
            }
            .into());
        }
    }

    if json && source.is_none() && category.is_none() {
        return print_json(&catalog);
    }

    let mut groups = match source {
        Some(_) => group_by_category(
            catalog.for_source(source),
            &service.settings().category_order,
        ),
        None => catalog.categories.clone(),
    };
    if let Some(category) = category {
        groups.retain(|g| g.name.eq_ignore_ascii_case(category));
    }

    if json {
        return print_json(&serde_json::json!({
            "sources": catalog.sources,
            "source": source.unwrap_or(ALL_SOURCES),
            "categories": groups,
        }));
    }

    let count: usize = groups.iter().map(|g| g.styles.len()).sum();
    if count == 0 {
        println!("No styles found.");
        return Ok(());
    }

    println!("{}", render_table(&groups, verbose));
    println!();
    println!(
        "{} style(s) in {} categories from {} source(s)",
        count,
        groups.len(),
        catalog.sources.len()
    );
    Ok(())
}

fn render_table(groups: &[CategoryGroup], verbose: bool) -> comfy_table::Table {
    let mut table = new_table();
    if verbose {
        table.set_header(vec!["Category", "Name", "Display", "Prompt", "Negative", "Source"]);
    } else {
        table.set_header(vec!["Category", "Name", "Display", "Source"]);
    }

    for group in groups {
        for style in &group.styles {
            if verbose {
                table.add_row(vec![
                    group.name.clone(),
                    style.name.clone(),
                    style.label().to_string(),
                    truncate_str(&style.prompt, MAX_PROMPT_LENGTH),
                    truncate_str(&style.negative_prompt, MAX_PROMPT_LENGTH),
                    style.source.clone(),
                ]);
            } else {
                table.add_row(vec![
                    group.name.clone(),
                    style.name.clone(),
                    style.label().to_string(),
                    style.source.clone(),
                ]);
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylegrid_styles::{CategoryMode, StyleRecord};

    #[test]
    fn test_render_table_contains_rows() {
        let groups = vec![CategoryGroup {
            name: "BASE".into(),
            styles: vec![StyleRecord::new("BASE_soft", "soft light", "", "a.csv", 1)
                .categorized(CategoryMode::Strict)],
        }];
        let rendered = render_table(&groups, true).to_string();
        assert!(rendered.contains("BASE_soft"));
        assert!(rendered.contains("soft light"));
        assert!(rendered.contains("a.csv"));
    }
}

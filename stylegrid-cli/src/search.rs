//! Stylegrid Search - filter styles with the search query syntax.

use stylegrid_styles::{SearchQuery, StyleService};

use crate::table::{new_table, print_json, truncate_str};

/// Maximum prompt length shown in the results table.
const MAX_PROMPT_LENGTH: usize = 50;

/// Run the search command.
pub fn run_search(
    service: &StyleService,
    query: &str,
    source: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let parsed = SearchQuery::parse(query);
    let results = service.query().search(&parsed, source);

    if json {
        return print_json(&serde_json::json!({
            "query": query,
            "count": results.len(),
            "styles": results,
        }));
    }

    if results.is_empty() {
        println!("No styles match '{}'.", query);
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["Name", "Category", "Prompt", "Source"]);
    for style in &results {
        table.add_row(vec![
            style.name.clone(),
            style.category.clone(),
            truncate_str(&style.prompt, MAX_PROMPT_LENGTH),
            style.source.clone(),
        ]);
    }

    println!("{table}");
    println!("\n{} style(s) found", results.len());
    Ok(())
}

//! Stylegrid Usage - most used styles.

use stylegrid_styles::StyleService;

use crate::table::{new_table, print_json};

/// Run the usage command.
pub fn run_usage(service: &StyleService, limit: usize, json: bool) -> anyhow::Result<()> {
    let tracker = service.usage_tracker();
    let top = tracker.top(limit);

    if json {
        let entries: Vec<serde_json::Value> = top
            .iter()
            .map(|(name, entry)| {
                serde_json::json!({
                    "name": name,
                    "count": entry.count,
                    "first_used": entry.first_used,
                    "last_used": entry.last_used,
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "usage": entries }));
    }

    if top.is_empty() {
        println!("No usage recorded yet.");
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["Name", "Count", "Last used"]);
    for (name, entry) in &top {
        table.add_row(vec![
            name.to_string(),
            entry.count.to_string(),
            entry.last_used.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

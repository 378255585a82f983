//! Stylegrid Conflicts - find styles that negate each other.

use stylegrid_styles::StyleService;

use crate::table::{new_table, print_json};

/// Run the conflicts command.
pub fn run_conflicts(service: &StyleService, styles: &[String], json: bool) -> anyhow::Result<()> {
    let conflicts = service.check_conflicts(styles);

    if json {
        return print_json(&serde_json::json!({ "conflicts": conflicts }));
    }

    if conflicts.is_empty() {
        println!("No conflicts found.");
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["Style", "Negated by", "Tokens"]);
    for conflict in &conflicts {
        table.add_row(vec![
            conflict.style.clone(),
            conflict.conflicts_with.clone(),
            conflict.tokens.join(", "),
        ]);
    }

    println!("{table}");
    println!("\n{} conflict(s) found", conflicts.len());
    Ok(())
}

//! Stylegrid Save/Delete - edit styles in CSV sources.

use stylegrid_styles::{SaveStyleRequest, StyleService};

use crate::table::print_json;

/// Run the save command.
pub fn run_save(
    service: &StyleService,
    request: SaveStyleRequest,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = service.save_style(request)?;

    if json {
        return print_json(&serde_json::json!({
            "success": true,
            "name": outcome.name,
            "source": outcome.source,
            "path": outcome.path,
            "created": outcome.created,
        }));
    }

    let verb = if outcome.created { "Added" } else { "Updated" };
    println!(
        "{} '{}' in {} ({})",
        verb,
        outcome.name,
        outcome.source,
        outcome.path.display()
    );
    Ok(())
}

/// Run the delete command.
pub fn run_delete(
    service: &StyleService,
    name: &str,
    source: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = service.delete_style(name, source)?;

    if json {
        return print_json(&serde_json::json!({
            "success": true,
            "name": outcome.name,
            "source": outcome.source,
            "path": outcome.path,
        }));
    }

    println!(
        "Deleted '{}' from {} ({})",
        outcome.name,
        outcome.source,
        outcome.path.display()
    );
    Ok(())
}

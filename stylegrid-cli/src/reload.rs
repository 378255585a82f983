//! Stylegrid Reload - rescan sources and detect changes.

use stylegrid_styles::{ScanState, StyleService};

use crate::table::print_json;

/// Run the reload command.
///
/// Fingerprints are kept in the state directory so that consecutive runs can
/// report whether any source was added, removed or edited in between.
pub fn run_reload(service: &StyleService, json: bool) -> anyhow::Result<()> {
    let state_dir = &service.locations().state_dir;
    let mut state = ScanState::load(state_dir);
    let outcome = service.reload(&mut state);
    state.save(state_dir)?;

    if json {
        return print_json(&serde_json::json!({
            "changed": outcome.changed,
            "sources": outcome.catalog.sources,
            "styles": outcome.catalog.styles.len(),
            "categories": outcome.catalog.categories.len(),
        }));
    }

    let status = if outcome.changed {
        "Sources changed"
    } else {
        "No changes"
    };
    println!(
        "{}: {} style(s) from {} source(s)",
        status,
        outcome.catalog.styles.len(),
        outcome.catalog.sources.len()
    );
    for source in &outcome.catalog.sources {
        println!("  {}", source);
    }
    Ok(())
}

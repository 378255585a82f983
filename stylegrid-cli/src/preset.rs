//! Stylegrid Preset - manage saved style selections.

use std::collections::BTreeMap;

use chrono::Utc;
use stylegrid_styles::{Preset, StyleError, StyleService};

use crate::cli::PresetCommands;
use crate::table::{new_table, print_json};

/// Run a preset subcommand.
pub fn run_preset(service: &StyleService, command: PresetCommands, json: bool) -> anyhow::Result<()> {
    let mut store = service.preset_store();

    match command {
        PresetCommands::Save { name, styles } => {
            let merged = service.query().merged();
            for style in &styles {
                if !merged.iter().any(|s| &s.name == style) {
                    tracing::warn!("Preset '{}' references unknown style '{}'", name, style);
                }
            }

            let preset = store.save_preset(&name, styles, Utc::now())?;
            if json {
                return print_json(&serde_json::json!({
                    "success": true,
                    "name": name.trim(),
                    "preset": preset,
                }));
            }
            println!("Saved preset '{}' ({} styles)", name.trim(), preset.styles.len());
        }
        PresetCommands::List => {
            if json {
                let presets: BTreeMap<&str, &Preset> = store.list().collect();
                return print_json(&serde_json::json!({ "presets": presets }));
            }

            let mut table = new_table();
            table.set_header(vec!["Name", "Styles", "Created"]);
            let mut count = 0;
            for (name, preset) in store.list() {
                table.add_row(vec![
                    name.to_string(),
                    preset.styles.join(", "),
                    preset.created.format("%Y-%m-%d %H:%M").to_string(),
                ]);
                count += 1;
            }
            if count == 0 {
                println!("No presets saved.");
            } else {
                println!("{table}");
            }
        }
        PresetCommands::Show { name } => {
            let preset = store.get(&name).ok_or_else(|| not_found(&name))?;
            if json {
                return print_json(&serde_json::json!({ "name": name, "preset": preset }));
            }
            for style in &preset.styles {
                println!("{}", style);
            }
        }
        PresetCommands::Delete { name } => {
            if !store.delete(&name)? {
                return Err(not_found(&name).into());
            }
            if json {
                return print_json(&serde_json::json!({ "success": true, "name": name }));
            }
            println!("Deleted preset '{}'", name);
        }
    }
    Ok(())
}

fn not_found(name: &str) -> StyleError {
    StyleError::invalid_input("preset", format!("preset '{}' not found", name))
}

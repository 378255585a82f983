//! Stylegrid Apply - apply styles to a prompt.

use stylegrid_styles::{ApplyMode, ApplyRequest, StyleError, StyleService};

use crate::cli::ApplyModeArg;
use crate::table::print_json;

/// Arguments of the apply command.
#[derive(Debug, Clone, Default)]
pub struct ApplyArgs {
    pub styles: Vec<String>,
    pub prompt: String,
    pub negative: String,
    pub preset: Option<String>,
    pub mode: ApplyModeArg,
    pub track: bool,
}

impl From<ApplyModeArg> for ApplyMode {
    fn from(mode: ApplyModeArg) -> Self {
        match mode {
            ApplyModeArg::Prompt => ApplyMode::Prompt,
            ApplyModeArg::Silent => ApplyMode::Silent,
        }
    }
}

/// Run the apply command.
///
/// Preset styles come first, followed by the styles named on the command line.
pub fn run_apply(service: &StyleService, args: ApplyArgs, json: bool) -> anyhow::Result<()> {
    let mut styles = Vec::new();
    if let Some(name) = &args.preset {
        let presets = service.preset_store();
        let preset = presets.get(name).ok_or_else(|| {
            StyleError::invalid_input("preset", format!("preset '{}' not found", name))
        })?;
        styles.extend(preset.styles.iter().cloned());
    }
    styles.extend(args.styles);

    let request = ApplyRequest {
        prompt: args.prompt,
        negative_prompt: args.negative,
        styles,
        mode: args.mode.into(),
    };

    let mut tracker = args.track.then(|| service.usage_tracker());
    let result = service.apply(&request, tracker.as_mut())?;

    let skipped: Vec<&String> = request
        .styles
        .iter()
        .filter(|name| !result.applied.contains(*name))
        .collect();
    for name in &skipped {
        tracing::warn!("Unknown style '{}' skipped", name);
    }

    if json {
        return print_json(&serde_json::json!({
            "mode": args.mode.to_string(),
            "prompt": result.prompt,
            "negative_prompt": result.negative_prompt,
            "applied": result.applied,
            "skipped": skipped,
        }));
    }

    match args.mode {
        ApplyModeArg::Prompt => {
            println!("{}", result.prompt);
            if !result.negative_prompt.is_empty() {
                println!("Negative prompt: {}", result.negative_prompt);
            }
        }
        ApplyModeArg::Silent => {
            println!("Resolved styles: {}", result.applied.join(", "));
        }
    }
    Ok(())
}

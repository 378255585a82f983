//! Style Grid CLI - browse, edit and apply prompt styles.
//!
//! Commands:
//! - `stylegrid list`: styles grouped by category
//! - `stylegrid reload`: rescan sources and report changes
//! - `stylegrid save <name>` / `stylegrid delete <name>`: edit CSV sources
//! - `stylegrid conflicts <styles...>`: positive/negative token overlaps
//! - `stylegrid apply <styles...>`: apply styles to a prompt
//! - `stylegrid search <query>`: filter styles
//! - `stylegrid usage`: most used styles
//! - `stylegrid preset save|list|show|delete`: saved selections
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stylegrid::apply::{self, ApplyArgs};
use stylegrid::{conflicts, edit, list, preset, reload, search, usage};
use stylegrid::{Cli, Commands};
use stylegrid_styles::{SaveStyleRequest, StyleService};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("stylegrid=debug,stylegrid_styles=debug,stylegrid_config=debug,stylegrid_directory=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let json = cli.json;
    std::process::exit(result_to_exit(run(cli), json));
}

/// Load settings, build the service and run the subcommand.
fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = stylegrid_config::load_settings(cli.config.as_deref())?;
    let service = StyleService::new(settings)?;
    dispatch_command(&service, cli.command, cli.json)
}

/// Dispatch a parsed subcommand to its handler.
fn dispatch_command(service: &StyleService, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::List {
            source,
            category,
            verbose,
        } => list::run_list(service, source.as_deref(), category.as_deref(), verbose, json),
        Commands::Reload => reload::run_reload(service, json),
        Commands::Save {
            name,
            prompt,
            negative,
            source,
        } => edit::run_save(
            service,
            SaveStyleRequest {
                name,
                prompt,
                negative_prompt: negative,
                source,
            },
            json,
        ),
        Commands::Delete { name, source } => {
            edit::run_delete(service, &name, source.as_deref(), json)
        }
        Commands::Conflicts { styles } => conflicts::run_conflicts(service, &styles, json),
        Commands::Apply {
            styles,
            prompt,
            negative,
            preset,
            mode,
            no_track,
        } => apply::run_apply(
            service,
            ApplyArgs {
                styles,
                prompt,
                negative,
                preset,
                mode,
                track: !no_track,
            },
            json,
        ),
        Commands::Search { query, source } => {
            search::run_search(service, &query, source.as_deref(), json)
        }
        Commands::Usage { limit } => usage::run_usage(service, limit, json),
        Commands::Preset { command } => preset::run_preset(service, command, json),
    }
}

/// Convert a command result to an exit code, reporting errors.
fn result_to_exit(result: anyhow::Result<()>, json: bool) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            if json {
                let error_output = serde_json::json!({
                    "success": false,
                    "error": format!("{:#}", e),
                });
                println!("{}", error_output);
            } else {
                eprintln!("Error: {:#}", e);
            }
            1
        }
    }
}

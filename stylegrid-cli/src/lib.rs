//! Style Grid command-line interface.
//!
//! Each subcommand lives in its own module with a `run_*` entry point taking
//! a [`StyleService`](stylegrid_styles::StyleService) and returning
//! `anyhow::Result<()>`. Output is a table by default or JSON with `--json`.

pub mod apply;
pub mod cli;
pub mod conflicts;
pub mod edit;
pub mod list;
pub mod preset;
pub mod reload;
pub mod search;
pub mod table;
pub mod usage;

pub use cli::{ApplyModeArg, Cli, Commands, PresetCommands};

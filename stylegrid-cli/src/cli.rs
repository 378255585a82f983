//! CLI definition for the `stylegrid` command-line interface.
//!
//! Only depends on `clap` and `std`; conversion into library types happens
//! in the command modules.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// How `apply` hands styles to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ApplyModeArg {
    /// Print the rewritten prompt
    #[default]
    Prompt,
    /// Leave the prompt unchanged and only resolve the selection
    Silent,
}

impl std::fmt::Display for ApplyModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyModeArg::Prompt => write!(f, "prompt"),
            ApplyModeArg::Silent => write!(f, "silent"),
        }
    }
}

/// Style Grid - prompt style library
///
/// Browse, edit and apply prompt styles stored in CSV files.
#[derive(Parser, Debug)]
#[command(name = "stylegrid")]
#[command(version)]
#[command(about = "Style Grid - prompt style library")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Additional configuration file layered over the discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List styles grouped by category
    List {
        /// Only show styles from this source file label
        #[arg(short, long)]
        source: Option<String>,
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
        /// Include prompt columns
        #[arg(short, long)]
        verbose: bool,
    },
    /// Rescan sources and report whether they changed since the last reload
    Reload,
    /// Add or update a style
    Save {
        /// Style name
        name: String,
        /// Positive prompt fragment, may contain {prompt}
        #[arg(short, long, default_value = "")]
        prompt: String,
        /// Negative prompt fragment
        #[arg(short, long, default_value = "")]
        negative: String,
        /// Source file label to write to
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Delete a style
    Delete {
        /// Style name
        name: String,
        /// Source file label to delete from; defaults to the source that wins the merge
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Report prompt tokens that other selected styles negate
    Conflicts {
        /// Style names
        #[arg(required = true)]
        styles: Vec<String>,
    },
    /// Apply styles to a prompt
    Apply {
        /// Style names, applied in order
        styles: Vec<String>,
        /// Base prompt
        #[arg(short, long, default_value = "")]
        prompt: String,
        /// Base negative prompt
        #[arg(short, long, default_value = "")]
        negative: String,
        /// Apply the styles of a saved preset before the listed ones
        #[arg(long)]
        preset: Option<String>,
        /// Apply mode
        #[arg(long, value_enum, default_value_t = ApplyModeArg::Prompt)]
        mode: ApplyModeArg,
        /// Do not record usage statistics
        #[arg(long)]
        no_track: bool,
    },
    /// Search styles ("phrase", @CATEGORY, -exclude, words)
    Search {
        /// Search query
        #[arg(allow_hyphen_values = true)]
        query: String,
        /// Only search this source file label
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Show the most used styles
    Usage {
        /// Maximum number of entries
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Manage saved style selections
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// Save styles under a preset name, replacing any existing preset
    Save {
        /// Preset name
        name: String,
        /// Style names in application order
        #[arg(required = true)]
        styles: Vec<String>,
    },
    /// List presets
    List,
    /// Show the styles of a preset
    Show {
        /// Preset name
        name: String,
    },
    /// Delete a preset
    Delete {
        /// Preset name
        name: String,
    },
}

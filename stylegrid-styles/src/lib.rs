//! # Style Grid Styles Domain Crate
//!
//! Style management for image-generation prompts: loading style CSV files,
//! categorizing and merging them, and applying them to prompts.
//!
//! ## Features
//!
//! - **Scanning**: Read style files from root, extension and user tiers
//! - **Categorizing**: Derive a category and display name from each style name
//! - **Merging**: One style per name, highest-priority source wins
//! - **Injection**: Apply styles with `{prompt}` placeholders or by appending
//! - **Editing**: Save and delete styles in CSV sources
//! - **State**: Usage counters and named presets stored as JSON
//!
//! ## Example
//!
//! ```no_run
//! use stylegrid_styles::{ApplyMode, ApplyRequest, StyleService};
//!
//! let settings = stylegrid_config::load_settings(None)?;
//! let service = StyleService::new(settings)?;
//!
//! let catalog = service.query();
//! for group in &catalog.categories {
//!     println!("{} ({} styles)", group.name, group.styles.len());
//! }
//!
//! let request = ApplyRequest {
//!     prompt: "a lighthouse at dusk".into(),
//!     styles: vec!["STYLE_watercolor".into()],
//!     mode: ApplyMode::Prompt,
//!     ..Default::default()
//! };
//! let result = service.apply(&request, None)?;
//! println!("{}", result.prompt);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

mod catalog;
mod categorize;
mod conflicts;
mod error;
mod inject;
mod merge;
mod parser;
mod persist;
mod presets;
mod record;
mod scanner;
mod search;
mod service;
mod store;
mod usage;

pub use catalog::{group_by_category, CategoryGroup, StyleCatalog};
pub use categorize::{categorize, category_from_filename, Categorization, OTHER_CATEGORY};
pub use conflicts::{find_conflicts, tokenize, StyleConflict};
pub use error::StyleError;
pub use inject::{inject_text, ApplyMode, InjectedPrompt, PromptInjector};
pub use merge::{merge_by_priority, styles_for_source, ALL_SOURCES};
pub use parser::{parse_rows, parse_styles_csv, read_rows, StyleRow};
pub use presets::{Preset, PresetStore, PRESETS_FILE_NAME};
pub use record::{StyleRecord, PLACEHOLDER};
pub use scanner::{ScanResult, ScanState, StyleScanner, SCAN_STATE_FILE_NAME};
pub use search::{search_text, SearchQuery};
pub use service::{
    ApplyRequest, DeleteOutcome, ReloadOutcome, SaveOutcome, SaveStyleRequest, StyleLocations,
    StyleService, DEFAULT_ROOT_FILE, DEFAULT_SAVE_FILE, STYLES_SUBDIR,
};
pub use store::{CsvStyleFile, CSV_HEADER};
pub use usage::{UsageEntry, UsageTracker, USAGE_FILE_NAME};

pub use stylegrid_config::CategoryMode;

/// Result type for style operations
pub type Result<T> = std::result::Result<T, StyleError>;

//! Source discovery for style CSV files.
//!
//! Style files live in three tiers, scanned from lowest to highest priority:
//!
//! 1. a single well-known root file (`styles.csv` next to the host application)
//! 2. `*.csv` files inside a folder owned by this tool
//! 3. files or folders listed by the user in configuration
//!
//! [`SourceDiscovery`] turns that layout into an ordered list of
//! [`SourceFile`]s. Parsing the files is left to the caller.
//!
//! [`ManagedDirectory`] handles the `.stylegrid` state directory used for
//! configuration, usage statistics and presets.
//!
//! # Example
//!
//! ```no_run
//! use stylegrid_directory::{SourceDiscovery, SourceTier};
//! use std::path::PathBuf;
//!
//! let mut discovery = SourceDiscovery::new();
//! discovery.add_root_file(PathBuf::from("styles.csv"));
//! discovery.add_extension_dir(PathBuf::from("extensions/style-grid/styles"));
//! discovery.add_user_path(PathBuf::from("/home/me/my-styles.csv"));
//!
//! for source in discovery.discover() {
//!     println!("{} [{}] {}", source.label, source.tier, source.path.display());
//! }
//! ```

mod config;
mod directory;
mod error;
mod source_discovery;

pub use config::{DirectoryConfig, StyleGridDirConfig};
pub use directory::{find_git_repository_root, ManagedDirectory};
pub use error::{DirectoryError, Result};
pub use source_discovery::{unique_labels, SourceDiscovery, SourceFile, SourceTier};

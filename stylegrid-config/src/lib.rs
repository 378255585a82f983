//! Style Grid configuration management using Figment.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. global file `~/.stylegrid/config.{toml,yaml,yml,json}`
//! 3. project file `{git_root or cwd}/.stylegrid/config.{toml,yaml,yml,json}`
//! 4. an explicit file passed by the caller (e.g. `--config`)
//! 5. `STYLEGRID_` environment variables
//!
//! Nothing is cached: every call to [`load_settings`] reads the files again.
//! A leading `~` in a configured path is expanded by [`expand_home`].
//!
//! ```no_run
//! let settings = stylegrid_config::load_settings(None)?;
//! for path in &settings.user_sources {
//!     println!("user source: {}", path.display());
//! }
//! # Ok::<(), stylegrid_config::ConfigError>(())
//! ```
//!
//! ## Example TOML
//!
//! ```toml
//! root_file = "/opt/webui/styles.csv"
//! styles_dir = "/opt/webui/extensions/style-grid/styles"
//! user_sources = ["~/styles/portraits.csv", "~/styles/landscapes"]
//! default_source = "portraits.csv"
//! category_mode = "lenient"
//! category_order = ["BASE", "STYLE", "OTHER"]
//! ```

mod discovery;
mod error;
mod provider;
mod settings;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::ConfigError;
pub use provider::ConfigProvider;
pub use settings::{expand_home, CategoryMode, StyleGridSettings, DEFAULT_CATEGORY_ORDER};

use std::path::Path;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load settings from every configuration source.
///
/// `explicit` is an additional file layered above the discovered ones.
pub fn load_settings(explicit: Option<&Path>) -> ConfigResult<StyleGridSettings> {
    let mut provider = ConfigProvider::new();
    if let Some(path) = explicit {
        provider = provider.with_explicit_file(path.to_path_buf());
    }
    provider.load_settings()
}

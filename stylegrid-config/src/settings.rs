//! Typed settings extracted from the merged configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Preferred category ordering when grouping styles.
pub const DEFAULT_CATEGORY_ORDER: [&str; 10] = [
    "BASE",
    "BODY",
    "GENITALS",
    "BREASTS",
    "THEME",
    "RESTRAINTS",
    "POSE",
    "SCENE",
    "STYLE",
    "OTHER",
];

/// How the underscore prefix of a style name becomes a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryMode {
    /// Only an uppercase prefix of two or more characters is a category.
    #[default]
    Strict,
    /// Any prefix before the first underscore is a category, upper-cased.
    Lenient,
}

/// Settings for locating style sources and local state.
///
/// Unset paths are resolved by the consumer (see `stylegrid-styles`):
/// `root_file` defaults to `styles.csv` in the current directory, `styles_dir`
/// and `state_dir` default to the project `.stylegrid` directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleGridSettings {
    /// The well-known root styles file (lowest priority tier).
    pub root_file: Option<PathBuf>,
    /// Folder whose `*.csv` files form the extension tier.
    pub styles_dir: Option<PathBuf>,
    /// Files or folders forming the user tier (highest priority).
    pub user_sources: Vec<PathBuf>,
    /// Source label that receives saved styles when none is given.
    pub default_source: Option<String>,
    /// Directory for `usage.json` and `presets.json`.
    pub state_dir: Option<PathBuf>,
    /// Category derivation mode.
    pub category_mode: CategoryMode,
    /// Categories listed first, in this order, when grouping.
    pub category_order: Vec<String>,
}

impl Default for StyleGridSettings {
    fn default() -> Self {
        Self {
            root_file: None,
            styles_dir: None,
            user_sources: Vec::new(),
            default_source: None,
            state_dir: None,
            category_mode: CategoryMode::default(),
            category_order: DEFAULT_CATEGORY_ORDER
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Replace a leading `~` component with the user's home directory.
///
/// Paths without one, or when no home directory is known, come back unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home(Path::new("~/styles/a.csv")), home.join("styles/a.csv"));
        assert_eq!(expand_home(Path::new("~")), home);
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        assert_eq!(expand_home(Path::new("/opt/a.csv")), PathBuf::from("/opt/a.csv"));
        assert_eq!(expand_home(Path::new("rel/~/a.csv")), PathBuf::from("rel/~/a.csv"));
        assert_eq!(expand_home(Path::new("~user/a.csv")), PathBuf::from("~user/a.csv"));
    }

    #[test]
    fn test_defaults() {
        let settings = StyleGridSettings::default();
        assert!(settings.root_file.is_none());
        assert!(settings.user_sources.is_empty());
        assert_eq!(settings.category_mode, CategoryMode::Strict);
        assert_eq!(settings.category_order.first().map(String::as_str), Some("BASE"));
        assert_eq!(settings.category_order.last().map(String::as_str), Some("OTHER"));
    }
}

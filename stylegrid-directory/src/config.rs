//! Configuration trait for managed directories.

/// Describes a managed directory type.
///
/// # Example
///
/// ```rust
/// use stylegrid_directory::DirectoryConfig;
///
/// pub struct ScratchDir;
///
/// impl DirectoryConfig for ScratchDir {
///     const DIR_NAME: &'static str = ".scratch";
///     const GITIGNORE_CONTENT: &'static str = "*\n";
/// }
/// ```
pub trait DirectoryConfig: Send + Sync {
    /// Name of the directory created at the root location.
    const DIR_NAME: &'static str;

    /// Content written to `.gitignore` inside the directory on creation.
    const GITIGNORE_CONTENT: &'static str;

    /// Subdirectories to create on initialization. Default: none.
    fn init_subdirs() -> &'static [&'static str] {
        &[]
    }
}

/// The `.stylegrid` directory.
///
/// Holds `config.{toml,yaml,json}`, `usage.json`, `presets.json` and
/// `scan_state.json`, and by default a `styles/` folder for the extension tier.
#[derive(Debug, Clone, Copy)]
pub struct StyleGridDirConfig;

impl DirectoryConfig for StyleGridDirConfig {
    const DIR_NAME: &'static str = ".stylegrid";
    const GITIGNORE_CONTENT: &'static str = r#"# Style Grid local state
# This file is automatically created by stylegrid-directory

# Usage statistics and source fingerprints are per machine
usage.json
scan_state.json

# Temporary files
*.tmp
*.log

# Keep these (they should be committed):
# - styles/       Shared style CSV files
# - presets.json  Saved style selections
"#;

    fn init_subdirs() -> &'static [&'static str] {
        &["styles"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylegrid_dir_config() {
        assert_eq!(StyleGridDirConfig::DIR_NAME, ".stylegrid");
        assert!(StyleGridDirConfig::GITIGNORE_CONTENT.contains("usage.json"));
        assert!(StyleGridDirConfig::GITIGNORE_CONTENT.contains("scan_state.json"));
        assert_eq!(StyleGridDirConfig::init_subdirs(), &["styles"]);
    }
}

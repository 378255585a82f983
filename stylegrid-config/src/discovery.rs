//! Configuration file discovery
//!
//! Finds `config.{toml,yaml,yml,json}` inside the global (`~/.stylegrid`) and
//! project (`{git_root or cwd}/.stylegrid`) directories.

use std::path::{Path, PathBuf};
use stylegrid_directory::{find_git_repository_root, DirectoryConfig, StyleGridDirConfig};
use tracing::{debug, trace};

/// File names looked for in each configuration directory, in merge order.
const CONFIG_FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Detected format of the file
    pub format: ConfigFormat,
    /// Where the file was found
    pub scope: ConfigScope,
    /// Priority for ordering (higher values take precedence)
    pub priority: u8,
}

impl ConfigFile {
    /// Create a new ConfigFile with the given path, format, and scope
    pub fn new(path: PathBuf, format: ConfigFormat, scope: ConfigScope) -> Self {
        let priority = scope.priority();
        Self {
            path,
            format,
            scope,
            priority,
        }
    }

    /// Classify an arbitrary path by its extension.
    pub fn from_path(path: PathBuf, scope: ConfigScope) -> Option<Self> {
        let format = ConfigFormat::from_extension(path.extension()?.to_str()?)?;
        Some(Self::new(path, format, scope))
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a configuration file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `~/.stylegrid/`
    Global,
    /// `./.stylegrid/`
    Project,
    /// A file named on the command line
    Explicit,
}

impl ConfigScope {
    /// Priority value for this scope (higher values override lower ones)
    pub fn priority(self) -> u8 {
        match self {
            Self::Global => 10,
            Self::Project => 20,
            Self::Explicit => 30,
        }
    }
}

/// File discovery service for configuration files
#[derive(Debug, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Create a discovery that resolves directories lazily at discovery time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use fixed directories instead of resolving home and project.
    pub fn with_directories(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// Discover all configuration files, lowest priority first.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let project_dir = self.project_dir.clone().or_else(Self::resolve_project_dir);
        let global_dir = self.global_dir.clone().or_else(Self::resolve_global_dir);

        let mut files = Vec::new();
        if let Some(ref dir) = global_dir {
            files.extend(self.search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = project_dir {
            files.extend(self.search_directory(dir, ConfigScope::Project));
        }

        files.sort_by_key(|f| f.priority);

        debug!("Discovered {} configuration files", files.len());
        files
    }

    fn search_directory(&self, dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.is_dir() {
            trace!("Configuration directory does not exist: {}", dir.display());
            return Vec::new();
        }

        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|candidate| ConfigFile::from_path(candidate, scope))
            .inspect(|file| trace!("Found config: {} ({:?})", file.path.display(), file.format))
            .collect()
    }

    fn resolve_project_dir() -> Option<PathBuf> {
        let base = find_git_repository_root().or_else(|| std::env::current_dir().ok())?;
        Some(base.join(StyleGridDirConfig::DIR_NAME)).filter(|dir| dir.is_dir())
    }

    fn resolve_global_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(StyleGridDirConfig::DIR_NAME)).filter(|dir| dir.is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("csv"), None);
    }

    #[test]
    fn test_scope_priority_order() {
        assert!(ConfigScope::Global.priority() < ConfigScope::Project.priority());
        assert!(ConfigScope::Project.priority() < ConfigScope::Explicit.priority());
    }

    #[test]
    fn test_discover_global_before_project() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global");
        let project = temp.path().join("project");
        fs::create_dir_all(&global).unwrap();
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("config.yaml"), "default_source: a.csv\n").unwrap();
        fs::write(global.join("config.toml"), "default_source = \"b.csv\"\n").unwrap();
        fs::write(global.join("other.toml"), "").unwrap();

        let discovery = FileDiscovery::with_directories(Some(project), Some(global));
        let files = discovery.discover_all();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].scope, ConfigScope::Global);
        assert_eq!(files[0].format, ConfigFormat::Toml);
        assert_eq!(files[1].scope, ConfigScope::Project);
        assert_eq!(files[1].format, ConfigFormat::Yaml);
    }

    #[test]
    fn test_missing_directories_yield_nothing() {
        let temp = TempDir::new().unwrap();
        let discovery = FileDiscovery::with_directories(
            Some(temp.path().join("nope")),
            Some(temp.path().join("nada")),
        );
        assert!(discovery.discover_all().is_empty());
    }
}

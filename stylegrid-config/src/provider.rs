//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery},
    error::ConfigError,
    settings::StyleGridSettings,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::PathBuf;
use tracing::{debug, trace};

/// Environment variable prefix for settings overrides.
const ENV_PREFIX: &str = "STYLEGRID_";

/// Loads [`StyleGridSettings`] from every source in precedence order.
///
/// No caching is performed; settings are read fresh on every call.
#[derive(Debug, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    explicit_file: Option<PathBuf>,
}

impl ConfigProvider {
    /// Create a provider that discovers global and project files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific discovery (e.g. fixed directories in tests).
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Layer an explicit file above the discovered ones.
    pub fn with_explicit_file(mut self, path: PathBuf) -> Self {
        self.explicit_file = Some(path);
        self
    }

    /// Merge all sources and extract typed settings.
    pub fn load_settings(&self) -> ConfigResult<StyleGridSettings> {
        let settings: StyleGridSettings = self.build_figment()?.extract()?;
        debug!(
            "Loaded settings: {} user source(s), mode {:?}",
            settings.user_sources.len(),
            settings.category_mode
        );
        Ok(settings)
    }

    /// Sources in precedence order (later sources override earlier ones):
    /// 1. Defaults
    /// 2. Discovered files (global, then project)
    /// 3. Explicit file
    /// 4. Environment variables
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(StyleGridSettings::default()));

        for config_file in self.discovery.discover_all() {
            figment = figment.merge(Self::load_config_file(&config_file));
        }

        if let Some(path) = &self.explicit_file {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound { path: path.clone() });
            }
            let config_file = ConfigFile::from_path(path.clone(), ConfigScope::Explicit)
                .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.clone() })?;
            figment = figment.merge(Self::load_config_file(&config_file));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        trace!("Loading config file: {} ({:?})", path.display(), config_file.format);

        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}

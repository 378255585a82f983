//! Named style selections persisted as `presets.json`.

use crate::error::StyleError;
use crate::persist;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name inside the state directory.
pub const PRESETS_FILE_NAME: &str = "presets.json";

/// An ordered list of style names saved under a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Style names in application order.
    pub styles: Vec<String>,
    /// When the preset was last saved.
    pub created: DateTime<Utc>,
}

/// Preset persistence.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
    presets: BTreeMap<String, Preset>,
}

impl PresetStore {
    /// Load presets from `state_dir`. Missing or malformed files start empty.
    pub fn load(state_dir: &Path) -> Self {
        let path = state_dir.join(PRESETS_FILE_NAME);
        let presets = persist::load_or_default(&path);
        Self { path, presets }
    }

    /// Save `styles` under `name`, replacing any preset with that name.
    pub fn save_preset(
        &mut self,
        name: &str,
        styles: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<Preset> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StyleError::invalid_input("name", "preset name is required"));
        }

        let preset = Preset {
            styles,
            created: now,
        };
        self.presets.insert(name.to_string(), preset.clone());
        persist::save(&self.path, &self.presets)?;
        tracing::info!("Saved preset '{}'", name);
        Ok(preset)
    }

    /// Preset by name.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    /// All presets sorted by name.
    pub fn list(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(name, preset)| (name.as_str(), preset))
    }

    /// Remove a preset. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        if self.presets.remove(name).is_none() {
            return Ok(false);
        }
        persist::save(&self.path, &self.presets)?;
        tracing::info!("Deleted preset '{}'", name);
        Ok(true)
    }
}

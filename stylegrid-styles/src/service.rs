//! High-level operations over the style library.
//!
//! [`StyleService`] ties discovery, scanning, merging and the CSV store
//! together. Every call rescans the sources; nothing is cached between calls.

use crate::catalog::StyleCatalog;
use crate::conflicts::{find_conflicts, StyleConflict};
use crate::error::StyleError;
use crate::inject::{ApplyMode, InjectedPrompt, PromptInjector};
use crate::merge::{merge_by_priority, ALL_SOURCES};
use crate::parser::StyleRow;
use crate::presets::PresetStore;
use crate::scanner::{ScanResult, ScanState, StyleScanner};
use crate::store::CsvStyleFile;
use crate::usage::UsageTracker;
use crate::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::PathBuf;
use stylegrid_config::{expand_home, StyleGridSettings};
use stylegrid_directory::{ManagedDirectory, SourceDiscovery, SourceFile, StyleGridDirConfig};

/// Name of the root file when none is configured.
pub const DEFAULT_ROOT_FILE: &str = "styles.csv";

/// File created in the styles folder when saving without a target.
pub const DEFAULT_SAVE_FILE: &str = "styles.csv";

/// Subdirectory of the state directory holding extension-tier styles.
pub const STYLES_SUBDIR: &str = "styles";

/// Resolved filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleLocations {
    /// Root tier file.
    pub root_file: PathBuf,
    /// Extension tier folder.
    pub styles_dir: PathBuf,
    /// User tier files and folders.
    pub user_sources: Vec<PathBuf>,
    /// Where usage and presets are stored.
    pub state_dir: PathBuf,
}

impl StyleLocations {
    /// Resolve locations from settings.
    ///
    /// The root file defaults to `styles.csv` in the current directory. The
    /// styles folder and state directory default to the project `.stylegrid`
    /// directory, which is only created when one of them is not configured.
    /// Configured paths may start with `~`.
    pub fn from_settings(settings: &StyleGridSettings) -> Result<Self> {
        let root_file = match &settings.root_file {
            Some(path) => expand_home(path),
            None => std::env::current_dir()
                .map_err(|e| StyleError::file_read(".", e))?
                .join(DEFAULT_ROOT_FILE),
        };

        let (styles_dir, state_dir) = match (&settings.styles_dir, &settings.state_dir) {
            (Some(styles), Some(state)) => (expand_home(styles), expand_home(state)),
            (styles, state) => {
                let project = ManagedDirectory::<StyleGridDirConfig>::from_project()?;
                (
                    styles
                        .as_deref()
                        .map(expand_home)
                        .unwrap_or_else(|| project.subdir(STYLES_SUBDIR)),
                    state
                        .as_deref()
                        .map(expand_home)
                        .unwrap_or_else(|| project.root().to_path_buf()),
                )
            }
        };

        Ok(Self {
            root_file,
            styles_dir,
            user_sources: settings
                .user_sources
                .iter()
                .map(|path| expand_home(path))
                .collect(),
            state_dir,
        })
    }

    /// Discovery over these locations, lowest tier first.
    pub fn discovery(&self) -> SourceDiscovery {
        let mut discovery = SourceDiscovery::new();
        discovery.add_root_file(self.root_file.clone());
        discovery.add_extension_dir(self.styles_dir.clone());
        for path in &self.user_sources {
            discovery.add_user_path(path.clone());
        }
        discovery
    }
}

/// Input of [`StyleService::save_style`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveStyleRequest {
    /// Style name, required.
    pub name: String,
    /// Positive prompt fragment.
    #[serde(default)]
    pub prompt: String,
    /// Negative prompt fragment.
    #[serde(default)]
    pub negative_prompt: String,
    /// Target source label; the default source when absent.
    #[serde(default)]
    pub source: Option<String>,
}

/// Result of a save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    /// Saved style name.
    pub name: String,
    /// Label of the file written.
    pub source: String,
    /// Path of the file written.
    pub path: PathBuf,
    /// True when a new row was appended.
    pub created: bool,
}

/// Result of a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// Deleted style name.
    pub name: String,
    /// Label of the file rewritten.
    pub source: String,
    /// Path of the file rewritten.
    pub path: PathBuf,
}

/// Result of a reload.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadOutcome {
    /// Fresh catalog.
    pub catalog: StyleCatalog,
    /// Whether any source was added, removed or modified since the last reload.
    pub changed: bool,
}

/// Input of [`StyleService::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyRequest {
    /// Base positive prompt.
    #[serde(default)]
    pub prompt: String,
    /// Base negative prompt.
    #[serde(default)]
    pub negative_prompt: String,
    /// Selected style names in application order.
    pub styles: Vec<String>,
    /// Whether to rewrite the prompt.
    #[serde(default)]
    pub mode: ApplyMode,
}

/// The style library.
#[derive(Debug, Clone)]
pub struct StyleService {
    settings: StyleGridSettings,
    locations: StyleLocations,
}

impl StyleService {
    /// Create a service, resolving locations from `settings`.
    pub fn new(settings: StyleGridSettings) -> Result<Self> {
        let locations = StyleLocations::from_settings(&settings)?;
        Ok(Self::with_locations(settings, locations))
    }

    /// Create a service with explicit locations.
    pub fn with_locations(settings: StyleGridSettings, locations: StyleLocations) -> Self {
        Self {
            settings,
            locations,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> &StyleGridSettings {
        &self.settings
    }

    /// Resolved locations.
    pub fn locations(&self) -> &StyleLocations {
        &self.locations
    }

    fn scan(&self) -> ScanResult {
        StyleScanner::new(self.locations.discovery(), self.settings.category_mode).scan()
    }

    fn catalog(&self, scan: ScanResult) -> StyleCatalog {
        StyleCatalog::new(scan.sources, scan.styles, &self.settings.category_order)
    }

    /// Scan every source and build the catalog.
    pub fn query(&self) -> StyleCatalog {
        let catalog = self.catalog(self.scan());
        tracing::debug!(
            "Loaded {} styles from {} sources",
            catalog.styles.len(),
            catalog.sources.len()
        );
        catalog
    }

    /// Rescan and report whether sources changed since `state` was last refreshed.
    pub fn reload(&self, state: &mut ScanState) -> ReloadOutcome {
        let scan = self.scan();
        let changed = state.refresh(&scan.files);
        ReloadOutcome {
            catalog: self.catalog(scan),
            changed,
        }
    }

    /// Insert or replace a style in the chosen source.
    pub fn save_style(&self, request: SaveStyleRequest) -> Result<SaveOutcome> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(StyleError::invalid_input("name", "style name is required"));
        }

        let files = self.locations.discovery().discover();
        let label = request
            .source
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty() && *label != ALL_SOURCES);

        let target = match label {
            Some(label) => find_source(&files, label)
                .map(|file| file.path.clone())
                .ok_or_else(|| StyleError::SourceNotFound {
                    label: label.to_string(),
                })?,
            None => self.default_target(&files),
        };

        let created = CsvStyleFile::new(&target).upsert(StyleRow::new(
            name,
            request.prompt.trim(),
            request.negative_prompt.trim(),
        ))?;

        tracing::info!(
            "{} style '{}' in {}",
            if created { "Added" } else { "Updated" },
            name,
            target.display()
        );

        Ok(SaveOutcome {
            name: name.to_string(),
            source: label_of(&target),
            path: target,
            created,
        })
    }

    /// The configured default source, else `styles.csv` in the styles folder.
    fn default_target(&self, files: &[SourceFile]) -> PathBuf {
        match self.settings.default_source.as_deref() {
            Some(label) => find_source(files, label)
                .map(|file| file.path.clone())
                .unwrap_or_else(|| self.locations.styles_dir.join(label)),
            None => self.locations.styles_dir.join(DEFAULT_SAVE_FILE),
        }
    }

    /// Delete a style from a source.
    ///
    /// Without a label the style is removed from the source whose record wins
    /// the merge; lower-priority copies stay and may become visible.
    pub fn delete_style(&self, name: &str, source: Option<&str>) -> Result<DeleteOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StyleError::invalid_input("name", "style name is required"));
        }
        let not_found = || StyleError::StyleNotFound {
            name: name.to_string(),
        };

        let label = source
            .map(str::trim)
            .filter(|label| !label.is_empty() && *label != ALL_SOURCES);

        let scan = self.scan();
        let candidates: Vec<&SourceFile> = match label {
            Some(label) => vec![find_source(&scan.files, label).ok_or_else(|| {
                StyleError::SourceNotFound {
                    label: label.to_string(),
                }
            })?],
            None => {
                let winner = merge_by_priority(&scan.styles)
                    .into_iter()
                    .find(|style| style.name == name)
                    .ok_or_else(not_found)?;
                scan.files
                    .iter()
                    .filter(|f| f.label == winner.source && f.priority() == winner.source_priority)
                    .collect()
            }
        };

        for file in candidates {
            if CsvStyleFile::new(&file.path).delete(name)? {
                tracing::info!("Deleted style '{}' from {}", name, file.path.display());
                return Ok(DeleteOutcome {
                    name: name.to_string(),
                    source: file.label.clone(),
                    path: file.path.clone(),
                });
            }
        }
        Err(not_found())
    }

    /// Positive/negative overlaps between the named styles.
    pub fn check_conflicts<S: AsRef<str>>(&self, names: &[S]) -> Vec<StyleConflict> {
        find_conflicts(names, &self.query().merged())
    }

    /// Apply styles to a prompt pair, recording usage when a tracker is given.
    pub fn apply(
        &self,
        request: &ApplyRequest,
        usage: Option<&mut UsageTracker>,
    ) -> Result<InjectedPrompt> {
        let merged = self.query().merged();
        let result = PromptInjector::new(&merged).apply(
            &request.prompt,
            &request.negative_prompt,
            &request.styles,
            request.mode,
        );

        if let Some(tracker) = usage {
            if !result.applied.is_empty() {
                tracker.record(&result.applied, Utc::now());
                tracker.save()?;
            }
        }
        Ok(result)
    }

    /// Usage counters from the state directory.
    pub fn usage_tracker(&self) -> UsageTracker {
        UsageTracker::load(&self.locations.state_dir)
    }

    /// Presets from the state directory.
    pub fn preset_store(&self) -> PresetStore {
        PresetStore::load(&self.locations.state_dir)
    }
}

/// First file with `label` in the highest tier that has one.
fn find_source<'a>(files: &'a [SourceFile], label: &str) -> Option<&'a SourceFile> {
    files
        .iter()
        .filter(|file| file.label == label)
        .min_by_key(|file| Reverse(file.tier))
}

fn label_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

//! Scanning discovered sources into categorized style records.

use crate::parser::parse_styles_csv;
use crate::persist;
use crate::record::StyleRecord;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stylegrid_config::CategoryMode;
use stylegrid_directory::{unique_labels, SourceDiscovery, SourceFile};

/// Everything one scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Source labels, deduplicated, first-seen order.
    pub sources: Vec<String>,
    /// Every parsed record, categorized, in scan order.
    pub styles: Vec<StyleRecord>,
    /// Discovered files, in scan order.
    pub files: Vec<SourceFile>,
}

/// Reads every discovered source file.
#[derive(Debug, Clone)]
pub struct StyleScanner {
    discovery: SourceDiscovery,
    mode: CategoryMode,
}

impl StyleScanner {
    /// Create a scanner over `discovery`.
    pub fn new(discovery: SourceDiscovery, mode: CategoryMode) -> Self {
        Self { discovery, mode }
    }

    /// Discover and parse every source.
    ///
    /// A file that cannot be read or parsed is skipped with a warning and
    /// still contributes its label.
    pub fn scan(&self) -> ScanResult {
        let files = self.discovery.discover();
        let sources = unique_labels(&files);

        let mut styles = Vec::new();
        for file in &files {
            match parse_styles_csv(&file.path, &file.label, file.priority()) {
                Ok(records) => {
                    tracing::debug!(
                        "Loaded {} styles from {} ({})",
                        records.len(),
                        file.path.display(),
                        file.tier
                    );
                    styles.extend(records.into_iter().map(|r| r.categorized(self.mode)));
                }
                Err(e) => {
                    tracing::warn!("Skipping style source {}: {}", file.path.display(), e);
                }
            }
        }

        ScanResult {
            sources,
            styles,
            files,
        }
    }
}

/// File name used when a [`ScanState`] is kept in the state directory.
pub const SCAN_STATE_FILE_NAME: &str = "scan_state.json";

/// Content fingerprints of the sources seen by the last refresh.
///
/// Owned by the caller and passed to each reload. Callers that outlive a
/// single process can keep it on disk with [`load`](Self::load) and
/// [`save`](Self::save).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanState {
    fingerprints: HashMap<PathBuf, String>,
    #[serde(default)]
    seeded: bool,
}

impl ScanState {
    /// Empty state; the first refresh always reports a change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingerprinted sources.
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    /// True before the first refresh or when no sources exist.
    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// Fingerprint `files` and report whether anything was added, removed or
    /// modified since the previous refresh.
    pub fn refresh(&mut self, files: &[SourceFile]) -> bool {
        let current: HashMap<PathBuf, String> = files
            .iter()
            .map(|file| (file.path.clone(), fingerprint(&file.path)))
            .collect();

        let changed = !self.seeded || current != self.fingerprints;
        if changed {
            tracing::debug!("Style sources changed ({} files)", current.len());
        }
        self.fingerprints = current;
        self.seeded = true;
        changed
    }

    /// Load from `state_dir`. Missing or malformed files give a fresh state.
    pub fn load(state_dir: &Path) -> Self {
        persist::load_or_default(&state_dir.join(SCAN_STATE_FILE_NAME))
    }

    /// Write to `state_dir`.
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        persist::save(&state_dir.join(SCAN_STATE_FILE_NAME), self)
    }
}

fn fingerprint(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => format!("{:x}", md5::compute(bytes)),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout(temp: &TempDir) -> SourceDiscovery {
        let root = temp.path().join("styles.csv");
        fs::write(&root, "name,prompt\nBASE_x,root x\nplain,p\n").unwrap();

        let ext = temp.path().join("ext");
        fs::create_dir(&ext).unwrap();
        fs::write(ext.join("b.csv"), "BASE_x,ext x\n").unwrap();
        fs::write(ext.join("a.CSV"), "POSE_sit,sit\n").unwrap();
        fs::write(ext.join("notes.txt"), "ignored,row\n").unwrap();

        let mut discovery = SourceDiscovery::new();
        discovery.add_extension_dir(ext);
        discovery.add_root_file(root);
        discovery
    }

    #[test]
    fn test_scan_orders_by_tier_and_file_name() {
        let temp = TempDir::new().unwrap();
        let result = StyleScanner::new(layout(&temp), CategoryMode::Strict).scan();

        assert_eq!(result.sources, vec!["styles.csv", "a.CSV", "b.csv"]);
        let names: Vec<(&str, i32)> = result
            .styles
            .iter()
            .map(|s| (s.name.as_str(), s.source_priority))
            .collect();
        assert_eq!(
            names,
            vec![("BASE_x", 0), ("plain", 0), ("POSE_sit", 1), ("BASE_x", 1)]
        );
    }

    #[test]
    fn test_scan_categorizes_records() {
        let temp = TempDir::new().unwrap();
        let result = StyleScanner::new(layout(&temp), CategoryMode::Strict).scan();
        let plain = result.styles.iter().find(|s| s.name == "plain").unwrap();
        assert_eq!(plain.category, "Styles");
        assert_eq!(result.styles[0].category, "BASE");
    }

    #[test]
    fn test_broken_file_is_skipped_but_labelled() {
        let temp = TempDir::new().unwrap();
        let bad = temp.path().join("bad.csv");
        fs::write(&bad, [0xff, 0xfe, 0x2c, 0x0a]).unwrap();
        let good = temp.path().join("good.csv");
        fs::write(&good, "A,a\n").unwrap();

        let mut discovery = SourceDiscovery::new();
        discovery.add_user_path(bad);
        discovery.add_user_path(good);

        let result = StyleScanner::new(discovery, CategoryMode::Strict).scan();
        assert_eq!(result.sources, vec!["bad.csv", "good.csv"]);
        assert_eq!(result.styles.len(), 1);
    }

    #[test]
    fn test_scan_state_detects_changes() {
        let temp = TempDir::new().unwrap();
        let scanner = StyleScanner::new(layout(&temp), CategoryMode::Strict);
        let mut state = ScanState::new();

        assert!(state.refresh(&scanner.scan().files));
        assert!(!state.refresh(&scanner.scan().files));
        assert_eq!(state.len(), 3);

        fs::write(temp.path().join("ext").join("b.csv"), "BASE_x,changed\n").unwrap();
        assert!(state.refresh(&scanner.scan().files));

        fs::write(temp.path().join("ext").join("c.csv"), "C,c\n").unwrap();
        assert!(state.refresh(&scanner.scan().files));

        fs::remove_file(temp.path().join("ext").join("a.CSV")).unwrap();
        assert!(state.refresh(&scanner.scan().files));
        assert!(!state.refresh(&scanner.scan().files));
    }

    #[test]
    fn test_scan_state_survives_save_and_load() {
        let temp = TempDir::new().unwrap();
        let scanner = StyleScanner::new(layout(&temp), CategoryMode::Strict);
        let state_dir = temp.path().join("state");

        let mut state = ScanState::load(&state_dir);
        assert!(state.refresh(&scanner.scan().files));
        state.save(&state_dir).unwrap();

        let mut restored = ScanState::load(&state_dir);
        assert!(!restored.refresh(&scanner.scan().files));
    }

    #[test]
    fn test_first_refresh_without_sources_reports_change() {
        let mut state = ScanState::new();
        assert!(state.refresh(&[]));
        assert!(!state.refresh(&[]));
        assert!(state.is_empty());
    }
}

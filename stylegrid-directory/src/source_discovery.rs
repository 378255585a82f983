//! Tiered discovery of style CSV source files.
//!
//! Search paths are registered in ascending priority. A search path may be a
//! single file or a directory; directories contribute their `*.csv` files
//! (non-recursive, sorted by file name).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Maximum source file size to load (10MB).
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Priority tier a source was discovered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    /// The well-known root `styles.csv`.
    Root,
    /// Files in the tool-owned styles folder.
    Extension,
    /// Files listed by the user in configuration.
    User,
}

impl SourceTier {
    /// Numeric priority, higher wins when styles are merged.
    pub fn priority(self) -> i32 {
        match self {
            SourceTier::Root => 0,
            SourceTier::Extension => 1,
            SourceTier::User => 2,
        }
    }
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTier::Root => write!(f, "root"),
            SourceTier::Extension => write!(f, "extension"),
            SourceTier::User => write!(f, "user"),
        }
    }
}

/// A file or directory to search, paired with its tier.
#[derive(Debug, Clone)]
struct SearchPath {
    path: PathBuf,
    tier: SourceTier,
    /// Create the directory when it does not exist.
    create_if_missing: bool,
}

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SourceFile {
    /// File basename, used as the source label.
    pub label: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// Tier the file was discovered in.
    pub tier: SourceTier,
}

impl SourceFile {
    /// Create a source file, deriving the label from the path's basename.
    pub fn new(path: PathBuf, tier: SourceTier) -> Self {
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { label, path, tier }
    }

    /// Numeric priority of this source.
    pub fn priority(&self) -> i32 {
        self.tier.priority()
    }
}

/// Collects search paths and resolves them into source files.
#[derive(Debug, Clone, Default)]
pub struct SourceDiscovery {
    search_paths: Vec<SearchPath>,
}

impl SourceDiscovery {
    /// Create an empty discovery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the well-known root file (lowest tier).
    pub fn add_root_file(&mut self, path: PathBuf) {
        self.add_search_path(path, SourceTier::Root, false);
    }

    /// Add the tool-owned styles folder. It is created on discovery when missing.
    pub fn add_extension_dir(&mut self, path: PathBuf) {
        self.add_search_path(path, SourceTier::Extension, true);
    }

    /// Add a user-configured file or folder (highest tier).
    pub fn add_user_path(&mut self, path: PathBuf) {
        self.add_search_path(path, SourceTier::User, false);
    }

    fn add_search_path(&mut self, path: PathBuf, tier: SourceTier, create_if_missing: bool) {
        self.search_paths.push(SearchPath {
            path,
            tier,
            create_if_missing,
        });
    }

    /// Resolve every search path into source files.
    ///
    /// Search paths are processed in registration order, then stably sorted by
    /// tier so lower tiers always come first. Missing paths are skipped;
    /// nothing here is fatal.
    pub fn discover(&self) -> Vec<SourceFile> {
        let mut ordered: Vec<&SearchPath> = self.search_paths.iter().collect();
        ordered.sort_by_key(|sp| sp.tier);

        let mut files = Vec::new();
        for sp in ordered {
            if sp.path.is_file() {
                if Self::is_loadable(&sp.path) {
                    files.push(SourceFile::new(sp.path.clone(), sp.tier));
                }
                continue;
            }

            if !sp.path.exists() {
                if sp.create_if_missing {
                    Self::ensure_dir(&sp.path);
                } else {
                    tracing::debug!("Source path '{}' does not exist", sp.path.display());
                }
                continue;
            }

            files.extend(
                Self::csv_files_in(&sp.path)
                    .into_iter()
                    .map(|path| SourceFile::new(path, sp.tier)),
            );
        }

        tracing::debug!("Discovered {} style source file(s)", files.len());
        files
    }

    fn ensure_dir(path: &Path) {
        match std::fs::create_dir_all(path) {
            Ok(()) => tracing::info!(
                "Created styles folder {}, put your CSV files here",
                path.display()
            ),
            Err(e) => tracing::warn!(
                "Could not create styles folder '{}': {}",
                path.display(),
                e
            ),
        }
    }

    /// `*.csv` files directly inside `dir`, sorted by file name.
    fn csv_files_in(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_type().is_dir())
            .map(|entry| entry.into_path())
            .filter(|path| is_csv(path))
            .filter(|path| Self::is_loadable(path) && Self::is_path_safe(path, dir))
            .collect()
    }

    fn is_loadable(path: &Path) -> bool {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.len() > MAX_FILE_SIZE => {
                tracing::warn!(
                    "Skipping file '{}' - size {} bytes exceeds limit of {} bytes",
                    path.display(),
                    metadata.len(),
                    MAX_FILE_SIZE
                );
                false
            }
            Ok(metadata) => metadata.is_file(),
            Err(e) => {
                tracing::warn!("Failed to get metadata for '{}': {}", path.display(), e);
                false
            }
        }
    }

    /// Validate that a path resolves inside the directory it was listed from.
    fn is_path_safe(path: &Path, base_dir: &Path) -> bool {
        match (path.canonicalize(), base_dir.canonicalize()) {
            (Ok(canonical_path), Ok(canonical_base)) => {
                let safe = canonical_path.starts_with(&canonical_base);
                if !safe {
                    tracing::warn!(
                        "Skipping file '{}' - resolves outside '{}'",
                        path.display(),
                        base_dir.display()
                    );
                }
                safe
            }
            _ => !path.to_string_lossy().contains(".."),
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Source labels deduplicated, first-seen order preserved.
pub fn unique_labels(files: &[SourceFile]) -> Vec<String> {
    let mut seen = HashSet::new();
    files
        .iter()
        .filter(|file| seen.insert(file.label.as_str()))
        .map(|file| file.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_tier_priority_is_ascending() {
        assert!(SourceTier::Root.priority() < SourceTier::Extension.priority());
        assert!(SourceTier::Extension.priority() < SourceTier::User.priority());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(SourceTier::Root.to_string(), "root");
        assert_eq!(SourceTier::Extension.to_string(), "extension");
        assert_eq!(SourceTier::User.to_string(), "user");
    }

    #[test]
    fn test_source_file_label_is_basename() {
        let file = SourceFile::new(PathBuf::from("/a/b/my_styles.csv"), SourceTier::Extension);
        assert_eq!(file.label, "my_styles.csv");
        assert_eq!(file.priority(), 1);
    }

    #[test]
    fn test_discover_orders_by_tier_and_name() {
        let temp = TempDir::new().unwrap();
        let root_file = temp.path().join("styles.csv");
        fs::write(&root_file, "name,prompt\n").unwrap();

        let ext_dir = temp.path().join("ext");
        fs::create_dir_all(&ext_dir).unwrap();
        fs::write(ext_dir.join("b.csv"), "").unwrap();
        fs::write(ext_dir.join("a.CSV"), "").unwrap();
        fs::write(ext_dir.join("notes.txt"), "").unwrap();

        let user_file = temp.path().join("mine.csv");
        fs::write(&user_file, "").unwrap();

        let mut discovery = SourceDiscovery::new();
        // Registration order should not matter
        discovery.add_user_path(user_file);
        discovery.add_extension_dir(ext_dir);
        discovery.add_root_file(root_file);

        let found = discovery.discover();
        let labels: Vec<&str> = found.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["styles.csv", "a.CSV", "b.csv", "mine.csv"]);
        assert_eq!(found[0].tier, SourceTier::Root);
        assert_eq!(found[1].tier, SourceTier::Extension);
        assert_eq!(found[3].tier, SourceTier::User);
    }

    #[test]
    fn test_discover_creates_missing_extension_dir() {
        let temp = TempDir::new().unwrap();
        let ext_dir = temp.path().join("styles");

        let mut discovery = SourceDiscovery::new();
        discovery.add_extension_dir(ext_dir.clone());
        assert!(discovery.discover().is_empty());
        assert!(ext_dir.is_dir());
    }

    #[test]
    fn test_discover_skips_missing_user_path() {
        let temp = TempDir::new().unwrap();
        let mut discovery = SourceDiscovery::new();
        discovery.add_user_path(temp.path().join("nope.csv"));
        discovery.add_root_file(temp.path().join("styles.csv"));
        assert!(discovery.discover().is_empty());
        assert!(!temp.path().join("nope.csv").exists());
    }

    #[test]
    fn test_discover_does_not_recurse() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("ext").join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.csv"), "").unwrap();

        let mut discovery = SourceDiscovery::new();
        discovery.add_extension_dir(temp.path().join("ext"));
        assert!(discovery.discover().is_empty());
    }

    #[test]
    fn test_user_directory_is_expanded() {
        let temp = TempDir::new().unwrap();
        let user_dir = temp.path().join("mine");
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(user_dir.join("x.csv"), "").unwrap();

        let mut discovery = SourceDiscovery::new();
        discovery.add_user_path(user_dir);
        let found = discovery.discover();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tier, SourceTier::User);
    }

    #[test]
    fn test_unique_labels_keeps_first_seen() {
        let files = vec![
            SourceFile::new(PathBuf::from("/r/styles.csv"), SourceTier::Root),
            SourceFile::new(PathBuf::from("/e/a.csv"), SourceTier::Extension),
            SourceFile::new(PathBuf::from("/u/styles.csv"), SourceTier::User),
        ];
        assert_eq!(unique_labels(&files), vec!["styles.csv", "a.csv"]);
    }

    #[test]
    fn test_oversized_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        let ext_dir = temp.path().join("ext");
        fs::create_dir_all(&ext_dir).unwrap();
        fs::write(ext_dir.join("small.csv"), "A,a\n").unwrap();
        let big = fs::File::create(ext_dir.join("big.csv")).unwrap();
        big.set_len(MAX_FILE_SIZE + 1).unwrap();

        let root_file = temp.path().join("styles.csv");
        fs::File::create(&root_file)
            .unwrap()
            .set_len(MAX_FILE_SIZE + 1)
            .unwrap();

        let mut discovery = SourceDiscovery::new();
        discovery.add_root_file(root_file);
        discovery.add_extension_dir(ext_dir);
        let labels: Vec<String> = discovery.discover().into_iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["small.csv"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_folder_is_skipped() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside.csv");
        fs::write(&outside, "A,a\n").unwrap();

        let ext_dir = temp.path().join("ext");
        fs::create_dir_all(&ext_dir).unwrap();
        fs::write(ext_dir.join("inside.csv"), "B,b\n").unwrap();
        std::os::unix::fs::symlink(&outside, ext_dir.join("escape.csv")).unwrap();
        std::os::unix::fs::symlink(ext_dir.join("inside.csv"), ext_dir.join("alias.csv"))
            .unwrap();

        let mut discovery = SourceDiscovery::new();
        discovery.add_extension_dir(ext_dir);
        let labels: Vec<String> = discovery.discover().into_iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["alias.csv", "inside.csv"]);
    }
}

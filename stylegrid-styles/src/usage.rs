//! Per-style usage counters persisted as `usage.json`.

use crate::persist;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name inside the state directory.
pub const USAGE_FILE_NAME: &str = "usage.json";

/// Usage of one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// Times applied.
    pub count: u64,
    /// First application, never changed afterwards.
    pub first_used: DateTime<Utc>,
    /// Most recent application.
    pub last_used: DateTime<Utc>,
}

/// Loads, updates and saves usage counters.
#[derive(Debug, Clone)]
pub struct UsageTracker {
    path: PathBuf,
    entries: BTreeMap<String, UsageEntry>,
}

impl UsageTracker {
    /// Load counters from `state_dir`. Missing or malformed files start empty.
    pub fn load(state_dir: &Path) -> Self {
        let path = state_dir.join(USAGE_FILE_NAME);
        let entries = persist::load_or_default(&path);
        Self { path, entries }
    }

    /// Count one use of each name at `now`.
    pub fn record<S: AsRef<str>>(&mut self, names: &[S], now: DateTime<Utc>) {
        for name in names {
            self.entries
                .entry(name.as_ref().to_string())
                .and_modify(|entry| {
                    entry.count += 1;
                    entry.last_used = now;
                })
                .or_insert(UsageEntry {
                    count: 1,
                    first_used: now,
                    last_used: now,
                });
        }
    }

    /// Entry for a style.
    pub fn get(&self, name: &str) -> Option<&UsageEntry> {
        self.entries.get(name)
    }

    /// All entries by name.
    pub fn entries(&self) -> &BTreeMap<String, UsageEntry> {
        &self.entries
    }

    /// Up to `limit` entries, most used first, then most recent, then by name.
    pub fn top(&self, limit: usize) -> Vec<(&str, &UsageEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(b.1.last_used.cmp(&a.1.last_used))
                .then(a.0.cmp(b.0))
        });
        entries.truncate(limit);
        entries
    }

    /// Overwrite the backing file.
    pub fn save(&self) -> Result<()> {
        persist::save(&self.path, &self.entries)?;
        tracing::debug!("Saved usage for {} styles", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_first_used_is_set_once() {
        let temp = TempDir::new().unwrap();
        let mut tracker = UsageTracker::load(temp.path());

        tracker.record(&["A"], at(100));
        tracker.record(&["A", "B"], at(200));

        let a = tracker.get("A").unwrap();
        assert_eq!(a.count, 2);
        assert_eq!(a.first_used, at(100));
        assert_eq!(a.last_used, at(200));
        assert_eq!(tracker.get("B").unwrap().count, 1);
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let mut tracker = UsageTracker::load(temp.path());
        tracker.record(&["A"], at(100));
        tracker.save().unwrap();

        let reloaded = UsageTracker::load(temp.path());
        assert_eq!(reloaded.entries(), tracker.entries());
        assert!(temp.path().join(USAGE_FILE_NAME).exists());
    }

    #[test]
    fn test_malformed_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(USAGE_FILE_NAME), "[1, 2").unwrap();
        assert!(UsageTracker::load(temp.path()).entries().is_empty());
    }

    #[test]
    fn test_top_orders_by_count_then_recency() {
        let temp = TempDir::new().unwrap();
        let mut tracker = UsageTracker::load(temp.path());
        tracker.record(&["old", "new"], at(1));
        tracker.record(&["new"], at(5));
        tracker.record(&["old"], at(3));
        tracker.record(&["once"], at(9));

        let names: Vec<&str> = tracker.top(10).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["new", "old", "once"]);
        assert_eq!(tracker.top(1).len(), 1);
    }
}

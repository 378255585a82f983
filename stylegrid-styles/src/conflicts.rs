//! Detection of styles whose positive prompt fights another style's negative prompt.

use crate::record::{StyleRecord, PLACEHOLDER};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A positive/negative token overlap between two selected styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleConflict {
    /// Style whose prompt contains the tokens.
    pub style: String,
    /// Style whose negative prompt contains the same tokens.
    pub conflicts_with: String,
    /// Overlapping tokens, sorted.
    pub tokens: Vec<String>,
}

/// Split a prompt fragment into comparable tokens.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty() && token != PLACEHOLDER)
        .collect()
}

/// Check every ordered pair of distinct selected styles for overlap.
///
/// Names missing from `merged` and repeated names are ignored.
pub fn find_conflicts<S: AsRef<str>>(names: &[S], merged: &[StyleRecord]) -> Vec<StyleConflict> {
    let by_name: HashMap<&str, &StyleRecord> =
        merged.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let selected: Vec<&StyleRecord> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .filter_map(|name| by_name.get(name).copied())
        .collect();

    let tokens: Vec<(BTreeSet<String>, BTreeSet<String>)> = selected
        .iter()
        .map(|s| (tokenize(&s.prompt), tokenize(&s.negative_prompt)))
        .collect();

    let mut conflicts = Vec::new();
    for (i, a) in selected.iter().enumerate() {
        for (j, b) in selected.iter().enumerate() {
            if i == j {
                continue;
            }
            let overlap: Vec<String> = tokens[i].0.intersection(&tokens[j].1).cloned().collect();
            if !overlap.is_empty() {
                conflicts.push(StyleConflict {
                    style: a.name.clone(),
                    conflicts_with: b.name.clone(),
                    tokens: overlap,
                });
            }
        }
    }

    tracing::debug!(
        "Conflict check over {} styles found {} conflicts",
        selected.len(),
        conflicts.len()
    );
    conflicts
}

//! Applying styles to a prompt / negative-prompt pair.
//!
//! For each side independently, a style text containing [`PLACEHOLDER`]
//! replaces the whole accumulated text (every placeholder occurrence becomes
//! the current text). Texts without a placeholder are collected and appended
//! once at the end, joined by `", "`.

use crate::record::{StyleRecord, PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separator between appended fragments.
const SEPARATOR: &str = ", ";

/// How selected styles reach the generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyMode {
    /// Rewrite the prompt text.
    #[default]
    Prompt,
    /// Leave the text alone and only report the resolved selection.
    Silent,
}

/// Result of applying styles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectedPrompt {
    /// Updated positive prompt.
    pub prompt: String,
    /// Updated negative prompt.
    pub negative_prompt: String,
    /// Names that resolved to a style, in application order.
    pub applied: Vec<String>,
}

/// Applies styles from a merged style set.
#[derive(Debug)]
pub struct PromptInjector<'a> {
    styles: HashMap<&'a str, &'a StyleRecord>,
}

impl<'a> PromptInjector<'a> {
    /// Build from a merged style set. If a name repeats, the first record wins.
    pub fn new(merged: &'a [StyleRecord]) -> Self {
        let mut styles = HashMap::with_capacity(merged.len());
        for style in merged {
            styles.entry(style.name.as_str()).or_insert(style);
        }
        Self { styles }
    }

    /// Look up a style by exact name.
    pub fn resolve(&self, name: &str) -> Option<&'a StyleRecord> {
        self.styles.get(name).copied()
    }

    /// Apply `selected` to the base prompts. Unknown names are skipped.
    pub fn apply<S: AsRef<str>>(
        &self,
        prompt: &str,
        negative_prompt: &str,
        selected: &[S],
        mode: ApplyMode,
    ) -> InjectedPrompt {
        let resolved: Vec<&StyleRecord> = selected
            .iter()
            .filter_map(|name| {
                let style = self.resolve(name.as_ref());
                if style.is_none() {
                    tracing::debug!("Skipping unknown style '{}'", name.as_ref());
                }
                style
            })
            .collect();

        let applied = resolved.iter().map(|s| s.name.clone()).collect();

        if mode == ApplyMode::Silent {
            return InjectedPrompt {
                prompt: prompt.to_string(),
                negative_prompt: negative_prompt.to_string(),
                applied,
            };
        }

        InjectedPrompt {
            prompt: inject_text(prompt, resolved.iter().map(|s| s.prompt.as_str())),
            negative_prompt: inject_text(
                negative_prompt,
                resolved.iter().map(|s| s.negative_prompt.as_str()),
            ),
            applied,
        }
    }
}

/// Apply style fragments to one side of the prompt.
pub fn inject_text<'t>(base: &str, fragments: impl IntoIterator<Item = &'t str>) -> String {
    let mut current = base.to_string();
    let mut deferred: Vec<&str> = Vec::new();

    for fragment in fragments {
        if fragment.is_empty() {
            continue;
        }
        if fragment.contains(PLACEHOLDER) {
            current = fragment.replace(PLACEHOLDER, &current);
        } else {
            deferred.push(fragment);
        }
    }

    if deferred.is_empty() {
        return current;
    }

    let trimmed = current.trim_end_matches([',', ' ']);
    let separator = if trimmed.trim().is_empty() { "" } else { SEPARATOR };
    format!("{trimmed}{separator}{}", deferred.join(SEPARATOR))
}

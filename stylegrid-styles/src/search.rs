//! Search query syntax for filtering styles.
//!
//! - `"quoted phrase"` must appear as a substring
//! - `@CATEGORY` restricts to any of the named categories
//! - `-word` excludes styles containing a word starting with `word`
//! - bare words must each appear at a word start
//!
//! Matching is case-insensitive over the name, display name, prompt and
//! negative prompt.

use crate::record::StyleRecord;
use regex::Regex;
use std::sync::LazyLock;

static PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("phrase pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A word that must (or must not) start a word in the searched text.
#[derive(Debug, Clone)]
struct WordMatcher {
    word: String,
    pattern: Option<Regex>,
}

impl WordMatcher {
    fn new(word: &str) -> Self {
        let word = word.to_lowercase();
        let pattern = Regex::new(&format!(r"\b{}", regex::escape(&word))).ok();
        Self { word, pattern }
    }

    fn is_match(&self, haystack: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(haystack),
            None => haystack.contains(self.word.as_str()),
        }
    }
}

/// A parsed search query.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    phrases: Vec<String>,
    words: Vec<WordMatcher>,
    categories: Vec<String>,
    excluded: Vec<WordMatcher>,
}

impl SearchQuery {
    /// Parse raw query text.
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::default();

        for capture in PHRASE.captures_iter(raw) {
            let phrase = capture[1].trim().to_lowercase();
            if !phrase.is_empty() {
                query.phrases.push(phrase);
            }
        }

        let remaining = PHRASE.replace_all(raw, " ");
        for token in remaining.split_whitespace() {
            if let Some(category) = token.strip_prefix('@') {
                if !category.is_empty() {
                    query.categories.push(category.to_uppercase());
                }
            } else if let Some(word) = token.strip_prefix('-').filter(|w| !w.is_empty()) {
                query.excluded.push(WordMatcher::new(word));
            } else {
                query.words.push(WordMatcher::new(token));
            }
        }

        query
    }

    /// Test a style against the query.
    pub fn matches(&self, style: &StyleRecord) -> bool {
        if !self.categories.is_empty() {
            let category = style.category.to_uppercase();
            if !self.categories.contains(&category) {
                return false;
            }
        }

        let haystack = search_text(style);
        if self.excluded.iter().any(|w| w.is_match(&haystack)) {
            return false;
        }
        self.phrases.iter().all(|p| haystack.contains(p.as_str()))
            && self.words.iter().all(|w| w.is_match(&haystack))
    }
}

/// Lower-cased, whitespace-collapsed text searched for a style.
pub fn search_text(style: &StyleRecord) -> String {
    let joined = format!(
        "{} {} {} {}",
        style.name, style.display_name, style.prompt, style.negative_prompt
    );
    WHITESPACE
        .replace_all(joined.trim(), " ")
        .trim()
        .to_lowercase()
}

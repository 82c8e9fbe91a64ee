// src/core/types.rs
use std::collections::HashMap;

/// Pattern type whose entries complete interrogative queries.
pub const QUESTIONS: &str = "questions";
/// Pattern type whose entries are appended to, or substituted into, a query.
pub const ACTIONS: &str = "actions";
/// Pattern type whose entries are prepended to a query.
pub const MODIFIERS: &str = "modifiers";

/// First words that make a query eligible for question-pattern completion.
pub const INTERROGATIVES: [&str; 6] = ["how", "what", "where", "when", "why", "who"];

/// Lowercases, trims and collapses internal whitespace runs to a single space.
/// Dataset fields and user queries go through the same normalization.
pub fn normalize_phrase(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Named groups of phrases that remember the order in which groups were first
/// seen. Entities are grouped by category, patterns by type.
#[derive(Debug, Clone, Default)]
pub struct PhraseGroups {
    groups: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl PhraseGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: &str, phrase: String) {
        let idx = match self.positions.get(group) {
            Some(&idx) => idx,
            None => {
                self.groups.push((group.to_string(), Vec::new()));
                self.positions.insert(group.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].1.push(phrase);
    }

    /// Drops repeated phrases inside each group, keeping first occurrences.
    pub fn dedup_within_groups(&mut self) {
        for (_, phrases) in self.groups.iter_mut() {
            let mut kept = std::collections::HashSet::with_capacity(phrases.len());
            phrases.retain(|p| kept.insert(p.clone()));
        }
    }

    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.positions
            .get(group)
            .map(|&idx| self.groups[idx].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, phrases)| (name.as_str(), phrases.as_slice()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of phrases across all groups.
    pub fn phrase_count(&self) -> usize {
        self.groups.iter().map(|(_, p)| p.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.phrase_count() == 0
    }
}

/// Entities keyed by category.
pub type CategoryMap = PhraseGroups;
/// Patterns keyed by pattern type.
pub type PatternMap = PhraseGroups;

/// A user query after cleaning, together with its words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanQuery {
    text: String,
    words: Vec<String>,
}

impl CleanQuery {
    pub fn new(raw: &str) -> Self {
        let text = normalize_phrase(raw);
        let words = text.split(' ').filter(|w| !w.is_empty()).map(String::from).collect();
        Self { text, words }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters; suggestions must be strictly longer than this.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn first_word(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }

    pub fn last_word(&self) -> Option<&str> {
        self.words.last().map(String::as_str)
    }

    /// Every word except the last, space separated. Empty for one-word queries.
    pub fn head(&self) -> String {
        match self.words.split_last() {
            Some((_, rest)) => rest.join(" "),
            None => String::new(),
        }
    }

    /// Every word except the first, space separated. Empty for one-word queries.
    pub fn tail(&self) -> String {
        match self.words.split_first() {
            Some((_, rest)) => rest.join(" "),
            None => String::new(),
        }
    }

    pub fn is_multi_word(&self) -> bool {
        self.words.len() > 1
    }

    /// The query with its last word swapped for `replacement`.
    pub fn with_last_word(&self, replacement: &str) -> String {
        let head = self.head();
        if head.is_empty() {
            replacement.to_string()
        } else {
            format!("{} {}", head, replacement)
        }
    }
}

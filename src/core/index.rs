// --- File: src/core/index.rs
use crate::core::loader::Lexicon;
use crate::core::types::{ACTIONS, MODIFIERS, QUESTIONS};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Read-only lookup structures derived from a [`Lexicon`].
///
/// Built once at startup and shared between requests without locking; nothing
/// here changes after [`LexiconIndex::build`] returns.
#[derive(Debug, Clone, Default)]
pub struct LexiconIndex {
    /// Every entity, category by category in load order. A phrase listed under
    /// two categories appears twice.
    pub all_entities: Vec<String>,
    pub entity_to_categories: HashMap<String, Vec<String>>,
    pub all_entities_set: HashSet<String>,

    pub keywords: Vec<String>,
    pub keywords_set: HashSet<String>,

    /// First word -> full phrases starting with that word.
    pub entity_prefix_index: HashMap<String, Vec<String>>,
    pub keyword_prefix_index: HashMap<String, Vec<String>>,

    pub question_patterns: Vec<String>,
    pub action_patterns: Vec<String>,
    pub modifier_patterns: Vec<String>,
    /// Union of every pattern type, including ones the matchers never consult.
    pub all_patterns: Vec<String>,
    all_patterns_set: HashSet<String>,
}

/// Sizes of the built index, reported at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub entities: usize,
    pub distinct_entities: usize,
    pub categories: usize,
    pub keywords: usize,
    pub patterns: usize,
    pub entity_prefixes: usize,
    pub keyword_prefixes: usize,
}

fn first_word_index<'a>(
    phrases: impl IntoIterator<Item = &'a String>,
) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for phrase in phrases {
        if let Some(first) = phrase.split_whitespace().next() {
            index.entry(first.to_string()).or_default().push(phrase.clone());
        }
    }
    index
}

impl LexiconIndex {
    pub fn build(lexicon: &Lexicon) -> Self {
        let mut all_entities = Vec::with_capacity(lexicon.entities.phrase_count());
        let mut entity_to_categories: HashMap<String, Vec<String>> = HashMap::new();
        for (category, entities) in lexicon.entities.iter() {
            all_entities.extend(entities.iter().cloned());
            for entity in entities {
                entity_to_categories
                    .entry(entity.clone())
                    .or_default()
                    .push(category.to_string());
            }
        }
        let all_entities_set: HashSet<String> = all_entities.iter().cloned().collect();

        let keywords = lexicon.keywords.clone();
        let keywords_set: HashSet<String> = keywords.iter().cloned().collect();

        let entity_prefix_index = first_word_index(&all_entities);
        let keyword_prefix_index = first_word_index(&keywords);

        let by_type = |kind: &str| -> Vec<String> {
            lexicon.patterns.get(kind).map(<[String]>::to_vec).unwrap_or_default()
        };
        let all_patterns: Vec<String> = lexicon
            .patterns
            .iter()
            .flat_map(|(_, patterns)| patterns.iter().cloned())
            .collect();
        let all_patterns_set = all_patterns.iter().cloned().collect();

        Self {
            all_entities,
            entity_to_categories,
            all_entities_set,
            keywords,
            keywords_set,
            entity_prefix_index,
            keyword_prefix_index,
            question_patterns: by_type(QUESTIONS),
            action_patterns: by_type(ACTIONS),
            modifier_patterns: by_type(MODIFIERS),
            all_patterns,
            all_patterns_set,
        }
    }

    pub fn is_entity(&self, phrase: &str) -> bool {
        self.all_entities_set.contains(phrase)
    }

    pub fn is_keyword(&self, phrase: &str) -> bool {
        self.keywords_set.contains(phrase)
    }

    /// True when the phrase appears verbatim in any pattern list.
    pub fn is_pattern(&self, phrase: &str) -> bool {
        self.all_patterns_set.contains(phrase)
    }

    pub fn categories_of(&self, entity: &str) -> &[String] {
        self.entity_to_categories
            .get(entity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn entities_with_first_word(&self, word: &str) -> &[String] {
        self.entity_prefix_index
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn keywords_with_first_word(&self, word: &str) -> &[String] {
        self.keyword_prefix_index
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn stats(&self) -> IndexStats {
        let categories: HashSet<&String> = self.entity_to_categories.values().flatten().collect();
        IndexStats {
            entities: self.all_entities.len(),
            distinct_entities: self.all_entities_set.len(),
            categories: categories.len(),
            keywords: self.keywords.len(),
            patterns: self.all_patterns.len(),
            entity_prefixes: self.entity_prefix_index.len(),
            keyword_prefixes: self.keyword_prefix_index.len(),
        }
    }
}

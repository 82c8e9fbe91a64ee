// File: src/pipeline/matchers.rs
use super::Matcher;
use crate::core::index::LexiconIndex;
use crate::core::types::{CleanQuery, INTERROGATIVES};
use std::collections::HashSet;

/// Completes the query into entities.
///
/// An exact entity is expanded with the first three actions and nothing else.
/// Otherwise entities starting with the whole query are proposed, and for
/// multi-word queries the last word is treated as an unfinished entity behind
/// the preceding words.
#[derive(Debug, Clone, Copy)]
pub struct MultiWordEntityMatcher {
    pub limit: usize,
    pub exact_match_actions: usize,
}

impl Default for MultiWordEntityMatcher {
    fn default() -> Self {
        Self { limit: 10, exact_match_actions: 3 }
    }
}

impl Matcher for MultiWordEntityMatcher {
    fn name(&self) -> &'static str {
        "multi_word_entity"
    }

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String> {
        let text = query.as_str();

        if index.is_entity(text) {
            return index
                .action_patterns
                .iter()
                .take(self.exact_match_actions)
                .map(|action| format!("{} {}", text, action))
                .filter(|combo| !seen.contains(combo))
                .collect();
        }

        let mut matches = Vec::new();
        for entity in &index.all_entities {
            if matches.len() >= self.limit {
                return matches;
            }
            if entity.starts_with(text) && !seen.contains(entity) {
                matches.push(entity.clone());
            }
        }

        if let (true, Some(last)) = (query.is_multi_word(), query.last_word()) {
            let head = query.head();
            for entity in index.all_entities.iter().filter(|e| e.starts_with(last)) {
                if matches.len() >= self.limit {
                    break;
                }
                let composed = format!("{} {}", head, entity);
                // A composition that is itself an entity would just repeat it.
                if !seen.contains(&composed) && !index.is_entity(&composed) {
                    matches.push(composed);
                }
            }
        }

        matches
    }
}

/// Echoes the query when it is itself an entity, keyword or pattern, once per
/// source. The pipeline's length rule always rejects these.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMatcher;

impl Matcher for DirectMatcher {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String> {
        let text = query.as_str();
        if seen.contains(text) {
            return Vec::new();
        }
        [index.is_entity(text), index.is_keyword(text), index.is_pattern(text)]
            .into_iter()
            .filter(|&hit| hit)
            .map(|_| text.to_string())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher {
    pub prefix_limit: usize,
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self { prefix_limit: 5 }
    }
}

impl Matcher for PatternMatcher {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String> {
        let text = query.as_str();
        let mut matches: Vec<String> = index
            .all_patterns
            .iter()
            .filter(|p| p.starts_with(text) && !seen.contains(*p))
            .take(self.prefix_limit)
            .cloned()
            .collect();

        let (Some(first), Some(last)) = (query.first_word(), query.last_word()) else {
            return matches;
        };

        // Swap the last word for an action it could be the start of.
        for action in index.action_patterns.iter().filter(|a| a.starts_with(last)) {
            let combo = query.with_last_word(action);
            if !seen.contains(&combo) {
                matches.push(combo);
            }
        }

        if INTERROGATIVES.contains(&first) {
            let rest = query.tail();
            for question in index.question_patterns.iter().filter(|q| q.starts_with(first)) {
                let combo = if rest.is_empty() {
                    question.clone()
                } else {
                    format!("{} {}", question, rest)
                };
                if !seen.contains(&combo) {
                    matches.push(combo);
                }
            }
        }

        matches
    }
}

/// Swaps the last word for a longer keyword that starts with it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordExtensionMatcher {
    pub limit: usize,
}

impl Default for KeywordExtensionMatcher {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

impl Matcher for KeywordExtensionMatcher {
    fn name(&self) -> &'static str {
        "keyword_extension"
    }

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String> {
        let Some(last) = query.last_word() else {
            return Vec::new();
        };
        index
            .keywords
            .iter()
            .filter(|k| k.starts_with(last) && k.as_str() != last)
            .map(|k| query.with_last_word(k))
            .filter(|ext| !seen.contains(ext))
            .take(self.limit)
            .collect()
    }
}

/// Entities sharing the query's first word that start with the whole query,
/// found through the first-word index.
#[derive(Debug, Clone, Copy)]
pub struct EntityCompletionMatcher {
    pub limit: usize,
}

impl Default for EntityCompletionMatcher {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

impl Matcher for EntityCompletionMatcher {
    fn name(&self) -> &'static str {
        "entity_completion"
    }

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String> {
        let Some(first) = query.first_word() else {
            return Vec::new();
        };
        let text = query.as_str();
        index
            .entities_with_first_word(first)
            .iter()
            .filter(|e| e.starts_with(text) && !seen.contains(*e))
            .take(self.limit)
            .cloned()
            .collect()
    }
}

/// For the first entity (load order) mentioned anywhere in the query, append
/// the first two actions and prepend the first two modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossCategoryMatcher;

const CROSS_CATEGORY_ACTIONS: usize = 2;
const CROSS_CATEGORY_MODIFIERS: usize = 2;

impl Matcher for CrossCategoryMatcher {
    fn name(&self) -> &'static str {
        "cross_category"
    }

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String> {
        let text = query.as_str();
        if !index.all_entities.iter().any(|e| text.contains(e.as_str())) {
            return Vec::new();
        }

        let appended = index
            .action_patterns
            .iter()
            .take(CROSS_CATEGORY_ACTIONS)
            .filter(|action| !text.ends_with(action.as_str()))
            .map(|action| format!("{} {}", text, action));
        let prepended = index
            .modifier_patterns
            .iter()
            .take(CROSS_CATEGORY_MODIFIERS)
            .filter(|modifier| !text.starts_with(modifier.as_str()))
            .map(|modifier| format!("{} {}", modifier, text));

        appended
            .chain(prepended)
            .filter(|combo| !seen.contains(combo))
            .collect()
    }
}

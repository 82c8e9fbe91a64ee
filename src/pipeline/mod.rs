// File: src/pipeline/mod.rs
//! Ordered matcher strategies that turn a cleaned query into suggestions.

pub mod matchers;

use crate::core::index::LexiconIndex;
use crate::core::types::CleanQuery;
use std::collections::HashSet;
use tracing::trace;

pub use matchers::{
    CrossCategoryMatcher, DirectMatcher, EntityCompletionMatcher, KeywordExtensionMatcher,
    MultiWordEntityMatcher, PatternMatcher,
};

/// One suggestion strategy.
///
/// A matcher only proposes candidates. The pipeline decides what is accepted,
/// so `seen` is advisory: matchers use it to skip work, not for correctness.
pub trait Matcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn candidates(
        &self,
        query: &CleanQuery,
        index: &LexiconIndex,
        seen: &HashSet<String>,
    ) -> Vec<String>;
}

pub struct SuggestionPipeline {
    matchers: Vec<Box<dyn Matcher>>,
}

impl SuggestionPipeline {
    /// The six strategies in their fixed priority order.
    pub fn standard() -> Self {
        Self::with_matchers(vec![
            Box::new(MultiWordEntityMatcher::default()),
            Box::new(DirectMatcher),
            Box::new(PatternMatcher::default()),
            Box::new(KeywordExtensionMatcher::default()),
            Box::new(EntityCompletionMatcher::default()),
            Box::new(CrossCategoryMatcher),
        ])
    }

    pub fn with_matchers(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Runs the matchers in order until `max_results` suggestions are collected.
    ///
    /// A candidate is kept only if it is new and strictly longer (in
    /// characters) than the query.
    pub fn run(&self, query: &CleanQuery, index: &LexiconIndex, max_results: usize) -> Vec<String> {
        if query.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let min_len = query.char_len();
        let mut seen: HashSet<String> = HashSet::new();
        let mut suggestions: Vec<String> = Vec::with_capacity(max_results.min(32));

        'matchers: for matcher in &self.matchers {
            if suggestions.len() >= max_results {
                break;
            }
            let before = suggestions.len();
            for candidate in matcher.candidates(query, index, &seen) {
                if candidate.chars().count() <= min_len || seen.contains(&candidate) {
                    continue;
                }
                seen.insert(candidate.clone());
                suggestions.push(candidate);
                if suggestions.len() >= max_results {
                    trace!(
                        matcher = matcher.name(),
                        accepted = suggestions.len() - before,
                        "result full"
                    );
                    break 'matchers;
                }
            }
            trace!(matcher = matcher.name(), accepted = suggestions.len() - before, "matcher done");
        }

        suggestions.truncate(max_results);
        suggestions
    }
}

impl Default for SuggestionPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

use crate::cache::{ResultCache, Suggestions};
use crate::config::EngineConfig;
use crate::core::index::LexiconIndex;
use crate::core::loader::Lexicon;
use crate::core::types::CleanQuery;
use crate::pipeline::SuggestionPipeline;
use crate::status::InitReport;
use std::sync::Arc;
use tracing::{info, warn};

// The engine owns the read-only index, the matcher pipeline and the only piece
// of mutable shared state, the result cache. It is Send + Sync; wrap it in an
// Arc to share it between request handlers.
pub struct AutocompleteEngine {
    index: Arc<LexiconIndex>,
    pipeline: SuggestionPipeline,
    cache: ResultCache,
}

impl AutocompleteEngine {
    pub fn new(lexicon: &Lexicon, cache_capacity: usize) -> Self {
        Self::with_pipeline(lexicon, SuggestionPipeline::standard(), cache_capacity)
    }

    pub fn with_pipeline(
        lexicon: &Lexicon,
        pipeline: SuggestionPipeline,
        cache_capacity: usize,
    ) -> Self {
        let index = LexiconIndex::build(lexicon);
        let stats = index.stats();
        info!(
            entities = stats.entities,
            categories = stats.categories,
            keywords = stats.keywords,
            patterns = stats.patterns,
            cache_capacity,
            "autocomplete index built"
        );
        Self {
            index: Arc::new(index),
            pipeline,
            cache: ResultCache::new(cache_capacity),
        }
    }

    /// Loads the datasets named by `config` and builds the engine. A missing
    /// or malformed dataset degrades the engine instead of failing it; the
    /// report says which.
    pub fn from_config(config: &EngineConfig) -> (Self, InitReport) {
        let (lexicon, report) = Lexicon::load(&config.datasets);
        for (dataset, outcome) in report.outcomes() {
            if !outcome.is_loaded() {
                warn!(%dataset, "autocomplete starts without this dataset");
            }
        }
        (Self::new(&lexicon, config.cache_capacity), report)
    }

    /// Lowercased, trimmed, whitespace-collapsed form of `raw`.
    pub fn clean_query(raw: &str) -> String {
        CleanQuery::new(raw).as_str().to_string()
    }

    /// Up to `max_results` completions for `query`, served from the cache when
    /// the same (cleaned query, count) pair was computed before.
    ///
    /// Never fails: an empty or blank query, or a zero count, yields an empty
    /// list.
    pub fn generate_suggestions(&self, query: &str, max_results: usize) -> Suggestions {
        let query = CleanQuery::new(query);
        if query.is_empty() || max_results == 0 {
            return Arc::new(Vec::new());
        }
        let key = (query.as_str().to_string(), max_results);
        self.cache
            .get_or_compute(key, || self.pipeline.run(&query, &self.index, max_results))
    }

    /// Runs the pipeline directly, bypassing the cache.
    pub fn generate_uncached(&self, query: &str, max_results: usize) -> Vec<String> {
        self.pipeline
            .run(&CleanQuery::new(query), &self.index, max_results)
    }

    pub fn index(&self) -> &Arc<LexiconIndex> {
        &self.index
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}

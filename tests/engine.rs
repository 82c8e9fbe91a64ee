use autocomplete_core::config::DatasetPaths;
use autocomplete_core::status::{Dataset, SourceOutcome};
use autocomplete_core::{AutocompleteEngine, EngineConfig, EngineStatus};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const ENTITIES: &str = "\
category,entity
animal,cat
animal,dog
animal,golden retriever
misc,catalog
misc,category
city,new york
city,new delhi
";

const KEYWORDS: &str = "\
weather
weekend deals
recipes
restaurants
";

const PATTERNS: &str = "\
type,pattern
actions,adopt
actions,feed
actions,groom
actions,walk
modifiers,best
modifiers,cheap
questions,how to
questions,what is
";

fn dataset_dir(entities: &str, keywords: &str, patterns: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("entities.csv"), entities).unwrap();
    fs::write(dir.path().join("keywords.csv"), keywords).unwrap();
    fs::write(dir.path().join("patterns.csv"), patterns).unwrap();
    dir
}

fn engine_with_capacity(dir: &TempDir, cache_capacity: usize) -> AutocompleteEngine {
    let config = EngineConfig {
        cache_capacity,
        ..EngineConfig::from_data_dir(dir.path())
    };
    let (engine, report) = AutocompleteEngine::from_config(&config);
    assert_eq!(report.status(), EngineStatus::Ready);
    engine
}

#[test]
fn exact_entity_leads_with_three_actions() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let engine = engine_with_capacity(&dir, 512);

    let result = engine.generate_suggestions("cat", 10);
    assert_eq!(&result[..3], ["cat adopt", "cat feed", "cat groom"]);
}

#[test]
fn prefix_completion_without_exact_entity() {
    let dir = dataset_dir("category,entity\nmisc,catalog\nmisc,category\n", "", "type,pattern\n");
    let engine = engine_with_capacity(&dir, 512);

    let result = engine.generate_suggestions("cat", 10);
    assert!(result.contains(&"catalog".to_string()));
    assert!(result.contains(&"category".to_string()));
}

#[test]
fn question_pattern_expansion() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let engine = engine_with_capacity(&dir, 512);

    let result = engine.generate_suggestions("how car", 10);
    assert!(result.contains(&"how to car".to_string()), "{:?}", result);
}

#[test]
fn multi_word_query_with_keyword_and_cross_category() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let engine = engine_with_capacity(&dir, 512);

    let result = engine.generate_suggestions("walk the dog", 10);
    assert_eq!(
        *result,
        ["walk the dog adopt", "walk the dog feed", "best walk the dog", "cheap walk the dog"]
    );

    let result = engine.generate_suggestions("sunny we", 10);
    assert_eq!(*result, ["sunny weather", "sunny weekend deals"]);
}

#[test]
fn cache_overflow_drops_oldest_quarter() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let cache_max = 512;
    let engine = engine_with_capacity(&dir, cache_max);

    for i in 0..=cache_max {
        engine.generate_suggestions(&format!("query {}", i), 10);
    }

    assert_eq!(engine.cache().len(), cache_max - cache_max / 4 + 1);
    assert!(!engine.cache().contains("query 0", 10));
    assert!(!engine.cache().contains(&format!("query {}", cache_max / 4 - 1), 10));
    assert!(engine.cache().contains(&format!("query {}", cache_max), 10));
}

#[test]
fn repeated_calls_share_the_cached_list() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let engine = engine_with_capacity(&dir, 512);

    let first = engine.generate_suggestions("new", 10);
    let second = engine.generate_suggestions("  NEW ", 10);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, ["new york", "new delhi"]);
}

#[test]
fn independently_built_engines_agree() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let a = engine_with_capacity(&dir, 0);
    let b = engine_with_capacity(&dir, 0);
    for query in ["c", "ca", "cat", "dog w", "how", "what c", "new d", "re", "golden"] {
        assert_eq!(a.generate_uncached(query, 10), b.generate_uncached(query, 10), "{}", query);
    }
}

#[test]
fn missing_datasets_degrade_instead_of_failing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("entities.csv"), ENTITIES).unwrap();
    let config = EngineConfig::from_data_dir(dir.path());

    let (engine, report) = AutocompleteEngine::from_config(&config);

    assert_eq!(report.entities, SourceOutcome::Loaded { records: 7 });
    assert_eq!(
        report.status(),
        EngineStatus::Degraded {
            missing: vec![Dataset::Keywords, Dataset::Patterns]
        }
    );
    assert_eq!(*engine.generate_suggestions("ca", 10), ["cat", "catalog", "category"]);
}

#[test]
fn malformed_header_is_reported_and_ignored() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, "kind,text\nactions,adopt\n");
    let config = EngineConfig {
        datasets: DatasetPaths::in_dir(dir.path()),
        ..EngineConfig::default()
    };
    let (engine, report) = AutocompleteEngine::from_config(&config);

    match &report.patterns {
        SourceOutcome::Unavailable { reason } => assert!(reason.contains("type"), "{}", reason),
        other => panic!("expected unavailable patterns, got {:?}", other),
    }
    assert!(engine.index().action_patterns.is_empty());
    // Without actions an exact entity yields nothing from the entity matcher.
    assert!(engine.generate_suggestions("dog", 10).is_empty());
}

#[test]
fn unusual_inputs_never_fail() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let engine = engine_with_capacity(&dir, 512);

    assert!(engine.generate_suggestions("", 10).is_empty());
    assert!(engine.generate_suggestions("   ", 10).is_empty());
    assert!(engine.generate_suggestions("cat", 0).is_empty());
    assert!(engine.generate_suggestions("zzzz qqqq", 10).is_empty());
    assert!(engine.generate_suggestions("c", usize::MAX).len() < 100);
}

#[test]
fn concurrent_requests_see_consistent_results() {
    let dir = dataset_dir(ENTITIES, KEYWORDS, PATTERNS);
    let engine = Arc::new(engine_with_capacity(&dir, 16));
    let expected = engine.generate_uncached("ca", 10);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut results = Vec::new();
                for i in 0..100 {
                    engine.generate_suggestions(&format!("filler {} {}", t, i), 3);
                    results.push(engine.generate_suggestions("ca", 10));
                }
                results
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(*result, expected);
        }
    }
    assert!(engine.cache().len() <= 16);
}

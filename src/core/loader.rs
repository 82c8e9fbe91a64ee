// File: src/core/loader.rs
use crate::config::DatasetPaths;
use crate::core::types::{normalize_phrase, CategoryMap, PatternMap};
use crate::error::LoadError;
use crate::status::{InitReport, SourceOutcome};
use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// The three static datasets after normalization.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub entities: CategoryMap,
    pub keywords: Vec<String>,
    pub patterns: PatternMap,
}

impl Lexicon {
    /// Loads every source, substituting an empty collection for any source that
    /// cannot be read. Never fails; the report says what was missing.
    pub fn load(paths: &DatasetPaths) -> (Self, InitReport) {
        let (entities, entities_outcome) =
            or_empty(load_entities(&paths.entities), CategoryMap::phrase_count);
        let (keywords, keywords_outcome) = or_empty(load_keywords(&paths.keywords), Vec::len);
        let (patterns, patterns_outcome) =
            or_empty(load_patterns(&paths.patterns), PatternMap::phrase_count);

        let lexicon = Self { entities, keywords, patterns };
        let report = InitReport {
            entities: entities_outcome,
            keywords: keywords_outcome,
            patterns: patterns_outcome,
        };
        (lexicon, report)
    }
}

fn or_empty<T: Default>(
    loaded: Result<T, LoadError>,
    count: impl Fn(&T) -> usize,
) -> (T, SourceOutcome) {
    match loaded {
        Ok(value) => {
            let records = count(&value);
            (value, SourceOutcome::Loaded { records })
        }
        Err(e) => {
            warn!(
                path = %e.path().display(),
                error = %e,
                "dataset unavailable, using empty collection"
            );
            (T::default(), SourceOutcome::Unavailable { reason: e.to_string() })
        }
    }
}

/// Opens a headed CSV file and resolves the position of each required column.
/// Rows may be shorter or longer than the header; extra columns are ignored.
fn open_with_headers<const N: usize>(
    path: &Path,
    required: [&'static str; N],
) -> Result<(csv::Reader<File>, [usize; N]), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|source| LoadError::Open { path: path.to_path_buf(), source })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Header { path: path.to_path_buf(), source })?
        .clone();
    let mut positions = [0; N];
    for (slot, column) in positions.iter_mut().zip(required) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LoadError::MissingColumn { path: path.to_path_buf(), column })?;
    }
    Ok((reader, positions))
}

/// Yields readable records, logging and skipping the rest.
fn readable_records<'a>(
    reader: &'a mut csv::Reader<File>,
    path: &'a Path,
    dataset: &'static str,
) -> impl Iterator<Item = StringRecord> + 'a {
    reader.records().filter_map(move |record| match record {
        Ok(record) => Some(record),
        Err(e) => {
            let line = row_line(&e);
            debug!(path = %path.display(), dataset, ?line, error = %e, "skipping unreadable row");
            None
        }
    })
}

/// Line in the file where the failing row starts, when csv knows it.
fn row_line(e: &csv::Error) -> Option<u64> {
    e.position().map(|p| p.line())
}

/// Normalized field at `idx`; a row too short to have it reads as empty.
fn field(record: &StringRecord, idx: usize) -> String {
    normalize_phrase(record.get(idx).unwrap_or_default())
}

/// Reads `category,entity` rows. Entities repeated inside a category are kept
/// once, at their first position.
pub fn load_entities(path: impl AsRef<Path>) -> Result<CategoryMap, LoadError> {
    let path = path.as_ref();
    let (mut reader, [category_idx, entity_idx]) = open_with_headers(path, ["category", "entity"])?;

    let mut entities = CategoryMap::new();
    for record in readable_records(&mut reader, path, "entities") {
        let category = field(&record, category_idx);
        let entity = field(&record, entity_idx);
        if category.is_empty() || entity.is_empty() {
            continue;
        }
        entities.push(&category, entity);
    }
    entities.dedup_within_groups();

    info!(
        path = %path.display(),
        categories = entities.group_count(),
        entities = entities.phrase_count(),
        "loaded entities"
    );
    Ok(entities)
}

/// Reads one keyword per row from the first column. The file has no header row.
pub fn load_keywords(path: impl AsRef<Path>) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| LoadError::Open { path: path.to_path_buf(), source })?;

    let mut seen = HashSet::new();
    let mut keywords = Vec::new();
    for record in readable_records(&mut reader, path, "keywords") {
        let keyword = field(&record, 0);
        if !keyword.is_empty() && seen.insert(keyword.clone()) {
            keywords.push(keyword);
        }
    }

    info!(path = %path.display(), keywords = keywords.len(), "loaded keywords");
    Ok(keywords)
}

/// Reads `type,pattern` rows, grouped by type. Types outside the ones the
/// pipeline understands are kept as-is.
pub fn load_patterns(path: impl AsRef<Path>) -> Result<PatternMap, LoadError> {
    let path = path.as_ref();
    let (mut reader, [kind_idx, pattern_idx]) = open_with_headers(path, ["type", "pattern"])?;

    let mut patterns = PatternMap::new();
    for record in readable_records(&mut reader, path, "patterns") {
        let kind = field(&record, kind_idx);
        let pattern = field(&record, pattern_idx);
        if kind.is_empty() || pattern.is_empty() {
            continue;
        }
        patterns.push(&kind, pattern);
    }

    info!(
        path = %path.display(),
        types = patterns.group_count(),
        patterns = patterns.phrase_count(),
        "loaded patterns"
    );
    Ok(patterns)
}

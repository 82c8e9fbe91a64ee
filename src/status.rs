// File: src/status.rs
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Entities,
    Keywords,
    Patterns,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Entities => "entities",
            Dataset::Keywords => "keywords",
            Dataset::Patterns => "patterns",
        };
        f.pad(name)
    }
}

/// What happened when one dataset source was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SourceOutcome {
    Loaded { records: usize },
    Unavailable { reason: String },
}

impl SourceOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, SourceOutcome::Loaded { .. })
    }
}

/// Produced once at startup. Callers check this instead of consulting
/// process-wide availability flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub entities: SourceOutcome,
    pub keywords: SourceOutcome,
    pub patterns: SourceOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EngineStatus {
    /// Every dataset loaded.
    Ready,
    /// The engine runs, but with empty collections for the listed datasets.
    Degraded { missing: Vec<Dataset> },
}

impl InitReport {
    pub fn outcomes(&self) -> [(Dataset, &SourceOutcome); 3] {
        [
            (Dataset::Entities, &self.entities),
            (Dataset::Keywords, &self.keywords),
            (Dataset::Patterns, &self.patterns),
        ]
    }

    pub fn status(&self) -> EngineStatus {
        let missing: Vec<Dataset> = self
            .outcomes()
            .into_iter()
            .filter(|(_, outcome)| !outcome.is_loaded())
            .map(|(dataset, _)| dataset)
            .collect();
        if missing.is_empty() {
            EngineStatus::Ready
        } else {
            EngineStatus::Degraded { missing }
        }
    }
}

// src/lib.rs

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod status;

pub use crate::cache::{ResultCache, Suggestions};
pub use crate::config::EngineConfig;
pub use crate::core::engine::AutocompleteEngine;
pub use crate::core::index::LexiconIndex;
pub use crate::core::loader::Lexicon;
pub use crate::error::LoadError;
pub use crate::status::{EngineStatus, InitReport};

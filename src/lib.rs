//! # Roam Library
//!
//! Semantic travel-offer matching: embeds a catalogue of offers into a
//! vector index, fuses cosine similarity with rule-based preference
//! scoring, and memoizes ranked results per preference fingerprint.
//! Degrades to keyword matching when the embedding provider is down.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod fuser;
pub mod index;
pub mod keyword;
pub mod projector;
pub mod provider;
pub mod rerank;
pub mod scorer;
pub mod storage;
pub mod ui;

pub use config::MatchConfig;
pub use core::{MatchResult, OfferRecord, PreferenceSet};
pub use engine::MatchEngine;
pub use error::MatchError;
pub use provider::{EmbeddingProvider, FeatureHashEmbedder};

//! Engine façade
//!
//! One explicitly-constructed object owning the index, corpus snapshot,
//! cache and configuration, with the embedding provider injected at
//! construction. Callers hold it behind an `Arc`; there is no
//! module-level mutable state anywhere in the crate.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::cache::MatchCache;
use crate::config::{MatchConfig, CANDIDATE_OVERSAMPLE, NEUTRAL_PREFERENCE_SCORE};
use crate::core::{Embedding, MatchResult, OfferRecord, PreferenceSet};
use crate::error::MatchError;
use crate::fuser;
use crate::index::VectorIndex;
use crate::keyword;
use crate::projector::project_query;
use crate::provider::{EmbeddingProvider, GuardedProvider};
use crate::rerank::{self, Reranker};
use crate::storage;
use crate::ui;

pub struct MatchEngine {
	provider: GuardedProvider,
	index: VectorIndex,
	corpus: RwLock<HashMap<String, OfferRecord>>,
	cache: MatchCache,
	config: MatchConfig,
}

impl MatchEngine {
	pub fn new(provider: Arc<dyn EmbeddingProvider>, config: MatchConfig) -> Self {
		let guarded = GuardedProvider::new(
			provider,
			config.embed_batch_size,
			Duration::from_millis(config.embed_timeout_ms),
			config.embed_retries,
		);
		Self {
			provider: guarded,
			index: VectorIndex::new(),
			corpus: RwLock::new(HashMap::new()),
			cache: MatchCache::new(),
			config,
		}
	}

	pub fn config(&self) -> &MatchConfig {
		&self.config
	}

	pub fn corpus_len(&self) -> usize {
		self.corpus.read().map(|c| c.len()).unwrap_or(0)
	}

	pub fn index_ready(&self) -> bool {
		self.index.is_ready()
	}

	pub fn offer(&self, reference: &str) -> Option<OfferRecord> {
		self.corpus.read().ok()?.get(reference).cloned()
	}

	/// Replaces the corpus without touching the index. Queries will run
	/// through the keyword fallback until a build happens.
	pub fn set_corpus(&self, offers: Vec<OfferRecord>) {
		if let Ok(mut corpus) = self.corpus.write() {
			*corpus = offers.into_iter().map(|o| (o.reference.clone(), o)).collect();
		}
		self.cache.invalidate_all();
	}

	/// Replaces the corpus wholesale and rebuilds the index.
	///
	/// An empty corpus is not an error: the index stays `Empty` and
	/// queries return empty lists. Provider failure during the build is
	/// fatal and propagates; a previous snapshot, if any, keeps
	/// serving. The match cache is invalidated either way.
	pub fn rebuild(&self, offers: Vec<OfferRecord>) -> Result<(), MatchError> {
		if let Ok(mut corpus) = self.corpus.write() {
			*corpus = offers.iter().map(|o| (o.reference.clone(), o.clone())).collect();
		}

		let built = self.index.build(&offers, &self.provider);

		self.cache.invalidate_all();
		ui::debug("Match cache invalidated (corpus rebuild)");

		match built {
			Ok(()) => Ok(()),
			Err(MatchError::EmptyCorpus) => {
				ui::warn("Corpus is empty; index left unbuilt");
				Ok(())
			}
			Err(e) => {
				ui::error(&format!("Index build failed: {}", e));
				Err(e)
			}
		}
	}

	/// Rebuild on a background thread; readers keep the previous
	/// snapshot until the new one swaps in.
	pub fn spawn_rebuild(self: &Arc<Self>, offers: Vec<OfferRecord>) -> JoinHandle<Result<(), MatchError>> {
		let engine = Arc::clone(self);
		thread::spawn(move || engine.rebuild(offers))
	}

	/// Restores the index from a persisted snapshot, falling back to a
	/// full rebuild when the snapshot is missing, unreadable, was
	/// produced with a different embedding dimension, or no longer
	/// matches the supplied offers (references added, removed or
	/// reworded since it was persisted). The fallback is logged, never
	/// surfaced.
	pub fn load_or_build(&self, path: &Path, offers: Vec<OfferRecord>) -> Result<(), MatchError> {
		match storage::load(path, self.provider.dimension()) {
			Ok(snapshot) if snapshot.matches_corpus(&offers) => {
				if let Ok(mut corpus) = self.corpus.write() {
					*corpus = offers.iter().map(|o| (o.reference.clone(), o.clone())).collect();
				}
				self.index.install(snapshot);
				self.cache.invalidate_all();
				Ok(())
			}
			Ok(_) => {
				ui::warn("Snapshot is stale for this catalogue; rebuilding index");
				self.rebuild_and_persist(path, offers)
			}
			Err(e) => {
				ui::warn(&format!("Snapshot unusable ({}); rebuilding index", e));
				self.rebuild_and_persist(path, offers)
			}
		}
	}

	fn rebuild_and_persist(&self, path: &Path, offers: Vec<OfferRecord>) -> Result<(), MatchError> {
		self.rebuild(offers)?;
		if self.index.is_ready() {
			self.index.persist(path)?;
		}
		Ok(())
	}

	/// Serialize the serving snapshot to disk
	pub fn persist(&self, path: &Path) -> Result<(), MatchError> {
		self.index.persist(path)
	}

	pub fn invalidate_cache(&self) {
		self.cache.invalidate_all();
		ui::debug("Match cache invalidated (explicit)");
	}

	/// Ranked recommendations for a preference set.
	///
	/// Cached by preference fingerprint. Recoverable failures
	/// (provider down, index not built) degrade to keyword matching;
	/// an empty corpus yields an empty list. Nothing on this path
	/// panics or propagates a recoverable error to the caller.
	pub fn recommend(&self, prefs: &PreferenceSet, top_k: usize) -> Result<Vec<MatchResult>, MatchError> {
		self.recommend_with_options(prefs, top_k, false)
	}

	/// `bypass_cache` forces recomputation (upstream cache-clear endpoint)
	pub fn recommend_with_options(
		&self,
		prefs: &PreferenceSet,
		top_k: usize,
		bypass_cache: bool,
	) -> Result<Vec<MatchResult>, MatchError> {
		if self.corpus_len() == 0 {
			return Ok(Vec::new());
		}

		// top_k participates in the key so a wider request is not
		// answered from a narrower cached list
		let key = prefs.fingerprint() ^ (top_k as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
		self.cache.get_or_compute(key, bypass_cache, || self.compute_matches(prefs, top_k))
	}

	/// Hands the top fused candidates to an external reranker and
	/// applies the returned order. See [`crate::rerank`] for the
	/// tolerance rules.
	pub fn rerank_with(&self, reranker: &dyn Reranker, results: Vec<MatchResult>) -> Vec<MatchResult> {
		rerank::apply(reranker, results)
	}

	fn compute_matches(&self, prefs: &PreferenceSet, top_k: usize) -> Result<Vec<MatchResult>, MatchError> {
		let corpus = self.corpus.read().map_err(|_| MatchError::IndexNotReady)?;
		let oversample = top_k.saturating_mul(CANDIDATE_OVERSAMPLE).max(top_k);

		let candidates = match self.vector_candidates(prefs, oversample, &corpus) {
			Ok(candidates) => candidates,
			Err(e) if e.is_recoverable() => {
				ui::warn(&format!("Semantic search unavailable ({}); keyword fallback engaged", e));
				keyword::search(&corpus, prefs, oversample)
			}
			Err(e) => return Err(e),
		};

		Ok(fuser::fuse(&candidates, &corpus, prefs, top_k, &self.config))
	}

	fn vector_candidates(
		&self,
		prefs: &PreferenceSet,
		k: usize,
		corpus: &HashMap<String, OfferRecord>,
	) -> Result<Vec<(String, f32)>, MatchError> {
		let query_text = project_query(prefs);
		if query_text.is_empty() {
			// Purely numeric preferences carry no embeddable text; rank
			// the whole corpus on preference score alone
			return Ok(corpus.keys().map(|r| (r.clone(), NEUTRAL_PREFERENCE_SCORE)).collect());
		}

		let vector = self.provider.embed_one(&query_text)?;
		self.index.search(&Embedding::new(vector), k)
	}
}

//! In-memory vector index with atomic snapshot swap
//!
//! Lifecycle: `Empty → Building → Ready → Rebuilding → Ready → …`.
//! Only a `Ready` snapshot answers queries; during a rebuild, readers
//! keep the previous snapshot until the new one swaps in whole, so no
//! caller ever observes a half-built index.

use std::path::Path;
use std::sync::{Arc, RwLock};

use rayon::prelude::*;

use crate::core::embedding::similarity_score;
use crate::core::{Embedding, OfferRecord, TextHash};
use crate::error::MatchError;
use crate::projector::project_offer;
use crate::provider::GuardedProvider;
use crate::storage::{self, IndexedOffer, Snapshot};

enum State {
	Empty,
	Building,
	Ready(Arc<Snapshot>),
	/// New build in flight; the held snapshot keeps serving reads
	Rebuilding(Arc<Snapshot>),
}

impl State {
	fn serving(&self) -> Option<Arc<Snapshot>> {
		match self {
			State::Ready(s) | State::Rebuilding(s) => Some(Arc::clone(s)),
			State::Empty | State::Building => None,
		}
	}
}

pub struct VectorIndex {
	state: RwLock<State>,
}

impl VectorIndex {
	pub fn new() -> Self {
		Self { state: RwLock::new(State::Empty) }
	}

	/// Atomically installs a loaded snapshot as the serving state
	pub fn install(&self, snapshot: Snapshot) {
		self.replace_state(State::Ready(Arc::new(snapshot)));
	}

	pub fn is_ready(&self) -> bool {
		self.state.read().map(|s| s.serving().is_some()).unwrap_or(false)
	}

	/// Number of offers in the serving snapshot
	pub fn len(&self) -> usize {
		self.state
			.read()
			.ok()
			.and_then(|s| s.serving())
			.map(|s| s.len())
			.unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Projects, embeds (batched) and indexes the full corpus, then swaps
	/// the new snapshot in atomically. Concurrent readers keep the
	/// previous snapshot until the swap.
	///
	/// Zero offers leaves the index `Empty` and returns `EmptyCorpus`.
	/// Provider failure aborts the build (the previous snapshot, if any,
	/// stays in service). No index beats a silently incomplete one.
	pub fn build(&self, offers: &[OfferRecord], provider: &GuardedProvider) -> Result<(), MatchError> {
		if offers.is_empty() {
			self.replace_state(State::Empty);
			return Err(MatchError::EmptyCorpus);
		}

		self.enter_building();

		match self.build_snapshot(offers, provider) {
			Ok(snapshot) => {
				self.replace_state(State::Ready(Arc::new(snapshot)));
				Ok(())
			}
			Err(e) => {
				self.exit_building();
				Err(e)
			}
		}
	}

	fn build_snapshot(&self, offers: &[OfferRecord], provider: &GuardedProvider) -> Result<Snapshot, MatchError> {
		let texts: Vec<String> = offers.par_iter().map(project_offer).collect();
		let vectors = provider.embed_all(&texts)?;

		let entries: Vec<IndexedOffer> = offers
			.iter()
			.zip(texts.iter())
			.zip(vectors)
			.map(|((offer, text), vector)| {
				IndexedOffer::new(
					offer.reference.clone(),
					TextHash::compute(text),
					&Embedding::new(vector),
				)
			})
			.collect();

		Ok(Snapshot::new(provider.dimension(), entries))
	}

	/// Top-k nearest neighbors by cosine similarity.
	///
	/// Returns `(reference, similarity ∈ [0,1])` pairs, descending by
	/// similarity, ties broken by reference ascending so results are
	/// reproducible. `IndexNotReady` when no snapshot is serving.
	pub fn search(&self, query: &Embedding, k: usize) -> Result<Vec<(String, f32)>, MatchError> {
		let snapshot = self
			.state
			.read()
			.ok()
			.and_then(|s| s.serving())
			.ok_or(MatchError::IndexNotReady)?;

		let mut scored: Vec<(String, f32)> = snapshot
			.entries
			.iter()
			.map(|entry| {
				let cosine = query.similarity(&entry.embedding());
				(entry.reference.clone(), similarity_score(cosine))
			})
			.collect();

		scored.sort_by(|a, b| {
			b.1.partial_cmp(&a.1)
				.unwrap_or(std::cmp::Ordering::Equal)
				.then_with(|| a.0.cmp(&b.0))
		});
		scored.truncate(k);
		Ok(scored)
	}

	/// Serialize the serving snapshot
	pub fn persist(&self, path: &Path) -> Result<(), MatchError> {
		let snapshot = self
			.state
			.read()
			.ok()
			.and_then(|s| s.serving())
			.ok_or(MatchError::IndexNotReady)?;
		storage::save(&snapshot, path)
	}

	/// Mark a build in flight, keeping any serving snapshot readable
	fn enter_building(&self) {
		if let Ok(mut state) = self.state.write() {
			*state = match std::mem::replace(&mut *state, State::Empty) {
				State::Ready(s) | State::Rebuilding(s) => State::Rebuilding(s),
				State::Empty | State::Building => State::Building,
			};
		}
	}

	/// Roll back a failed build to the pre-build serving state
	fn exit_building(&self) {
		if let Ok(mut state) = self.state.write() {
			*state = match std::mem::replace(&mut *state, State::Empty) {
				State::Rebuilding(s) | State::Ready(s) => State::Ready(s),
				State::Empty | State::Building => State::Empty,
			};
		}
	}

	fn replace_state(&self, new_state: State) {
		if let Ok(mut state) = self.state.write() {
			*state = new_state;
		}
	}
}

impl Default for VectorIndex {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Destination;
	use crate::provider::FeatureHashEmbedder;
	use std::sync::Arc;
	use std::time::Duration;

	fn offers() -> Vec<OfferRecord> {
		vec![
			OfferRecord {
				reference: "TRK-100".into(),
				name: "Highlights of Japan".into(),
				destinations: vec![Destination::new("Tokyo", "JP")],
				duration_days: 14,
				price: Some(2800.0),
				description: "Temples and bullet trains".into(),
				highlights: vec!["Mount Fuji".into()],
				offer_type: "group tour".into(),
			},
			OfferRecord {
				reference: "TRK-200".into(),
				name: "Vietnam Explorer".into(),
				destinations: vec![Destination::new("Hanoi", "VN")],
				duration_days: 7,
				price: Some(1400.0),
				description: "Street food and limestone bays".into(),
				highlights: vec!["Ha Long Bay".into()],
				offer_type: "group tour".into(),
			},
		]
	}

	fn guarded() -> GuardedProvider {
		GuardedProvider::new(
			Arc::new(FeatureHashEmbedder::default()),
			32,
			Duration::from_secs(5),
			1,
		)
	}

	#[test]
	fn search_before_build_is_not_ready() {
		let index = VectorIndex::new();
		let q = Embedding::new(vec![1.0; FeatureHashEmbedder::DEFAULT_DIM]);
		assert!(matches!(index.search(&q, 5), Err(MatchError::IndexNotReady)));
	}

	#[test]
	fn build_then_search_is_deterministic() {
		let provider = guarded();
		let index = VectorIndex::new();
		index.build(&offers(), &provider).unwrap();
		assert_eq!(index.len(), 2);

		let q = Embedding::new(provider.embed_one("japan temples").unwrap());
		let first = index.search(&q, 2).unwrap();
		let second = index.search(&q, 2).unwrap();
		let refs: Vec<&str> = first.iter().map(|(r, _)| r.as_str()).collect();
		let refs2: Vec<&str> = second.iter().map(|(r, _)| r.as_str()).collect();
		assert_eq!(refs, refs2);
		assert_eq!(refs[0], "TRK-100");
	}

	#[test]
	fn empty_corpus_leaves_index_empty() {
		let index = VectorIndex::new();
		let err = index.build(&[], &guarded()).unwrap_err();
		assert!(matches!(err, MatchError::EmptyCorpus));
		assert!(!index.is_ready());
	}

	#[test]
	fn stored_vectors_are_unit_length() {
		let provider = guarded();
		let index = VectorIndex::new();
		index.build(&offers(), &provider).unwrap();

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("index.msgpack");
		index.persist(&path).unwrap();

		let snapshot = storage::load(&path, provider.dimension()).unwrap();
		for entry in &snapshot.entries {
			let norm: f32 = entry.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
			assert!((norm - 1.0).abs() < 1e-4, "norm {} for {}", norm, entry.reference);
		}
	}

	#[test]
	fn failed_rebuild_keeps_previous_snapshot() {
		struct FailingProvider;
		impl crate::provider::EmbeddingProvider for FailingProvider {
			fn dimension(&self) -> usize {
				FeatureHashEmbedder::DEFAULT_DIM
			}
			fn embed_batch(&self, _: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
				anyhow::bail!("down")
			}
		}

		let good = guarded();
		let index = VectorIndex::new();
		index.build(&offers(), &good).unwrap();

		let bad = GuardedProvider::new(Arc::new(FailingProvider), 32, Duration::from_secs(1), 0);
		assert!(index.build(&offers(), &bad).is_err());

		// Old snapshot still serves
		let q = Embedding::new(good.embed_one("japan").unwrap());
		assert_eq!(index.search(&q, 2).unwrap().len(), 2);
	}
}

//! Index snapshot format and I/O
//!
//! MessagePack on disk so a restart does not re-embed the whole
//! catalogue. Self-describing: format version and embedding dimension
//! travel with the data, and a load that disagrees with the live
//! provider's dimension is rejected rather than silently served.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Embedding, OfferRecord, TextHash};
use crate::error::MatchError;
use crate::projector::project_offer;

const FORMAT_VERSION: u32 = 1;
const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One embedded offer inside a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedOffer {
	pub reference: String,
	pub text_hash: String,
	/// L2-normalized, `dimension` long
	pub vector: Vec<f32>,
}

impl IndexedOffer {
	pub fn new(reference: String, text_hash: TextHash, embedding: &Embedding) -> Self {
		Self {
			reference,
			text_hash: text_hash.as_str().to_string(),
			vector: embedding.as_slice().to_vec(),
		}
	}

	pub fn embedding(&self) -> Embedding {
		Embedding::raw(self.vector.clone())
	}
}

/// Immutable, fully-built index state. Queries always run against one
/// of these; a rebuild produces a fresh snapshot and swaps it in whole.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
	format_version: u32,
	engine_version: String,
	pub dimension: usize,
	pub built_at: DateTime<Utc>,
	pub entries: Vec<IndexedOffer>,
}

impl Snapshot {
	pub fn new(dimension: usize, mut entries: Vec<IndexedOffer>) -> Self {
		// Stable entry order keeps persisted bytes deterministic
		entries.sort_by(|a, b| a.reference.cmp(&b.reference));
		Self {
			format_version: FORMAT_VERSION,
			engine_version: ENGINE_VERSION.to_string(),
			dimension,
			built_at: Utc::now(),
			entries,
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// True when this snapshot still describes `offers`: same reference
	/// set, and every stored text hash matches the offer's current
	/// projected text. A snapshot persisted before the catalogue grew,
	/// shrank or had an offer reworded fails this check and must be
	/// rebuilt rather than served.
	pub fn matches_corpus(&self, offers: &[OfferRecord]) -> bool {
		if self.entries.len() != offers.len() {
			return false;
		}
		let stored: HashMap<&str, TextHash> = self
			.entries
			.iter()
			.map(|entry| (entry.reference.as_str(), TextHash::raw(entry.text_hash.clone())))
			.collect();
		offers.iter().all(|offer| {
			stored
				.get(offer.reference.as_str())
				.is_some_and(|hash| *hash == TextHash::compute(&project_offer(offer)))
		})
	}
}

/// Save snapshot to disk
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<(), MatchError> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	let bytes = rmp_serde::to_vec(snapshot)?;
	fs::write(path, bytes)?;
	Ok(())
}

/// Load snapshot from disk, validating format version and embedding
/// dimension against the live provider.
pub fn load(path: &Path, expected_dimension: usize) -> Result<Snapshot, MatchError> {
	let bytes = fs::read(path)?;
	let snapshot: Snapshot = rmp_serde::from_slice(&bytes)?;

	if snapshot.format_version != FORMAT_VERSION {
		return Err(MatchError::SnapshotVersion(snapshot.format_version));
	}
	if snapshot.dimension != expected_dimension {
		return Err(MatchError::DimensionMismatch {
			expected: expected_dimension,
			found: snapshot.dimension,
		});
	}

	Ok(snapshot)
}

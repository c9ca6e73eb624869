//! Engine error taxonomy
//!
//! Recoverable conditions (provider down, index not built) degrade to the
//! keyword fallback or empty results inside the engine; only build-time
//! embedding failures and catalogue errors reach the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
	/// Embedding provider call failed or timed out
	#[error("embedding provider unavailable: {reason}")]
	EmbeddingUnavailable { reason: String },

	/// Query arrived before any successful index build
	#[error("vector index is not ready")]
	IndexNotReady,

	/// Persisted snapshot disagrees with the live provider's dimension
	#[error("snapshot dimension {found} does not match provider dimension {expected}")]
	DimensionMismatch { expected: usize, found: usize },

	/// Build requested with zero offers
	#[error("offer corpus is empty")]
	EmptyCorpus,

	#[error("snapshot I/O failed: {0}")]
	SnapshotIo(#[from] std::io::Error),

	#[error("snapshot encoding failed: {0}")]
	SnapshotEncode(#[from] rmp_serde::encode::Error),

	#[error("snapshot decoding failed: {0}")]
	SnapshotDecode(#[from] rmp_serde::decode::Error),

	/// Snapshot written by an incompatible format version
	#[error("unsupported snapshot format version {0}")]
	SnapshotVersion(u32),

	#[error("catalogue error: {0}")]
	Catalog(String),
}

impl MatchError {
	/// Conditions the query path absorbs by degrading to keyword search
	pub fn is_recoverable(&self) -> bool {
		matches!(self, Self::EmbeddingUnavailable { .. } | Self::IndexNotReady)
	}
}

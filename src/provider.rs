//! Embedding provider boundary
//!
//! The actual model (hosted API, local ONNX session, ...) is injected
//! behind [`EmbeddingProvider`]. The engine never calls a provider
//! directly; it goes through [`GuardedProvider`], which chunks batches,
//! bounds each call with a timeout and retries once before giving up.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::error::MatchError;

/// A deterministic text-to-vector capability of fixed dimension.
///
/// Implementations must return one vector per input text, every vector
/// exactly `dimension()` long, and identical output for identical input
/// (same model, same version). Vectors need not be normalized; the
/// index normalizes on ingest.
pub trait EmbeddingProvider: Send + Sync {
	fn dimension(&self) -> usize;
	fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Wraps a provider with batching, a per-call timeout and a single retry.
pub struct GuardedProvider {
	inner: Arc<dyn EmbeddingProvider>,
	batch_size: usize,
	timeout: Duration,
	retries: u32,
}

impl GuardedProvider {
	pub fn new(inner: Arc<dyn EmbeddingProvider>, batch_size: usize, timeout: Duration, retries: u32) -> Self {
		Self { inner, batch_size: batch_size.max(1), timeout, retries }
	}

	pub fn dimension(&self) -> usize {
		self.inner.dimension()
	}

	/// Embeds a single query string
	pub fn embed_one(&self, text: &str) -> Result<Vec<f32>, MatchError> {
		let mut out = self.call_with_retry(vec![text.to_string()])?;
		out.pop().ok_or_else(|| MatchError::EmbeddingUnavailable {
			reason: "provider returned no vectors".into(),
		})
	}

	/// Embeds a full corpus in bounded chunks
	pub fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MatchError> {
		let mut vectors = Vec::with_capacity(texts.len());
		for chunk in texts.chunks(self.batch_size) {
			let batch = self.call_with_retry(chunk.to_vec())?;
			if batch.len() != chunk.len() {
				return Err(MatchError::EmbeddingUnavailable {
					reason: format!("provider returned {} vectors for {} texts", batch.len(), chunk.len()),
				});
			}
			vectors.extend(batch);
		}
		Ok(vectors)
	}

	fn call_with_retry(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, MatchError> {
		let mut last_reason = String::new();
		for _ in 0..=self.retries {
			match self.call_bounded(texts.clone()) {
				Ok(vectors) => return Ok(vectors),
				Err(reason) => last_reason = reason,
			}
		}
		Err(MatchError::EmbeddingUnavailable { reason: last_reason })
	}

	/// Runs one provider call on a worker thread so a hung provider cannot
	/// block a query past the timeout. A timed-out worker is abandoned;
	/// its result is discarded on arrival.
	fn call_bounded(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, String> {
		let (tx, rx) = mpsc::channel();
		let provider = Arc::clone(&self.inner);

		thread::spawn(move || {
			let result = provider.embed_batch(&texts).map_err(|e| e.to_string());
			let _ = tx.send(result);
		});

		match rx.recv_timeout(self.timeout) {
			Ok(result) => result,
			Err(_) => Err(format!("timed out after {:?}", self.timeout)),
		}
	}
}

/// Deterministic feature-hashing embedder.
///
/// Maps each whitespace token to three hashed positions with hashed
/// signs, TF-weighted. No model files, fully reproducible, decent token
/// overlap similarity. Default provider for the CLI; a production
/// deployment injects a real model instead.
pub struct FeatureHashEmbedder {
	dim: usize,
}

impl FeatureHashEmbedder {
	pub const DEFAULT_DIM: usize = 384;

	pub fn new(dim: usize) -> Self {
		Self { dim: dim.max(8) }
	}

	fn embed_text(&self, text: &str) -> Vec<f32> {
		let mut vector = vec![0.0f32; self.dim];
		for token in tokenize(text) {
			// Three positions per token to soften collisions
			for seed in 0..3u64 {
				let slot = (xxh3_64_with_seed(token.as_bytes(), seed) as usize) % self.dim;
				let sign = if xxh3_64_with_seed(token.as_bytes(), seed + 3) % 2 == 0 { 1.0 } else { -1.0 };
				vector[slot] += sign;
			}
		}
		vector
	}
}

impl Default for FeatureHashEmbedder {
	fn default() -> Self {
		Self::new(Self::DEFAULT_DIM)
	}
}

impl EmbeddingProvider for FeatureHashEmbedder {
	fn dimension(&self) -> usize {
		self.dim
	}

	fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
		Ok(texts.iter().map(|t| self.embed_text(t)).collect())
	}
}

/// Lower-cased alphanumeric tokens, punctuation stripped
pub fn tokenize(text: &str) -> Vec<String> {
	text.to_lowercase()
		.split(|c: char| !c.is_alphanumeric())
		.filter(|t| !t.is_empty())
		.map(str::to_string)
		.collect()
}

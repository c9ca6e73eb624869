//! Match result memoization
//!
//! Keyed by the preference fingerprint. Compute runs outside the lock,
//! so two racing queries for the same fingerprint may both compute;
//! last writer wins, which is harmless because recomputation is
//! idempotent. Failed computes are never cached.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::core::MatchResult;
use crate::error::MatchError;
use crate::ui;

struct CacheEntry {
	results: Vec<MatchResult>,
	created: DateTime<Utc>,
}

#[derive(Default)]
pub struct MatchCache {
	entries: Mutex<HashMap<u64, CacheEntry>>,
}

impl MatchCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached list for `fingerprint`, or runs `compute`,
	/// stores its output and returns it. With `bypass` the cache is
	/// ignored for the lookup but the fresh result still overwrites the
	/// stored entry.
	pub fn get_or_compute<F>(&self, fingerprint: u64, bypass: bool, compute: F) -> Result<Vec<MatchResult>, MatchError>
	where
		F: FnOnce() -> Result<Vec<MatchResult>, MatchError>,
	{
		if !bypass {
			if let Ok(entries) = self.entries.lock() {
				if let Some(entry) = entries.get(&fingerprint) {
					let age = Utc::now().signed_duration_since(entry.created);
					ui::debug(&format!("Cache hit for {:016x} ({}s old)", fingerprint, age.num_seconds()));
					return Ok(entry.results.clone());
				}
			}
		}

		let results = compute()?;

		if let Ok(mut entries) = self.entries.lock() {
			entries.insert(fingerprint, CacheEntry { results: results.clone(), created: Utc::now() });
		}
		Ok(results)
	}

	/// Drops every entry. Called on corpus rebuild and provider change.
	pub fn invalidate_all(&self) {
		if let Ok(mut entries) = self.entries.lock() {
			entries.clear();
		}
	}

	pub fn len(&self) -> usize {
		self.entries.lock().map(|e| e.len()).unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

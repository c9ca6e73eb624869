//! Offer catalogue loading
//!
//! The corpus loader proper (scrapers, CMS exports) lives upstream;
//! this boundary consumes its JSON snapshot, validates it, and hands
//! the engine a clean `Vec<OfferRecord>`. Rebuilds are always
//! whole-corpus; there is no incremental update contract.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::OfferRecord;
use crate::error::MatchError;

/// Anything that can supply a full corpus snapshot
pub trait CorpusSource {
	fn load_offers(&self) -> Result<Vec<OfferRecord>, MatchError>;
}

/// JSON file catalogue (array of offer records)
pub struct JsonCatalog {
	path: std::path::PathBuf,
}

impl JsonCatalog {
	pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl CorpusSource for JsonCatalog {
	fn load_offers(&self) -> Result<Vec<OfferRecord>, MatchError> {
		load_file(&self.path)
	}
}

/// Loads and validates a catalogue file
pub fn load_file(path: &Path) -> Result<Vec<OfferRecord>, MatchError> {
	let content = fs::read_to_string(path)
		.map_err(|e| MatchError::Catalog(format!("read {}: {}", path.display(), e)))?;
	let offers: Vec<OfferRecord> = serde_json::from_str(&content)
		.map_err(|e| MatchError::Catalog(format!("parse {}: {}", path.display(), e)))?;
	validate(&offers)?;
	Ok(offers)
}

/// Rejects duplicate references, blank names and zero durations
pub fn validate(offers: &[OfferRecord]) -> Result<(), MatchError> {
	let mut seen = HashSet::new();
	for offer in offers {
		if offer.reference.trim().is_empty() {
			return Err(MatchError::Catalog("offer with empty reference".into()));
		}
		if !seen.insert(offer.reference.as_str()) {
			return Err(MatchError::Catalog(format!("duplicate reference {}", offer.reference)));
		}
		if offer.name.trim().is_empty() {
			return Err(MatchError::Catalog(format!("{}: empty name", offer.reference)));
		}
		if offer.duration_days == 0 {
			return Err(MatchError::Catalog(format!("{}: zero duration", offer.reference)));
		}
	}
	Ok(())
}

//! Travel offer catalogue records

use serde::{Deserialize, Serialize};

/// A single destination within an offer itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
	pub city: String,
	/// ISO 3166-1 alpha-2 code, upper-case
	pub country_code: String,
}

impl Destination {
	pub fn new(city: impl Into<String>, country_code: impl Into<String>) -> Self {
		Self { city: city.into(), country_code: country_code.into() }
	}
}

/// Immutable offer record as supplied by the corpus loader.
///
/// The engine only reads these; ownership stays with the loader. `price`
/// is per person and optional; offers scraped without pricing still
/// index and rank, they just skip the budget sub-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferRecord {
	/// Unique reference, stable across corpus rebuilds
	pub reference: String,
	pub name: String,
	pub destinations: Vec<Destination>,
	pub duration_days: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub highlights: Vec<String>,
	#[serde(default)]
	pub offer_type: String,
}

impl OfferRecord {
	/// Countries visited, deduplicated
	pub fn country_codes(&self) -> Vec<&str> {
		let mut codes: Vec<&str> = self.destinations.iter().map(|d| d.country_code.as_str()).collect();
		codes.sort_unstable();
		codes.dedup();
		codes
	}
}

//! Ranked match results returned to the dialogue layer

use serde::Serialize;

use super::offer::{Destination, OfferRecord};

/// One ranked recommendation.
///
/// Carries enough offer detail for the caller to render without a second
/// catalogue lookup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
	pub reference: String,
	pub name: String,
	pub destinations: Vec<Destination>,
	pub duration_days: u32,
	pub description: String,
	pub highlights: Vec<String>,
	/// Vector (or keyword-fallback) similarity [0, 1]
	pub similarity: f32,
	/// Rule-based preference compatibility [0, 1]
	pub preference_score: f32,
	/// α-blend of the two, the sort key
	pub fused_score: f32,
	/// 1-based position in the final ranking
	pub rank: usize,
}

impl MatchResult {
	pub fn new(offer: &OfferRecord, similarity: f32, preference_score: f32, fused_score: f32) -> Self {
		Self {
			reference: offer.reference.clone(),
			name: offer.name.clone(),
			destinations: offer.destinations.clone(),
			duration_days: offer.duration_days,
			description: offer.description.clone(),
			highlights: offer.highlights.clone(),
			similarity,
			preference_score,
			fused_score,
			rank: 0,
		}
	}
}

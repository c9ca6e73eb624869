//! Score fusion and final ranking
//!
//! `fused = α·similarity + (1-α)·preference_score`, α explicit in the
//! configuration rather than buried in branches. Duplicate references
//! (the same offer surfacing through several text representations)
//! collapse to the single highest-fused result.

use std::collections::HashMap;

use crate::config::MatchConfig;
use crate::core::{MatchResult, OfferRecord, PreferenceSet};
use crate::scorer;

/// Fuses similarity candidates with preference scores into the final
/// ranked list.
///
/// Sort order: fused descending, then similarity descending, then
/// reference ascending. Truncated to `top_n`, ranks assigned 1-based.
pub fn fuse(
	candidates: &[(String, f32)],
	corpus: &HashMap<String, OfferRecord>,
	prefs: &PreferenceSet,
	top_n: usize,
	config: &MatchConfig,
) -> Vec<MatchResult> {
	let alpha = config.fusion_alpha.clamp(0.0, 1.0);
	let mut best: HashMap<&str, MatchResult> = HashMap::new();

	for (reference, similarity) in candidates {
		// Candidates whose reference left the corpus are skipped, not errors
		let Some(offer) = corpus.get(reference) else { continue };

		let preference = scorer::score(offer, prefs, config);
		let fused = alpha * similarity + (1.0 - alpha) * preference;
		let result = MatchResult::new(offer, *similarity, preference, fused);

		match best.get(offer.reference.as_str()) {
			Some(existing) if existing.fused_score >= fused => {}
			_ => {
				best.insert(offer.reference.as_str(), result);
			}
		}
	}

	let mut results: Vec<MatchResult> = best.into_values().collect();
	results.sort_by(|a, b| {
		b.fused_score
			.partial_cmp(&a.fused_score)
			.unwrap_or(std::cmp::Ordering::Equal)
			.then_with(|| {
				b.similarity
					.partial_cmp(&a.similarity)
					.unwrap_or(std::cmp::Ordering::Equal)
			})
			.then_with(|| a.reference.cmp(&b.reference))
	});
	results.truncate(top_n);

	for (i, result) in results.iter_mut().enumerate() {
		result.rank = i + 1;
	}
	results
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Destination;

	fn corpus() -> HashMap<String, OfferRecord> {
		let offers = vec![
			OfferRecord {
				reference: "TRK-A".into(),
				name: "Highlights of Japan".into(),
				destinations: vec![Destination::new("Tokyo", "JP")],
				duration_days: 14,
				price: Some(2800.0),
				description: "Temples and bullet trains".into(),
				highlights: vec![],
				offer_type: "group tour".into(),
			},
			OfferRecord {
				reference: "TRK-B".into(),
				name: "Vietnam Explorer".into(),
				destinations: vec![Destination::new("Hanoi", "VN")],
				duration_days: 7,
				price: Some(1400.0),
				description: "Street food and limestone bays".into(),
				highlights: vec![],
				offer_type: "group tour".into(),
			},
		];
		offers.into_iter().map(|o| (o.reference.clone(), o)).collect()
	}

	#[test]
	fn duplicate_references_collapse_to_highest() {
		let config = MatchConfig::default();
		let candidates = vec![("TRK-A".to_string(), 0.4), ("TRK-A".to_string(), 0.9)];
		let results = fuse(&candidates, &corpus(), &PreferenceSet::default(), 10, &config);

		assert_eq!(results.len(), 1);
		assert!((results[0].similarity - 0.9).abs() < 1e-6);
	}

	#[test]
	fn higher_preference_never_lowers_rank() {
		let config = MatchConfig::default();
		let candidates = vec![("TRK-A".to_string(), 0.5), ("TRK-B".to_string(), 0.5)];

		// Identical similarity; preference for Japan must put TRK-A first
		let prefs = PreferenceSet { destination: Some("japan".into()), ..Default::default() };
		let results = fuse(&candidates, &corpus(), &prefs, 10, &config);
		assert_eq!(results[0].reference, "TRK-A");
		assert!(results[0].fused_score > results[1].fused_score);
	}

	#[test]
	fn unknown_references_are_skipped() {
		let config = MatchConfig::default();
		let candidates = vec![("TRK-GONE".to_string(), 0.9), ("TRK-A".to_string(), 0.5)];
		let results = fuse(&candidates, &corpus(), &PreferenceSet::default(), 10, &config);
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].reference, "TRK-A");
	}

	#[test]
	fn ranks_are_one_based_and_ordered() {
		let config = MatchConfig::default();
		let candidates = vec![("TRK-A".to_string(), 0.9), ("TRK-B".to_string(), 0.3)];
		let results = fuse(&candidates, &corpus(), &PreferenceSet::default(), 10, &config);
		assert_eq!(results[0].rank, 1);
		assert_eq!(results[1].rank, 2);
		assert!(results[0].fused_score >= results[1].fused_score);
	}

	#[test]
	fn truncates_to_top_n() {
		let config = MatchConfig::default();
		let candidates = vec![("TRK-A".to_string(), 0.9), ("TRK-B".to_string(), 0.3)];
		let results = fuse(&candidates, &corpus(), &PreferenceSet::default(), 1, &config);
		assert_eq!(results.len(), 1);
	}
}

//! External reranker boundary
//!
//! Optional collaborator (an LLM in the full product) that receives a
//! short list of simplified candidates and hands back a reordering.
//! The contract is forgiving: the returned list may be truncated, and
//! references we do not recognize are ignored rather than errors.

use serde::Serialize;

use crate::config::RERANK_CANDIDATE_CAP;
use crate::core::MatchResult;

/// Simplified candidate record handed to the reranker
#[derive(Debug, Clone, Serialize)]
pub struct RerankCandidate {
	pub reference: String,
	pub name: String,
	pub duration_days: u32,
	pub summary: String,
}

impl RerankCandidate {
	fn from_result(result: &MatchResult) -> Self {
		Self {
			reference: result.reference.clone(),
			name: result.name.clone(),
			duration_days: result.duration_days,
			summary: result.description.clone(),
		}
	}
}

/// Maps candidates to a possibly-reordered, possibly-truncated list of
/// their references.
pub trait Reranker {
	fn rerank(&self, candidates: &[RerankCandidate]) -> Vec<String>;
}

/// Applies a reranker to a fused result list.
///
/// At most [`RERANK_CANDIDATE_CAP`] candidates are handed over. The
/// returned order wins; results the reranker dropped or misspelled keep
/// their relative fused order after the reranked block. Ranks are
/// reassigned.
pub fn apply(reranker: &dyn Reranker, results: Vec<MatchResult>) -> Vec<MatchResult> {
	if results.is_empty() {
		return results;
	}

	let capped = results.len().min(RERANK_CANDIDATE_CAP);
	let candidates: Vec<RerankCandidate> = results[..capped].iter().map(RerankCandidate::from_result).collect();
	let order = reranker.rerank(&candidates);

	let mut remaining: Vec<Option<MatchResult>> = results.into_iter().map(Some).collect();
	let mut reordered: Vec<MatchResult> = Vec::with_capacity(remaining.len());

	for reference in order {
		if let Some(slot) = remaining
			.iter_mut()
			.find(|r| r.as_ref().is_some_and(|m| m.reference == reference))
		{
			if let Some(result) = slot.take() {
				reordered.push(result);
			}
		}
	}
	reordered.extend(remaining.into_iter().flatten());

	for (i, result) in reordered.iter_mut().enumerate() {
		result.rank = i + 1;
	}
	reordered
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{Destination, OfferRecord};

	fn result(reference: &str, fused: f32) -> MatchResult {
		let offer = OfferRecord {
			reference: reference.into(),
			name: format!("Offer {}", reference),
			destinations: vec![Destination::new("Tokyo", "JP")],
			duration_days: 10,
			price: None,
			description: String::new(),
			highlights: vec![],
			offer_type: String::new(),
		};
		MatchResult::new(&offer, fused, fused, fused)
	}

	struct ReverseReranker;

	impl Reranker for ReverseReranker {
		fn rerank(&self, candidates: &[RerankCandidate]) -> Vec<String> {
			candidates.iter().rev().map(|c| c.reference.clone()).collect()
		}
	}

	struct NoiseReranker;

	impl Reranker for NoiseReranker {
		fn rerank(&self, _candidates: &[RerankCandidate]) -> Vec<String> {
			vec!["TRK-B".into(), "TRK-UNKNOWN".into()]
		}
	}

	#[test]
	fn reorder_is_applied_and_ranks_reset() {
		let results = vec![result("TRK-A", 0.9), result("TRK-B", 0.8)];
		let reordered = apply(&ReverseReranker, results);
		assert_eq!(reordered[0].reference, "TRK-B");
		assert_eq!(reordered[0].rank, 1);
		assert_eq!(reordered[1].reference, "TRK-A");
		assert_eq!(reordered[1].rank, 2);
	}

	#[test]
	fn unknown_references_are_ignored_and_dropped_results_kept() {
		let results = vec![result("TRK-A", 0.9), result("TRK-B", 0.8), result("TRK-C", 0.7)];
		let reordered = apply(&NoiseReranker, results);
		let refs: Vec<&str> = reordered.iter().map(|r| r.reference.as_str()).collect();
		// TRK-B promoted, unknown ignored, the rest keep fused order
		assert_eq!(refs, vec!["TRK-B", "TRK-A", "TRK-C"]);
	}
}

//! Keyword fallback search
//!
//! Degraded query path for when the embedding provider is down or the
//! index has not been built: pure substring/token matching over the
//! projected offer text. Same output shape as the vector index so the
//! fuser treats both paths identically.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::core::{OfferRecord, PreferenceSet};
use crate::projector::project_offer;
use crate::provider::tokenize;

/// Scores every offer against the query terms.
///
/// Returns `(reference, score ∈ [0,1])` for offers with at least one
/// matching term, descending by score, ties by reference ascending.
pub fn search(
	corpus: &HashMap<String, OfferRecord>,
	prefs: &PreferenceSet,
	k: usize,
) -> Vec<(String, f32)> {
	let terms = query_terms(prefs);
	if terms.is_empty() {
		return Vec::new();
	}

	let mut scored: Vec<(String, f32)> = corpus
		.par_iter()
		.filter_map(|(reference, offer)| {
			let score = score_offer(offer, &terms);
			(score > 0.0).then(|| (reference.clone(), score))
		})
		.collect();

	scored.sort_by(|a, b| {
		b.1.partial_cmp(&a.1)
			.unwrap_or(std::cmp::Ordering::Equal)
			.then_with(|| a.0.cmp(&b.0))
	});
	scored.truncate(k);
	scored
}

/// Free-text terms from the textual preference slots. Numeric slots
/// (duration, budget, group) are left to the preference scorer.
fn query_terms(prefs: &PreferenceSet) -> Vec<String> {
	let prefs = prefs.normalized();
	let mut text = String::new();
	for slot in [&prefs.destination, &prefs.style, &prefs.travel_month, &prefs.free_text] {
		if let Some(value) = slot {
			text.push_str(value);
			text.push(' ');
		}
	}
	tokenize(&text)
}

/// Mean match quality of the query terms against the offer's projected
/// text.
fn score_offer(offer: &OfferRecord, terms: &[String]) -> f32 {
	let haystack = project_offer(offer);
	let words = tokenize(&haystack);

	let total: f32 = terms.iter().map(|term| term_quality(&haystack, &words, term)).sum();
	total / terms.len() as f32
}

/// Quality tiers mirror substring strength: exact token 1.0, prefix
/// 0.8, substring 0.6, fuzzy (edit distance ≤ 1 on tokens of 5+) 0.4
fn term_quality(haystack: &str, words: &[String], term: &str) -> f32 {
	if words.iter().any(|w| w == term) {
		return 1.0;
	}
	if words.iter().any(|w| w.starts_with(term)) {
		return 0.8;
	}
	if haystack.contains(term) {
		return 0.6;
	}
	if term.len() >= 5 && words.iter().any(|w| levenshtein(w, term) <= 1) {
		return 0.4;
	}
	0.0
}

fn levenshtein(a: &str, b: &str) -> usize {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();
	let (m, n) = (a.len(), b.len());

	if m == 0 {
		return n;
	}
	if n == 0 {
		return m;
	}

	let mut prev: Vec<usize> = (0..=n).collect();
	let mut curr = vec![0; n + 1];

	for i in 1..=m {
		curr[0] = i;
		for j in 1..=n {
			let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
			curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
		}
		std::mem::swap(&mut prev, &mut curr);
	}

	prev[n]
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Destination;

	fn corpus() -> HashMap<String, OfferRecord> {
		let offers = vec![
			OfferRecord {
				reference: "TRK-JP".into(),
				name: "Highlights of Japan".into(),
				destinations: vec![Destination::new("Tokyo", "JP")],
				duration_days: 14,
				price: None,
				description: "Temples and bullet trains".into(),
				highlights: vec!["Mount Fuji".into()],
				offer_type: "group tour".into(),
			},
			OfferRecord {
				reference: "TRK-VN".into(),
				name: "Vietnam Explorer".into(),
				destinations: vec![Destination::new("Hanoi", "VN")],
				duration_days: 7,
				price: None,
				description: "Street food and limestone bays".into(),
				highlights: vec!["Ha Long Bay".into()],
				offer_type: "group tour".into(),
			},
		];
		offers.into_iter().map(|o| (o.reference.clone(), o)).collect()
	}

	#[test]
	fn exact_name_substring_ranks_first() {
		let prefs = PreferenceSet { free_text: Some("highlights of japan".into()), ..Default::default() };
		let results = search(&corpus(), &prefs, 5);
		assert!(!results.is_empty());
		assert_eq!(results[0].0, "TRK-JP");
	}

	#[test]
	fn fuzzy_tolerates_one_typo() {
		let prefs = PreferenceSet { free_text: Some("vietnan".into()), ..Default::default() };
		let results = search(&corpus(), &prefs, 5);
		assert!(results.iter().any(|(r, _)| r == "TRK-VN"));
	}

	#[test]
	fn no_terms_no_results() {
		let results = search(&corpus(), &PreferenceSet::default(), 5);
		assert!(results.is_empty());
	}

	#[test]
	fn levenshtein_basics() {
		assert_eq!(levenshtein("japan", "japan"), 0);
		assert_eq!(levenshtein("japan", "japen"), 1);
		assert_eq!(levenshtein("", "abc"), 3);
	}
}

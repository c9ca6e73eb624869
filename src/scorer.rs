//! Rule-based preference scoring
//!
//! Independent sub-scores per slot, combined as a weighted average over
//! the slots actually present. An empty preference set scores neutral
//! rather than zero, so fusion degrades gracefully when the dialogue
//! has not gathered anything yet. Pure, no side effects.

use crate::config::{MatchConfig, NEUTRAL_PREFERENCE_SCORE};
use crate::core::{OfferRecord, PreferenceSet};

/// Days either side of the requested duration that still score 1.0
const DURATION_WINDOW: u32 = 2;
/// Score lost per day beyond the window
const DURATION_DECAY: f32 = 0.1;

/// Compatibility score in [0, 1] between an offer and a preference set.
pub fn score(offer: &OfferRecord, prefs: &PreferenceSet, config: &MatchConfig) -> f32 {
	let prefs = prefs.normalized();
	let w = &config.weights;

	let mut total = 0.0f32;
	let mut used = 0.0f32;

	if let Some(dest) = &prefs.destination {
		total += w.destination * destination_score(offer, dest, config);
		used += w.destination;
	}
	if let Some(days) = prefs.duration_days {
		total += w.duration * duration_score(offer.duration_days, days);
		used += w.duration;
	}
	if let Some(budget) = prefs.budget {
		if let Some(price) = offer.price {
			total += w.budget * budget_score(price, budget);
			used += w.budget;
		}
	}
	if let Some(style) = &prefs.style {
		total += w.style * text_affinity(offer, style);
		used += w.style;
	}
	if let Some(month) = &prefs.travel_month {
		// Months ride on the style weight band; offers rarely carry
		// explicit season data beyond their prose
		total += w.style * text_affinity(offer, month);
		used += w.style;
	}
	if let Some(group) = prefs.group_size {
		total += w.group * group_score(offer, group);
		used += w.group;
	}

	if used == 0.0 {
		NEUTRAL_PREFERENCE_SCORE
	} else {
		(total / used).clamp(0.0, 1.0)
	}
}

/// 1.0 on exact city or country match (alias table resolves country
/// names to codes), partial credit for substring matches.
fn destination_score(offer: &OfferRecord, wanted: &str, config: &MatchConfig) -> f32 {
	let wanted_code = config.alias_code(wanted);

	for dest in &offer.destinations {
		let city = dest.city.to_lowercase();
		let code = dest.country_code.to_lowercase();

		if city == wanted || code == wanted {
			return 1.0;
		}
		if let Some(alias) = wanted_code {
			if alias.eq_ignore_ascii_case(&dest.country_code) {
				return 1.0;
			}
		}
		if city.contains(wanted) || wanted.contains(&city) {
			return 0.6;
		}
	}

	// Last resort: the name or description mentions the place
	if offer.name.to_lowercase().contains(wanted) || offer.description.to_lowercase().contains(wanted) {
		return 0.6;
	}

	0.0
}

/// 1.0 within ±2 days, then linear decay of 0.1 per day
fn duration_score(offer_days: u32, wanted_days: u32) -> f32 {
	let diff = offer_days.abs_diff(wanted_days);
	if diff <= DURATION_WINDOW {
		1.0
	} else {
		(1.0 - DURATION_DECAY * (diff - DURATION_WINDOW) as f32).max(0.0)
	}
}

/// Banded proximity: 1.0 within 10% of budget, then 0.75 / 0.5 / 0.25
/// at 20 / 30 / 50%, zero beyond. Symmetric around the stated budget.
fn budget_score(price: f64, budget: f64) -> f32 {
	if budget <= 0.0 {
		return 0.0;
	}
	let ratio = ((price - budget) / budget).abs();
	match ratio {
		r if r <= 0.10 => 1.0,
		r if r <= 0.20 => 0.75,
		r if r <= 0.30 => 0.5,
		r if r <= 0.50 => 0.25,
		_ => 0.0,
	}
}

/// Substring affinity of a normalized term against type, highlights and
/// description
fn text_affinity(offer: &OfferRecord, term: &str) -> f32 {
	if offer.offer_type.to_lowercase().contains(term) {
		return 1.0;
	}
	if offer.highlights.iter().any(|h| h.to_lowercase().contains(term)) {
		return 0.8;
	}
	if offer.description.to_lowercase().contains(term) {
		return 0.5;
	}
	0.0
}

/// Group-size fit from the offer's prose; catalogue records carry no
/// structured capacity
fn group_score(offer: &OfferRecord, group: u32) -> f32 {
	let term = match group {
		1 => "solo",
		2 => "couple",
		3..=6 => "family",
		_ => "group",
	};
	let affinity = text_affinity(offer, term);
	if affinity > 0.0 {
		affinity
	} else {
		// No signal either way; don't punish the offer
		NEUTRAL_PREFERENCE_SCORE
	}
}

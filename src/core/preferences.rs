//! Typed traveller preference slots
//!
//! Preferences arrive from the dialogue layer as loosely-typed strings.
//! They are validated and normalized at this boundary once; nothing
//! downstream ever inspects arbitrary string keys.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Traveller preference slots, all optional.
///
/// String slots are normalized (trimmed, lower-cased) by [`PreferenceSet::normalized`]
/// before scoring or fingerprinting, so "Japan " and "japan" produce the
/// same cache fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSet {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub destination: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub duration_days: Option<u32>,
	/// Budget per person, in catalogue currency
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub budget: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group_size: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub travel_month: Option<String>,
	/// Free text from the conversation, folded into the query projection
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub free_text: Option<String>,
}

impl PreferenceSet {
	pub fn is_empty(&self) -> bool {
		self.destination.is_none()
			&& self.duration_days.is_none()
			&& self.budget.is_none()
			&& self.style.is_none()
			&& self.group_size.is_none()
			&& self.travel_month.is_none()
			&& self.free_text.is_none()
	}

	/// Returns a copy with all string slots trimmed and lower-cased.
	/// Slots that normalize to the empty string become `None`.
	pub fn normalized(&self) -> Self {
		Self {
			destination: norm_slot(&self.destination),
			duration_days: self.duration_days,
			budget: self.budget,
			style: norm_slot(&self.style),
			group_size: self.group_size,
			travel_month: norm_slot(&self.travel_month),
			free_text: norm_slot(&self.free_text),
		}
	}

	/// Stable `slot=value;` serialization of the non-empty slots, sorted by
	/// slot name. Input to the cache fingerprint.
	pub fn canonical_string(&self) -> String {
		let n = self.normalized();
		let mut pairs: Vec<(&str, String)> = Vec::new();
		if let Some(v) = &n.destination {
			pairs.push(("destination", v.clone()));
		}
		if let Some(v) = n.duration_days {
			pairs.push(("duration", v.to_string()));
		}
		if let Some(v) = n.budget {
			pairs.push(("budget", format!("{:.2}", v)));
		}
		if let Some(v) = &n.free_text {
			pairs.push(("text", v.clone()));
		}
		if let Some(v) = n.group_size {
			pairs.push(("group", v.to_string()));
		}
		if let Some(v) = &n.travel_month {
			pairs.push(("month", v.clone()));
		}
		if let Some(v) = &n.style {
			pairs.push(("style", v.clone()));
		}
		pairs.sort_by(|a, b| a.0.cmp(b.0));

		let mut out = String::new();
		for (key, value) in pairs {
			out.push_str(key);
			out.push('=');
			out.push_str(&value);
			out.push(';');
		}
		out
	}

	/// Cache key: xxh3 of the canonical slot serialization
	pub fn fingerprint(&self) -> u64 {
		xxh3_64(self.canonical_string().as_bytes())
	}
}

fn norm_slot(slot: &Option<String>) -> Option<String> {
	slot.as_ref().map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}

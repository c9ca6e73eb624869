//! Text projection - structured records to embedding text
//!
//! Both offers and queries flatten into the same tagged, fixed-order
//! format so their embeddings live in a comparable space. Field order
//! encodes importance: product name first, then destination, highlights,
//! description, type.

use crate::core::{OfferRecord, PreferenceSet};

/// Projects an offer into its canonical embedding text.
///
/// Deterministic and pure: identical offers always produce identical
/// text, which is what makes [`crate::core::TextHash`] usable for
/// staleness checks. Empty fields are omitted entirely.
pub fn project_offer(offer: &OfferRecord) -> String {
	let mut parts: Vec<String> = Vec::with_capacity(5);

	if !offer.name.is_empty() {
		parts.push(format!("product: {}", offer.name));
	}

	if !offer.destinations.is_empty() {
		let places: Vec<String> = offer
			.destinations
			.iter()
			.map(|d| format!("{} {}", d.city, d.country_code))
			.collect();
		parts.push(format!("destination: {}", places.join(", ")));
	}

	if !offer.highlights.is_empty() {
		parts.push(format!("highlights: {}", offer.highlights.join(", ")));
	}

	if !offer.description.is_empty() {
		parts.push(format!("description: {}", offer.description));
	}

	if !offer.offer_type.is_empty() {
		parts.push(format!("type: {}", offer.offer_type));
	}

	parts.join(". ").to_lowercase()
}

/// Projects a preference set (plus any free text) into query text using
/// the same tag style as offers.
pub fn project_query(prefs: &PreferenceSet) -> String {
	let prefs = prefs.normalized();
	let mut parts: Vec<String> = Vec::new();

	if let Some(dest) = &prefs.destination {
		parts.push(format!("destination: {}", dest));
	}
	if let Some(days) = prefs.duration_days {
		parts.push(format!("duration: {} days", days));
	}
	if let Some(style) = &prefs.style {
		parts.push(format!("type: {}", style));
	}
	if let Some(month) = &prefs.travel_month {
		parts.push(format!("month: {}", month));
	}
	if let Some(text) = &prefs.free_text {
		parts.push(text.clone());
	}

	parts.join(". ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Destination;

	fn offer() -> OfferRecord {
		OfferRecord {
			reference: "TRK-001".into(),
			name: "Highlights of Japan".into(),
			destinations: vec![Destination::new("Tokyo", "JP"), Destination::new("Kyoto", "JP")],
			duration_days: 14,
			price: Some(2800.0),
			description: "Temples, gardens and bullet trains".into(),
			highlights: vec!["Mount Fuji".into(), "Fushimi Inari".into()],
			offer_type: "group tour".into(),
		}
	}

	#[test]
	fn projection_is_deterministic() {
		let o = offer();
		assert_eq!(project_offer(&o), project_offer(&o));
	}

	#[test]
	fn fields_appear_in_fixed_order() {
		let text = project_offer(&offer());
		let name = text.find("product:").unwrap();
		let dest = text.find("destination:").unwrap();
		let high = text.find("highlights:").unwrap();
		let desc = text.find("description:").unwrap();
		let kind = text.find("type:").unwrap();
		assert!(name < dest && dest < high && high < desc && desc < kind);
	}

	#[test]
	fn empty_fields_are_omitted() {
		let mut o = offer();
		o.highlights.clear();
		o.description.clear();
		let text = project_offer(&o);
		assert!(!text.contains("highlights:"));
		assert!(!text.contains("description:"));
	}

	#[test]
	fn query_projection_uses_same_tags() {
		let prefs = PreferenceSet {
			destination: Some("Japan".into()),
			duration_days: Some(12),
			free_text: Some("temples and food".into()),
			..Default::default()
		};
		let text = project_query(&prefs);
		assert!(text.contains("destination: japan"));
		assert!(text.contains("duration: 12 days"));
		assert!(text.contains("temples and food"));
	}
}

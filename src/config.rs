//! Engine configuration and tuning constants
//!
//! The fusion weight and the destination alias table are deliberately
//! configuration, not hard-coded: the defaults below encode "destination
//! dominates, then duration, then budget" and nothing more precise.

use serde::Deserialize;

// === Fusion ===
/// Default α for `fused = α·similarity + (1-α)·preference`
pub const DEFAULT_FUSION_ALPHA: f32 = 0.5;

// === Embedding provider ===
/// Batch size for index-build embedding calls
pub const EMBED_BATCH_SIZE: usize = 32;
/// Per-call provider timeout
pub const EMBED_TIMEOUT_MS: u64 = 10_000;
/// Retries after a failed provider call (single retry, then fall back)
pub const EMBED_RETRIES: u32 = 1;

// === Ranking ===
pub const DEFAULT_TOP_K: usize = 5;
/// Candidates pulled from the index before fusion re-orders them
pub const CANDIDATE_OVERSAMPLE: usize = 4;
/// Cap on simplified candidates handed to an external reranker
pub const RERANK_CANDIDATE_CAP: usize = 20;

// === Scoring ===
/// Score for an offer when the preference set is empty
pub const NEUTRAL_PREFERENCE_SCORE: f32 = 0.5;

// === Storage ===
pub const SNAPSHOT_EXT: &str = "msgpack";

/// Sub-score weights for the rule-based preference scorer.
///
/// Only slots present in a preference set contribute; the scorer
/// renormalizes by the sum of the weights it actually used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScorerWeights {
	pub destination: f32,
	pub duration: f32,
	pub budget: f32,
	pub style: f32,
	pub group: f32,
}

impl Default for ScorerWeights {
	fn default() -> Self {
		Self { destination: 0.45, duration: 0.25, budget: 0.20, style: 0.05, group: 0.05 }
	}
}

/// Full engine configuration, overridable from a JSON file via the CLI
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
	pub fusion_alpha: f32,
	pub weights: ScorerWeights,
	/// Lower-cased country name → ISO 3166-1 alpha-2 code
	pub destination_aliases: Vec<(String, String)>,
	pub embed_batch_size: usize,
	pub embed_timeout_ms: u64,
	pub embed_retries: u32,
	pub top_k: usize,
}

impl Default for MatchConfig {
	fn default() -> Self {
		Self {
			fusion_alpha: DEFAULT_FUSION_ALPHA,
			weights: ScorerWeights::default(),
			destination_aliases: default_aliases(),
			embed_batch_size: EMBED_BATCH_SIZE,
			embed_timeout_ms: EMBED_TIMEOUT_MS,
			embed_retries: EMBED_RETRIES,
			top_k: DEFAULT_TOP_K,
		}
	}
}

impl MatchConfig {
	/// Look up a country code for a lower-cased destination string
	pub fn alias_code(&self, destination: &str) -> Option<&str> {
		self.destination_aliases
			.iter()
			.find(|(name, _)| name == destination)
			.map(|(_, code)| code.as_str())
	}
}

/// Country names travellers actually type, mapped to catalogue codes
fn default_aliases() -> Vec<(String, String)> {
	[
		("japan", "JP"),
		("vietnam", "VN"),
		("thailand", "TH"),
		("indonesia", "ID"),
		("cambodia", "KH"),
		("laos", "LA"),
		("philippines", "PH"),
		("sri lanka", "LK"),
		("india", "IN"),
		("nepal", "NP"),
		("italy", "IT"),
		("greece", "GR"),
		("spain", "ES"),
		("portugal", "PT"),
		("france", "FR"),
		("croatia", "HR"),
		("iceland", "IS"),
		("norway", "NO"),
		("turkey", "TR"),
		("morocco", "MA"),
		("egypt", "EG"),
		("jordan", "JO"),
		("kenya", "KE"),
		("tanzania", "TZ"),
		("south africa", "ZA"),
		("peru", "PE"),
		("chile", "CL"),
		("argentina", "AR"),
		("mexico", "MX"),
		("costa rica", "CR"),
		("canada", "CA"),
		("new zealand", "NZ"),
		("australia", "AU"),
	]
	.into_iter()
	.map(|(name, code)| (name.to_string(), code.to_string()))
	.collect()
}

//! Content-based text hashing

use xxhash_rust::xxh3::xxh3_64;

/// Hash of an offer's projected text (16-character hex string).
///
/// Stored alongside each indexed vector so a rebuild can tell whether an
/// offer's text actually changed since the embedding was produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextHash(String);

impl TextHash {
	/// Compute hash over UTF-8 text
	pub fn compute(text: &str) -> Self {
		Self(format!("{:016x}", xxh3_64(text.as_bytes())))
	}

	/// Wrap an already-formatted hash (deserialization)
	pub fn raw(hash: String) -> Self {
		Self(hash)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for TextHash {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

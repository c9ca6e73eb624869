//! Core domain types

pub mod embedding;
pub mod hash;
pub mod offer;
pub mod preferences;
pub mod result;

pub use embedding::Embedding;
pub use hash::TextHash;
pub use offer::{Destination, OfferRecord};
pub use preferences::PreferenceSet;
pub use result::MatchResult;

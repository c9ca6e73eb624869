//! Index persistence

pub mod snapshot;

pub use snapshot::{load, save, IndexedOffer, Snapshot};

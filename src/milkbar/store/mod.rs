//! # Storage Layer
//!
//! The [`DataStore`] trait abstracts persistence of the whole [`Dataset`].
//! There are no partial reads or writes: `load` materializes every
//! collection, `save` serializes every collection in one operation. The tiny
//! data volumes of a single shop make this the simplest correct contract.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one pretty-printed JSON file
//!   (`data.json`). Writes go to a temp file first and are renamed into
//!   place, so a crash mid-write never truncates the previous dataset.
//! - [`memory::InMemoryStore`]: in-memory storage for tests. No persistence,
//!   fast and isolated.
//!
//! A missing file loads as an empty dataset. A file that exists but cannot be
//! parsed surfaces as `CorruptData` — callers must not proceed as if the shop
//! had no records.

use crate::error::Result;
use crate::model::Dataset;

pub mod fs;
pub mod memory;

/// Abstract interface for dataset storage.
pub trait DataStore {
    /// Load the full dataset. Missing backing storage yields an empty dataset.
    fn load(&self) -> Result<Dataset>;

    /// Persist the full dataset, replacing whatever was stored before.
    fn save(&mut self, data: &Dataset) -> Result<()>;
}

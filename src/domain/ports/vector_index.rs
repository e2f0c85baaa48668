//! Vector index port.
//!
//! Abstraction over a similarity index: provision, bulk upsert,
//! nearest-neighbor search, clear, count. The collection name, dimension,
//! and metric are adapter configuration; callers only deal in entries and
//! query vectors.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{IndexEntry, ScenarioMatch};

/// Repository interface for the scenario similarity index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Idempotently create the collection if it does not exist.
    ///
    /// An already-existing collection is silent success, including the race
    /// where a concurrent provisioner created it between the existence check
    /// and the create call. Any other creation failure propagates as a
    /// provisioning error.
    async fn ensure_collection(&self) -> DomainResult<()>;

    /// Bulk upsert entries; an entry whose id is already present overwrites it.
    ///
    /// No-op on empty input. Not guaranteed to be a single atomic write: a
    /// crash mid-batch leaves a partially-updated collection.
    async fn add(&self, entries: Vec<IndexEntry>) -> DomainResult<()>;

    /// Return at most `limit` entries ordered by ascending distance
    /// (`1 - cosine_similarity`, most similar first).
    ///
    /// Tie order is the store's native order and is not stably defined.
    async fn search(&self, vector: Vec<f32>, limit: usize) -> DomainResult<Vec<ScenarioMatch>>;

    /// Destroy and recreate the collection with the same schema.
    ///
    /// A missing collection is not an error; afterwards `count()` is 0.
    async fn clear(&self) -> DomainResult<()>;

    /// Current number of stored entries.
    ///
    /// Best-effort: an inaccessible collection yields `Ok(0)`, so callers
    /// must not rely on this call to detect store outages.
    async fn count(&self) -> DomainResult<u64>;
}

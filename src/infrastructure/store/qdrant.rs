//! Qdrant-backed vector index.
//!
//! Implements the [`VectorIndex`] port over a remote Qdrant collection with
//! cosine similarity. Qdrant reports a similarity score for cosine
//! collections; this adapter converts it to a distance (`1 - score`) so
//! lower always means more similar.

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{IndexEntry, ScenarioMatch, StoreConfig};
use crate::domain::ports::VectorIndex;

/// Vector index backed by a Qdrant collection.
pub struct QdrantIndex {
    client: Qdrant,
    collection_name: String,
    vector_size: usize,
}

impl QdrantIndex {
    /// Wrap a connected client for the configured collection.
    pub fn new(client: Qdrant, store: &StoreConfig) -> Self {
        Self {
            client,
            collection_name: store.collection_name.clone(),
            vector_size: store.vector_size,
        }
    }

    /// Create the collection with this index's schema.
    ///
    /// A "already exists" failure is success: another provisioner may have
    /// created the collection between our existence check and this call.
    async fn create_collection(&self) -> DomainResult<()> {
        let request = CreateCollectionBuilder::new(self.collection_name.clone()).vectors_config(
            VectorParamsBuilder::new(self.vector_size as u64, Distance::Cosine),
        );

        match self.client.create_collection(request).await {
            Ok(_) => {
                info!(collection = %self.collection_name, "Created collection");
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                if message.contains("already exists") {
                    debug!(collection = %self.collection_name, "Collection created concurrently");
                    Ok(())
                } else {
                    Err(DomainError::Provision(message))
                }
            }
        }
    }
}

/// Extract a string payload field, defaulting to empty when absent.
fn payload_text(payload: &HashMap<String, Value>, key: &str) -> String {
    match payload.get(key).and_then(|value| value.kind.as_ref()) {
        Some(Kind::StringValue(text)) => text.clone(),
        _ => String::new(),
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(&self) -> DomainResult<()> {
        let exists = self
            .client
            .collection_exists(self.collection_name.clone())
            .await
            .map_err(|e| DomainError::Provision(e.to_string()))?;

        if exists {
            debug!(collection = %self.collection_name, "Using existing collection");
            return Ok(());
        }

        self.create_collection().await
    }

    async fn add(&self, entries: Vec<IndexEntry>) -> DomainResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let count = entries.len();
        let points: Vec<PointStruct> = entries
            .into_iter()
            .map(|entry| {
                let mut payload = Payload::new();
                payload.insert("question", entry.question);
                payload.insert("answer", entry.answer);
                PointStruct::new(entry.id, entry.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(self.collection_name.clone(), points).wait(true))
            .await
            .map_err(|e| DomainError::Reload {
                phase: "add".to_string(),
                reason: e.to_string(),
            })?;

        debug!(collection = %self.collection_name, count, "Upserted entries");
        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> DomainResult<Vec<ScenarioMatch>> {
        let request = SearchPointsBuilder::new(self.collection_name.clone(), vector, limit as u64)
            .with_payload(true);

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| DomainError::Search(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .map(|point| {
                ScenarioMatch::new(
                    payload_text(&point.payload, "question"),
                    payload_text(&point.payload, "answer"),
                    1.0 - point.score,
                )
            })
            .collect())
    }

    async fn clear(&self) -> DomainResult<()> {
        if let Err(err) = self
            .client
            .delete_collection(self.collection_name.clone())
            .await
        {
            let message = err.to_string();
            // A collection that never existed is already clear.
            if !message.contains("doesn't exist") && !message.to_lowercase().contains("not found") {
                return Err(DomainError::Reload {
                    phase: "clear".to_string(),
                    reason: message,
                });
            }
            debug!(collection = %self.collection_name, "Collection did not exist, nothing to clear");
        }

        self.create_collection().await
    }

    async fn count(&self) -> DomainResult<u64> {
        let request = CountPointsBuilder::new(self.collection_name.clone()).exact(true);

        match self.client.count(request).await {
            Ok(response) => Ok(response.result.map_or(0, |r| r.count)),
            Err(err) => {
                // Best-effort contract: an unreachable collection reports
                // empty rather than failing, so this is not an outage probe.
                warn!(error = %err, "Count unavailable, reporting 0");
                Ok(0)
            }
        }
    }
}

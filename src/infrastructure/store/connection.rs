//! Qdrant connection management.
//!
//! Establishes the store session exactly once at process startup. A
//! connection only counts as established after a `list_collections`
//! liveness probe succeeds; socket establishment alone is not trusted.
//! There is no reconnect during steady state: a later network failure
//! surfaces as an operation-level error from the index adapter.

use qdrant_client::Qdrant;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RetryConfig, StoreConfig};
use crate::infrastructure::store::RetryPolicy;

/// Startup connector with bounded exponential-backoff retry.
pub struct StoreConnector {
    host: String,
    port: u16,
    policy: RetryPolicy,
}

impl StoreConnector {
    /// Create a connector for the configured store endpoint.
    pub fn new(store: &StoreConfig, retry: &RetryConfig) -> Self {
        Self {
            host: store.host.clone(),
            port: store.port,
            policy: RetryPolicy::from_config(retry),
        }
    }

    /// Endpoint URL for the Qdrant gRPC interface.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Connect to the store, retrying with backoff until the liveness probe
    /// succeeds or the attempt budget is exhausted.
    pub async fn connect(&self) -> DomainResult<Qdrant> {
        let url = self.url();
        info!("Connecting to vector store at {url}");

        let result = self
            .policy
            .execute(|| {
                let url = url.clone();
                async move {
                    let client = Qdrant::from_url(&url)
                        .build()
                        .map_err(|e| e.to_string())?;
                    // Liveness probe: a built client is not a live store.
                    client.list_collections().await.map_err(|e| e.to_string())?;
                    Ok::<Qdrant, String>(client)
                }
            })
            .await;

        match result {
            Ok(client) => {
                info!("Vector store connected");
                Ok(client)
            }
            Err(reason) => Err(DomainError::Connection {
                host: self.host.clone(),
                port: self.port,
                attempts: self.policy.max_attempts(),
                reason,
            }),
        }
    }
}

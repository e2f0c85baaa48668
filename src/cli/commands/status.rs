use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::ports::VectorIndex;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::store::{QdrantIndex, StoreConnector};

#[derive(Serialize)]
struct StatusOutput {
    host: String,
    port: u16,
    collection: String,
    indexed_scenarios: u64,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        format!(
            "Store:      {}:{}\nCollection: {}\nIndexed:    {} scenarios",
            self.host, self.port, self.collection, self.indexed_scenarios
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "host": self.host,
            "port": self.port,
            "collection": self.collection,
            "indexed_scenarios": self.indexed_scenarios,
        })
    }
}

/// Handle the status command: connect and report the indexed count.
pub async fn execute(json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;

    let client = StoreConnector::new(&config.store, &config.retry)
        .connect()
        .await
        .context("Failed to connect to vector store")?;

    let index = QdrantIndex::new(client, &config.store);
    let indexed_scenarios = index.count().await.unwrap_or(0);

    output(
        &StatusOutput {
            host: config.store.host,
            port: config.store.port,
            collection: config.store.collection_name,
            indexed_scenarios,
        },
        json,
    );

    Ok(())
}

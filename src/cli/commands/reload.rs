use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigLoader;

#[derive(Serialize)]
struct ReloadOutput {
    reloaded: usize,
}

impl CommandOutput for ReloadOutput {
    fn to_human(&self) -> String {
        if self.reloaded == 0 {
            "Corpus is empty; index left untouched.".to_string()
        } else {
            format!("Knowledge base reloaded: {} scenarios indexed.", self.reloaded)
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "reloaded": self.reloaded })
    }
}

/// Handle the reload command: full clear-and-rebuild of the index.
pub async fn execute(json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let service = bootstrap::build_retrieval_service(&config)
        .await
        .context("Failed to start retrieval service")?;

    let reloaded = service
        .reload()
        .await
        .context("Failed to reload knowledge base")?;

    output(&ReloadOutput { reloaded }, json);

    Ok(())
}

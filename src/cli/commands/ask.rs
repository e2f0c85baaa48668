use anyhow::{Context, Result};

use crate::cli::output::truncate;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::ConfigLoader;

/// Handle the ask command: rank the corpus against a free-text question.
pub async fn execute(question: String, limit: Option<usize>, json: bool) -> Result<()> {
    let config = ConfigLoader::load()?;
    let service = bootstrap::build_retrieval_service(&config)
        .await
        .context("Failed to start retrieval service")?;

    let limit = limit.unwrap_or_else(|| service.default_limit());
    let matches = service.find(&question, limit).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if !matches.is_empty() {
        println!("Matched scenarios:");
        for entry in &matches {
            println!("  {:.3}  {}", entry.distance, truncate(&entry.question, 60));
        }
        println!();
    }

    println!("{}", service.format_response(&matches));

    Ok(())
}

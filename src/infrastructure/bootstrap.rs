//! Startup wiring and project initialization.
//!
//! Builds the retrieval stack in dependency order: encoder first (fatal on
//! failure), then a dimension probe against the collection schema, then the
//! store connection with bounded retry, then idempotent collection
//! provisioning. Also hosts the `init`-time creation of the default config
//! file and sample corpus.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, EncoderKind};
use crate::domain::ports::{EmbeddingEncoder, VectorIndex};
use crate::infrastructure::embedding::{LocalEncoder, OpenAiEncoder, OpenAiEncoderConfig};
use crate::infrastructure::store::{QdrantIndex, StoreConnector};
use crate::services::{RetrievalService, ScenarioRepository};

/// Construct the configured encoder.
pub fn build_encoder(config: &Config) -> DomainResult<Arc<dyn EmbeddingEncoder>> {
    match config.encoder.kind {
        EncoderKind::Local => Ok(Arc::new(LocalEncoder::new(config.store.vector_size))),
        EncoderKind::Openai => {
            let encoder_config =
                OpenAiEncoderConfig::from_config(&config.encoder, config.store.vector_size);
            Ok(Arc::new(OpenAiEncoder::new(encoder_config)?))
        }
    }
}

/// Verify that the encoder output length matches the collection dimension.
///
/// Runs one probe encoding at startup. A mismatch is a fatal configuration
/// error; it is never silently truncated or padded later.
pub async fn verify_dimension(
    encoder: &dyn EmbeddingEncoder,
    expected: usize,
) -> DomainResult<()> {
    if encoder.dimension() != expected {
        return Err(DomainError::DimensionMismatch {
            expected,
            actual: encoder.dimension(),
        });
    }

    let probe = encoder.encode("dimension probe").await?;
    if probe.len() != expected {
        return Err(DomainError::DimensionMismatch {
            expected,
            actual: probe.len(),
        });
    }

    Ok(())
}

/// Build the fully wired retrieval service.
///
/// Called once at startup; every failure here is fatal for the process.
pub async fn build_retrieval_service(config: &Config) -> DomainResult<RetrievalService> {
    let started = std::time::Instant::now();

    let encoder = build_encoder(config)?;
    verify_dimension(encoder.as_ref(), config.store.vector_size).await?;

    let client = StoreConnector::new(&config.store, &config.retry)
        .connect()
        .await?;

    let index = QdrantIndex::new(client, &config.store);
    index.ensure_collection().await?;

    let repository = ScenarioRepository::new(&config.corpus.data_file);
    let service = RetrievalService::new(
        encoder,
        Arc::new(index) as Arc<dyn VectorIndex>,
        repository,
        config.search.default_limit,
    );

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Retrieval service ready"
    );

    Ok(service)
}

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Teller Configuration
# Override settings by editing this file or setting environment variables
# with TELLER_ prefix
#
# Example environment variables:
#   export TELLER_STORE__HOST=qdrant
#   export TELLER_STORE__PORT=6334
#   export TELLER_ENCODER__KIND=openai
#   export TELLER_LOGGING__LEVEL=debug

# Vector store (Qdrant) configuration
store:
  # Qdrant host name
  host: "localhost"

  # Qdrant gRPC port
  port: 6334

  # Collection holding the scenario index
  collection_name: "scenarios"

  # Vector dimension; must match the encoder output
  vector_size: 384

# Embedding encoder configuration
encoder:
  # Encoder implementation: local (deterministic, offline) or openai
  kind: "local"

  # Model identifier sent to the embedding endpoint
  model: "text-embedding-3-small"

  # Base URL of the OpenAI-compatible API
  base_url: "https://api.openai.com/v1"

# Corpus source configuration
corpus:
  # Path to the JSON corpus file
  data_file: "data/scenarios.json"

# Startup connection retry policy
retry:
  # Maximum number of connection attempts
  max_attempts: 30

  # Initial backoff delay in milliseconds
  initial_backoff_ms: 2000

  # Maximum backoff delay in milliseconds
  max_backoff_ms: 30000

# Query configuration
search:
  # Default number of matches returned by a query
  default_limit: 3

# Logging configuration
logging:
  # Log level: trace, debug, info, warn, error
  level: "info"

  # Log format: json, pretty
  format: "pretty"
"#;

/// Sample corpus content installed by `init`
const SAMPLE_CORPUS: &str = r#"[
  {
    "question": "How to apply for a loan?",
    "answer": "Visit a branch with ID and proof of income."
  },
  {
    "question": "What documents do I need to open a card?",
    "answer": "A passport or national ID is enough; the card is issued the same day."
  },
  {
    "question": "How do I open a deposit account?",
    "answer": "Open a deposit in the mobile app or at any branch; the minimum amount is 100."
  }
]
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub data_file: PathBuf,
}

impl SetupPaths {
    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        let config_dir = current_dir.join(".teller");

        Ok(Self {
            config_file: config_dir.join("config.yaml"),
            data_file: current_dir.join("data/scenarios.json"),
            config_dir,
        })
    }

    /// Check if Teller is already initialized
    pub fn is_initialized(&self) -> bool {
        self.config_file.exists() && self.data_file.exists()
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<()> {
    if paths.config_dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")?;

    Ok(())
}

/// Create the default configuration file
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<()> {
    if paths.config_file.exists() && !force {
        return Ok(());
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE)
        .context("Failed to write config file")?;

    Ok(())
}

/// Create the sample corpus file
pub fn create_sample_corpus(paths: &SetupPaths, force: bool) -> Result<()> {
    if paths.data_file.exists() && !force {
        return Ok(());
    }

    if let Some(parent) = paths.data_file.parent() {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    fs::write(&paths.data_file, SAMPLE_CORPUS).context("Failed to write sample corpus")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Config;

    #[test]
    fn test_default_config_template_parses_and_validates() {
        let config: Config =
            serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).expect("template should parse");

        crate::infrastructure::config::ConfigLoader::validate(&config)
            .expect("template should validate");

        assert_eq!(config.store.collection_name, "scenarios");
        assert_eq!(config.store.vector_size, 384);
    }

    #[test]
    fn test_sample_corpus_parses() {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(SAMPLE_CORPUS).expect("sample corpus should parse");

        assert!(!records.is_empty());
        for record in &records {
            assert!(record.get("question").is_some());
            assert!(record.get("answer").is_some());
        }
    }

    #[tokio::test]
    async fn test_build_encoder_local_matches_dimension() {
        let config = Config::default();

        let encoder = build_encoder(&config).expect("local encoder should build");

        assert_eq!(encoder.name(), "local");
        assert_eq!(encoder.dimension(), config.store.vector_size);
        verify_dimension(encoder.as_ref(), config.store.vector_size)
            .await
            .expect("probe should match");
    }

    #[tokio::test]
    async fn test_verify_dimension_rejects_mismatch() {
        let encoder = LocalEncoder::new(128);

        let result = verify_dimension(&encoder, 384).await;

        assert!(matches!(
            result,
            Err(DomainError::DimensionMismatch {
                expected: 384,
                actual: 128
            })
        ));
    }
}

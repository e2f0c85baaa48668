//! OpenAI-compatible embedding encoder.
//!
//! Generates embeddings via the `/embeddings` endpoint of any
//! OpenAI-compatible API (OpenAI itself, Azure OpenAI, local servers).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::EncoderConfig;
use crate::domain::ports::EmbeddingEncoder;

/// Configuration for the OpenAI-compatible encoder.
#[derive(Debug, Clone)]
pub struct OpenAiEncoderConfig {
    /// API key. Falls back to `OPENAI_API_KEY` env var.
    pub api_key: Option<String>,
    /// Base URL for the API. Default: `https://api.openai.com/v1`.
    pub base_url: String,
    /// Embedding model identifier.
    pub model: String,
    /// Expected embedding dimension.
    pub dimension: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum texts per single API request.
    pub max_batch_size: usize,
}

impl Default for OpenAiEncoderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimension: 1536,
            timeout_secs: 30,
            max_batch_size: 256,
        }
    }
}

impl OpenAiEncoderConfig {
    /// Build encoder settings from the application configuration.
    pub fn from_config(encoder: &EncoderConfig, dimension: usize) -> Self {
        Self {
            api_key: encoder.api_key.clone(),
            base_url: encoder.base_url.clone(),
            model: encoder.model.clone(),
            dimension,
            timeout_secs: encoder.timeout_secs,
            max_batch_size: encoder.max_batch_size,
        }
    }

    fn get_api_key(&self) -> DomainResult<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                DomainError::Configuration(
                    "OpenAI API key not set. Set OPENAI_API_KEY env var or configure encoder.api_key."
                        .to_string(),
                )
            })
    }
}

/// OpenAI-compatible embedding encoder.
pub struct OpenAiEncoder {
    config: OpenAiEncoderConfig,
    client: reqwest::Client,
}

impl OpenAiEncoder {
    /// Construct the encoder and its HTTP client.
    ///
    /// Called once at startup; a client build failure is fatal.
    pub fn new(config: OpenAiEncoderConfig) -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { config, client })
    }

    async fn call_embeddings_api(&self, texts: Vec<String>) -> DomainResult<Vec<Vec<f32>>> {
        let api_key = self.config.get_api_key()?;
        let url = format!("{}/embeddings", self.config.base_url);

        let request_body = EmbeddingsRequest {
            model: self.config.model.clone(),
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| DomainError::Encoding(format!("Embedding API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(DomainError::Encoding(format!(
                "Embedding API returned {status}: {body}"
            )));
        }

        let result: EmbeddingsResponse = response.json().await.map_err(|e| {
            DomainError::Encoding(format!("Failed to parse embedding response: {e}"))
        })?;

        // Sort by index to maintain input order
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        for item in &data {
            if item.embedding.len() != self.config.dimension {
                return Err(DomainError::DimensionMismatch {
                    expected: self.config.dimension,
                    actual: item.embedding.len(),
                });
            }
        }

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingEncoder for OpenAiEncoder {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn encode(&self, text: &str) -> DomainResult<Vec<f32>> {
        let results = self.call_embeddings_api(vec![text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Encoding("Empty embedding response".to_string()))
    }

    async fn encode_batch(&self, texts: &[&str]) -> DomainResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_vectors = Vec::with_capacity(texts.len());

        // Chunk by max_batch_size
        for chunk in texts.chunks(self.config.max_batch_size) {
            let chunk_texts: Vec<String> = chunk.iter().map(|t| (*t).to_string()).collect();
            let vectors = self.call_embeddings_api(chunk_texts).await?;

            tracing::debug!(
                encoded = all_vectors.len() + vectors.len(),
                total = texts.len(),
                "Embedding batch progress"
            );

            if vectors.len() != chunk.len() {
                return Err(DomainError::Encoding(format!(
                    "Embedding API returned {} vectors for {} inputs",
                    vectors.len(),
                    chunk.len()
                )));
            }

            all_vectors.extend(vectors);
        }

        Ok(all_vectors)
    }
}

// -- OpenAI API request/response types --

#[derive(Debug, Serialize)]
struct EmbeddingsRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

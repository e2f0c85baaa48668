//! Embedding encoder port.
//!
//! Abstracts the text-embedding model behind a trait: text in, fixed-length
//! vector out. Implementations are constructed once at startup and shared
//! behind an `Arc` by all in-flight queries, so they must be safe for
//! concurrent read access.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// Trait for embedding encoders.
///
/// Identical input text must yield a reproducible ranking: bit-for-bit
/// vector equality is not required, but repeated calls with the same model
/// version may not reorder results.
#[async_trait]
pub trait EmbeddingEncoder: Send + Sync {
    /// Encoder name (e.g., "local", "openai").
    fn name(&self) -> &'static str;

    /// Output vector dimension for this encoder/model.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn encode(&self, text: &str) -> DomainResult<Vec<f32>>;

    /// Generate embeddings for multiple texts, preserving input order.
    ///
    /// Implementations should handle chunking if the backing model has
    /// per-request limits.
    async fn encode_batch(&self, texts: &[&str]) -> DomainResult<Vec<Vec<f32>>>;
}

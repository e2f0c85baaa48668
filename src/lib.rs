//! Teller - Semantic Retrieval Engine
//!
//! Teller answers free-text questions against a curated corpus of
//! question/answer scenarios by embedding text into fixed-length vectors
//! and ranking corpus entries by cosine similarity in a Qdrant collection.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, ports, and the error taxonomy
//! - **Service Layer** (`services`): Corpus loading and retrieval orchestration
//! - **Infrastructure Layer** (`infrastructure`): Encoders, the vector store,
//!   configuration, and startup wiring
//! - **CLI Layer** (`cli`): Command-line caller surface
//!
//! # Example
//!
//! ```ignore
//! use teller::infrastructure::bootstrap;
//! use teller::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let service = bootstrap::build_retrieval_service(&config).await?;
//!     let indexed = service.reload().await?;
//!     println!("indexed {indexed} scenarios");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, CorpusConfig, EncoderConfig, IndexEntry, LoggingConfig, RetryConfig, Scenario,
    ScenarioMatch, SearchConfig, StoreConfig,
};
pub use domain::ports::{EmbeddingEncoder, VectorIndex};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{RetrievalService, ScenarioRepository};

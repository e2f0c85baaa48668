//! Domain errors for the Teller retrieval engine.

use thiserror::Error;

/// Domain-level errors that can occur in the retrieval engine.
///
/// Startup failures (`Configuration`, `DimensionMismatch`, `Connection`) are
/// fatal; the process cannot serve queries without a connected index and a
/// working encoder. Steady-state failures are either absorbed into degraded
/// responses (`Encoding`/`Search` during a query) or reported to the caller
/// without crashing the process (`Load`/`Provision`/`Reload` during a rebuild).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Embedding dimension mismatch: encoder produces {actual}, collection expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Failed to connect to vector store at {host}:{port} after {attempts} attempts: {reason}")]
    Connection {
        host: String,
        port: u16,
        attempts: u32,
        reason: String,
    },

    #[error("Failed to load corpus from {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("Collection provisioning failed: {0}")]
    Provision(String),

    #[error("Embedding generation failed: {0}")]
    Encoding(String),

    #[error("Similarity search failed: {0}")]
    Search(String),

    #[error("Reload failed during {phase}: {reason}")]
    Reload { phase: String, reason: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

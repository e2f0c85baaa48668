//! Ports: trait boundaries between the domain and its adapters.

pub mod encoder;
pub mod vector_index;

pub use encoder::EmbeddingEncoder;
pub use vector_index::VectorIndex;

//! Vector store adapters and connection management.

pub mod connection;
pub mod memory;
pub mod qdrant;
pub mod retry;

pub use connection::StoreConnector;
pub use memory::MemoryIndex;
pub use qdrant::QdrantIndex;
pub use retry::RetryPolicy;

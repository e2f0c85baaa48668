//! Embedding encoder adapters.

pub mod local;
pub mod openai;

pub use local::LocalEncoder;
pub use openai::{OpenAiEncoder, OpenAiEncoderConfig};

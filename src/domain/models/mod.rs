//! Domain models.

pub mod config;
pub mod scenario;

pub use config::{
    Config, CorpusConfig, EncoderConfig, EncoderKind, LoggingConfig, RetryConfig, SearchConfig,
    StoreConfig,
};
pub use scenario::{IndexEntry, Scenario, ScenarioMatch};

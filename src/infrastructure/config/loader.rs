use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Store host cannot be empty")]
    EmptyStoreHost,

    #[error("Invalid store port: must be non-zero")]
    InvalidStorePort,

    #[error("Collection name cannot be empty")]
    EmptyCollectionName,

    #[error("Invalid vector_size: {0}. Must be at least 1")]
    InvalidVectorSize(usize),

    #[error("Encoder model cannot be empty")]
    EmptyEncoderModel,

    #[error("Invalid encoder max_batch_size: {0}. Must be at least 1")]
    InvalidMaxBatchSize(usize),

    #[error("Corpus data file cannot be empty")]
    EmptyDataFile,

    #[error("Invalid max_attempts: {0}. Cannot be 0")]
    InvalidMaxAttempts(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid default_limit: {0}. Must be at least 1")]
    InvalidDefaultLimit(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .teller/config.yaml (project config, created by init)
    /// 3. .teller/local.yaml (project local overrides, optional)
    /// 4. Environment variables (TELLER_* prefix, highest priority)
    ///
    /// Note: Configuration is always project-local (pwd/.teller/) so several
    /// assistants with different corpora can coexist on one machine.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Config::default()))
            // 2. Merge project config (primary config, created by init)
            .merge(Yaml::file(".teller/config.yaml"))
            // 3. Merge project local overrides (optional, for dev/test overrides)
            .merge(Yaml::file(".teller/local.yaml"))
            // 4. Merge environment variables (highest priority)
            .merge(Env::prefixed("TELLER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate store config
        if config.store.host.is_empty() {
            return Err(ConfigError::EmptyStoreHost);
        }

        if config.store.port == 0 {
            return Err(ConfigError::InvalidStorePort);
        }

        if config.store.collection_name.is_empty() {
            return Err(ConfigError::EmptyCollectionName);
        }

        if config.store.vector_size == 0 {
            return Err(ConfigError::InvalidVectorSize(config.store.vector_size));
        }

        // Validate encoder config
        if config.encoder.model.is_empty() {
            return Err(ConfigError::EmptyEncoderModel);
        }

        if config.encoder.max_batch_size == 0 {
            return Err(ConfigError::InvalidMaxBatchSize(
                config.encoder.max_batch_size,
            ));
        }

        // Validate corpus config
        if config.corpus.data_file.is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }

        // Validate retry config
        if config.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(config.retry.max_attempts));
        }

        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        // Validate search config
        if config.search.default_limit == 0 {
            return Err(ConfigError::InvalidDefaultLimit(config.search.default_limit));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};

/// Main configuration structure for Teller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Vector store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Embedding encoder configuration
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Corpus source configuration
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Startup connection retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Query configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vector store (Qdrant) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Qdrant host name
    #[serde(default = "default_store_host")]
    pub host: String,

    /// Qdrant gRPC port
    #[serde(default = "default_store_port")]
    pub port: u16,

    /// Collection holding the scenario index
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Vector dimension; must match the encoder output
    #[serde(default = "default_vector_size")]
    pub vector_size: usize,
}

fn default_store_host() -> String {
    "localhost".to_string()
}

const fn default_store_port() -> u16 {
    6334
}

fn default_collection_name() -> String {
    "scenarios".to_string()
}

const fn default_vector_size() -> usize {
    384
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_store_host(),
            port: default_store_port(),
            collection_name: default_collection_name(),
            vector_size: default_vector_size(),
        }
    }
}

/// Which encoder implementation to construct at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// Deterministic offline encoder for development and tests
    Local,
    /// OpenAI-compatible `/embeddings` HTTP endpoint
    Openai,
}

/// Embedding encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EncoderConfig {
    /// Encoder implementation to use
    #[serde(default = "default_encoder_kind")]
    pub kind: EncoderKind,

    /// Model identifier sent to the embedding endpoint
    #[serde(default = "default_encoder_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_encoder_base_url")]
    pub base_url: String,

    /// API key (can also be set via OPENAI_API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_encoder_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum texts per single embedding request
    #[serde(default = "default_encoder_max_batch_size")]
    pub max_batch_size: usize,
}

const fn default_encoder_kind() -> EncoderKind {
    EncoderKind::Local
}

fn default_encoder_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_encoder_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

const fn default_encoder_timeout_secs() -> u64 {
    30
}

const fn default_encoder_max_batch_size() -> usize {
    256
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            kind: default_encoder_kind(),
            model: default_encoder_model(),
            base_url: default_encoder_base_url(),
            api_key: None,
            timeout_secs: default_encoder_timeout_secs(),
            max_batch_size: default_encoder_max_batch_size(),
        }
    }
}

/// Corpus source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CorpusConfig {
    /// Path to the JSON corpus file
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

fn default_data_file() -> String {
    "data/scenarios.json".to_string()
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

/// Startup connection retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of connection attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_attempts() -> u32 {
    30
}

const fn default_initial_backoff_ms() -> u64 {
    2000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Default number of matches returned by a query
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

const fn default_limit() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

//! Retrieval orchestration.
//!
//! Drives the two service-level operations: `reload` (full rebuild of the
//! vector index from the corpus file) and `find` (query-time ranking),
//! plus response formatting for the conversational caller.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{IndexEntry, ScenarioMatch};
use crate::domain::ports::{EmbeddingEncoder, VectorIndex};
use crate::services::ScenarioRepository;

/// Fixed response when no scenario matches the query.
pub const NO_MATCH_RESPONSE: &str =
    "Unfortunately, I could not find a suitable answer to your question. Try rephrasing it.";

const RESPONSE_HEADER: &str = "Here is what I found:";
const REPHRASE_HINT: &str = "If none of this answers your question, try rephrasing it.";

/// Orchestrates corpus reload and query-time retrieval.
///
/// The encoder and index are shared, read-safe singletons constructed once
/// at startup. The service itself holds no index state beyond the port
/// references and the corpus location.
///
/// `reload` is single-flight: overlapping invocations serialize on an
/// internal mutex, so at most one rebuild is in flight. `find` never takes
/// that lock; during a rebuild it observes a coherent pre-reload,
/// transiently empty, or post-reload index, but never an error caused by
/// the rebuild itself.
pub struct RetrievalService {
    encoder: Arc<dyn EmbeddingEncoder>,
    index: Arc<dyn VectorIndex>,
    repository: ScenarioRepository,
    default_limit: usize,
    reload_lock: Mutex<()>,
}

impl RetrievalService {
    /// Create the service over its collaborators.
    pub fn new(
        encoder: Arc<dyn EmbeddingEncoder>,
        index: Arc<dyn VectorIndex>,
        repository: ScenarioRepository,
        default_limit: usize,
    ) -> Self {
        Self {
            encoder,
            index,
            repository,
            default_limit,
            reload_lock: Mutex::new(()),
        }
    }

    /// Default number of matches returned when the caller does not pick one.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Rebuild the index from the corpus file and return the indexed count.
    ///
    /// The corpus is loaded and encoded *before* the index is cleared, so a
    /// broken corpus file or a failing encoder preserves the previous index
    /// state instead of emptying the knowledge base. A genuinely empty
    /// corpus returns 0 without touching the index. The rebuild itself is
    /// not atomic: between `clear` and the completion of `add` the index is
    /// transiently empty or partial for concurrent readers.
    pub async fn reload(&self) -> DomainResult<usize> {
        let _guard = self.reload_lock.lock().await;
        let started = Instant::now();

        info!("Starting scenario reload");

        let scenarios = self.repository.load()?;
        if scenarios.is_empty() {
            warn!(
                path = %self.repository.data_file().display(),
                "No scenarios in corpus, leaving index untouched"
            );
            return Ok(0);
        }

        info!(count = scenarios.len(), "Loaded scenarios from corpus");

        let questions: Vec<&str> = scenarios.iter().map(|s| s.question.as_str()).collect();
        let vectors = self.encoder.encode_batch(&questions).await?;

        if vectors.len() != scenarios.len() {
            return Err(DomainError::Reload {
                phase: "encode".to_string(),
                reason: format!(
                    "encoder returned {} vectors for {} questions",
                    vectors.len(),
                    scenarios.len()
                ),
            });
        }

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Encoded all questions"
        );

        self.index.clear().await?;

        let entries: Vec<IndexEntry> = scenarios
            .into_iter()
            .zip(vectors)
            .map(|(scenario, vector)| IndexEntry::from_scenario(scenario, vector))
            .collect();

        let count = entries.len();
        self.index.add(entries).await?;

        info!(
            count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scenario reload complete"
        );

        Ok(count)
    }

    /// Rank the corpus against a free-text query.
    ///
    /// A blank or whitespace-only query returns no matches without touching
    /// the encoder or the store. Any encode/search failure is logged and
    /// absorbed into an empty result, so the caller can always present a
    /// graceful fallback message.
    pub async fn find(&self, query: &str, limit: usize) -> Vec<ScenarioMatch> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        match self.try_find(trimmed, limit).await {
            Ok(matches) => {
                debug!(query = trimmed, count = matches.len(), "Query ranked");
                matches
            }
            Err(err) => {
                warn!(query = trimmed, error = %err, "Search failed, returning no matches");
                Vec::new()
            }
        }
    }

    async fn try_find(&self, query: &str, limit: usize) -> DomainResult<Vec<ScenarioMatch>> {
        let vector = self.encoder.encode(query).await?;
        self.index.search(vector, limit).await
    }

    /// Format ranked matches for the conversational caller.
    ///
    /// All matches are shown in rank order, not just the best one: the
    /// corpus is small enough that the top-k is more useful than a single
    /// guess.
    pub fn format_response(&self, matches: &[ScenarioMatch]) -> String {
        if matches.is_empty() {
            return NO_MATCH_RESPONSE.to_string();
        }

        let mut response = String::from(RESPONSE_HEADER);
        response.push_str("\n\n");
        for entry in matches {
            response.push_str(&entry.answer);
            response.push_str("\n\n");
        }
        response.push_str(REPHRASE_HINT);
        response
    }

    /// Best-effort count of indexed scenarios; failures report 0.
    pub async fn scenario_count(&self) -> u64 {
        match self.index.count().await {
            Ok(count) => count,
            Err(err) => {
                warn!(error = %err, "Failed to count scenarios");
                0
            }
        }
    }
}

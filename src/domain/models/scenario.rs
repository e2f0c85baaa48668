//! Corpus and search-result models.

use serde::{Deserialize, Serialize};

/// A single question/answer record from the corpus.
///
/// Identity is assigned at load time when the source record omits `id`,
/// using the 1-based source-order position. Ids are therefore load-local:
/// inserting a record mid-file reassigns all subsequent positional ids.
/// Within a single load no two scenarios share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique identifier within one corpus load.
    pub id: u64,
    /// The question text that gets embedded and indexed.
    pub question: String,
    /// The answer text returned to the caller.
    pub answer: String,
}

/// An entry ready for insertion into the vector index.
///
/// The payload is denormalized: question and answer travel with the vector
/// so query-time results need no secondary lookup.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Matches the originating [`Scenario`] id.
    pub id: u64,
    /// Embedding of the scenario question; length equals the collection dimension.
    pub vector: Vec<f32>,
    pub question: String,
    pub answer: String,
}

impl IndexEntry {
    /// Build an entry from a scenario and its question embedding.
    pub fn from_scenario(scenario: Scenario, vector: Vec<f32>) -> Self {
        Self {
            id: scenario.id,
            vector,
            question: scenario.question,
            answer: scenario.answer,
        }
    }
}

/// A ranked search hit.
///
/// `distance` is `1 - cosine_similarity`, so it lies in `[0, 2]`:
/// 0 means identical direction, 2 means opposite. Results are ordered by
/// ascending distance; ties fall back to the store's native order, which
/// is not stably defined.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioMatch {
    pub question: String,
    pub answer: String,
    pub distance: f32,
}

impl ScenarioMatch {
    pub fn new(question: String, answer: String, distance: f32) -> Self {
        Self {
            question,
            answer,
            distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_entry_from_scenario() {
        let scenario = Scenario {
            id: 7,
            question: "How to open a deposit?".to_string(),
            answer: "Visit a branch or use the mobile app.".to_string(),
        };

        let entry = IndexEntry::from_scenario(scenario.clone(), vec![0.1, 0.2, 0.3]);

        assert_eq!(entry.id, scenario.id);
        assert_eq!(entry.question, scenario.question);
        assert_eq!(entry.answer, scenario.answer);
        assert_eq!(entry.vector.len(), 3);
    }
}

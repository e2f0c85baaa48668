//! Corpus loading.
//!
//! Reads the static question/answer corpus from a JSON file. Read, parse,
//! and validation failures all propagate as [`DomainError::Load`]; callers
//! decide whether to keep serving the previously indexed state.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Scenario;

/// Raw corpus record; `id` is optional in the source file.
#[derive(Debug, Deserialize)]
struct ScenarioRecord {
    #[serde(default)]
    id: Option<u64>,
    question: String,
    answer: String,
}

/// Loads the scenario corpus from its source file.
pub struct ScenarioRepository {
    data_file: PathBuf,
}

impl ScenarioRepository {
    /// Create a repository for the given corpus file.
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Path of the corpus source file.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Load and validate the corpus.
    ///
    /// Records without an `id` get the 1-based source position. A record
    /// with a blank question or answer, or a duplicate id, fails the whole
    /// load: nothing is ever silently indexed with a blank field.
    pub fn load(&self) -> DomainResult<Vec<Scenario>> {
        let raw = fs::read_to_string(&self.data_file)
            .map_err(|e| self.load_error(format!("read failed: {e}")))?;

        let records: Vec<ScenarioRecord> = serde_json::from_str(&raw)
            .map_err(|e| self.load_error(format!("parse failed: {e}")))?;

        let mut seen_ids = HashSet::with_capacity(records.len());
        let mut scenarios = Vec::with_capacity(records.len());

        for (position, record) in records.into_iter().enumerate() {
            let ordinal = position + 1;

            if record.question.trim().is_empty() {
                return Err(self.load_error(format!("record {ordinal} has a blank question")));
            }
            if record.answer.trim().is_empty() {
                return Err(self.load_error(format!("record {ordinal} has a blank answer")));
            }

            let id = record.id.unwrap_or(ordinal as u64);
            if !seen_ids.insert(id) {
                return Err(self.load_error(format!("duplicate scenario id {id}")));
            }

            scenarios.push(Scenario {
                id,
                question: record.question,
                answer: record.answer,
            });
        }

        Ok(scenarios)
    }

    fn load_error(&self, reason: String) -> DomainError {
        DomainError::Load {
            path: self.data_file.display().to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn corpus(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_assigns_positional_ids() {
        let file = corpus(
            r#"[
                {"question": "How to apply for a loan?", "answer": "Visit a branch."},
                {"question": "How to close an account?", "answer": "Submit a request."}
            ]"#,
        );

        let scenarios = ScenarioRepository::new(file.path()).load().unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].id, 1);
        assert_eq!(scenarios[1].id, 2);
        assert_eq!(scenarios[0].question, "How to apply for a loan?");
    }

    #[test]
    fn test_load_keeps_explicit_ids() {
        let file = corpus(
            r#"[
                {"id": 10, "question": "q1", "answer": "a1"},
                {"question": "q2", "answer": "a2"}
            ]"#,
        );

        let scenarios = ScenarioRepository::new(file.path()).load().unwrap();

        assert_eq!(scenarios[0].id, 10);
        // Positional default for the second record: 1-based position 2.
        assert_eq!(scenarios[1].id, 2);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let repository = ScenarioRepository::new("/nonexistent/scenarios.json");

        let err = repository.load().unwrap_err();

        match err {
            DomainError::Load { path, reason } => {
                assert!(path.contains("scenarios.json"));
                assert!(reason.contains("read failed"));
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let file = corpus("{ not json");

        let err = ScenarioRepository::new(file.path()).load().unwrap_err();

        assert!(matches!(err, DomainError::Load { .. }));
    }

    #[test]
    fn test_load_missing_required_field_fails() {
        let file = corpus(r#"[{"question": "only a question"}]"#);

        let err = ScenarioRepository::new(file.path()).load().unwrap_err();

        match err {
            DomainError::Load { reason, .. } => assert!(reason.contains("parse failed")),
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_blank_question_fails() {
        let file = corpus(r#"[{"question": "   ", "answer": "an answer"}]"#);

        let err = ScenarioRepository::new(file.path()).load().unwrap_err();

        match err {
            DomainError::Load { reason, .. } => {
                assert!(reason.contains("record 1 has a blank question"));
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_blank_answer_fails() {
        let file = corpus(r#"[{"question": "a question", "answer": ""}]"#);

        let err = ScenarioRepository::new(file.path()).load().unwrap_err();

        match err {
            DomainError::Load { reason, .. } => {
                assert!(reason.contains("record 1 has a blank answer"));
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_duplicate_ids_fail() {
        let file = corpus(
            r#"[
                {"id": 3, "question": "q1", "answer": "a1"},
                {"id": 3, "question": "q2", "answer": "a2"}
            ]"#,
        );

        let err = ScenarioRepository::new(file.path()).load().unwrap_err();

        match err {
            DomainError::Load { reason, .. } => {
                assert!(reason.contains("duplicate scenario id 3"));
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_empty_corpus_is_ok() {
        let file = corpus("[]");

        let scenarios = ScenarioRepository::new(file.path()).load().unwrap();

        assert!(scenarios.is_empty());
    }
}

//! In-process vector index.
//!
//! Brute-force cosine ranking over a hash map. Implements the same
//! [`VectorIndex`] contract as the Qdrant adapter and is the backend used by
//! tests and offline development. Suitable for small corpora only.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{IndexEntry, ScenarioMatch};
use crate::domain::ports::VectorIndex;

/// In-memory vector index for development and testing.
#[derive(Default)]
pub struct MemoryIndex {
    entries: RwLock<HashMap<u64, IndexEntry>>,
}

impl MemoryIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Calculate cosine distance (`1 - cosine_similarity`) between two vectors.
///
/// Mismatched lengths and zero-magnitude vectors rank last (`f32::MAX`)
/// instead of producing NaN.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::MAX;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return f32::MAX;
    }

    1.0 - (dot / (mag_a * mag_b))
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn ensure_collection(&self) -> DomainResult<()> {
        Ok(())
    }

    async fn add(&self, entries: Vec<IndexEntry>) -> DomainResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut map = self.entries.write().expect("index lock poisoned");
        for entry in entries {
            // Upsert semantics: a duplicate id overwrites the stored entry.
            map.insert(entry.id, entry);
        }
        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> DomainResult<Vec<ScenarioMatch>> {
        let map = self.entries.read().expect("index lock poisoned");

        let mut matches: Vec<ScenarioMatch> = map
            .values()
            .map(|entry| {
                ScenarioMatch::new(
                    entry.question.clone(),
                    entry.answer.clone(),
                    cosine_distance(&vector, &entry.vector),
                )
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);

        Ok(matches)
    }

    async fn clear(&self) -> DomainResult<()> {
        self.entries.write().expect("index lock poisoned").clear();
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.entries.read().expect("index lock poisoned").len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, vector: Vec<f32>, question: &str, answer: &str) -> IndexEntry {
        IndexEntry {
            id,
            vector,
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_cosine_distance_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let distance = cosine_distance(&a, &a);
        assert!((distance - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        let distance = cosine_distance(&a, &b);
        assert!((distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        let distance = cosine_distance(&a, &b);
        assert!((distance - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_distance_degenerate_inputs_rank_last() {
        assert_eq!(cosine_distance(&[1.0, 0.0], &[1.0, 0.0, 0.0]), f32::MAX);
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), f32::MAX);
    }

    #[tokio::test]
    async fn test_add_search_ranks_by_distance() {
        let index = MemoryIndex::new();

        index
            .add(vec![
                entry(1, vec![0.0, 1.0, 0.0], "orthogonal", "a1"),
                entry(2, vec![1.0, 0.0, 0.0], "identical", "a2"),
                entry(3, vec![0.5, 0.5, 0.0], "close", "a3"),
            ])
            .await
            .unwrap();

        let matches = index.search(vec![1.0, 0.0, 0.0], 3).await.unwrap();

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].question, "identical");
        assert_eq!(matches[1].question, "close");
        assert_eq!(matches[2].question, "orthogonal");
        assert!(matches[0].distance < matches[1].distance);
        assert!(matches[1].distance < matches[2].distance);
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let index = MemoryIndex::new();

        index
            .add(vec![
                entry(1, vec![1.0, 0.0], "a", "a"),
                entry(2, vec![0.9, 0.1], "b", "b"),
                entry(3, vec![0.8, 0.2], "c", "c"),
            ])
            .await
            .unwrap();

        let matches = index.search(vec![1.0, 0.0], 2).await.unwrap();
        assert_eq!(matches.len(), 2);

        let matches = index.search(vec![1.0, 0.0], 100).await.unwrap();
        assert_eq!(matches.len(), 3);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_id() {
        let index = MemoryIndex::new();

        index
            .add(vec![entry(1, vec![1.0, 0.0], "first", "first answer")])
            .await
            .unwrap();
        index
            .add(vec![entry(1, vec![1.0, 0.0], "second", "second answer")])
            .await
            .unwrap();

        assert_eq!(index.count().await.unwrap(), 1);

        let matches = index.search(vec![1.0, 0.0], 1).await.unwrap();
        assert_eq!(matches[0].question, "second");
    }

    #[tokio::test]
    async fn test_add_empty_is_noop() {
        let index = MemoryIndex::new();
        index.add(Vec::new()).await.unwrap();
        assert_eq!(index.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_then_count_is_zero() {
        let index = MemoryIndex::new();

        index
            .add(vec![entry(1, vec![1.0], "q", "a")])
            .await
            .unwrap();
        assert_eq!(index.count().await.unwrap(), 1);

        index.clear().await.unwrap();
        assert_eq!(index.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_empty_index() {
        let index = MemoryIndex::new();
        let matches = index.search(vec![1.0, 0.0], 5).await.unwrap();
        assert!(matches.is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating normalized embeddings (L2 norm = 1.0)
    fn normalized_vector_strategy(dim: usize) -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(-1.0f32..1.0f32, dim..=dim).prop_map(|mut vec| {
            let magnitude: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
            if magnitude > 0.0 {
                for val in &mut vec {
                    *val /= magnitude;
                }
            }
            vec
        })
    }

    proptest! {
        /// Cosine distance stays in [0, 2] for normalized vectors.
        #[test]
        fn proptest_distance_bounds(
            a in normalized_vector_strategy(64),
            b in normalized_vector_strategy(64)
        ) {
            let distance = cosine_distance(&a, &b);

            // Allow for a vector that normalized to zero magnitude.
            if distance != f32::MAX {
                prop_assert!(
                    (-1e-6..=2.0 + 1e-6).contains(&distance),
                    "Cosine distance should be in [0, 2], got {}",
                    distance
                );
                prop_assert!(distance.is_finite());
            }
        }

        /// distance(A, B) == distance(B, A)
        #[test]
        fn proptest_distance_symmetry(
            a in normalized_vector_strategy(64),
            b in normalized_vector_strategy(64)
        ) {
            let ab = cosine_distance(&a, &b);
            let ba = cosine_distance(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-6);
        }

        /// distance of a vector to itself is 0.
        #[test]
        fn proptest_distance_identity(a in normalized_vector_strategy(64)) {
            let distance = cosine_distance(&a, &a);
            if distance != f32::MAX {
                prop_assert!(distance.abs() < 1e-5);
            }
        }
    }
}

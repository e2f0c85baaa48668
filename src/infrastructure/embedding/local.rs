//! Deterministic offline encoder.
//!
//! Generates reproducible, L2-normalized vectors without a model runtime or
//! network access. Ranking quality is content-hash quality, not semantic
//! quality, which is sufficient for development, integration tests, and the
//! exact-match properties of the retrieval pipeline.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::ports::EmbeddingEncoder;

/// Local deterministic embedding encoder.
///
/// Same text always yields the same vector; different texts almost always
/// yield different directions.
pub struct LocalEncoder {
    dimension: usize,
}

impl LocalEncoder {
    /// Create an encoder producing vectors of `dimension` components.
    pub fn new(dimension: usize) -> Self {
        tracing::warn!(
            "LocalEncoder generates deterministic non-semantic embeddings; \
             configure the openai encoder for semantic ranking quality"
        );
        Self { dimension }
    }

    /// Generate a deterministic unit vector for the given text.
    pub fn deterministic_vector(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        let text_bytes = text.as_bytes();

        for (i, val) in vector.iter_mut().enumerate() {
            let byte_idx = i % text_bytes.len().max(1);
            let byte_val = if text_bytes.is_empty() {
                0
            } else {
                text_bytes[byte_idx]
            };

            *val = ((byte_val as usize * 31 + i * 17) % 256) as f32 / 255.0 - 0.5;
        }

        // Normalize to unit length; accumulate in f64 so high dimensions do
        // not lose precision in the magnitude sum.
        let magnitude = vector
            .iter()
            .map(|x| f64::from(*x) * f64::from(*x))
            .sum::<f64>()
            .sqrt() as f32;

        if magnitude > 1e-10 {
            for val in &mut vector {
                *val /= magnitude;
            }
        } else {
            let uniform = 1.0 / (self.dimension as f32).sqrt();
            for val in &mut vector {
                *val = uniform;
            }
        }

        vector
    }
}

#[async_trait]
impl EmbeddingEncoder for LocalEncoder {
    fn name(&self) -> &'static str {
        "local"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn encode(&self, text: &str) -> DomainResult<Vec<f32>> {
        Ok(self.deterministic_vector(text))
    }

    async fn encode_batch(&self, texts: &[&str]) -> DomainResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| self.deterministic_vector(text))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_single() {
        let encoder = LocalEncoder::new(384);

        let vector = encoder
            .encode("How do I open an account?")
            .await
            .expect("Failed to encode");

        assert_eq!(vector.len(), 384);
    }

    #[tokio::test]
    async fn test_encode_batch_preserves_order() {
        let encoder = LocalEncoder::new(384);

        let texts = vec!["loans", "deposits", "cards"];
        let vectors = encoder
            .encode_batch(&texts)
            .await
            .expect("Failed to encode batch");

        assert_eq!(vectors.len(), 3);
        for (text, vector) in texts.iter().zip(&vectors) {
            assert_eq!(vector, &encoder.deterministic_vector(text));
        }
    }

    #[tokio::test]
    async fn test_deterministic() {
        let encoder = LocalEncoder::new(384);

        let text = "What documents do I need for a mortgage?";
        let first = encoder.encode(text).await.unwrap();
        let second = encoder.encode(text).await.unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_normalized() {
        let encoder = LocalEncoder::new(384);

        let vector = encoder.deterministic_vector("normalization check");
        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();

        assert!((magnitude - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_text_is_valid_vector() {
        let encoder = LocalEncoder::new(16);

        let vector = encoder.deterministic_vector("");

        assert_eq!(vector.len(), 16);
        for val in &vector {
            assert!(val.is_finite());
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn text_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 .,!?;:'\"-]{1,500}").expect("Valid regex")
    }

    proptest! {
        /// Same input always produces the same output.
        #[test]
        fn proptest_determinism(text in text_strategy()) {
            let encoder = LocalEncoder::new(384);

            let first = encoder.deterministic_vector(&text);
            let second = encoder.deterministic_vector(&text);

            prop_assert_eq!(first, second);
        }

        /// Every vector is L2-normalized with the configured dimension.
        #[test]
        fn proptest_normalized_and_sized(text in text_strategy()) {
            let encoder = LocalEncoder::new(384);

            let vector = encoder.deterministic_vector(&text);

            prop_assert_eq!(vector.len(), 384);

            let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            prop_assert!(
                (magnitude - 1.0).abs() < 1e-4,
                "L2 norm should be 1.0, got {}",
                magnitude
            );

            for val in &vector {
                prop_assert!(val.is_finite());
            }
        }

        /// Dimension follows the constructor argument, not the input text.
        #[test]
        fn proptest_dimension_config(dim in 1usize..1024usize) {
            let encoder = LocalEncoder::new(dim);
            let vector = encoder.deterministic_vector("dimension probe");
            prop_assert_eq!(vector.len(), dim);
        }
    }
}

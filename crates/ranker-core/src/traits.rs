use anyhow::Result;
use async_trait::async_trait;

/// Maps text to fixed-dimension vectors.
///
/// Implementations must be deterministic for a given model and return one
/// vector per input, in input order, all of the same length.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Stable identifier of the model, used in logs and result output.
    fn model_id(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

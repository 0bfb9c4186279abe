use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use ranker_core::traits::Embedder;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Sentence embeddings computed in-process with fastembed (ONNX, CPU).
///
/// The model is loaded once in [`LocalEmbedder::new`]; calls are serialised
/// behind a mutex and run on the blocking pool.
pub struct LocalEmbedder {
    model_id: String,
    model: Arc<Mutex<TextEmbedding>>,
}

impl LocalEmbedder {
    pub fn new(model_name: &str) -> Result<Self> {
        let (embedding_model, model_id) = match resolve_model(model_name) {
            Some(found) => found,
            None => {
                warn!(
                    "Unknown local embedding model '{}', falling back to {}",
                    model_name, ALL_MINILM
                );
                (EmbeddingModel::AllMiniLML6V2, ALL_MINILM)
            }
        };

        let cache_dir = cache_dir();
        debug!("Loading {} (cache {})", model_id, cache_dir.display());
        let model = TextEmbedding::try_new(
            InitOptions::new(embedding_model)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(true),
        )
        .map_err(|e| anyhow!("Failed to initialize local embedding model: {}", e))?;

        Ok(Self {
            model_id: model_id.to_string(),
            model: Arc::new(Mutex::new(model)),
        })
    }

    pub fn is_known_model(name: &str) -> bool {
        resolve_model(name).is_some()
    }
}

const ALL_MINILM: &str = "sentence-transformers/all-MiniLM-L6-v2";
const BGE_SMALL: &str = "BAAI/bge-small-en-v1.5";
const BGE_BASE: &str = "BAAI/bge-base-en-v1.5";

fn resolve_model(name: &str) -> Option<(EmbeddingModel, &'static str)> {
    match name {
        ALL_MINILM | "all-MiniLM-L6-v2" | "AllMiniLML6V2" => {
            Some((EmbeddingModel::AllMiniLML6V2, ALL_MINILM))
        }
        BGE_SMALL | "BGESmallENV15" => Some((EmbeddingModel::BGESmallENV15, BGE_SMALL)),
        BGE_BASE | "BGEBaseEN" | "BGEBaseENV15" => Some((EmbeddingModel::BGEBaseENV15, BGE_BASE)),
        _ => None,
    }
}

/// Shared cache so models are not downloaded once per working directory
fn cache_dir() -> PathBuf {
    std::env::var("FASTEMBED_CACHE_PATH")
        .ok()
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| format!("{}/.cache/fastembed", home))
        })
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".fastembed_cache"))
}

#[async_trait]
impl Embedder for LocalEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut list = self.embed_batch(&[text.to_string()]).await?;
        list.pop().ok_or_else(|| anyhow!("Empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();
        tokio::task::spawn_blocking(move || {
            let model = model
                .lock()
                .map_err(|_| anyhow!("local embedding model lock poisoned"))?;
            model
                .embed(texts, None)
                .map_err(|e| anyhow!("Failed to generate embeddings: {}", e))
        })
        .await
        .map_err(|e| anyhow!("embedding task failed: {}", e))?
    }
}

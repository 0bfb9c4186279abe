use crate::local::LocalEmbedder;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ranker_config::{EmbeddingBackend, EmbeddingConfig};
use ranker_core::traits::Embedder;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::sync::Arc;
use tracing::info;

const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "text-embedding-3-small";
const DEFAULT_OLLAMA_BASE: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "nomic-embed-text";

/// Build the embedder named by `config.backend`.
///
/// The returned handle is created once and shared for the whole run; the
/// local backend loads its model here, not per call.
pub async fn select_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder + Send + Sync>> {
    let embedder: Arc<dyn Embedder + Send + Sync> = match config.backend {
        EmbeddingBackend::Local => {
            let model_name = config.model_name.clone();
            let local = tokio::task::spawn_blocking(move || LocalEmbedder::new(&model_name))
                .await
                .context("local embedder initialisation panicked")??;
            Arc::new(local)
        }
        EmbeddingBackend::External => {
            let api_key = env::var("OPENAI_API_KEY")
                .map_err(|_| anyhow!("OPENAI_API_KEY must be set for the openai embedding backend"))?;
            let model = remote_model_name(config, DEFAULT_OPENAI_MODEL);
            let base = config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE.to_string());
            Arc::new(ExternalEmbedder::new(model, api_key, base))
        }
        EmbeddingBackend::Ollama => {
            let model = remote_model_name(config, DEFAULT_OLLAMA_MODEL);
            let base = config
                .api_base
                .clone()
                .or_else(|| env::var("OLLAMA_BASE_URL").ok())
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE.to_string());
            Arc::new(OllamaEmbedder::new(model, base))
        }
    };
    info!("Using embedding model {}", embedder.model_id());
    Ok(embedder)
}

/// The configured model, unless it is a local model id left over from the defaults.
fn remote_model_name(config: &EmbeddingConfig, fallback: &str) -> String {
    if config.model_name.is_empty() || LocalEmbedder::is_known_model(&config.model_name) {
        fallback.to_string()
    } else {
        config.model_name.clone()
    }
}

pub struct ExternalEmbedder {
    model: String,
    api_key: String,
    base_url: String,
    client: Client,
}

impl ExternalEmbedder {
    pub fn new(model: String, api_key: String, base_url: String) -> Self {
        Self {
            model,
            api_key,
            base_url,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingItem {
    index: Option<usize>,
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for ExternalEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut list = self.embed_batch(&[text.to_string()]).await?;
        list.pop().ok_or_else(|| anyhow!("Empty embedding response"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "input": texts,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI embeddings failed ({}): {}", status, body));
        }

        let mut parsed: OpenAIEmbeddingResponse = resp.json().await?;
        if parsed.data.len() != texts.len() {
            return Err(anyhow!(
                "Mismatch embedding count: got {}, expected {}",
                parsed.data.len(),
                texts.len()
            ));
        }
        // The API may return items out of order
        parsed.data.sort_by_key(|d| d.index.unwrap_or(usize::MAX));
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

pub struct OllamaEmbedder {
    model: String,
    base_url: String,
    client: Client,
}

impl OllamaEmbedder {
    pub fn new(model: String, base_url: String) -> Self {
        Self {
            model,
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let resp = self
            .client
            .post(format!(
                "{}/api/embeddings",
                self.base_url.trim_end_matches('/')
            ))
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": text,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Ollama embeddings failed ({}): {}", status, body));
        }

        let json: serde_json::Value = resp.json().await?;
        let embedding = json["embedding"]
            .as_array()
            .ok_or_else(|| anyhow!("No embedding field in Ollama response"))?
            .iter()
            .filter_map(|v| v.as_f64())
            .map(|f| f as f32)
            .collect::<Vec<f32>>();
        if embedding.is_empty() {
            return Err(anyhow!("Ollama returned an empty embedding"));
        }
        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }
}

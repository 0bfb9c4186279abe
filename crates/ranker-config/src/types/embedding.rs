//! Embedding provider configuration

use serde::{Deserialize, Serialize};

/// Embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbeddingConfig {
    /// Embedding backend to use
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Model name for the selected backend
    ///
    /// Examples:
    /// - Local: "sentence-transformers/all-MiniLM-L6-v2", "BAAI/bge-small-en-v1.5"
    /// - OpenAI: "text-embedding-3-small"
    /// - Ollama: "nomic-embed-text"
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Texts sent to the backend per call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Optional base URL override for the remote backends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

/// Embedding backend options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// OpenAI-compatible embeddings API (requires OPENAI_API_KEY)
    #[serde(rename = "openai")]
    External,

    /// Local fastembed (CPU-based, no API needed)
    Local,

    /// Local Ollama server
    Ollama,
}

impl EmbeddingBackend {
    pub const OPTIONS: &'static [&'static str] = &["local", "openai", "ollama"];
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Local,
            model_name: default_model_name(),
            batch_size: default_batch_size(),
            api_base: None,
        }
    }
}

impl Default for EmbeddingBackend {
    fn default() -> Self {
        EmbeddingBackend::Local
    }
}

impl crate::validation::Validate for EmbeddingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        if self.model_name.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "embedding.model_name".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        validate_positive("embedding.batch_size", self.batch_size, 0)?;

        if let Some(api_base) = &self.api_base {
            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    field: "embedding.api_base".to_string(),
                    message: format!(
                        "API base must start with http:// or https://, got: {}",
                        api_base
                    ),
                });
            }
        }

        Ok(())
    }
}

fn default_model_name() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_batch_size() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        let config = EmbeddingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend, EmbeddingBackend::Local);
    }

    #[test]
    fn test_empty_model_name_invalid() {
        let config = EmbeddingConfig {
            model_name: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_batch_size_invalid() {
        let config = EmbeddingConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_serialization() {
        assert_eq!(
            serde_json::to_string(&EmbeddingBackend::External).unwrap(),
            "\"openai\""
        );
        assert_eq!(
            serde_json::to_string(&EmbeddingBackend::Local).unwrap(),
            "\"local\""
        );
    }
}
